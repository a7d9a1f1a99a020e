use std::sync::Arc;

use axum::extract::FromRef;
use url::Url;

use super::config::AuthSettings;

/// Shared state for auth route handlers.
pub(super) struct AuthState<E> {
    pub(super) exchange: Arc<E>,
    pub(super) authorize_url: Arc<Url>,
    pub(super) settings: AuthSettings,
}

// Manual Clone: avoid derive adding an `E: Clone` bound.
impl<E> Clone for AuthState<E> {
    fn clone(&self) -> Self {
        Self {
            exchange: self.exchange.clone(),
            authorize_url: self.authorize_url.clone(),
            settings: self.settings.clone(),
        }
    }
}

// SessionToken reads the cookie name from state
impl<E> FromRef<AuthState<E>> for AuthSettings {
    fn from_ref(state: &AuthState<E>) -> Self {
        state.settings.clone()
    }
}
