use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;

use super::config::AuthSettings;
use super::error::AuthError;
use crate::types::AccessToken;

/// Raw session token from the cookie jar, if present and non-empty.
///
/// The value is not parsed or checked against the provider; an expired or
/// revoked token only shows up when the downstream call fails.
#[must_use]
pub fn read_token(jar: &CookieJar, cookie_name: &str) -> Option<AccessToken> {
    jar.get(cookie_name)
        .map(|c| c.value())
        .filter(|v| !v.is_empty())
        .map(AccessToken::from)
}

/// Whether the request carries a non-empty session cookie.
#[must_use]
pub fn is_authenticated(jar: &CookieJar, cookie_name: &str) -> bool {
    read_token(jar, cookie_name).is_some()
}

/// Session token extracted from the session cookie.
///
/// Use as an Axum extractor in route handlers. Returns `401 Unauthorized`
/// with `{"error":"not_authenticated"}` if the cookie is absent.
///
/// # Example
///
/// ```rust,ignore
/// async fn replies(SessionToken(token): SessionToken, State(state): State<AppState>) -> Response {
///     state.client.fetch_replies(&token, 10).await
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SessionToken(pub AccessToken);

impl<S> FromRequestParts<S> for SessionToken
where
    S: Send + Sync,
    AuthSettings: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let settings = AuthSettings::from_ref(state);
        let jar = CookieJar::from_headers(&parts.headers);

        read_token(&jar, &settings.session_cookie_name)
            .map(SessionToken)
            .ok_or(AuthError::Unauthenticated)
    }
}
