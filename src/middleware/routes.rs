use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{StatusCode, header::LOCATION};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Json, Router};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use super::config::AuthConfig;
use super::cookies;
use super::extractor::is_authenticated;
use super::flow::{LoginFailure, complete_login};
use super::state::AuthState;
use super::traits::TokenExchange;

/// Create the Threads authentication router.
///
/// Routes (with default paths):
/// - `GET /api/auth/threads/start`: redirect to the provider
/// - `GET /api/auth/threads/callback`: exchange the code, set the session cookie
/// - `GET /logout`: clear the session cookie
/// - `GET /api/auth/status`: `{"authenticated": bool}`
pub fn auth_routes<E>(config: AuthConfig, exchange: E) -> Router
where
    E: TokenExchange,
{
    let auth_path = config.settings.auth_path.clone();
    let logout_path = config.settings.logout_path.clone();

    let state = AuthState {
        exchange: Arc::new(exchange),
        authorize_url: Arc::new(config.threads.authorization_url()),
        settings: config.settings,
    };

    Router::new()
        .route(&format!("{auth_path}/start"), get(start::<E>))
        .route(&format!("{auth_path}/callback"), get(callback::<E>))
        .route(&logout_path, get(logout::<E>))
        .route("/api/auth/status", get(status::<E>))
        .with_state(state)
}

// ── Start ──────────────────────────────────────────────────────────

async fn start<E: TokenExchange>(State(state): State<AuthState<E>>) -> Redirect {
    Redirect::temporary(state.authorize_url.as_str())
}

// ── Callback ───────────────────────────────────────────────────────

#[derive(Deserialize)]
struct CallbackParams {
    code: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

async fn callback<E: TokenExchange>(
    State(state): State<AuthState<E>>,
    jar: CookieJar,
    Query(params): Query<CallbackParams>,
) -> Response {
    let outcome = complete_login(
        state.exchange.as_ref(),
        params.code.as_deref(),
        params.error.as_deref(),
    )
    .await;

    let exchanged = match outcome {
        Ok(exchanged) => exchanged,
        Err(LoginFailure::ProviderDenied(error)) => {
            let desc = params.error_description.as_deref().unwrap_or("Unknown error");
            tracing::warn!(error = %error, description = %desc, "OAuth2 error from Threads");
            return found(&state.settings.login_redirect(false));
        }
        Err(e @ LoginFailure::MissingCode) => {
            tracing::warn!(error = %e, "OAuth2 callback rejected");
            return found(&state.settings.login_redirect(false));
        }
        Err(LoginFailure::Exchange(e)) => {
            tracing::error!(error = %e, "Token exchange failed");
            return found(&state.settings.login_redirect(false));
        }
    };

    let session_cookie = cookies::session_cookie(
        &state.settings.session_cookie_name,
        &exchanged.token,
        state.settings.session_ttl_days,
        state.settings.secure_cookies,
    );

    tracing::info!(lifetime = ?exchanged.lifetime, "Threads OAuth2 login successful");
    tracing::debug!(token = exchanged.token.preview(), "Session token issued");

    (
        jar.add(session_cookie),
        found(&state.settings.login_redirect(true)),
    )
        .into_response()
}

// ── Logout ─────────────────────────────────────────────────────────

async fn logout<E: TokenExchange>(State(state): State<AuthState<E>>, jar: CookieJar) -> Response {
    let clear_cookie = cookies::clear_session_cookie(&state.settings.session_cookie_name);
    tracing::info!("Logged out, session cookie cleared");
    (jar.add(clear_cookie), found(state.settings.frontend_url.as_str())).into_response()
}

// ── Status ─────────────────────────────────────────────────────────

#[derive(Serialize)]
struct StatusResponse {
    authenticated: bool,
}

async fn status<E: TokenExchange>(
    State(state): State<AuthState<E>>,
    jar: CookieJar,
) -> Json<StatusResponse> {
    let authenticated = is_authenticated(&jar, &state.settings.session_cookie_name);
    tracing::debug!(authenticated, "Auth status check");
    Json(StatusResponse { authenticated })
}

// ── Helpers ────────────────────────────────────────────────────────

/// `302 Found` redirect.
fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(LOCATION, location.to_string())]).into_response()
}
