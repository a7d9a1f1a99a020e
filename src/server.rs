//! Application router: auth routes, the replies proxy, CORS, and request tracing.

use std::net::SocketAddr;

use axum::extract::{FromRef, Query, State};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::Error;
use crate::html;
use crate::middleware::{AuthConfig, AuthSettings, SessionToken, auth_routes, read_token};
use crate::oauth::ThreadsClient;
use crate::replies::{DEFAULT_LIMIT, MAX_LIMIT, ReplySummary, filter_replies};

/// Listener and CORS settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            allowed_origins: vec![
                "http://127.0.0.1:5173".into(),
                "https://yourdomain.com".into(),
            ],
        }
    }
}

impl ServerConfig {
    /// Read `BIND_ADDR` and `ALLOWED_ORIGINS` (comma-separated), falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `BIND_ADDR` is not a socket address, or if
    /// `ALLOWED_ORIGINS` contains `*` (credentials are allowed, so origins must be explicit).
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// # Errors
    ///
    /// Same as [`from_env`](Self::from_env).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let mut config = Self::default();

        if let Some(addr) = lookup("BIND_ADDR") {
            config.bind_addr = addr
                .parse()
                .map_err(|e| Error::Config(format!("BIND_ADDR: {e}")))?;
        }
        if let Some(origins) = lookup("ALLOWED_ORIGINS") {
            config.allowed_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect();
            if config.allowed_origins.iter().any(|o| o == "*") {
                return Err(Error::Config(
                    "ALLOWED_ORIGINS: wildcard not allowed with credentials".into(),
                ));
            }
        }

        Ok(config)
    }

    fn cors_layer(&self) -> CorsLayer {
        let origins: Vec<HeaderValue> = self
            .allowed_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(_) if origin == "*" => {
                    tracing::warn!("Ignoring wildcard CORS origin");
                    None
                }
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_credentials(true)
            .allow_methods(AllowMethods::mirror_request())
            .allow_headers(AllowHeaders::mirror_request())
    }
}

/// State for the replies routes.
#[derive(Clone)]
struct AppState {
    client: ThreadsClient,
    settings: AuthSettings,
    start_path: String,
}

impl FromRef<AppState> for AuthSettings {
    fn from_ref(state: &AppState) -> Self {
        state.settings.clone()
    }
}

/// Build the full application router around one shared [`ThreadsClient`].
pub fn app(config: AuthConfig, client: ThreadsClient, server: &ServerConfig) -> Router {
    let state = AppState {
        client: client.clone(),
        settings: config.settings().clone(),
        start_path: format!("{}/start", config.settings().auth_path),
    };

    let replies = Router::new()
        .route("/", get(home))
        .route("/api/threads", get(api_threads))
        .route("/threads", post(threads_page))
        .with_state(state);

    Router::new()
        .merge(auth_routes(config, client))
        .merge(replies)
        .layer(server.cors_layer())
        .layer(TraceLayer::new_for_http())
}

// ── Home ───────────────────────────────────────────────────────────

async fn home(State(state): State<AppState>) -> Html<String> {
    Html(html::home_page(
        state.settings.frontend_url().as_str(),
        &state.start_path,
    ))
}

// ── JSON replies ───────────────────────────────────────────────────

#[derive(Deserialize)]
struct RepliesQuery {
    limit: Option<u32>,
    #[serde(default)]
    q: String,
}

async fn api_threads(
    SessionToken(token): SessionToken,
    State(state): State<AppState>,
    Query(query): Query<RepliesQuery>,
) -> Response {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    if !(1..=MAX_LIMIT).contains(&limit) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "invalid_limit", "detail": format!("limit must be between 1 and {MAX_LIMIT}") })),
        )
            .into_response();
    }

    let replies = match state.client.fetch_replies(&token, limit).await {
        Ok(replies) => replies,
        Err(Error::Upstream { status, body }) => {
            tracing::warn!(status, "Threads API error");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "threads_api_error", "status_code": status, "raw": body })),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!(error = %e, "Replies request failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "backend_exception", "detail": e.to_string() })),
            )
                .into_response();
        }
    };

    let results: Vec<ReplySummary> = filter_replies(replies, &query.q)
        .into_iter()
        .map(ReplySummary::from)
        .collect();

    Json(json!({ "results": results })).into_response()
}

// ── HTML replies ───────────────────────────────────────────────────

#[derive(Deserialize)]
struct RepliesForm {
    limit: u32,
    #[serde(default)]
    keywords: String,
}

async fn threads_page(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<RepliesForm>,
) -> Html<String> {
    let frontend = state.settings.frontend_url().as_str();

    let Some(token) = read_token(&jar, state.settings.session_cookie_name()) else {
        return Html(html::login_prompt(frontend, &state.start_path));
    };
    tracing::debug!(token = token.preview(), limit = form.limit, "Replies page query");

    let replies = match state.client.fetch_replies(&token, form.limit).await {
        Ok(replies) => replies,
        Err(e) => {
            tracing::error!(error = %e, "Replies request failed");
            return Html(html::api_error(frontend, &e.to_string()));
        }
    };

    let filtered = filter_replies(replies, &form.keywords);
    if filtered.is_empty() {
        return Html(html::no_results(frontend));
    }

    Html(html::results(frontend, &filtered, form.limit, &form.keywords))
}
