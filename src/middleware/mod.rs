//! Cookie-backed Threads login for Axum.
//!
//! This module owns the OAuth2 round trip and the session cookie: it redirects
//! to Threads, exchanges the returned code for a long-lived token, and stores
//! that token in the `threads_session` cookie. There is no server-side session
//! store; the cookie is the whole session.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use threads_replies::ThreadsClient;
//! use threads_replies::middleware::{AuthConfig, SessionToken, auth_routes};
//!
//! // 1. Configure from environment (CLIENT_ID, CLIENT_SECRET, REDIRECT_URI)
//! let config = AuthConfig::from_env()?;
//!
//! // 2. Mount auth routes
//! let client = ThreadsClient::new(config.threads().clone());
//! let app = axum::Router::new().merge(auth_routes(config, client));
//!
//! // 3. Use SessionToken in protected handlers
//! async fn protected(SessionToken(token): SessionToken) { /* ... */ }
//! ```

mod config;
mod cookies;
mod error;
mod extractor;
mod flow;
mod routes;
mod state;
mod traits;

pub use config::{AuthConfig, AuthSettings};
pub use cookies::SESSION_COOKIE_NAME;
pub use error::AuthError;
pub use extractor::{SessionToken, is_authenticated, read_token};
pub use flow::{LoginFailure, LoginOutcome, complete_login};
pub use routes::auth_routes;
pub use traits::TokenExchange;
