//! Threads OAuth2 login with cookie-backed sessions, plus a filtered proxy for
//! the signed-in user's recent replies.
//!
//! - [`oauth`]: authorization URL and the two-step code → long-lived token exchange
//! - [`middleware`]: Axum login/logout routes and the `threads_session` cookie codec
//! - [`replies`]: replies fetch and keyword filtering
//! - [`server`]: the complete application router

pub mod error;
pub mod html;
pub mod middleware;
pub mod oauth;
pub mod replies;
pub mod server;
pub mod types;

// Re-exports for convenient access
pub use error::Error;
pub use oauth::{DEFAULT_SCOPES, ThreadsClient, ThreadsConfig, TokenResponse};
pub use replies::{Reply, ReplySummary, filter_replies};
pub use types::{AccessToken, ExchangedToken, TokenLifetime};
