use std::future::Future;

use crate::error::Error;
use crate::oauth::{ThreadsClient, TokenResponse};
use crate::types::AccessToken;

/// The two provider calls the login callback depends on.
///
/// [`ThreadsClient`] is the production implementation. The callback only sees
/// this trait, so tests can script each step's outcome.
///
/// # Example
///
/// ```rust,ignore
/// struct Scripted;
///
/// impl TokenExchange for Scripted {
///     async fn exchange_code(&self, _code: &str) -> Result<TokenResponse, Error> {
///         Ok(TokenResponse::with_access_token("short1"))
///     }
///
///     async fn exchange_long_lived(&self, _short: &AccessToken) -> Result<TokenResponse, Error> {
///         Ok(TokenResponse::default())
///     }
/// }
/// ```
pub trait TokenExchange: Send + Sync + 'static {
    /// Authorization code → short-lived token.
    fn exchange_code(
        &self,
        code: &str,
    ) -> impl Future<Output = Result<TokenResponse, Error>> + Send;

    /// Short-lived token → long-lived token.
    fn exchange_long_lived(
        &self,
        short_lived: &AccessToken,
    ) -> impl Future<Output = Result<TokenResponse, Error>> + Send;
}

impl TokenExchange for ThreadsClient {
    fn exchange_code(
        &self,
        code: &str,
    ) -> impl Future<Output = Result<TokenResponse, Error>> + Send {
        ThreadsClient::exchange_code(self, code)
    }

    fn exchange_long_lived(
        &self,
        short_lived: &AccessToken,
    ) -> impl Future<Output = Result<TokenResponse, Error>> + Send {
        ThreadsClient::exchange_long_lived(self, short_lived)
    }
}
