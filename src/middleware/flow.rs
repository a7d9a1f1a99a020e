use super::traits::TokenExchange;
use crate::error::Error;
use crate::types::{ExchangedToken, TokenLifetime};

/// Why a login callback did not produce a session.
#[derive(Debug, thiserror::Error)]
pub enum LoginFailure {
    /// Provider redirected back with an `error` parameter.
    #[error("provider reported error: {0}")]
    ProviderDenied(String),

    /// Callback had no usable authorization code.
    #[error("missing authorization code")]
    MissingCode,

    /// Either exchange call failed.
    #[error("token exchange failed: {0}")]
    Exchange(#[from] Error),
}

/// Result of handling the provider callback.
pub type LoginOutcome = Result<ExchangedToken, LoginFailure>;

/// Drive the two-step token exchange for a callback.
///
/// An empty `error` parameter counts as absent. Step 2 runs only after step 1
/// yields a token, and a long-lived response without `access_token` degrades
/// to the short-lived token.
pub async fn complete_login<E: TokenExchange>(
    exchange: &E,
    code: Option<&str>,
    error: Option<&str>,
) -> LoginOutcome {
    if let Some(error) = error.filter(|e| !e.is_empty()) {
        return Err(LoginFailure::ProviderDenied(error.to_string()));
    }

    let code = code
        .filter(|c| !c.is_empty())
        .ok_or(LoginFailure::MissingCode)?;

    let short_lived = exchange
        .exchange_code(code)
        .await?
        .access_token()
        .ok_or(Error::MissingAccessToken {
            operation: "token exchange",
        })?;

    let long_lived = exchange.exchange_long_lived(&short_lived).await?;

    let exchanged = ExchangedToken::resolve(short_lived, long_lived.access_token);
    if exchanged.lifetime == TokenLifetime::Short {
        tracing::warn!("Long-lived exchange returned no access_token; keeping short-lived token");
    }

    Ok(exchanged)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::oauth::TokenResponse;
    use crate::types::AccessToken;

    /// Scripted provider that counts how often each step is called.
    struct Scripted {
        step1: fn() -> Result<TokenResponse, Error>,
        step2: fn() -> Result<TokenResponse, Error>,
        step1_calls: AtomicUsize,
        step2_calls: AtomicUsize,
        seen_short: std::sync::Mutex<Option<String>>,
    }

    impl Scripted {
        fn new(
            step1: fn() -> Result<TokenResponse, Error>,
            step2: fn() -> Result<TokenResponse, Error>,
        ) -> Self {
            Self {
                step1,
                step2,
                step1_calls: AtomicUsize::new(0),
                step2_calls: AtomicUsize::new(0),
                seen_short: std::sync::Mutex::new(None),
            }
        }
    }

    impl TokenExchange for Scripted {
        async fn exchange_code(&self, _code: &str) -> Result<TokenResponse, Error> {
            self.step1_calls.fetch_add(1, Ordering::SeqCst);
            (self.step1)()
        }

        async fn exchange_long_lived(
            &self,
            short_lived: &AccessToken,
        ) -> Result<TokenResponse, Error> {
            self.step2_calls.fetch_add(1, Ordering::SeqCst);
            *self.seen_short.lock().unwrap() = Some(short_lived.as_str().to_string());
            (self.step2)()
        }
    }

    fn short1() -> Result<TokenResponse, Error> {
        Ok(TokenResponse::with_access_token("short1"))
    }

    fn long1() -> Result<TokenResponse, Error> {
        Ok(TokenResponse::with_access_token("long1"))
    }

    fn empty() -> Result<TokenResponse, Error> {
        Ok(TokenResponse::default())
    }

    fn transport_error() -> Result<TokenResponse, Error> {
        Err(Error::OAuth {
            operation: "token exchange",
            status: None,
            detail: "connection refused".into(),
        })
    }

    #[tokio::test]
    async fn test_success_uses_long_lived_token() {
        let provider = Scripted::new(short1, long1);
        let token = complete_login(&provider, Some("abc"), None).await.unwrap();

        assert_eq!(token.token.as_str(), "long1");
        assert_eq!(token.lifetime, TokenLifetime::Long);
        assert_eq!(
            provider.seen_short.lock().unwrap().as_deref(),
            Some("short1")
        );
    }

    #[tokio::test]
    async fn test_missing_long_lived_falls_back_to_short() {
        let provider = Scripted::new(short1, empty);
        let token = complete_login(&provider, Some("abc"), None).await.unwrap();

        assert_eq!(token.token.as_str(), "short1");
        assert_eq!(token.lifetime, TokenLifetime::Short);
    }

    #[tokio::test]
    async fn test_provider_error_skips_exchange() {
        let provider = Scripted::new(short1, long1);
        let outcome = complete_login(&provider, None, Some("access_denied")).await;

        assert!(matches!(outcome, Err(LoginFailure::ProviderDenied(ref e)) if e == "access_denied"));
        assert_eq!(provider.step1_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_error_wins_over_code() {
        let provider = Scripted::new(short1, long1);
        let outcome = complete_login(&provider, Some("abc"), Some("access_denied")).await;

        assert!(matches!(outcome, Err(LoginFailure::ProviderDenied(_))));
        assert_eq!(provider.step1_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_error_is_ignored() {
        let provider = Scripted::new(short1, long1);
        let token = complete_login(&provider, Some("abc"), Some("")).await.unwrap();

        assert_eq!(token.token.as_str(), "long1");
        assert_eq!(provider.step1_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_missing_or_empty_code() {
        let provider = Scripted::new(short1, long1);

        assert!(matches!(
            complete_login(&provider, None, None).await,
            Err(LoginFailure::MissingCode)
        ));
        assert!(matches!(
            complete_login(&provider, Some(""), None).await,
            Err(LoginFailure::MissingCode)
        ));
        assert_eq!(provider.step1_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_step1_failure_never_calls_step2() {
        let provider = Scripted::new(transport_error, long1);
        let outcome = complete_login(&provider, Some("abc"), None).await;

        assert!(matches!(outcome, Err(LoginFailure::Exchange(_))));
        assert_eq!(provider.step1_calls.load(Ordering::SeqCst), 1);
        assert_eq!(provider.step2_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_step1_without_token_is_failure() {
        let provider = Scripted::new(empty, long1);
        let outcome = complete_login(&provider, Some("abc"), None).await;

        assert!(matches!(
            outcome,
            Err(LoginFailure::Exchange(Error::MissingAccessToken { .. }))
        ));
        assert_eq!(provider.step2_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_step2_failure_is_failure() {
        let provider = Scripted::new(short1, transport_error);
        let outcome = complete_login(&provider, Some("abc"), None).await;

        assert!(matches!(outcome, Err(LoginFailure::Exchange(_))));
        assert_eq!(provider.step2_calls.load(Ordering::SeqCst), 1);
    }
}
