use serde::Deserialize;
use url::Url;

use crate::error::Error;
use crate::types::AccessToken;

/// Threads `OAuth2` configuration.
///
/// Required fields are constructor parameters: no runtime "missing field" errors.
///
/// ```rust,ignore
/// use threads_replies::ThreadsConfig;
///
/// let config = ThreadsConfig::new("app-id", "app-secret", "https://my-app.com/callback".parse()?);
/// // Optional overrides via chaining:
/// let config = config
///     .with_token_url("http://127.0.0.1:9000/oauth/access_token".parse()?);
/// ```
#[derive(Clone)]
#[non_exhaustive]
pub struct ThreadsConfig {
    pub(crate) client_id: String,
    pub(crate) client_secret: String,
    pub(crate) redirect_uri: Url,
    pub(crate) auth_url: Url,
    pub(crate) token_url: Url,
    pub(crate) long_lived_url: Url,
    pub(crate) replies_url: Url,
    pub(crate) scopes: Vec<String>,
}

/// Scopes requested by default.
pub const DEFAULT_SCOPES: &[&str] = &[
    "threads_basic",
    "threads_content_publish",
    "threads_manage_replies",
    "threads_manage_insights",
    "threads_read_replies",
];

impl ThreadsConfig {
    /// Create a new Threads OAuth2 configuration.
    ///
    /// Required fields are parameters: compile-time enforcement, no `Result`.
    #[must_use]
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: Url,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri,
            auth_url: "https://threads.net/oauth/authorize"
                .parse()
                .expect("valid default URL"),
            token_url: "https://graph.threads.net/oauth/access_token"
                .parse()
                .expect("valid default URL"),
            long_lived_url: "https://graph.threads.net/access_token"
                .parse()
                .expect("valid default URL"),
            replies_url: "https://graph.threads.net/v1.0/me/replies"
                .parse()
                .expect("valid default URL"),
            scopes: DEFAULT_SCOPES.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    /// Override the authorization endpoint.
    #[must_use]
    pub fn with_auth_url(mut self, url: Url) -> Self {
        self.auth_url = url;
        self
    }

    /// Override the code-for-token endpoint.
    #[must_use]
    pub fn with_token_url(mut self, url: Url) -> Self {
        self.token_url = url;
        self
    }

    /// Override the short-to-long-lived exchange endpoint.
    #[must_use]
    pub fn with_long_lived_url(mut self, url: Url) -> Self {
        self.long_lived_url = url;
        self
    }

    /// Override the replies endpoint.
    #[must_use]
    pub fn with_replies_url(mut self, url: Url) -> Self {
        self.replies_url = url;
        self
    }

    /// Override the OAuth2 scopes (default: [`DEFAULT_SCOPES`]).
    #[must_use]
    pub fn with_scopes(mut self, scopes: Vec<String>) -> Self {
        self.scopes = scopes;
        self
    }

    /// Build the provider authorization URL.
    ///
    /// The flow is stateless: no `state` parameter is generated or stored, so
    /// the URL is the same on every call.
    #[must_use]
    pub fn authorization_url(&self) -> Url {
        let scope = self.scopes.join(",");

        let mut url = self.auth_url.clone();
        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", self.redirect_uri.as_str())
            .append_pair("scope", &scope)
            .append_pair("response_type", "code");
        url
    }

    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    #[must_use]
    pub fn redirect_uri(&self) -> &Url {
        &self.redirect_uri
    }

    #[must_use]
    pub fn auth_url(&self) -> &Url {
        &self.auth_url
    }

    #[must_use]
    pub fn token_url(&self) -> &Url {
        &self.token_url
    }

    #[must_use]
    pub fn long_lived_url(&self) -> &Url {
        &self.long_lived_url
    }

    #[must_use]
    pub fn replies_url(&self) -> &Url {
        &self.replies_url
    }

    #[must_use]
    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }
}

impl std::fmt::Debug for ThreadsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThreadsConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("redirect_uri", &self.redirect_uri.as_str())
            .field("auth_url", &self.auth_url.as_str())
            .field("token_url", &self.token_url.as_str())
            .field("long_lived_url", &self.long_lived_url.as_str())
            .field("replies_url", &self.replies_url.as_str())
            .field("scopes", &self.scopes)
            .finish()
    }
}

/// Token endpoint response.
///
/// Both exchange endpoints answer with this shape. Every field is optional:
/// a missing `access_token` is handled by the caller, not by decoding.
#[derive(Debug, Clone, Default, Deserialize)]
#[non_exhaustive]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

impl TokenResponse {
    /// Response carrying only an access token.
    #[must_use]
    pub fn with_access_token(token: impl Into<String>) -> Self {
        Self {
            access_token: Some(token.into()),
            ..Self::default()
        }
    }

    /// The access token, if present and non-empty.
    #[must_use]
    pub fn access_token(&self) -> Option<AccessToken> {
        self.access_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .map(AccessToken::from)
    }
}

/// `OAuth2` client for the Threads Graph API.
///
/// Cheap to clone: the inner `reqwest::Client` shares its connection pool.
#[derive(Clone)]
pub struct ThreadsClient {
    config: ThreadsConfig,
    http: reqwest::Client,
}

impl ThreadsClient {
    #[must_use]
    pub fn new(config: ThreadsConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Use a custom HTTP client (for connection pool reuse or testing).
    #[must_use]
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http = client;
        self
    }

    #[must_use]
    pub fn config(&self) -> &ThreadsConfig {
        &self.config
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Provider authorization URL, see [`ThreadsConfig::authorization_url`].
    #[must_use]
    pub fn authorization_url(&self) -> Url {
        self.config.authorization_url()
    }

    /// Exchange an authorization code for a short-lived token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] on network or decoding failure, or
    /// [`Error::OAuth`] if the token endpoint returns a non-2xx status.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenResponse, Error> {
        let params = [
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("grant_type", "authorization_code"),
            ("redirect_uri", self.config.redirect_uri.as_str()),
            ("code", code),
        ];

        let response = self
            .http
            .post(self.config.token_url.clone())
            .form(&params)
            .send()
            .await?;

        let response = Self::ensure_success(response, "token exchange").await?;
        response.json::<TokenResponse>().await.map_err(Into::into)
    }

    /// Exchange a short-lived token for a long-lived one.
    ///
    /// A non-2xx status is logged but not fatal: its body is decoded like any
    /// other, and a body without `access_token` makes the caller keep the
    /// short-lived token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] on network failure or an undecodable body.
    pub async fn exchange_long_lived(
        &self,
        short_lived: &AccessToken,
    ) -> Result<TokenResponse, Error> {
        let params = [
            ("grant_type", "th_exchange_token"),
            ("client_secret", self.config.client_secret.as_str()),
            ("access_token", short_lived.as_str()),
        ];

        let response = self
            .http
            .get(self.config.long_lived_url.clone())
            .query(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::warn!(
                status = response.status().as_u16(),
                "Long-lived token exchange returned non-success status"
            );
        }

        response.json::<TokenResponse>().await.map_err(Into::into)
    }

    /// Checks HTTP response status; returns the response on success or an error with details.
    async fn ensure_success(
        response: reqwest::Response,
        operation: &'static str,
    ) -> Result<reqwest::Response, Error> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Err(Error::OAuth {
            operation,
            status: Some(status),
            detail: body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> ThreadsConfig {
        ThreadsConfig::new(
            "test-client",
            "test-secret",
            "https://example.com/api/auth/threads/callback"
                .parse()
                .unwrap(),
        )
    }

    #[test]
    fn test_authorization_url_params() {
        let client = ThreadsClient::new(test_config());
        let url = client.authorization_url();
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        assert_eq!(url.host_str(), Some("threads.net"));
        assert_eq!(url.path(), "/oauth/authorize");
        assert!(pairs.contains(&("client_id".into(), "test-client".into())));
        assert!(pairs.contains(&(
            "redirect_uri".into(),
            "https://example.com/api/auth/threads/callback".into()
        )));
        assert!(pairs.contains(&("response_type".into(), "code".into())));
        assert!(pairs.contains(&(
            "scope".into(),
            "threads_basic,threads_content_publish,threads_manage_replies,\
             threads_manage_insights,threads_read_replies"
                .into()
        )));
    }

    #[test]
    fn test_authorization_url_has_no_state_or_secret() {
        let client = ThreadsClient::new(test_config());
        let url = client.authorization_url();

        assert!(url.query_pairs().all(|(k, _)| k != "state"));
        assert!(!url.as_str().contains("test-secret"));
    }

    #[test]
    fn test_authorization_url_is_deterministic() {
        let client = ThreadsClient::new(test_config());
        assert_eq!(client.authorization_url(), client.authorization_url());
    }

    #[test]
    fn test_config_defaults() {
        let config = test_config();

        assert_eq!(config.client_id(), "test-client");
        assert_eq!(
            config.token_url().as_str(),
            "https://graph.threads.net/oauth/access_token"
        );
        assert_eq!(
            config.long_lived_url().as_str(),
            "https://graph.threads.net/access_token"
        );
        assert_eq!(
            config.replies_url().as_str(),
            "https://graph.threads.net/v1.0/me/replies"
        );
        assert_eq!(config.scopes().len(), DEFAULT_SCOPES.len());
    }

    #[test]
    fn test_config_with_overrides() {
        let config = test_config()
            .with_auth_url("https://custom.example.com/authorize".parse().unwrap())
            .with_scopes(vec!["threads_basic".into()]);

        assert_eq!(
            config.auth_url().as_str(),
            "https://custom.example.com/authorize"
        );
        assert_eq!(config.scopes(), &["threads_basic"]);
    }

    #[test]
    fn test_config_debug_redacts_secret() {
        let debug = format!("{:?}", test_config());
        assert!(!debug.contains("test-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_token_response_missing_fields() {
        let parsed: TokenResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.access_token().is_none());

        let parsed: TokenResponse =
            serde_json::from_str(r#"{"access_token":"tok","user_id":12345}"#).unwrap();
        assert_eq!(parsed.access_token().unwrap().as_str(), "tok");
    }
}
