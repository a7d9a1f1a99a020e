use url::Url;

use super::cookies::SESSION_COOKIE_NAME;
use crate::error::Error;
use crate::oauth::ThreadsConfig;

/// Shared auth settings used by both config and runtime state.
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub(crate) session_cookie_name: String,
    pub(crate) session_ttl_days: i64,
    pub(crate) secure_cookies: bool,
    pub(crate) auth_path: String,
    pub(crate) logout_path: String,
    pub(crate) frontend_url: Url,
}

impl AuthSettings {
    fn defaults() -> Self {
        Self {
            session_cookie_name: SESSION_COOKIE_NAME.into(),
            session_ttl_days: 30,
            secure_cookies: true,
            auth_path: "/api/auth/threads".into(),
            logout_path: "/logout".into(),
            frontend_url: "https://subdomain.yourdomain.com/"
                .parse()
                .expect("valid default URL"),
        }
    }

    #[must_use]
    pub fn session_cookie_name(&self) -> &str {
        &self.session_cookie_name
    }

    #[must_use]
    pub fn frontend_url(&self) -> &Url {
        &self.frontend_url
    }

    /// Landing URL with the `login=success|failed` indicator.
    #[must_use]
    pub fn login_redirect(&self, success: bool) -> String {
        let mut url = self.frontend_url.clone();
        url.query_pairs_mut()
            .append_pair("login", if success { "success" } else { "failed" });
        url.into()
    }
}

/// Threads authentication configuration.
///
/// Required field (`threads`) is a constructor parameter: no runtime "missing field" errors.
///
/// Use [`from_env()`](AuthConfig::from_env) for convention-based setup,
/// or [`new()`](AuthConfig::new) with `with_*` methods for full control.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub(crate) threads: ThreadsConfig,
    pub(crate) settings: AuthSettings,
}

impl AuthConfig {
    /// Create config with the required `ThreadsConfig`.
    ///
    /// All optional fields use sensible defaults. Override with `with_*` methods.
    #[must_use]
    pub fn new(threads: ThreadsConfig) -> Self {
        Self {
            threads,
            settings: AuthSettings::defaults(),
        }
    }

    /// Create config from environment variables.
    ///
    /// # Required env vars
    /// - `CLIENT_ID`: Threads app ID
    /// - `CLIENT_SECRET`: Threads app secret
    /// - `REDIRECT_URI`: OAuth2 callback URI (must be a valid URL)
    ///
    /// # Optional env vars
    /// - `THREADS_AUTH_URL`: Override authorize endpoint
    /// - `THREADS_TOKEN_URL`: Override code exchange endpoint
    /// - `THREADS_LONG_LIVED_URL`: Override long-lived exchange endpoint
    /// - `THREADS_REPLIES_URL`: Override replies endpoint
    /// - `THREADS_SCOPES`: Comma-separated OAuth2 scopes
    /// - `FRONTEND_URL`: Landing page for login and logout redirects
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if required env vars are missing or URLs are invalid.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if required vars are missing or URLs are invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| Error::Config(format!("{key} is required")))
        };
        let parse_url = |key: &str, value: String| -> Result<Url, Error> {
            value
                .parse()
                .map_err(|e| Error::Config(format!("{key}: {e}")))
        };

        let client_id = required("CLIENT_ID")?;
        let client_secret = required("CLIENT_SECRET")?;
        let redirect_uri = parse_url("REDIRECT_URI", required("REDIRECT_URI")?)?;

        let mut threads = ThreadsConfig::new(client_id, client_secret, redirect_uri);

        if let Some(value) = lookup("THREADS_AUTH_URL") {
            threads = threads.with_auth_url(parse_url("THREADS_AUTH_URL", value)?);
        }
        if let Some(value) = lookup("THREADS_TOKEN_URL") {
            threads = threads.with_token_url(parse_url("THREADS_TOKEN_URL", value)?);
        }
        if let Some(value) = lookup("THREADS_LONG_LIVED_URL") {
            threads = threads.with_long_lived_url(parse_url("THREADS_LONG_LIVED_URL", value)?);
        }
        if let Some(value) = lookup("THREADS_REPLIES_URL") {
            threads = threads.with_replies_url(parse_url("THREADS_REPLIES_URL", value)?);
        }
        if let Some(scopes) = lookup("THREADS_SCOPES") {
            threads =
                threads.with_scopes(scopes.split(',').map(|s| s.trim().to_string()).collect());
        }

        let mut config = Self::new(threads);
        if let Some(value) = lookup("FRONTEND_URL") {
            config = config.with_frontend_url(parse_url("FRONTEND_URL", value)?);
        }

        Ok(config)
    }

    #[must_use]
    pub fn threads(&self) -> &ThreadsConfig {
        &self.threads
    }

    #[must_use]
    pub fn settings(&self) -> &AuthSettings {
        &self.settings
    }

    #[must_use]
    pub fn with_session_cookie_name(mut self, name: impl Into<String>) -> Self {
        self.settings.session_cookie_name = name.into();
        self
    }

    #[must_use]
    pub fn with_session_ttl_days(mut self, days: i64) -> Self {
        self.settings.session_ttl_days = days;
        self
    }

    #[must_use]
    pub fn with_secure_cookies(mut self, secure: bool) -> Self {
        self.settings.secure_cookies = secure;
        self
    }

    #[must_use]
    pub fn with_auth_path(mut self, path: impl Into<String>) -> Self {
        self.settings.auth_path = path.into();
        self
    }

    #[must_use]
    pub fn with_logout_path(mut self, path: impl Into<String>) -> Self {
        self.settings.logout_path = path.into();
        self
    }

    #[must_use]
    pub fn with_frontend_url(mut self, url: Url) -> Self {
        self.settings.frontend_url = url;
        self
    }
}
