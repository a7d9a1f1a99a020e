use derive_more::{From, Into};

/// Opaque Threads bearer credential.
///
/// Never parsed or validated locally. `Debug` is redacted so the value does not
/// leak through `tracing` fields; use [`preview`](Self::preview) for log output.
#[derive(Clone, PartialEq, Eq, Hash, From, Into)]
pub struct AccessToken(String);

impl AccessToken {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First 6 characters, for debug log lines.
    #[must_use]
    pub fn preview(&self) -> &str {
        match self.0.char_indices().nth(6) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl From<&str> for AccessToken {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Which exchange step produced the session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenLifetime {
    /// Long-lived exchange omitted `access_token`; the short-lived token was kept.
    Short,
    Long,
}

/// Effective token after the two-step exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangedToken {
    pub token: AccessToken,
    pub lifetime: TokenLifetime,
}

impl ExchangedToken {
    /// Apply the long-lived fallback: keep `short` unless `long` is present and non-empty.
    #[must_use]
    pub fn resolve(short: AccessToken, long: Option<String>) -> Self {
        match long.filter(|t| !t.is_empty()) {
            Some(token) => Self {
                token: AccessToken(token),
                lifetime: TokenLifetime::Long,
            },
            None => Self {
                token: short,
                lifetime: TokenLifetime::Short,
            },
        }
    }
}
