#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("OAuth2 error during {operation}: {detail}")]
    OAuth {
        operation: &'static str,
        status: Option<u16>,
        detail: String,
    },
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{operation} response did not contain an access_token")]
    MissingAccessToken { operation: &'static str },
    #[error("Threads API returned {status}")]
    Upstream { status: u16, body: String },
    #[error("Configuration error: {0}")]
    Config(String),
}
