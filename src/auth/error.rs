use thiserror::Error;

/// Failure kinds surfaced by the token lifecycle.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Provider returned status {status}: {body}")]
    Provider { status: u16, body: String },
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error("No refresh token on record")]
    MissingRefreshToken,
    #[error("Callback URL carries no authorization code")]
    MissingAuthorizationCode,
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for AuthError {
    fn from(error: reqwest::Error) -> Self {
        Self::Network(error.to_string())
    }
}

impl From<std::io::Error> for AuthError {
    fn from(error: std::io::Error) -> Self {
        Self::Storage(error.to_string())
    }
}

impl From<serde_json::Error> for AuthError {
    fn from(error: serde_json::Error) -> Self {
        Self::Storage(error.to_string())
    }
}
