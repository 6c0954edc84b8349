use thiserror::Error;

/// Result type for storegate RPC operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for storegate RPC calls
#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Remote service error {code}: {message}")]
    Remote { code: i64, message: String },

    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

impl Error {
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    pub fn invalid_endpoint(msg: impl Into<String>) -> Self {
        Self::InvalidEndpoint(msg.into())
    }
}
