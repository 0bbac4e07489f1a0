//! Error types for the Radio Browser skill

/// Result type alias for skill operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when using the Radio Browser skill
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory API returned an error status
    #[error("API error: {0}")]
    ApiError(String),

    /// The on-disk result cache could not be opened
    ///
    /// Distinct from [`Error::Cache`] so callers can degrade to a
    /// cache-less search instead of failing the whole request.
    #[error("Station cache unavailable: {0}")]
    CacheUnavailable(String),

    /// A cache read or write failed after the store was opened
    #[error("Cache operation failed: {0}")]
    Cache(#[from] rusqlite::Error),

    /// Configuration error (from serde_yaml/anyhow)
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a generic error from a string
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Create an API error
    pub fn api_error(msg: impl Into<String>) -> Self {
        Self::ApiError(msg.into())
    }

    /// Create a cache-unavailable error
    pub fn cache_unavailable(msg: impl Into<String>) -> Self {
        Self::CacheUnavailable(msg.into())
    }
}
