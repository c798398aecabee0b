//! Fetch error types

/// Error type for URL fetch operations
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("URL scheme '{0}' is not allowed")]
    SchemeNotAllowed(String),

    #[error("Remote server responded with status {0}")]
    Status(u16),

    #[error("Response of {size} bytes exceeds the {limit} byte limit")]
    TooLarge { size: u64, limit: u64 },

    #[error("No mock response registered for {0} in offline mode")]
    NoMock(String),
}
