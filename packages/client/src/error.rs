//! Persistence API error types.

use thiserror::Error;

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("stale version: expected {expected}, current draft is {current}")]
    StaleVersion { expected: u64, current: u64 },

    #[error("layout not found: {0}")]
    NotFound(String),

    #[error("no saved draft to publish for {0}")]
    NothingToPublish(String),

    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// True for failures where repeating the same request may succeed:
    /// transport errors, 5xx and 429 responses.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Http(e) => !(e.is_builder() || e.is_decode() || e.is_redirect()),
            ApiError::Status { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}
