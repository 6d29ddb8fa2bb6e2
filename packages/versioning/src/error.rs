//! Versioning error types.

use pagecraft_client::ApiError;
use pagecraft_editor::EditorError;
use thiserror::Error;

pub type VersioningResult<T> = Result<T, VersioningError>;

#[derive(Debug, Error)]
pub enum VersioningError {
    #[error("persistence request failed: {0}")]
    Network(#[source] ApiError),

    #[error("stale version: expected {expected}, current draft is {current}")]
    StaleVersion { expected: u64, current: u64 },

    #[error("a save of {0} is already in progress")]
    SaveInProgress(String),

    #[error("a publish of {0} is already in progress")]
    PublishInProgress(String),

    #[error("no saved draft to publish for {0}")]
    NothingToPublish(String),

    #[error("store is editing {store}, not {requested}")]
    SlugMismatch { store: String, requested: String },

    #[error(transparent)]
    Editor(#[from] EditorError),
}

impl From<ApiError> for VersioningError {
    fn from(e: ApiError) -> Self {
        match e {
            ApiError::StaleVersion { expected, current } => {
                VersioningError::StaleVersion { expected, current }
            }
            ApiError::NothingToPublish(slug) => VersioningError::NothingToPublish(slug),
            other => VersioningError::Network(other),
        }
    }
}
