//! Error types for the editor

use crate::BlockId;
use pagecraft_schema::SchemaError;
use thiserror::Error;

pub type EditorResult<T> = Result<T, EditorError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    #[error("Unsupported block type: {0}")]
    UnsupportedBlockType(String),

    #[error("Validation error: {0}")]
    Validation(SchemaError),

    #[error("Duplicate block id: {0}")]
    DuplicateBlockId(BlockId),
}

impl EditorError {
    /// True for errors caused by content that does not match the schema.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            EditorError::UnsupportedBlockType(_) | EditorError::Validation(_)
        )
    }
}

impl From<SchemaError> for EditorError {
    fn from(e: SchemaError) -> Self {
        match e {
            SchemaError::UnsupportedBlockType(name) => EditorError::UnsupportedBlockType(name),
            other => EditorError::Validation(other),
        }
    }
}
