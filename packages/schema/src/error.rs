//! Error types for schema validation

use thiserror::Error;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("Unsupported block type: {0}")]
    UnsupportedBlockType(String),

    #[error("Unknown field `{path}` for block type {block_type}")]
    UnknownField { block_type: String, path: String },

    #[error("Config does not match shape of {block_type}: {message}")]
    ShapeMismatch { block_type: String, message: String },

    #[error("Invalid value for `{field}`: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Expected a JSON object, got {0}")]
    NotAnObject(String),
}

impl SchemaError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        SchemaError::InvalidValue {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}
