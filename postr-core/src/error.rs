//! Model error types.

use thiserror::Error;

/// Errors raised by the document model.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Unknown event field: {0}")]
    UnknownField(String),

    #[error("Field '{field}' expects a {expected} value, got {found}")]
    FieldType {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Invalid attachment encoding: {0}")]
    InvalidAttachment(#[from] base64::DecodeError),

    #[error("Invalid document: {0}")]
    InvalidDocument(#[from] serde_json::Error),
}
