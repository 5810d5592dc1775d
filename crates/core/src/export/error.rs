//! Error types for output generators

use thiserror::Error;

/// Errors that can occur while generating output documents
#[derive(Error, Debug)]
pub enum ExportError {
    /// Failed to serialize the generated document
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A table, schema or index name is unusable
    #[error("Invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    /// The supplied mapping document lacks required structure
    #[error("Invalid mapping document: {0}")]
    InvalidMapping(String),
}

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        ExportError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for ExportError {
    fn from(err: serde_yaml::Error) -> Self {
        ExportError::Serialization(err.to_string())
    }
}

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;
