//! Error types for type inference

use thiserror::Error;

/// Errors raised by document-level inference entry points
///
/// Per-field inference is total and never produces these.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InferenceError {
    /// Invalid JSON structure (not an object or array of objects at root)
    #[error("Invalid JSON structure: expected object or array of objects at root, found {0}")]
    InvalidStructure(String),

    /// No records to infer from
    #[error("No records provided for inference")]
    NoRecords,

    /// Rule configuration could not be parsed
    #[error("Invalid rule configuration: {0}")]
    Config(String),
}
