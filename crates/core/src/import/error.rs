//! Error types for sample readers

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading sample files
#[derive(Error, Debug)]
pub enum ImportError {
    /// Failed to open or read the input file
    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    /// Malformed JSON
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The file has no header row
    #[error("CSV file has no header row")]
    NoHeader,

    /// A header cell is blank
    #[error("Header in column {position} is empty")]
    EmptyHeader { position: usize },

    /// Delimiter is not a single-byte character
    #[error("Invalid delimiter '{0}': must be a single ASCII character")]
    InvalidDelimiter(char),
}

/// Result type for import operations
pub type ImportResult<T> = Result<T, ImportError>;
