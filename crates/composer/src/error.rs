//! CLI error types

use std::path::{Path, PathBuf};

use composer_core::export::ExportError;
use composer_core::import::ImportError;
use composer_core::inference::InferenceError;
use composer_core::validation::ValidationError;
use thiserror::Error;

/// Errors reported to the user by the `composer` binary
#[derive(Error, Debug)]
pub enum CliError {
    /// Input file is missing, unreadable as CSV/JSON, or the wrong kind of file
    #[error("Invalid file {}: {reason}", path.display())]
    InvalidFile { path: PathBuf, reason: String },

    /// Argument value is out of range or inconsistent with other arguments
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A user-supplied name failed validation
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// Failed to read a file
    #[error("Failed to read {}: {reason}", path.display())]
    FileRead { path: PathBuf, reason: String },

    /// Failed to write a file
    #[error("Failed to write {}: {reason}", path.display())]
    FileWrite { path: PathBuf, reason: String },

    /// Output document could not be produced
    #[error("Generation failed: {0}")]
    Generation(String),
}

impl CliError {
    /// Wrap a reader error with the path it came from
    pub fn import(path: &Path, err: ImportError) -> Self {
        match err {
            ImportError::FileRead { path, source } => CliError::FileRead {
                path,
                reason: source.to_string(),
            },
            other => CliError::InvalidFile {
                path: path.to_path_buf(),
                reason: other.to_string(),
            },
        }
    }

    /// A hint for fixing the problem, printed after the error
    pub fn suggestion(&self) -> &'static str {
        match self {
            CliError::InvalidFile { .. } => {
                "Check that the file exists, has the expected extension, and starts with a header row"
            }
            CliError::InvalidArgument(_) => "Run the command with --help to see accepted values",
            CliError::ValidationFailed(_) => {
                "Use lowercase letters, digits, underscores or hyphens in names"
            }
            CliError::FileRead { .. } => "Check the path and that you have read permission",
            CliError::FileWrite { .. } => {
                "Check that the output directory exists and that you have write permission"
            }
            CliError::Generation(_) => {
                "Re-run with --verbose to see how each column was inferred"
            }
        }
    }
}

impl From<ExportError> for CliError {
    fn from(err: ExportError) -> Self {
        CliError::Generation(err.to_string())
    }
}

impl From<InferenceError> for CliError {
    fn from(err: InferenceError) -> Self {
        CliError::Generation(err.to_string())
    }
}

impl From<ValidationError> for CliError {
    fn from(err: ValidationError) -> Self {
        CliError::ValidationFailed(err.to_string())
    }
}
