//! Pre-flight checks on command-line paths
//!
//! A [`ValidationContext`] lives for one command invocation and remembers
//! which inputs and outputs were already checked, so a path passed twice is
//! validated once.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::CliError;

/// Paths already checked during this invocation
#[derive(Debug, Default)]
pub struct ValidationContext {
    inputs: HashSet<PathBuf>,
    outputs: HashSet<PathBuf>,
}

impl ValidationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when `path` already passed input validation
    pub fn is_validated(&self, path: &Path) -> bool {
        self.inputs.contains(&normalize(path))
    }

    /// Check that `path` is a non-empty regular file with one of `extensions`
    ///
    /// Returns `Ok(false)` without re-checking when the path was validated
    /// earlier, `Ok(true)` after a fresh check.
    pub fn validate_input_file(
        &mut self,
        path: &Path,
        extensions: &[&str],
    ) -> Result<bool, CliError> {
        let key = normalize(path);
        if self.inputs.contains(&key) {
            debug!(path = %path.display(), "Input already validated, skipping");
            return Ok(false);
        }

        let invalid = |reason: String| CliError::InvalidFile {
            path: path.to_path_buf(),
            reason,
        };

        let metadata = fs::metadata(path).map_err(|e| CliError::FileRead {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        if !metadata.is_file() {
            return Err(invalid("not a regular file".to_string()));
        }

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        if !extensions.contains(&extension.as_str()) {
            return Err(invalid(format!(
                "expected a .{} file",
                extensions.join(" or .")
            )));
        }

        if metadata.len() == 0 {
            return Err(invalid("file is empty".to_string()));
        }

        debug!(path = %path.display(), "Validated input file");
        self.inputs.insert(key);
        Ok(true)
    }

    /// Check that `path` can be written without clobbering an input
    pub fn validate_output_file(&mut self, path: &Path) -> Result<(), CliError> {
        let key = normalize(path);
        if self.outputs.contains(&key) {
            debug!(path = %path.display(), "Output already validated, skipping");
            return Ok(());
        }

        if self.inputs.contains(&key) {
            return Err(CliError::InvalidArgument(format!(
                "output {} would overwrite an input file",
                path.display()
            )));
        }
        if path.is_dir() {
            return Err(CliError::InvalidArgument(format!(
                "output {} is a directory",
                path.display()
            )));
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.is_dir() {
                return Err(CliError::FileWrite {
                    path: path.to_path_buf(),
                    reason: format!("directory {} does not exist", parent.display()),
                });
            }
        }

        self.outputs.insert(key);
        Ok(())
    }

    /// Check that `dir` is a directory or can be created as one
    pub fn validate_output_dir(&mut self, dir: &Path) -> Result<(), CliError> {
        let key = normalize(dir);
        if self.outputs.contains(&key) {
            return Ok(());
        }

        if dir.exists() && !dir.is_dir() {
            return Err(CliError::InvalidArgument(format!(
                "output directory {} is an existing file",
                dir.display()
            )));
        }

        self.outputs.insert(key);
        Ok(())
    }
}

/// Canonical form when the path exists, the path as given otherwise
fn normalize(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
