//! JSON sample reader

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::info;

use super::error::{ImportError, ImportResult};

/// Parse a JSON document from a string
pub fn parse_json(content: &str) -> ImportResult<Value> {
    Ok(serde_json::from_str(content)?)
}

/// Read and parse a JSON document from disk
pub fn read_json(path: impl AsRef<Path>) -> ImportResult<Value> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ImportError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let value = parse_json(&content)?;
    info!(path = %path.display(), "Read JSON sample");
    Ok(value)
}
