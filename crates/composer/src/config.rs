//! Rule configuration loading

use std::fs;
use std::path::Path;

use composer_core::inference::RuleConfig;
use tracing::info;

use crate::error::CliError;

/// Layer the TOML overrides in `path` on top of `preset`
pub fn load_rules(preset: RuleConfig, path: Option<&Path>) -> Result<RuleConfig, CliError> {
    let Some(path) = path else {
        return Ok(preset);
    };

    let content = fs::read_to_string(path).map_err(|e| CliError::FileRead {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let rules = preset
        .merge_toml_str(&content)
        .map_err(|e| CliError::InvalidFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    info!(path = %path.display(), "Loaded rule overrides");
    Ok(rules)
}
