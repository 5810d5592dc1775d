//! CLI command implementations

pub mod arranger;
pub mod dictionary;
pub mod elasticsearch;
pub mod postgres;

use std::path::Path;

use composer_core::import::{CsvOptions, CsvSample};
use tracing::warn;

use crate::error::CliError;
use crate::validation::ValidationContext;

/// Build reader options from command-line values
pub(crate) fn csv_options(delimiter: char, sample_rows: usize) -> Result<CsvOptions, CliError> {
    if sample_rows == 0 {
        return Err(CliError::InvalidArgument(
            "--sample-rows must be at least 1".to_string(),
        ));
    }
    CsvOptions::default()
        .with_delimiter(delimiter)
        .map(|options| options.with_sample_rows(sample_rows))
        .map_err(|e| CliError::InvalidArgument(e.to_string()))
}

/// Validate and read one CSV sample
pub(crate) fn read_csv(
    ctx: &mut ValidationContext,
    path: &Path,
    options: &CsvOptions,
) -> Result<CsvSample, CliError> {
    ctx.validate_input_file(path, &["csv", "tsv", "txt"])?;

    let sample = CsvSample::from_path(path, options).map_err(|e| CliError::import(path, e))?;
    if sample.rows().is_empty() {
        warn!(
            path = %path.display(),
            "File has a header but no data rows; every column will use the null placeholder"
        );
    }
    Ok(sample)
}
