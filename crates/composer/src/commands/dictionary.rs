//! `dictionary`: generate a Lectern data dictionary

use std::path::{Path, PathBuf};

use clap::Args;
use composer_core::export::{DictionaryInfo, LecternDictionary};
use composer_core::inference::{ColumnSample, RuleConfig};

use super::{csv_options, read_csv};
use crate::config::load_rules;
use crate::error::CliError;
use crate::output::write_output;
use crate::validation::ValidationContext;

/// Arguments for the `dictionary` command
#[derive(Args, Debug)]
pub struct DictionaryArgs {
    /// CSV files to sample; each becomes one schema
    #[arg(short, long = "file", num_args = 1.., required = true)]
    pub files: Vec<PathBuf>,

    /// Dictionary name
    #[arg(short, long)]
    pub name: String,

    /// Dictionary description
    #[arg(long, default_value = "")]
    pub description: String,

    /// Dictionary version
    #[arg(long, default_value = "1.0")]
    pub version: String,

    /// CSV field delimiter
    #[arg(short, long, default_value_t = ',')]
    pub delimiter: char,

    /// Output file (stdout if not provided)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Handle the `dictionary` command
pub fn handle_dictionary(args: &DictionaryArgs, config: Option<&Path>) -> Result<(), CliError> {
    if args.name.trim().is_empty() {
        return Err(CliError::InvalidArgument(
            "--name must not be empty".to_string(),
        ));
    }

    let rules = load_rules(RuleConfig::elasticsearch(), config)?;
    let options = csv_options(args.delimiter, 1)?;

    let mut ctx = ValidationContext::new();
    let mut tables: Vec<(String, Vec<ColumnSample>)> = Vec::with_capacity(args.files.len());
    for path in &args.files {
        if ctx.is_validated(path) {
            eprintln!("Skipping {}: already read", path.display());
            continue;
        }
        let sample = read_csv(&mut ctx, path, &options)?;
        let name = sample.file_stem().unwrap_or("schema").to_string();
        tables.push((name, sample.columns()));
    }

    if let Some(output) = &args.output {
        ctx.validate_output_file(output)?;
    }

    let info = DictionaryInfo::new(&args.name)
        .with_description(&args.description)
        .with_version(&args.version);
    let dictionary = LecternDictionary::from_tables(info, &tables, &rules)?;

    eprintln!(
        "Generated dictionary '{}' with {} schema(s)",
        dictionary.name,
        dictionary.schemas.len()
    );
    write_output(
        &dictionary.to_json_string()?,
        args.output.as_deref(),
        "Dictionary",
    )
}
