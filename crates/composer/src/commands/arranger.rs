//! `arranger`: generate Arranger UI configuration from a mapping

use std::path::PathBuf;

use clap::Args;
use composer_core::export::{ArrangerConfigs, ArrangerOptions};
use composer_core::import::read_json;

use crate::error::CliError;
use crate::output::write_files;
use crate::validation::ValidationContext;

/// Arguments for the `arranger` command
#[derive(Args, Debug)]
pub struct ArrangerArgs {
    /// Elasticsearch mapping (JSON) to read fields from
    #[arg(short, long)]
    pub mapping: PathBuf,

    /// Index name (defaults to the mapping's alias)
    #[arg(short, long)]
    pub index: Option<String>,

    /// Arranger document type
    #[arg(long, default_value = "file")]
    pub document_type: String,

    /// Directory to write base.json, extended.json, table.json and facets.json into
    #[arg(short, long)]
    pub output_dir: PathBuf,
}

/// Handle the `arranger` command
pub fn handle_arranger(args: &ArrangerArgs) -> Result<(), CliError> {
    let mut ctx = ValidationContext::new();
    ctx.validate_input_file(&args.mapping, &["json"])?;
    ctx.validate_output_dir(&args.output_dir)?;

    let mapping = read_json(&args.mapping).map_err(|e| CliError::import(&args.mapping, e))?;
    let options = ArrangerOptions {
        index: args.index.clone(),
        document_type: args.document_type.clone(),
    };
    let configs = ArrangerConfigs::from_mapping(&mapping, &options)?;

    eprintln!(
        "Generated Arranger configuration for index '{}':",
        configs.base.index
    );
    write_files(&args.output_dir, &configs.to_files()?)
}
