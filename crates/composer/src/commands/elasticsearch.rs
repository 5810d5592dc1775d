//! `es-mapping`: generate an Elasticsearch index template

use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use composer_core::export::{ElasticsearchMapping, MappingOptions};
use composer_core::import::read_json;
use composer_core::inference::{ColumnSample, RuleConfig, infer_document};
use composer_core::validation::validate_index_name;

use super::{csv_options, read_csv};
use crate::config::load_rules;
use crate::error::CliError;
use crate::output::write_output;
use crate::validation::ValidationContext;

/// Serialization format for the generated mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MappingFormat {
    Json,
    Yaml,
}

/// Arguments for the `es-mapping` command
#[derive(Args, Debug)]
pub struct EsMappingArgs {
    /// CSV files to sample; columns from every file go into one mapping
    #[arg(short, long = "file", num_args = 1.., required_unless_present = "json")]
    pub files: Vec<PathBuf>,

    /// JSON document to sample instead of CSV files
    #[arg(long, conflicts_with = "files")]
    pub json: Option<PathBuf>,

    /// Index name; also used for the index pattern and alias
    #[arg(short, long)]
    pub index: String,

    /// Number of primary shards
    #[arg(long, default_value_t = 1)]
    pub shards: u32,

    /// Number of replicas
    #[arg(long, default_value_t = 0)]
    pub replicas: u32,

    /// CSV field delimiter
    #[arg(short, long, default_value_t = ',')]
    pub delimiter: char,

    /// Data rows sampled per CSV file
    #[arg(long, default_value_t = 1)]
    pub sample_rows: usize,

    /// Output format
    #[arg(long, value_enum, default_value_t = MappingFormat::Json)]
    pub format: MappingFormat,

    /// Output file (stdout if not provided)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Handle the `es-mapping` command
pub fn handle_es_mapping(args: &EsMappingArgs, config: Option<&Path>) -> Result<(), CliError> {
    validate_index_name(&args.index)?;
    if args.shards == 0 {
        return Err(CliError::InvalidArgument(
            "--shards must be at least 1".to_string(),
        ));
    }

    let rules = load_rules(RuleConfig::elasticsearch(), config)?;
    let options = MappingOptions::new(&args.index)
        .with_shards(args.shards)
        .with_replicas(args.replicas);

    let mut ctx = ValidationContext::new();

    let mapping = match &args.json {
        Some(path) => {
            ctx.validate_input_file(path, &["json"])?;
            let document = read_json(path).map_err(|e| CliError::import(path, e))?;
            let properties = infer_document(&document, &rules)?;
            ElasticsearchMapping::from_properties(&properties, &options)
        }
        None => {
            let csv = csv_options(args.delimiter, args.sample_rows)?;
            let mut columns: Vec<ColumnSample> = Vec::new();
            for path in &args.files {
                if ctx.is_validated(path) {
                    eprintln!("Skipping {}: already read", path.display());
                    continue;
                }
                columns.extend(read_csv(&mut ctx, path, &csv)?.columns());
            }
            ElasticsearchMapping::from_columns(&columns, &rules, &options)
        }
    };

    if let Some(output) = &args.output {
        ctx.validate_output_file(output)?;
    }

    let content = match args.format {
        MappingFormat::Json => mapping.to_json_string()?,
        MappingFormat::Yaml => mapping.to_yaml_string()?,
    };

    eprintln!(
        "Generated mapping for index '{}' with {} field(s)",
        args.index,
        mapping.data_properties().map_or(0, |p| p.len())
    );
    write_output(&content, args.output.as_deref(), "Mapping")
}
