//! `postgres-table`: generate a PostgreSQL `CREATE TABLE` statement

use std::path::{Path, PathBuf};

use clap::Args;
use composer_core::export::PostgresTable;
use composer_core::inference::RuleConfig;
use composer_core::validation::validate_table_name;

use super::{csv_options, read_csv};
use crate::config::load_rules;
use crate::error::CliError;
use crate::output::write_output;
use crate::validation::ValidationContext;

/// Arguments for the `postgres-table` command
#[derive(Args, Debug)]
pub struct PostgresTableArgs {
    /// CSV file to sample
    #[arg(short, long)]
    pub file: PathBuf,

    /// Table name (defaults to the file name without extension)
    #[arg(short, long)]
    pub table: Option<String>,

    /// CSV field delimiter
    #[arg(short, long, default_value_t = ',')]
    pub delimiter: char,

    /// Data rows sampled for type and length inference
    #[arg(long, default_value_t = 5)]
    pub sample_rows: usize,

    /// Output file (stdout if not provided)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Handle the `postgres-table` command
pub fn handle_postgres_table(
    args: &PostgresTableArgs,
    config: Option<&Path>,
) -> Result<(), CliError> {
    if let Some(table) = &args.table {
        validate_table_name(table)?;
    }

    let rules = load_rules(RuleConfig::postgres(), config)?;
    let options = csv_options(args.delimiter, args.sample_rows)?;

    let mut ctx = ValidationContext::new();
    let sample = read_csv(&mut ctx, &args.file, &options)?;
    if let Some(output) = &args.output {
        ctx.validate_output_file(output)?;
    }

    let table_name = match &args.table {
        Some(table) => table.clone(),
        None => sample
            .file_stem()
            .map(str::to_string)
            .ok_or_else(|| {
                CliError::InvalidArgument(
                    "cannot derive a table name from the file name; pass --table".to_string(),
                )
            })?,
    };

    let mut table = PostgresTable::from_columns(&table_name, &sample.columns(), &rules)?;
    if let Some(name) = args.file.file_name().and_then(|n| n.to_str()) {
        table = table.with_source(name);
    }

    eprintln!(
        "Generated table '{}' with {} column(s) from {} sample row(s)",
        table.name,
        table.columns.len(),
        sample.rows().len()
    );
    write_output(&table.to_sql(), args.output.as_deref(), "SQL")
}
