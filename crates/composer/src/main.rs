//! `composer`: generate Elasticsearch, PostgreSQL, Lectern and Arranger
//! configuration from sample data files

mod commands;
mod config;
mod error;
mod output;
mod validation;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::arranger::{ArrangerArgs, handle_arranger};
use commands::dictionary::{DictionaryArgs, handle_dictionary};
use commands::elasticsearch::{EsMappingArgs, handle_es_mapping};
use commands::postgres::{PostgresTableArgs, handle_postgres_table};
use error::CliError;

#[derive(Parser, Debug)]
#[command(
    name = "composer",
    version,
    about = "Generate search, database and portal configuration from sample data"
)]
struct Cli {
    /// Enable verbose logging (info/debug to stderr)
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    /// TOML file with inference rule overrides
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate an Elasticsearch index template from CSV or JSON samples
    EsMapping(EsMappingArgs),

    /// Generate a PostgreSQL CREATE TABLE statement from a CSV sample
    PostgresTable(PostgresTableArgs),

    /// Generate a Lectern data dictionary from CSV samples
    Dictionary(DictionaryArgs),

    /// Generate Arranger UI configuration from an Elasticsearch mapping
    Arranger(ArrangerArgs),
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "info,composer=debug,composer_core=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = cli.config.as_deref();
    match &cli.command {
        Commands::EsMapping(args) => handle_es_mapping(args, config)?,
        Commands::PostgresTable(args) => handle_postgres_table(args, config)?,
        Commands::Dictionary(args) => handle_dictionary(args, config)?,
        Commands::Arranger(args) => handle_arranger(args)?,
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            if let Some(cli_err) = err.downcast_ref::<CliError>() {
                eprintln!("Suggestion: {}", cli_err.suggestion());
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_es_mapping_arguments() {
        let cli = Cli::try_parse_from([
            "composer",
            "es-mapping",
            "--file",
            "a.csv",
            "b.csv",
            "--index",
            "datatable1",
            "--format",
            "yaml",
            "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::EsMapping(args) => {
                assert_eq!(args.files.len(), 2);
                assert_eq!(args.shards, 1);
                assert_eq!(args.replicas, 0);
                assert_eq!(args.sample_rows, 1);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_es_mapping_needs_exactly_one_source() {
        assert!(Cli::try_parse_from(["composer", "es-mapping", "--index", "t"]).is_err());
        assert!(
            Cli::try_parse_from([
                "composer",
                "es-mapping",
                "--file",
                "a.csv",
                "--json",
                "a.json",
                "--index",
                "t"
            ])
            .is_err()
        );
        assert!(
            Cli::try_parse_from(["composer", "es-mapping", "--json", "a.json", "--index", "t"])
                .is_ok()
        );
    }

    #[test]
    fn test_postgres_defaults() {
        let cli = Cli::try_parse_from(["composer", "postgres-table", "--file", "people.csv"])
            .unwrap();
        match cli.command {
            Commands::PostgresTable(args) => {
                assert_eq!(args.sample_rows, 5);
                assert_eq!(args.delimiter, ',');
                assert!(args.table.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from([
            "composer",
            "dictionary",
            "--file",
            "a.csv",
            "--name",
            "study",
            "--config",
            "rules.toml",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("rules.toml")));
    }
}
