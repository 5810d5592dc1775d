//! Output generators
//!
//! Shape inferred types into the documents downstream services consume:
//! - Elasticsearch index template
//! - PostgreSQL `CREATE TABLE` statement
//! - Lectern data dictionary
//! - Arranger UI configuration

pub mod arranger;
pub mod elasticsearch;
mod error;
pub mod lectern;
pub mod postgres;

pub use arranger::{ArrangerConfigs, ArrangerOptions};
pub use elasticsearch::{ElasticsearchMapping, MappingOptions};
pub use error::{ExportError, ExportResult};
pub use lectern::{DictionaryInfo, LecternDictionary};
pub use postgres::{PostgresColumn, PostgresTable};

/// Capitalize each word of a field name for display
///
/// Words are split on underscores, hyphens, dots and whitespace.
pub(crate) fn display_name(field: &str) -> String {
    field
        .split(|c: char| c == '_' || c == '-' || c == '.' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
