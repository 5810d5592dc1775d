//! PostgreSQL `CREATE TABLE` generator
//!
//! Column names are sanitized with [`sanitize_identifier`] and quoted only
//! when PostgreSQL requires it. A `submission_metadata JSONB` column is always
//! appended last.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::error::{ExportError, ExportResult};
use crate::inference::{ColumnSample, RuleConfig, SqlType, infer_sql_type};
use crate::validation::input::{
    MAX_TABLE_NAME_LENGTH, quote_identifier, sanitize_comment, sanitize_identifier,
};

/// Name of the trailing metadata column
pub const SUBMISSION_METADATA_COLUMN: &str = "submission_metadata";

/// One generated column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostgresColumn {
    /// Header as it appeared in the input
    pub source_name: String,
    /// Sanitized, unquoted identifier
    pub name: String,
    pub sql_type: SqlType,
}

impl PostgresColumn {
    /// `name TYPE`, with the name quoted if needed
    pub fn definition(&self) -> String {
        format!("{} {}", quote_identifier(&self.name), self.sql_type)
    }
}

/// A table definition ready to render as DDL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostgresTable {
    pub name: String,
    pub columns: Vec<PostgresColumn>,
    /// Input file the columns were sampled from, for the trailing comments
    pub source: Option<String>,
    /// Most sample rows seen for any column
    pub sample_rows: usize,
    varchar_buffer: f64,
    max_varchar_length: usize,
    null_sentinel: String,
}

impl PostgresTable {
    /// Infer a column type for every sample and resolve names
    ///
    /// Exact duplicate headers keep their first occurrence. Distinct headers
    /// that sanitize to the same identifier get `_2`, `_3`, ... suffixes.
    pub fn from_columns(
        table_name: &str,
        columns: &[ColumnSample],
        rules: &RuleConfig,
    ) -> ExportResult<Self> {
        let sanitized = sanitize_identifier(table_name.trim());
        if sanitized.is_empty() {
            return Err(ExportError::InvalidName {
                name: table_name.to_string(),
                reason: "table name is empty".to_string(),
            });
        }
        let name = truncate_identifier(&sanitized, MAX_TABLE_NAME_LENGTH).to_string();
        if name != sanitized {
            warn!(
                table = %sanitized,
                truncated = %name,
                "Table name exceeds {} characters and was truncated",
                MAX_TABLE_NAME_LENGTH
            );
        }

        let mut seen_raw = HashSet::new();
        let mut used = HashSet::from([SUBMISSION_METADATA_COLUMN.to_string()]);
        let mut generated = Vec::with_capacity(columns.len());

        for column in columns {
            if !seen_raw.insert(column.name.as_str()) {
                warn!(column = %column.name, "Duplicate column name, keeping first occurrence");
                continue;
            }

            let base = sanitize_identifier(&column.name);
            let base = if base.is_empty() {
                "column".to_string()
            } else {
                base
            };
            let identifier = unique_identifier(&base, &used);
            if identifier != base {
                warn!(
                    column = %column.name,
                    sanitized = %base,
                    renamed = %identifier,
                    "Column name collides after sanitization"
                );
            }
            used.insert(identifier.clone());

            generated.push(PostgresColumn {
                source_name: column.name.clone(),
                name: identifier,
                sql_type: infer_sql_type(column, rules),
            });
        }

        let sample_rows = columns.iter().map(|c| c.values.len()).max().unwrap_or(0);

        info!(
            table = %name,
            columns = generated.len(),
            sample_rows,
            "Generated PostgreSQL table"
        );

        Ok(Self {
            name,
            columns: generated,
            source: None,
            sample_rows,
            varchar_buffer: rules.varchar_buffer,
            max_varchar_length: rules.max_varchar_length,
            null_sentinel: rules.null_sentinel.clone(),
        })
    }

    /// Record the input file name for the generated comments
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Columns that had no sample data
    pub fn empty_columns(&self) -> impl Iterator<Item = &PostgresColumn> {
        self.columns
            .iter()
            .filter(|c| c.sql_type.null_value().is_some())
    }

    /// Render the `CREATE TABLE` statement followed by explanatory comments
    pub fn to_sql(&self) -> String {
        let mut definitions: Vec<String> = self.columns.iter().map(|c| c.definition()).collect();
        definitions.push(format!("{} JSONB", SUBMISSION_METADATA_COLUMN));

        let mut sql = format!(
            "CREATE TABLE IF NOT EXISTS {} (\n  {}\n);\n\n",
            quote_identifier(&self.name),
            definitions.join(",\n  ")
        );

        if let Some(source) = &self.source {
            sql.push_str(&format!("-- Generated from: {}\n", sanitize_comment(source)));
        }
        sql.push_str(&format!(
            "-- Column types inferred from {} sample row(s)\n",
            self.sample_rows
        ));
        sql.push_str(&format!(
            "-- VARCHAR lengths are the longest sampled value x {}, between the minimum and {} characters\n",
            self.varchar_buffer, self.max_varchar_length
        ));

        for column in &self.columns {
            if column.name != column.source_name {
                sql.push_str(&format!(
                    "-- Column '{}' renamed to {}\n",
                    sanitize_comment(&column.source_name),
                    column.name
                ));
            }
        }

        let empty: Vec<&str> = self.empty_columns().map(|c| c.name.as_str()).collect();
        if !empty.is_empty() {
            sql.push_str(&format!(
                "-- Columns with no sample data (empty values are stored as '{}'): {}\n",
                sanitize_comment(&self.null_sentinel),
                empty.join(", ")
            ));
        }

        sql.push_str(&format!(
            "-- {} holds ingestion details: submitter, processing timestamps, source file and record number\n",
            SUBMISSION_METADATA_COLUMN
        ));

        sql
    }
}

/// Cut an ASCII identifier down to `max` bytes
fn truncate_identifier(identifier: &str, max: usize) -> &str {
    let mut end = identifier.len().min(max);
    while !identifier.is_char_boundary(end) {
        end -= 1;
    }
    &identifier[..end]
}

/// First of `base`, `base_2`, `base_3`, ... not in `used`, kept within
/// PostgreSQL's identifier limit so truncation cannot merge two names
fn unique_identifier(base: &str, used: &HashSet<String>) -> String {
    let base = truncate_identifier(base, MAX_TABLE_NAME_LENGTH);
    if !used.contains(base) {
        return base.to_string();
    }
    (2..)
        .map(|n| {
            let suffix = format!("_{}", n);
            let stem = truncate_identifier(base, MAX_TABLE_NAME_LENGTH - suffix.len());
            format!("{}{}", stem, suffix)
        })
        .find(|candidate| !used.contains(candidate))
        .unwrap_or_else(|| base.to_string())
}
