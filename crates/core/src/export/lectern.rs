//! Lectern data dictionary generator
//!
//! One schema per input table, one field per column. Field value types come
//! from the search-engine inference rules.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::display_name;
use super::error::{ExportError, ExportResult};
use crate::inference::{ColumnSample, InferredType, RuleConfig, infer_column};
use crate::validation::input::sanitize_identifier;

/// Dictionary-level metadata supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryInfo {
    pub name: String,
    pub description: String,
    pub version: String,
}

impl DictionaryInfo {
    /// Metadata with an empty description and version `1.0`
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            version: "1.0".to_string(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }
}

/// Lectern field value types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    String,
    Integer,
    Number,
    Boolean,
}

impl From<&InferredType> for ValueType {
    fn from(ty: &InferredType) -> Self {
        match ty {
            InferredType::Integer => ValueType::Integer,
            InferredType::Float => ValueType::Number,
            InferredType::Boolean => ValueType::Boolean,
            _ => ValueType::String,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRestrictions {
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMeta {
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LecternField {
    pub name: String,
    pub description: String,
    pub value_type: ValueType,
    pub restrictions: FieldRestrictions,
    pub meta: FieldMeta,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LecternSchema {
    pub name: String,
    pub description: String,
    pub fields: Vec<LecternField>,
}

/// A complete Lectern dictionary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LecternDictionary {
    pub name: String,
    pub description: String,
    pub version: String,
    pub schemas: Vec<LecternSchema>,
}

impl LecternDictionary {
    /// Build a dictionary from named tables of column samples
    ///
    /// Schema names are the sanitized table names; repeated names get a
    /// numeric suffix.
    pub fn from_tables(
        info: DictionaryInfo,
        tables: &[(String, Vec<ColumnSample>)],
        rules: &RuleConfig,
    ) -> ExportResult<Self> {
        if info.name.trim().is_empty() {
            return Err(ExportError::InvalidName {
                name: info.name,
                reason: "dictionary name is empty".to_string(),
            });
        }

        let mut schema_names = HashSet::new();
        let mut schemas = Vec::with_capacity(tables.len());

        for (table_name, columns) in tables {
            let base = sanitize_identifier(table_name.trim());
            if base.is_empty() {
                return Err(ExportError::InvalidName {
                    name: table_name.clone(),
                    reason: "schema name is empty".to_string(),
                });
            }
            let mut name = base.clone();
            let mut suffix = 2;
            while !schema_names.insert(name.clone()) {
                name = format!("{}_{}", base, suffix);
                suffix += 1;
            }

            schemas.push(LecternSchema {
                description: format!("Schema generated from {}", table_name),
                fields: schema_fields(&name, columns, rules),
                name,
            });
        }

        info!(
            dictionary = %info.name,
            schemas = schemas.len(),
            "Generated Lectern dictionary"
        );

        Ok(Self {
            name: info.name,
            description: info.description,
            version: info.version,
            schemas,
        })
    }

    pub fn to_json_string(&self) -> ExportResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn schema_fields(schema: &str, columns: &[ColumnSample], rules: &RuleConfig) -> Vec<LecternField> {
    let mut seen = HashSet::new();
    let mut fields = Vec::with_capacity(columns.len());

    for column in columns {
        if !seen.insert(column.name.as_str()) {
            warn!(schema, column = %column.name, "Duplicate column name, keeping first occurrence");
            continue;
        }

        let ty = infer_column(column, rules);
        let display = display_name(&column.name);
        fields.push(LecternField {
            name: column.name.clone(),
            description: format!("{} ({})", display, ty),
            value_type: ValueType::from(&ty),
            restrictions: FieldRestrictions { required: false },
            meta: FieldMeta {
                display_name: display,
            },
        });
    }

    fields
}
