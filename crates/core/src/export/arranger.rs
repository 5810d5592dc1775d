//! Arranger UI configuration generator
//!
//! Reads an Elasticsearch mapping document, flattens its leaf fields to
//! dotted paths, and produces the four files Arranger loads at startup.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info};

use super::display_name;
use super::error::{ExportError, ExportResult};

/// Leaf types Arranger can build aggregations for
const AGGREGATABLE_TYPES: &[&str] = &[
    "keyword",
    "boolean",
    "integer",
    "long",
    "short",
    "byte",
    "float",
    "double",
    "half_float",
    "scaled_float",
    "date",
];

/// Path prefix hidden by default in tables and facets
const METADATA_PREFIX: &str = "data.submission_metadata";

/// Caller-supplied overrides
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrangerOptions {
    /// Index to query; defaults to the mapping's first alias
    pub index: Option<String>,
    pub document_type: String,
}

impl Default for ArrangerOptions {
    fn default() -> Self {
        Self {
            index: None,
            document_type: "file".to_string(),
        }
    }
}

/// A leaf field of the mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedField {
    /// Dotted path, e.g. `data.donor_id`
    pub path: String,
    /// Elasticsearch type, e.g. `keyword`
    pub es_type: String,
}

impl MappedField {
    fn is_metadata(&self) -> bool {
        self.path.starts_with(METADATA_PREFIX)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseConfig {
    pub document_type: String,
    pub index: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedField {
    pub display_name: String,
    pub field_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtendedConfig {
    pub extended: Vec<ExtendedField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableColumn {
    pub can_change_show: bool,
    pub field_name: String,
    pub show: bool,
    pub sortable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableColumns {
    pub columns: Vec<TableColumn>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    pub table: TableColumns,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetAggregation {
    pub active: bool,
    pub field_name: String,
    pub show: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetAggregations {
    pub aggregations: Vec<FacetAggregation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetsConfig {
    pub facets: FacetAggregations,
}

/// The four Arranger configuration documents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrangerConfigs {
    pub base: BaseConfig,
    pub extended: ExtendedConfig,
    pub table: TableConfig,
    pub facets: FacetsConfig,
}

impl ArrangerConfigs {
    /// Generate configs from a mapping document with `mappings.properties`
    pub fn from_mapping(mapping: &Value, options: &ArrangerOptions) -> ExportResult<Self> {
        let properties = mapping
            .get("mappings")
            .and_then(|m| m.get("properties"))
            .and_then(Value::as_object)
            .ok_or_else(|| {
                ExportError::InvalidMapping("missing mappings.properties object".to_string())
            })?;

        let index = match &options.index {
            Some(index) => index.clone(),
            None => first_alias(mapping).ok_or_else(|| {
                ExportError::InvalidMapping(
                    "mapping has no alias; supply an index name".to_string(),
                )
            })?,
        };

        let mut fields = Vec::new();
        flatten_fields(properties, "", &mut fields);
        if fields.is_empty() {
            return Err(ExportError::InvalidMapping(
                "mapping contains no typed fields".to_string(),
            ));
        }

        let extended = fields
            .iter()
            .map(|f| ExtendedField {
                display_name: leaf_display_name(&f.path),
                field_name: f.path.clone(),
            })
            .collect();

        let columns = fields
            .iter()
            .map(|f| TableColumn {
                can_change_show: true,
                field_name: f.path.clone(),
                show: !f.is_metadata(),
                sortable: f.es_type != "text",
            })
            .collect();

        let aggregations = fields
            .iter()
            .filter(|f| AGGREGATABLE_TYPES.contains(&f.es_type.as_str()))
            .map(|f| FacetAggregation {
                active: !f.is_metadata(),
                field_name: f.path.replace('.', "__"),
                show: !f.is_metadata(),
            })
            .collect();

        info!(index = %index, fields = fields.len(), "Generated Arranger configuration");

        Ok(Self {
            base: BaseConfig {
                document_type: options.document_type.clone(),
                index,
            },
            extended: ExtendedConfig { extended },
            table: TableConfig {
                table: TableColumns { columns },
            },
            facets: FacetsConfig {
                facets: FacetAggregations { aggregations },
            },
        })
    }

    /// File names and pretty-printed contents, in a stable order
    pub fn to_files(&self) -> ExportResult<Vec<(&'static str, String)>> {
        Ok(vec![
            ("base.json", serde_json::to_string_pretty(&self.base)?),
            ("extended.json", serde_json::to_string_pretty(&self.extended)?),
            ("table.json", serde_json::to_string_pretty(&self.table)?),
            ("facets.json", serde_json::to_string_pretty(&self.facets)?),
        ])
    }
}

fn first_alias(mapping: &Value) -> Option<String> {
    mapping
        .get("aliases")?
        .as_object()?
        .keys()
        .next()
        .cloned()
}

/// Collect leaf fields depth-first, in mapping order
pub fn flatten_fields(properties: &Map<String, Value>, prefix: &str, out: &mut Vec<MappedField>) {
    for (name, definition) in properties {
        let path = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{}.{}", prefix, name)
        };

        if let Some(children) = definition.get("properties").and_then(Value::as_object) {
            flatten_fields(children, &path, out);
        } else if let Some(es_type) = definition.get("type").and_then(Value::as_str) {
            out.push(MappedField {
                path,
                es_type: es_type.to_string(),
            });
        } else {
            debug!(field = %path, "Skipping field without a type");
        }
    }
}

fn leaf_display_name(path: &str) -> String {
    display_name(path.rsplit('.').next().unwrap_or(path))
}
