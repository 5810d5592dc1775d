//! Elasticsearch index template generator
//!
//! Every inferred field is placed under a top-level `data` object next to a
//! fixed `submission_metadata` object that the ingestion pipeline fills in.

use std::collections::BTreeMap;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::{info, warn};

use super::error::ExportResult;
use crate::inference::{ColumnSample, InferredType, RuleConfig, infer_column};

/// Name of the object every inferred field is nested under
pub const DATA_FIELD: &str = "data";

/// Name of the reserved ingestion metadata object
pub const SUBMISSION_METADATA_FIELD: &str = "submission_metadata";

/// Index naming and sizing options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingOptions {
    pub index_name: String,
    pub shards: u32,
    pub replicas: u32,
}

impl MappingOptions {
    /// Options for `index_name` with one shard and no replicas
    pub fn new(index_name: impl Into<String>) -> Self {
        Self {
            index_name: index_name.into(),
            shards: 1,
            replicas: 0,
        }
    }

    pub fn with_shards(mut self, shards: u32) -> Self {
        self.shards = shards;
        self
    }

    pub fn with_replicas(mut self, replicas: u32) -> Self {
        self.replicas = replicas;
        self
    }
}

/// Top-level `mappings` block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mappings {
    pub properties: Map<String, Value>,
}

/// Top-level `settings` block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexSettings {
    pub number_of_shards: u32,
    pub number_of_replicas: u32,
}

/// A complete index template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElasticsearchMapping {
    pub index_patterns: Vec<String>,
    pub aliases: Map<String, Value>,
    pub mappings: Mappings,
    pub settings: IndexSettings,
}

impl ElasticsearchMapping {
    /// Infer every column and build the template
    ///
    /// When a column name repeats, the first occurrence is kept.
    pub fn from_columns(
        columns: &[ColumnSample],
        rules: &RuleConfig,
        options: &MappingOptions,
    ) -> Self {
        let mut seen = HashSet::new();
        let mut fields = Vec::with_capacity(columns.len());

        for column in columns {
            if !seen.insert(column.name.as_str()) {
                warn!(column = %column.name, "Duplicate column name, keeping first occurrence");
                continue;
            }
            fields.push((column.name.clone(), infer_column(column, rules)));
        }

        Self::build(fields, options)
    }

    /// Build the template from already-inferred top-level properties
    pub fn from_properties(
        properties: &BTreeMap<String, InferredType>,
        options: &MappingOptions,
    ) -> Self {
        let fields = properties
            .iter()
            .map(|(name, ty)| (name.clone(), ty.clone()))
            .collect();
        Self::build(fields, options)
    }

    fn build(fields: Vec<(String, InferredType)>, options: &MappingOptions) -> Self {
        let mut data_properties = Map::new();
        for (name, ty) in &fields {
            if name == SUBMISSION_METADATA_FIELD {
                warn!(
                    column = %name,
                    "Column name is reserved for ingestion metadata and will be replaced"
                );
                continue;
            }
            data_properties.insert(name.clone(), field_mapping(ty));
        }
        data_properties.insert(
            SUBMISSION_METADATA_FIELD.to_string(),
            submission_metadata_mapping(),
        );

        let mut root_properties = Map::new();
        root_properties.insert(
            DATA_FIELD.to_string(),
            json!({ "type": "object", "properties": data_properties }),
        );

        let mut aliases = Map::new();
        aliases.insert(format!("{}_centric", options.index_name), json!({}));

        info!(
            index = %options.index_name,
            fields = fields.len(),
            "Generated Elasticsearch mapping"
        );

        Self {
            index_patterns: vec![format!("{}-*", options.index_name)],
            aliases,
            mappings: Mappings {
                properties: root_properties,
            },
            settings: IndexSettings {
                number_of_shards: options.shards,
                number_of_replicas: options.replicas,
            },
        }
    }

    /// Properties under the `data` object
    pub fn data_properties(&self) -> Option<&Map<String, Value>> {
        self.mappings
            .properties
            .get(DATA_FIELD)?
            .get("properties")?
            .as_object()
    }

    /// First alias name, used as the default Arranger index
    pub fn alias(&self) -> Option<&str> {
        self.aliases.keys().next().map(String::as_str)
    }

    pub fn to_value(&self) -> ExportResult<Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn to_json_string(&self) -> ExportResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_yaml_string(&self) -> ExportResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// Render one inferred type as an Elasticsearch field mapping
pub fn field_mapping(ty: &InferredType) -> Value {
    match ty {
        InferredType::Keyword { null_value } => match null_value {
            Some(sentinel) => json!({ "type": "keyword", "null_value": sentinel }),
            None => json!({ "type": "keyword" }),
        },
        InferredType::Text => json!({ "type": "text" }),
        InferredType::Integer => json!({ "type": "integer" }),
        InferredType::Float => json!({ "type": "float" }),
        InferredType::Boolean => json!({ "type": "boolean" }),
        InferredType::Date | InferredType::Timestamp => json!({ "type": "date" }),
        InferredType::Object { properties } => {
            json!({ "type": "object", "properties": object_properties(properties) })
        }
        InferredType::Nested { element } => match element.as_ref() {
            InferredType::Object { properties } => {
                json!({ "type": "nested", "properties": object_properties(properties) })
            }
            // Elasticsearch arrays need no wrapper for scalar elements
            scalar => field_mapping(scalar),
        },
    }
}

fn object_properties(properties: &BTreeMap<String, InferredType>) -> Map<String, Value> {
    properties
        .iter()
        .map(|(name, ty)| (name.clone(), field_mapping(ty)))
        .collect()
}

fn submission_metadata_mapping() -> Value {
    json!({
        "type": "object",
        "properties": {
            "submitter_id": { "type": "keyword" },
            "processing_started": { "type": "date" },
            "processed_at": { "type": "date" },
            "source_file": { "type": "keyword" },
            "record_number": { "type": "integer" },
            "hostname": { "type": "keyword" },
            "username": { "type": "keyword" }
        }
    })
}
