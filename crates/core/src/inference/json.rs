//! Recursive inference over JSON samples

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::warn;

use super::config::RuleConfig;
use super::error::InferenceError;
use super::strategy::infer_type;
use super::types::InferredType;

/// Infer the type of one JSON value under `key`
///
/// Scalars go through the same decision tree as CSV cells. Objects recurse,
/// arrays are typed by their first element, and anything nested deeper than
/// `rules.max_depth` falls back to keyword.
pub fn infer_json_type(key: &str, value: &Value, rules: &RuleConfig) -> InferredType {
    infer_at_depth(key, value, rules, 0)
}

fn infer_at_depth(key: &str, value: &Value, rules: &RuleConfig, depth: usize) -> InferredType {
    if depth > rules.max_depth {
        warn!(
            key,
            depth,
            max = rules.max_depth,
            "Maximum nesting depth exceeded, falling back to keyword"
        );
        return InferredType::keyword();
    }

    match value {
        Value::Null => InferredType::empty_keyword(&rules.null_sentinel),
        Value::Bool(b) => infer_type(key, &b.to_string(), rules),
        Value::Number(n) => infer_type(key, &n.to_string(), rules),
        Value::String(s) => infer_type(key, s, rules),
        Value::Array(items) => match items.first() {
            Some(first) => InferredType::Nested {
                element: Box::new(infer_at_depth(key, first, rules, depth + 1)),
            },
            None => InferredType::keyword(),
        },
        Value::Object(map) => InferredType::Object {
            properties: map
                .iter()
                .map(|(k, v)| (k.clone(), infer_at_depth(k, v, rules, depth + 1)))
                .collect(),
        },
    }
}

/// Infer every top-level property of a JSON document
///
/// An object root is used as-is; an array root contributes its first element,
/// which must itself be an object.
pub fn infer_document(
    document: &Value,
    rules: &RuleConfig,
) -> Result<BTreeMap<String, InferredType>, InferenceError> {
    let record = match document {
        Value::Object(_) => document,
        Value::Array(items) => items.first().ok_or(InferenceError::NoRecords)?,
        other => {
            return Err(InferenceError::InvalidStructure(
                value_type_name(other).to_string(),
            ));
        }
    };

    match record {
        Value::Object(map) => Ok(map
            .iter()
            .map(|(k, v)| (k.clone(), infer_json_type(k, v, rules)))
            .collect()),
        other => Err(InferenceError::InvalidStructure(format!(
            "array of {}",
            value_type_name(other)
        ))),
    }
}

fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
