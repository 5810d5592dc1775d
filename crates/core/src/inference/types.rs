//! Inferred field types

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A column name together with the sampled values seen for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSample {
    /// Column (or JSON key) name
    pub name: String,
    /// Raw sample values in row order
    pub values: Vec<String>,
}

impl ColumnSample {
    /// Create a column sample from a name and its values
    pub fn new<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Values that are not blank, trimmed
    pub fn non_empty(&self) -> impl Iterator<Item = &str> {
        self.values
            .iter()
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// True when no sample carries data
    pub fn is_empty(&self) -> bool {
        self.non_empty().next().is_none()
    }

    /// Length in characters of the longest sample, surrounding whitespace included
    ///
    /// Readers keep cells as they appear in the file, so column widths are
    /// sized for the stored value rather than its trimmed form.
    pub fn max_length(&self) -> usize {
        self.values
            .iter()
            .map(|v| v.chars().count())
            .max()
            .unwrap_or(0)
    }
}

/// Search-engine field type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InferredType {
    /// Exact-match string, optionally carrying the null sentinel
    Keyword {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        null_value: Option<String>,
    },
    /// Analyzed free text
    Text,
    /// Whole numbers
    Integer,
    /// Numbers with a fractional part
    Float,
    /// Boolean
    Boolean,
    /// Calendar date
    Date,
    /// Date with a time-of-day component
    Timestamp,
    /// Object with named properties
    Object {
        properties: BTreeMap<String, InferredType>,
    },
    /// Array whose elements share one type
    Nested { element: Box<InferredType> },
}

impl InferredType {
    /// Keyword without a sentinel
    pub fn keyword() -> Self {
        InferredType::Keyword { null_value: None }
    }

    /// Keyword carrying the null sentinel
    pub fn empty_keyword(sentinel: impl Into<String>) -> Self {
        InferredType::Keyword {
            null_value: Some(sentinel.into()),
        }
    }

    /// Short lowercase name, used for logs and dictionary output
    pub fn type_name(&self) -> &'static str {
        match self {
            InferredType::Keyword { .. } => "keyword",
            InferredType::Text => "text",
            InferredType::Integer => "integer",
            InferredType::Float => "float",
            InferredType::Boolean => "boolean",
            InferredType::Date => "date",
            InferredType::Timestamp => "timestamp",
            InferredType::Object { .. } => "object",
            InferredType::Nested { .. } => "nested",
        }
    }

    /// True for string-like leaves
    pub fn is_string(&self) -> bool {
        matches!(self, InferredType::Keyword { .. } | InferredType::Text)
    }

    /// The null sentinel, when this is a keyword that had no data
    pub fn null_value(&self) -> Option<&str> {
        match self {
            InferredType::Keyword { null_value } => null_value.as_deref(),
            _ => None,
        }
    }
}

impl fmt::Display for InferredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InferredType::Nested { element } => write!(f, "nested<{}>", element),
            other => write!(f, "{}", other.type_name()),
        }
    }
}

/// Relational column type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SqlType {
    SmallInt,
    Integer,
    BigInt,
    Decimal {
        precision: u32,
        scale: u32,
    },
    Boolean,
    Date,
    Timestamp,
    Text,
    Varchar {
        length: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        null_value: Option<String>,
    },
}

impl SqlType {
    /// The null sentinel, when this is a VARCHAR that had no data
    pub fn null_value(&self) -> Option<&str> {
        match self {
            SqlType::Varchar { null_value, .. } => null_value.as_deref(),
            _ => None,
        }
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlType::SmallInt => write!(f, "SMALLINT"),
            SqlType::Integer => write!(f, "INTEGER"),
            SqlType::BigInt => write!(f, "BIGINT"),
            SqlType::Decimal { precision, scale } => write!(f, "DECIMAL({},{})", precision, scale),
            SqlType::Boolean => write!(f, "BOOLEAN"),
            SqlType::Date => write!(f, "DATE"),
            SqlType::Timestamp => write!(f, "TIMESTAMP"),
            SqlType::Text => write!(f, "TEXT"),
            SqlType::Varchar { length, .. } => write!(f, "VARCHAR({})", length),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_sample_helpers() {
        let column = ColumnSample::new("name", ["  ", "Alice", "Bartholomew "]);
        assert!(!column.is_empty());
        assert_eq!(column.non_empty().count(), 2);
        assert_eq!(column.max_length(), 12);

        let blank = ColumnSample::new("name", ["", "   "]);
        assert!(blank.is_empty());
        assert!(ColumnSample::new("name", Vec::<String>::new()).is_empty());
    }

    #[test]
    fn test_sql_type_display() {
        assert_eq!(SqlType::SmallInt.to_string(), "SMALLINT");
        assert_eq!(
            SqlType::Decimal {
                precision: 10,
                scale: 2
            }
            .to_string(),
            "DECIMAL(10,2)"
        );
        assert_eq!(
            SqlType::Varchar {
                length: 50,
                null_value: Some("No Data".to_string())
            }
            .to_string(),
            "VARCHAR(50)"
        );
    }

    #[test]
    fn test_inferred_type_serialization() {
        let nested = InferredType::Nested {
            element: Box::new(InferredType::keyword()),
        };
        let json = serde_json::to_value(&nested).unwrap();
        assert_eq!(json["type"], "nested");
        assert_eq!(json["element"]["type"], "keyword");
        assert!(json["element"].get("null_value").is_none());

        let parsed: InferredType = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, nested);
        assert_eq!(nested.to_string(), "nested<keyword>");
    }

    #[test]
    fn test_null_value_accessor() {
        assert_eq!(
            InferredType::empty_keyword("No Data").null_value(),
            Some("No Data")
        );
        assert_eq!(InferredType::Integer.null_value(), None);
    }
}
