//! Rule configuration for type inference

use serde::{Deserialize, Serialize};

use super::error::InferenceError;

/// How a date-like column name is confirmed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DateDetection {
    /// A matching column name is enough
    NameOnly,
    /// Every sample must also parse as a date or timestamp
    Validated,
}

/// Whether the date rule runs before or after the numeric rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DatePrecedence {
    /// `"20240101"` in a `created` column is numeric
    NumericFirst,
    /// `"20240101"` in a `created` column is a date (subject to validation)
    DateFirst,
}

/// Thresholds, vocabularies and patterns that drive type inference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct RuleConfig {
    /// Longest value still stored as keyword/VARCHAR
    pub max_text_length: usize,

    /// Hard ceiling for a generated VARCHAR width
    pub max_varchar_length: usize,

    /// Smallest generated VARCHAR width
    pub min_varchar_length: usize,

    /// Multiplier applied to the longest observed value when sizing a VARCHAR
    pub varchar_buffer: f64,

    /// Column-name substrings that suggest a date or timestamp
    pub date_patterns: Vec<String>,

    /// Column-name substrings that force a plain string type
    pub sensitive_patterns: Vec<String>,

    /// Tokens recognized as booleans (compared case-insensitively)
    pub boolean_values: Vec<String>,

    /// Placeholder attached to string fields that had no sample data
    pub null_sentinel: String,

    /// Largest magnitude stored as SMALLINT
    pub smallint_max: i64,

    /// Largest magnitude stored as INTEGER
    pub integer_max: i64,

    /// Minimum DECIMAL precision
    pub default_decimal_precision: u32,

    /// Minimum DECIMAL scale
    pub default_decimal_scale: u32,

    /// Date confirmation mode
    pub date_detection: DateDetection,

    /// Date rule ordering relative to the numeric rule
    pub date_precedence: DatePrecedence,

    /// Maximum JSON nesting depth before falling back to keyword
    pub max_depth: usize,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self::elasticsearch()
    }
}

impl RuleConfig {
    /// Lenient rules used for search-engine mappings and dictionaries
    pub fn elasticsearch() -> Self {
        Self {
            max_text_length: 256,
            max_varchar_length: 255,
            min_varchar_length: 50,
            varchar_buffer: 1.5,
            date_patterns: strings(&["date", "time", "created", "updated", "modified", "timestamp"]),
            sensitive_patterns: strings(&["password", "secret", "key", "token"]),
            boolean_values: strings(&["true", "false", "yes", "no", "1", "0", "t", "f", "y", "n"]),
            null_sentinel: "No Data".to_string(),
            smallint_max: 32_767,
            integer_max: 2_147_483_647,
            default_decimal_precision: 10,
            default_decimal_scale: 2,
            date_detection: DateDetection::NameOnly,
            date_precedence: DatePrecedence::NumericFirst,
            max_depth: 32,
        }
    }

    /// Strict rules used for relational tables
    pub fn postgres() -> Self {
        Self {
            max_text_length: 255,
            boolean_values: strings(&["true", "false", "yes", "no", "t", "f", "y", "n"]),
            date_detection: DateDetection::Validated,
            ..Self::elasticsearch()
        }
    }

    /// Create a builder starting from the lenient preset
    pub fn builder() -> RuleConfigBuilder {
        RuleConfigBuilder::default()
    }

    /// Layer a partial TOML document over `self`
    ///
    /// Keys absent from the document keep their current value. Unknown keys
    /// are rejected, and the result is passed through [`RuleConfig::normalized`].
    pub fn merge_toml_str(&self, content: &str) -> Result<Self, InferenceError> {
        let overrides: toml::Table =
            toml::from_str(content).map_err(|e| InferenceError::Config(e.to_string()))?;

        let mut base = match toml::Value::try_from(self) {
            Ok(toml::Value::Table(table)) => table,
            Ok(other) => {
                return Err(InferenceError::Config(format!(
                    "expected a table, found {}",
                    other.type_str()
                )));
            }
            Err(e) => return Err(InferenceError::Config(e.to_string())),
        };
        for (key, value) in overrides {
            base.insert(key, value);
        }

        toml::Value::Table(base)
            .try_into()
            .map(RuleConfig::normalized)
            .map_err(|e: toml::de::Error| InferenceError::Config(e.to_string()))
    }

    /// Apply the builder's bounds to values that bypassed it
    ///
    /// The VARCHAR buffer is at least 1.0, widths at least 1, the INTEGER
    /// bound at least the SMALLINT bound, and the decimal scale at most the
    /// precision.
    pub fn normalized(self) -> Self {
        let buffer = self.varchar_buffer;
        let (min_width, max_width) = (self.min_varchar_length, self.max_varchar_length);
        let (smallint_max, integer_max) = (self.smallint_max, self.integer_max);
        let (precision, scale) = (self.default_decimal_precision, self.default_decimal_scale);

        RuleConfigBuilder::from_config(self)
            .varchar_buffer(buffer)
            .min_varchar_length(min_width)
            .max_varchar_length(max_width)
            .integer_bounds(smallint_max, integer_max)
            .decimal_defaults(precision, scale)
            .build()
    }

    /// Parse a TOML document on top of the lenient preset
    pub fn from_toml_str(content: &str) -> Result<Self, InferenceError> {
        Self::elasticsearch().merge_toml_str(content)
    }

    /// True when the column name contains a sensitive pattern
    pub fn is_sensitive(&self, column: &str) -> bool {
        contains_any(column, &self.sensitive_patterns)
    }

    /// True when the column name contains a date pattern
    pub fn looks_like_date(&self, column: &str) -> bool {
        contains_any(column, &self.date_patterns)
    }

    /// True when `value` is in the boolean vocabulary
    pub fn is_boolean_token(&self, value: &str) -> bool {
        let value = value.trim();
        self.boolean_values
            .iter()
            .any(|token| token.eq_ignore_ascii_case(value))
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn contains_any(column: &str, patterns: &[String]) -> bool {
    let column = column.to_lowercase();
    patterns
        .iter()
        .any(|p| !p.is_empty() && column.contains(&p.to_lowercase()))
}

/// Builder for RuleConfig
#[derive(Debug, Default)]
pub struct RuleConfigBuilder {
    config: RuleConfig,
}

impl RuleConfigBuilder {
    /// Start from an existing configuration
    pub fn from_config(config: RuleConfig) -> Self {
        Self { config }
    }

    /// Set the longest value still treated as keyword/VARCHAR
    pub fn max_text_length(mut self, length: usize) -> Self {
        self.config.max_text_length = length;
        self
    }

    /// Set the VARCHAR width ceiling
    pub fn max_varchar_length(mut self, length: usize) -> Self {
        self.config.max_varchar_length = length.max(1);
        self
    }

    /// Set the VARCHAR width floor
    pub fn min_varchar_length(mut self, length: usize) -> Self {
        self.config.min_varchar_length = length.max(1);
        self
    }

    /// Set the VARCHAR sizing multiplier (at least 1.0)
    pub fn varchar_buffer(mut self, buffer: f64) -> Self {
        self.config.varchar_buffer = if buffer.is_finite() { buffer.max(1.0) } else { 1.0 };
        self
    }

    /// Replace the date pattern list
    pub fn date_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.date_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the sensitive pattern list
    pub fn sensitive_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.sensitive_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the boolean vocabulary
    pub fn boolean_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.boolean_values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Set the null sentinel
    pub fn null_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.config.null_sentinel = sentinel.into();
        self
    }

    /// Set the SMALLINT and INTEGER boundaries
    pub fn integer_bounds(mut self, smallint_max: i64, integer_max: i64) -> Self {
        self.config.smallint_max = smallint_max.abs();
        self.config.integer_max = integer_max.abs().max(self.config.smallint_max);
        self
    }

    /// Set the minimum DECIMAL precision and scale
    pub fn decimal_defaults(mut self, precision: u32, scale: u32) -> Self {
        self.config.default_decimal_precision = precision.max(1);
        self.config.default_decimal_scale = scale.min(self.config.default_decimal_precision);
        self
    }

    /// Set the date confirmation mode
    pub fn date_detection(mut self, detection: DateDetection) -> Self {
        self.config.date_detection = detection;
        self
    }

    /// Set the date rule ordering
    pub fn date_precedence(mut self, precedence: DatePrecedence) -> Self {
        self.config.date_precedence = precedence;
        self
    }

    /// Set the JSON recursion ceiling
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.config.max_depth = depth;
        self
    }

    /// Build the configuration
    pub fn build(self) -> RuleConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_differ() {
        let es = RuleConfig::elasticsearch();
        let pg = RuleConfig::postgres();
        assert_eq!(es.max_text_length, 256);
        assert_eq!(pg.max_text_length, 255);
        assert_eq!(es.date_detection, DateDetection::NameOnly);
        assert_eq!(pg.date_detection, DateDetection::Validated);
        assert!(es.is_boolean_token("1"));
        assert!(!pg.is_boolean_token("1"));
    }

    #[test]
    fn test_builder() {
        let config = RuleConfig::builder()
            .max_text_length(100)
            .null_sentinel("N/A")
            .date_precedence(DatePrecedence::DateFirst)
            .varchar_buffer(0.5)
            .build();

        assert_eq!(config.max_text_length, 100);
        assert_eq!(config.null_sentinel, "N/A");
        assert_eq!(config.date_precedence, DatePrecedence::DateFirst);
        assert_eq!(config.varchar_buffer, 1.0);
    }

    #[test]
    fn test_pattern_matching_is_case_insensitive() {
        let config = RuleConfig::default();
        assert!(config.is_sensitive("API_KEY"));
        assert!(config.looks_like_date("CreatedOn"));
        assert!(config.is_boolean_token(" TRUE "));
        assert!(!config.looks_like_date("name"));
    }

    #[test]
    fn test_toml_overrides_keep_unspecified_fields() {
        let config = RuleConfig::postgres()
            .merge_toml_str(
                r#"
                maxTextLength = 120
                datePrecedence = "dateFirst"
                "#,
            )
            .unwrap();

        assert_eq!(config.max_text_length, 120);
        assert_eq!(config.date_precedence, DatePrecedence::DateFirst);
        assert_eq!(config.date_detection, DateDetection::Validated);
        assert_eq!(config.null_sentinel, "No Data");
    }

    #[test]
    fn test_toml_overrides_are_clamped() {
        let config = RuleConfig::postgres()
            .merge_toml_str(
                r#"
                varcharBuffer = 0.5
                minVarcharLength = 0
                smallintMax = 40000
                integerMax = 100
                defaultDecimalPrecision = 4
                defaultDecimalScale = 9
                "#,
            )
            .unwrap();

        assert_eq!(config.varchar_buffer, 1.0);
        assert_eq!(config.min_varchar_length, 1);
        assert_eq!(config.integer_max, 40000);
        assert_eq!(config.default_decimal_scale, 4);

        let long = "x".repeat(120);
        let column = crate::inference::ColumnSample::new("notes", [long.as_str()]);
        match crate::inference::infer_sql_type(&column, &config) {
            crate::inference::SqlType::Varchar { length, .. } => {
                assert!(length >= 120, "width {}", length)
            }
            other => panic!("expected VARCHAR, got {:?}", other),
        }
    }

    #[test]
    fn test_toml_rejects_unknown_keys() {
        let result = RuleConfig::postgres().merge_toml_str("maxTextLenght = 10");
        assert!(matches!(result, Err(InferenceError::Config(_))));
    }

    #[test]
    fn test_toml_rejects_bad_types() {
        let result = RuleConfig::from_toml_str("maxTextLength = \"long\"");
        assert!(matches!(result, Err(InferenceError::Config(_))));
    }
}
