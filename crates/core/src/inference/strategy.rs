//! The shared decision tree and its per-target detectors
//!
//! Categories overlap (`"1"` is both a boolean token and an integer), so the
//! order in [`decide`] is significant: the first detector that matches wins.
//! Each output target plugs its own detectors in through
//! [`DetectionStrategy`] instead of re-implementing the ordering.

use std::fmt;

use tracing::debug;

use super::config::{DateDetection, DatePrecedence, RuleConfig};
use super::detect::{DateKind, parse_date, parse_number};
use super::numeric::NumericProfile;
use super::types::{ColumnSample, InferredType, SqlType};

/// Per-target detectors consulted by [`decide`]
pub trait DetectionStrategy {
    /// Type produced for the target
    type Output: fmt::Debug;

    /// Rules the detectors were configured with
    fn rules(&self) -> &RuleConfig;

    /// Column had no data at all
    fn detect_empty(&self, column: &ColumnSample) -> Self::Output;

    /// Plain string type, used when content-based detection is skipped
    fn detect_keyword(&self, column: &ColumnSample) -> Self::Output;

    /// Every sample is numeric
    fn detect_numeric(&self, column: &ColumnSample) -> Option<Self::Output>;

    /// Every sample is a boolean token
    fn detect_boolean(&self, column: &ColumnSample) -> Option<Self::Output>;

    /// Column holds dates or timestamps
    fn detect_date(&self, column: &ColumnSample) -> Option<Self::Output>;

    /// Fallback once nothing else matched
    fn detect_default(&self, column: &ColumnSample) -> Self::Output;
}

/// Run the ordered decision tree for one column
pub fn decide<S>(strategy: &S, column: &ColumnSample) -> S::Output
where
    S: DetectionStrategy + ?Sized,
{
    let output = decide_inner(strategy, column);
    debug!(column = %column.name, inferred = ?output, "Inferred column type");
    output
}

fn decide_inner<S>(strategy: &S, column: &ColumnSample) -> S::Output
where
    S: DetectionStrategy + ?Sized,
{
    let rules = strategy.rules();

    if column.is_empty() {
        return strategy.detect_empty(column);
    }

    if rules.is_sensitive(&column.name) {
        return strategy.detect_keyword(column);
    }

    if rules.date_precedence == DatePrecedence::DateFirst {
        if let Some(output) = strategy.detect_date(column) {
            return output;
        }
    }

    if let Some(output) = strategy.detect_numeric(column) {
        return output;
    }

    if let Some(output) = strategy.detect_boolean(column) {
        return output;
    }

    if rules.date_precedence == DatePrecedence::NumericFirst {
        if let Some(output) = strategy.detect_date(column) {
            return output;
        }
    }

    strategy.detect_default(column)
}

/// Date rule shared by both targets
fn date_kind(column: &ColumnSample, rules: &RuleConfig) -> Option<DateKind> {
    if !rules.looks_like_date(&column.name) {
        return None;
    }

    match rules.date_detection {
        DateDetection::NameOnly => Some(DateKind::Date),
        DateDetection::Validated => {
            let mut kind = DateKind::Date;
            for value in column.non_empty() {
                if parse_date(value)? == DateKind::Timestamp {
                    kind = DateKind::Timestamp;
                }
            }
            Some(kind)
        }
    }
}

fn all_boolean(column: &ColumnSample, rules: &RuleConfig) -> bool {
    column.non_empty().all(|value| rules.is_boolean_token(value))
}

/// Detectors for search-engine mappings
#[derive(Debug, Clone, Copy)]
pub struct SearchStrategy<'a> {
    rules: &'a RuleConfig,
}

impl<'a> SearchStrategy<'a> {
    pub fn new(rules: &'a RuleConfig) -> Self {
        Self { rules }
    }
}

impl DetectionStrategy for SearchStrategy<'_> {
    type Output = InferredType;

    fn rules(&self) -> &RuleConfig {
        self.rules
    }

    fn detect_empty(&self, _column: &ColumnSample) -> InferredType {
        InferredType::empty_keyword(&self.rules.null_sentinel)
    }

    fn detect_keyword(&self, _column: &ColumnSample) -> InferredType {
        InferredType::keyword()
    }

    fn detect_numeric(&self, column: &ColumnSample) -> Option<InferredType> {
        let mut integral = true;
        for value in column.non_empty() {
            integral &= parse_number(value)?.is_integral();
        }
        Some(if integral {
            InferredType::Integer
        } else {
            InferredType::Float
        })
    }

    fn detect_boolean(&self, column: &ColumnSample) -> Option<InferredType> {
        all_boolean(column, self.rules).then_some(InferredType::Boolean)
    }

    fn detect_date(&self, column: &ColumnSample) -> Option<InferredType> {
        date_kind(column, self.rules).map(|kind| match kind {
            DateKind::Date => InferredType::Date,
            DateKind::Timestamp => InferredType::Timestamp,
        })
    }

    fn detect_default(&self, column: &ColumnSample) -> InferredType {
        if column.max_length() > self.rules.max_text_length {
            InferredType::Text
        } else {
            InferredType::keyword()
        }
    }
}

/// Detectors for relational tables
#[derive(Debug, Clone, Copy)]
pub struct RelationalStrategy<'a> {
    rules: &'a RuleConfig,
}

impl<'a> RelationalStrategy<'a> {
    pub fn new(rules: &'a RuleConfig) -> Self {
        Self { rules }
    }

    /// Width for a VARCHAR holding values up to `longest` characters
    ///
    /// `min(max(ceil(longest * buffer), min_width), max_width)`
    pub fn varchar_width(&self, longest: usize) -> usize {
        let buffered = (longest as f64 * self.rules.varchar_buffer).ceil() as usize;
        buffered
            .max(self.rules.min_varchar_length)
            .min(self.rules.max_varchar_length)
    }

    fn string_type(&self, column: &ColumnSample, allow_text: bool) -> SqlType {
        let longest = column.max_length();
        let too_long = longest > self.rules.max_varchar_length
            || (allow_text && longest > self.rules.max_text_length);

        if too_long {
            SqlType::Text
        } else {
            SqlType::Varchar {
                length: self.varchar_width(longest),
                null_value: None,
            }
        }
    }
}

impl DetectionStrategy for RelationalStrategy<'_> {
    type Output = SqlType;

    fn rules(&self) -> &RuleConfig {
        self.rules
    }

    fn detect_empty(&self, _column: &ColumnSample) -> SqlType {
        SqlType::Varchar {
            length: self.varchar_width(0),
            null_value: Some(self.rules.null_sentinel.clone()),
        }
    }

    fn detect_keyword(&self, column: &ColumnSample) -> SqlType {
        self.string_type(column, false)
    }

    fn detect_numeric(&self, column: &ColumnSample) -> Option<SqlType> {
        NumericProfile::analyze(column.values.iter().map(String::as_str))
            .map(|profile| profile.sql_type(self.rules))
    }

    fn detect_boolean(&self, column: &ColumnSample) -> Option<SqlType> {
        all_boolean(column, self.rules).then_some(SqlType::Boolean)
    }

    fn detect_date(&self, column: &ColumnSample) -> Option<SqlType> {
        date_kind(column, self.rules).map(|kind| match kind {
            DateKind::Date => SqlType::Date,
            DateKind::Timestamp => SqlType::Timestamp,
        })
    }

    fn detect_default(&self, column: &ColumnSample) -> SqlType {
        self.string_type(column, true)
    }
}

/// Infer the search-engine type of a single CSV cell
pub fn infer_type(column_name: &str, sample_value: &str, rules: &RuleConfig) -> InferredType {
    infer_column(&ColumnSample::new(column_name, [sample_value]), rules)
}

/// Infer the search-engine type of a column from all its samples
pub fn infer_column(column: &ColumnSample, rules: &RuleConfig) -> InferredType {
    decide(&SearchStrategy::new(rules), column)
}

/// Infer the relational type of a column from all its samples
pub fn infer_sql_type(column: &ColumnSample, rules: &RuleConfig) -> SqlType {
    decide(&RelationalStrategy::new(rules), column)
}
