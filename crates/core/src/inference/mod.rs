//! Field-type inference from sampled values
//!
//! One ordered decision tree is shared by every output target. The search
//! target produces [`InferredType`], the relational target produces
//! [`SqlType`]; both are parameterized by a [`RuleConfig`].
//!
//! ## Example
//!
//! ```rust
//! use composer_core::inference::{ColumnSample, InferredType, RuleConfig, SqlType};
//! use composer_core::inference::{infer_sql_type, infer_type};
//!
//! let rules = RuleConfig::elasticsearch();
//! assert_eq!(infer_type("id", "12345", &rules), InferredType::Integer);
//!
//! let column = ColumnSample::new("id", ["12345"]);
//! assert_eq!(infer_sql_type(&column, &RuleConfig::postgres()), SqlType::SmallInt);
//! ```

mod config;
mod detect;
mod error;
mod json;
mod numeric;
mod strategy;
mod types;

pub use config::{DateDetection, DatePrecedence, RuleConfig, RuleConfigBuilder};
pub use detect::{DateKind, ParsedNumber, parse_date, parse_number};
pub use error::InferenceError;
pub use json::{infer_document, infer_json_type};
pub use numeric::NumericProfile;
pub use strategy::{
    DetectionStrategy, RelationalStrategy, SearchStrategy, decide, infer_column, infer_sql_type,
    infer_type,
};
pub use types::{ColumnSample, InferredType, SqlType};
