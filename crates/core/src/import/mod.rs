//! Sample readers
//!
//! Turn input files into the values the inference engine consumes:
//! - CSV: header row plus the first few data rows, as [`ColumnSample`]s
//! - JSON: a parsed [`serde_json::Value`] document
//!
//! [`ColumnSample`]: crate::inference::ColumnSample

pub mod csv;
mod error;
pub mod json;

pub use self::csv::{CsvOptions, CsvSample};
pub use error::{ImportError, ImportResult};
pub use json::{parse_json, read_json};
