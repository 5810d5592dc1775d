//! Composer Core - schema inference and configuration generators
//!
//! Provides:
//! - Field-type inference from CSV and JSON samples
//! - CSV and JSON sample readers
//! - Elasticsearch, PostgreSQL, Lectern and Arranger output generators
//! - Identifier sanitization for generated DDL

pub mod export;
pub mod import;
pub mod inference;
pub mod validation;

// Re-export commonly used types
pub use export::{
    ArrangerConfigs, ArrangerOptions, DictionaryInfo, ElasticsearchMapping, ExportError,
    LecternDictionary, MappingOptions, PostgresTable,
};
pub use import::{CsvOptions, CsvSample, ImportError};
pub use inference::{
    ColumnSample, InferenceError, InferredType, RuleConfig, SqlType, infer_column,
    infer_document, infer_json_type, infer_sql_type, infer_type,
};
pub use validation::{ValidationError, sanitize_identifier};
