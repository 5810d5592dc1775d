//! Validation functionality
//!
//! Provides validation logic for:
//! - Identifier sanitization and quoting for generated DDL
//! - Table and index name validation for user-supplied names

pub mod input;

pub use input::{
    ValidationError, ValidationResult, is_sql_reserved_word, quote_identifier, sanitize_comment,
    sanitize_identifier, validate_index_name, validate_table_name,
};
