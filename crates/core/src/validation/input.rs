//! Input validation and sanitization utilities.
//!
//! Column headers come from arbitrary CSV files, so every name that ends up
//! in generated DDL or an index definition goes through these functions
//! first.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum length for table names
pub const MAX_TABLE_NAME_LENGTH: usize = 63;

/// Maximum length for Elasticsearch index names, in bytes
pub const MAX_INDEX_NAME_LENGTH: usize = 255;

/// Characters Elasticsearch rejects anywhere in an index name
const INDEX_FORBIDDEN_CHARS: &[char] = &['\\', '/', '*', '?', '"', '<', '>', '|', ' ', ',', '#', ':'];

/// Errors that can occur during input validation.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum ValidationError {
    /// Input is empty when a value is required
    #[error("{0} cannot be empty")]
    Empty(&'static str),

    /// Input exceeds maximum allowed length
    #[error("{field} exceeds maximum length (max: {max}, got: {actual})")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    /// Input contains invalid characters
    #[error("{field} contains invalid characters: {reason}")]
    InvalidCharacters { field: &'static str, reason: String },

    /// Input has invalid format
    #[error("{0}: {1}")]
    InvalidFormat(&'static str, String),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Reduce a raw name to a PostgreSQL-safe identifier.
///
/// Lowercases, then replaces every character outside `[a-z0-9_]` with `_`.
/// Applying it twice gives the same result as applying it once.
///
/// # Examples
///
/// ```
/// use composer_core::validation::input::sanitize_identifier;
///
/// assert_eq!(sanitize_identifier("First Name"), "first_name");
/// assert_eq!(sanitize_identifier("e-mail"), "e_mail");
/// assert_eq!(sanitize_identifier("Größe"), "gr__e");
/// ```
pub fn sanitize_identifier(name: &str) -> String {
    name.chars()
        .flat_map(char::to_lowercase)
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Quote an already-sanitized identifier when PostgreSQL requires it.
///
/// Identifiers starting with a digit and reserved words are wrapped in
/// double quotes; everything else is returned unchanged.
///
/// # Examples
///
/// ```
/// use composer_core::validation::input::quote_identifier;
///
/// assert_eq!(quote_identifier("score"), "score");
/// assert_eq!(quote_identifier("order"), "\"order\"");
/// assert_eq!(quote_identifier("2024_total"), "\"2024_total\"");
/// ```
pub fn quote_identifier(name: &str) -> String {
    let starts_with_digit = name.chars().next().is_some_and(|c| c.is_ascii_digit());
    if starts_with_digit || is_sql_reserved_word(name) {
        format!("\"{}\"", name.replace('"', "\"\""))
    } else {
        name.to_string()
    }
}

/// Validate a table name supplied on the command line.
///
/// # Rules
///
/// - Must not be empty
/// - Must not exceed 63 characters (PostgreSQL's identifier limit)
/// - May contain letters, digits, underscores and hyphens
///
/// Reserved words are allowed; they are quoted on output.
pub fn validate_table_name(name: &str) -> ValidationResult<()> {
    if name.is_empty() {
        return Err(ValidationError::Empty("table name"));
    }

    if name.len() > MAX_TABLE_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "table name",
            max: MAX_TABLE_NAME_LENGTH,
            actual: name.len(),
        });
    }

    for c in name.chars() {
        if !c.is_alphanumeric() && c != '_' && c != '-' {
            return Err(ValidationError::InvalidCharacters {
                field: "table name",
                reason: format!("invalid character: '{}'", c),
            });
        }
    }

    Ok(())
}

/// Validate an Elasticsearch index name.
///
/// # Rules
///
/// - Must not be empty, `.` or `..`
/// - Must be lowercase
/// - Must not start with `-`, `_` or `+`
/// - Must not contain `\ / * ? " < > | , # :` or spaces
/// - Must not exceed 255 bytes
///
/// # Examples
///
/// ```
/// use composer_core::validation::input::validate_index_name;
///
/// assert!(validate_index_name("datatable1").is_ok());
/// assert!(validate_index_name("Datatable1").is_err());
/// assert!(validate_index_name("_private").is_err());
/// ```
pub fn validate_index_name(name: &str) -> ValidationResult<()> {
    if name.is_empty() {
        return Err(ValidationError::Empty("index name"));
    }

    if name == "." || name == ".." {
        return Err(ValidationError::InvalidFormat(
            "index name",
            "cannot be '.' or '..'".to_string(),
        ));
    }

    if name.len() > MAX_INDEX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "index name",
            max: MAX_INDEX_NAME_LENGTH,
            actual: name.len(),
        });
    }

    if name.starts_with(['-', '_', '+']) {
        return Err(ValidationError::InvalidFormat(
            "index name",
            "must not start with '-', '_' or '+'".to_string(),
        ));
    }

    if name.chars().any(char::is_uppercase) {
        return Err(ValidationError::InvalidFormat(
            "index name",
            "must be lowercase".to_string(),
        ));
    }

    if let Some(c) = name.chars().find(|c| INDEX_FORBIDDEN_CHARS.contains(c)) {
        return Err(ValidationError::InvalidCharacters {
            field: "index name",
            reason: format!("invalid character: '{}'", c),
        });
    }

    Ok(())
}

/// Sanitize a string for safe use in SQL comments.
///
/// Drops control characters and collapses line breaks so the text cannot
/// escape a `--` comment.
pub fn sanitize_comment(text: &str) -> String {
    text.chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .filter(|c| !c.is_control() || *c == '\t')
        .collect()
}

/// Check if a word is a PostgreSQL reserved word.
pub fn is_sql_reserved_word(word: &str) -> bool {
    const RESERVED_WORDS: &[&str] = &[
        "all",
        "analyse",
        "analyze",
        "and",
        "any",
        "array",
        "as",
        "asc",
        "asymmetric",
        "authorization",
        "between",
        "both",
        "case",
        "cast",
        "check",
        "collate",
        "column",
        "constraint",
        "create",
        "cross",
        "current_catalog",
        "current_date",
        "current_role",
        "current_time",
        "current_timestamp",
        "current_user",
        "default",
        "deferrable",
        "desc",
        "distinct",
        "do",
        "else",
        "end",
        "except",
        "false",
        "fetch",
        "for",
        "foreign",
        "from",
        "full",
        "grant",
        "group",
        "having",
        "ilike",
        "in",
        "initially",
        "inner",
        "intersect",
        "into",
        "is",
        "join",
        "lateral",
        "leading",
        "left",
        "like",
        "limit",
        "localtime",
        "localtimestamp",
        "natural",
        "not",
        "null",
        "offset",
        "on",
        "only",
        "or",
        "order",
        "outer",
        "placing",
        "primary",
        "references",
        "returning",
        "right",
        "select",
        "session_user",
        "similar",
        "some",
        "symmetric",
        "table",
        "then",
        "to",
        "trailing",
        "true",
        "union",
        "unique",
        "user",
        "using",
        "variadic",
        "verbose",
        "when",
        "where",
        "window",
        "with",
    ];

    let lower = word.to_lowercase();
    RESERVED_WORDS.contains(&lower.as_str())
}
