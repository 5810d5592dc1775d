//! Scalar detectors for sample values
//!
//! Every detector is permissive: a value that cannot be read simply does not
//! match, it never produces an error.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

// Plain decimal notation with optional exponent; rejects `inf`, `NaN`, hex
static NUMBER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?$").unwrap());

static INTEGER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?\d+$").unwrap());

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y", "%Y%m%d"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// A successfully parsed numeric sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsedNumber {
    /// Parsed value
    pub value: f64,
    /// Whole-number value, when the text is an integer literal that fits `i64`
    pub integer: Option<i64>,
    /// Digits written after the decimal point
    pub decimal_digits: usize,
    /// Digits written before the decimal point (ignoring sign and leading zeros)
    pub integer_digits: usize,
}

impl ParsedNumber {
    /// True when the parsed value has no fractional part
    pub fn is_integral(&self) -> bool {
        self.integer.is_some() || self.value.fract() == 0.0
    }
}

/// Parse a sample as a finite number
pub fn parse_number(value: &str) -> Option<ParsedNumber> {
    let value = value.trim();
    if !NUMBER_REGEX.is_match(value) {
        return None;
    }

    let parsed: f64 = value.parse().ok()?;
    if !parsed.is_finite() {
        return None;
    }

    let integer = if INTEGER_REGEX.is_match(value) {
        value.parse::<i64>().ok()
    } else {
        None
    };

    let mantissa = value
        .split(['e', 'E'])
        .next()
        .unwrap_or(value)
        .trim_start_matches(['+', '-']);
    let (whole, fraction) = match mantissa.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (mantissa, ""),
    };
    let integer_digits = whole.trim_start_matches('0').len().max(1);

    Some(ParsedNumber {
        value: parsed,
        integer,
        decimal_digits: fraction.len(),
        integer_digits,
    })
}

/// Result of a strict date check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateKind {
    /// Calendar date only
    Date,
    /// Date plus a time of day
    Timestamp,
}

/// Parse a sample as a date or timestamp
pub fn parse_date(value: &str) -> Option<DateKind> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if DateTime::parse_from_rfc3339(value).is_ok() || DateTime::parse_from_rfc2822(value).is_ok()
    {
        return Some(DateKind::Timestamp);
    }

    if DATETIME_FORMATS
        .iter()
        .any(|format| NaiveDateTime::parse_from_str(value, format).is_ok())
    {
        return Some(DateKind::Timestamp);
    }

    if DATE_FORMATS
        .iter()
        .any(|format| NaiveDate::parse_from_str(value, format).is_ok())
    {
        return Some(DateKind::Date);
    }

    None
}
