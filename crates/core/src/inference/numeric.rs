//! Numeric-range analysis for relational column sizing

use serde::{Deserialize, Serialize};

use super::config::RuleConfig;
use super::detect::parse_number;
use super::types::SqlType;

/// PostgreSQL's upper bound for DECIMAL precision
const MAX_DECIMAL_PRECISION: u32 = 1000;

/// Aggregate statistics over every sampled value of one column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumericProfile {
    /// Smallest value seen
    pub min: f64,
    /// Largest value seen
    pub max: f64,
    /// Every value had no fractional part
    pub all_integral: bool,
    /// Every integral value lies within the `i64` range
    pub fits_i64: bool,
    /// Most digits seen after the decimal point
    pub max_decimal_digits: usize,
    /// Most digits seen before the decimal point
    pub max_integer_digits: usize,
    /// Number of values analyzed
    pub count: usize,
}

impl NumericProfile {
    /// Analyze every non-blank value
    ///
    /// Returns `None` if any value is not a number, or if nothing but blanks
    /// was sampled.
    pub fn analyze<'a, I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut profile: Option<NumericProfile> = None;

        for raw in values {
            if raw.trim().is_empty() {
                continue;
            }
            let parsed = parse_number(raw)?;
            let integral = parsed.is_integral();
            let fits = parsed.integer.is_some() || parsed.value.abs() < i64::MAX as f64;

            match profile.as_mut() {
                None => {
                    profile = Some(NumericProfile {
                        min: parsed.value,
                        max: parsed.value,
                        all_integral: integral,
                        fits_i64: fits,
                        max_decimal_digits: parsed.decimal_digits,
                        max_integer_digits: parsed.integer_digits,
                        count: 1,
                    });
                }
                Some(p) => {
                    p.min = p.min.min(parsed.value);
                    p.max = p.max.max(parsed.value);
                    p.all_integral &= integral;
                    p.fits_i64 &= fits;
                    p.max_decimal_digits = p.max_decimal_digits.max(parsed.decimal_digits);
                    p.max_integer_digits = p.max_integer_digits.max(parsed.integer_digits);
                    p.count += 1;
                }
            }
        }

        profile
    }

    /// Choose the smallest column type that holds every observed value
    pub fn sql_type(&self, rules: &RuleConfig) -> SqlType {
        if self.all_integral {
            let small = rules.smallint_max as f64;
            let int = rules.integer_max as f64;

            if self.min >= -small && self.max <= small {
                return SqlType::SmallInt;
            }
            if self.min >= -int - 1.0 && self.max <= int {
                return SqlType::Integer;
            }
            if self.fits_i64 {
                return SqlType::BigInt;
            }
            let magnitude = self.min.abs().max(self.max.abs());
            let magnitude_digits = magnitude.log10().floor() as u32 + 1;
            let digits = (self.max_integer_digits as u32)
                .max(magnitude_digits)
                .clamp(1, MAX_DECIMAL_PRECISION);
            return SqlType::Decimal {
                precision: digits,
                scale: 0,
            };
        }

        let observed = self.max_decimal_digits as u32;
        let scale = rules.default_decimal_scale.max(observed);
        let precision = rules
            .default_decimal_precision
            .max(observed + 5)
            .max(scale)
            .min(MAX_DECIMAL_PRECISION);

        SqlType::Decimal {
            precision,
            scale: scale.min(precision),
        }
    }
}
