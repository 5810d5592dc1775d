//! Field-type inference behavior across both targets

use std::collections::BTreeMap;

use composer_core::inference::{
    ColumnSample, DatePrecedence, InferredType, RuleConfig, SqlType, infer_column,
    infer_document, infer_json_type, infer_sql_type, infer_type,
};
use serde_json::json;

fn relational(name: &str, value: &str) -> SqlType {
    infer_sql_type(&ColumnSample::new(name, [value]), &RuleConfig::postgres())
}

mod scalar_tests {
    use super::*;

    #[test]
    fn test_reference_row_search_rules() {
        let rules = RuleConfig::elasticsearch();
        let header = ["id", "name", "created_at", "is_active", "score"];
        let row = ["12345", "John Doe", "2024-01-01", "true", "85.5"];
        let expected = [
            InferredType::Integer,
            InferredType::keyword(),
            InferredType::Date,
            InferredType::Boolean,
            InferredType::Float,
        ];

        for ((name, value), expected) in header.iter().zip(row).zip(expected) {
            assert_eq!(infer_type(name, value, &rules), expected, "column {}", name);
        }
    }

    #[test]
    fn test_reference_row_relational_rules() {
        assert_eq!(relational("id", "12345"), SqlType::SmallInt);
        assert_eq!(
            relational("score", "85.5"),
            SqlType::Decimal {
                precision: 10,
                scale: 2
            }
        );
        assert_eq!(relational("is_active", "true"), SqlType::Boolean);
        assert_eq!(relational("created_at", "2024-01-01"), SqlType::Date);
    }

    #[test]
    fn test_short_strings_are_keywords_sized_within_limits() {
        let rules = RuleConfig::postgres();
        let widest = "y".repeat(170);
        for value in ["x", "John Doe", "A moderately long label for a column", widest.as_str()] {
            assert_eq!(
                infer_type("label", value, &RuleConfig::elasticsearch()),
                InferredType::keyword()
            );

            match infer_sql_type(&ColumnSample::new("label", [value]), &rules) {
                SqlType::Varchar { length, null_value } => {
                    assert!(length >= value.chars().count(), "value {:?}", value);
                    assert!(length <= rules.max_varchar_length);
                    assert!(length >= rules.min_varchar_length);
                    assert_eq!(null_value, None);
                }
                other => panic!("expected VARCHAR for {:?}, got {}", value, other),
            }
        }
    }

    #[test]
    fn test_empty_values_get_sentinel_regardless_of_name() {
        for name in ["id", "password", "created_at", "is_active", "anything"] {
            for blank in ["", " ", "\t  "] {
                assert_eq!(
                    infer_type(name, blank, &RuleConfig::elasticsearch()),
                    InferredType::empty_keyword("No Data")
                );
                assert_eq!(relational(name, blank).null_value(), Some("No Data"));
            }
        }
    }

    #[test]
    fn test_boolean_vocabulary_is_case_insensitive() {
        let rules = RuleConfig::elasticsearch();
        for value in ["true", "FALSE", "Yes", "no", "T", "f", "Y", "n"] {
            assert_eq!(infer_type("flag", value, &rules), InferredType::Boolean, "{}", value);
        }
        // numeric detection runs first
        assert_eq!(infer_type("flag", "1", &rules), InferredType::Integer);
        assert_eq!(infer_type("flag", "0", &rules), InferredType::Integer);
    }

    #[test]
    fn test_sensitive_names_beat_content() {
        let rules = RuleConfig::elasticsearch();
        assert_eq!(infer_type("password", "true", &rules), InferredType::keyword());
        assert_eq!(infer_type("API_KEY", "42", &rules), InferredType::keyword());
        assert_eq!(infer_type("session_token", "2024-01-01", &rules), InferredType::keyword());
        assert!(matches!(relational("secret", "true"), SqlType::Varchar { .. }));
    }

    #[test]
    fn test_non_finite_numbers_are_strings() {
        let rules = RuleConfig::elasticsearch();
        for value in ["NaN", "inf", "-Infinity"] {
            assert_eq!(infer_type("reading", value, &rules), InferredType::keyword());
        }
    }

    #[test]
    fn test_long_values_become_text() {
        let long = "word ".repeat(60);
        assert_eq!(
            infer_type("bio", &long, &RuleConfig::elasticsearch()),
            InferredType::Text
        );
        assert_eq!(relational("bio", &long), SqlType::Text);
    }

    #[test]
    fn test_date_precedence_is_configurable() {
        let numeric_first = RuleConfig::elasticsearch();
        let date_first = RuleConfig::builder()
            .date_precedence(DatePrecedence::DateFirst)
            .build();

        assert_eq!(
            infer_type("updated", "1700000000", &numeric_first),
            InferredType::Integer
        );
        assert_eq!(
            infer_type("updated", "1700000000", &date_first),
            InferredType::Date
        );
    }

    #[test]
    fn test_inference_is_deterministic() {
        let column = ColumnSample::new("score", ["85.5", "90", "77.25"]);
        let rules = RuleConfig::postgres();
        let first = infer_sql_type(&column, &rules);
        for _ in 0..10 {
            assert_eq!(infer_sql_type(&column, &rules), first);
            assert_eq!(
                infer_column(&column, &RuleConfig::elasticsearch()),
                InferredType::Float
            );
        }
    }
}

mod integer_width_tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        let cases = [
            ("0", SqlType::SmallInt),
            ("32767", SqlType::SmallInt),
            ("32768", SqlType::Integer),
            ("-32768", SqlType::Integer),
            ("2147483647", SqlType::Integer),
            ("2147483648", SqlType::BigInt),
            ("-2147483648", SqlType::Integer),
            ("-2147483649", SqlType::BigInt),
        ];
        for (value, expected) in cases {
            assert_eq!(relational("count", value), expected, "value {}", value);
        }
    }

    #[test]
    fn test_widest_sample_decides() {
        let column = ColumnSample::new("count", ["1", "70000", "2"]);
        assert_eq!(
            infer_sql_type(&column, &RuleConfig::postgres()),
            SqlType::Integer
        );
    }

    #[test]
    fn test_custom_bounds_from_toml() {
        let rules = RuleConfig::postgres()
            .merge_toml_str("smallintMax = 100")
            .unwrap();
        assert_eq!(
            infer_sql_type(&ColumnSample::new("n", ["101"]), &rules),
            SqlType::Integer
        );
    }
}

mod json_tests {
    use super::*;

    #[test]
    fn test_tags_and_meta_document() {
        let document = json!({"tags": ["red", "blue"], "meta": {"count": 3}});
        let inferred = infer_document(&document, &RuleConfig::elasticsearch()).unwrap();

        assert_eq!(
            inferred["tags"],
            InferredType::Nested {
                element: Box::new(InferredType::keyword())
            }
        );
        assert_eq!(
            inferred["meta"],
            InferredType::Object {
                properties: BTreeMap::from([("count".to_string(), InferredType::Integer)])
            }
        );
    }

    #[test]
    fn test_nested_arrays_of_objects() {
        let value = json!([{"score": 1.5, "password": "x"}]);
        let inferred = infer_json_type("results", &value, &RuleConfig::elasticsearch());
        assert_eq!(
            inferred,
            InferredType::Nested {
                element: Box::new(InferredType::Object {
                    properties: BTreeMap::from([
                        ("password".to_string(), InferredType::keyword()),
                        ("score".to_string(), InferredType::Float),
                    ])
                })
            }
        );
    }

    #[test]
    fn test_deep_documents_terminate() {
        let mut value = json!(1);
        for _ in 0..200 {
            value = json!({ "inner": value });
        }
        let inferred = infer_json_type("root", &value, &RuleConfig::elasticsearch());

        let mut depth = 0;
        let mut current = &inferred;
        while let InferredType::Object { properties } = current {
            current = &properties["inner"];
            depth += 1;
        }
        assert_eq!(depth, 33);
        assert_eq!(current, &InferredType::keyword());
    }
}
