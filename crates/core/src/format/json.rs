use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

use crate::error::{require_input, Result, ToolError};

/// Outcome of [`validate_json`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsonValidation {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
}

fn parse(input: &str) -> Result<Value> {
    let input = require_input(input)?;
    serde_json::from_str(input).map_err(|e| ToolError::parse(format!("Invalid JSON: {e}")))
}

/// Pretty-print JSON with `indent` spaces per level. Key order is preserved.
pub fn format_json(input: &str, indent: usize) -> Result<String> {
    let value = parse(input)?;
    let pad = " ".repeat(indent);
    let formatter = PrettyFormatter::with_indent(pad.as_bytes());
    let mut serializer = serde_json::Serializer::with_formatter(Vec::new(), formatter);

    value
        .serialize(&mut serializer)
        .map_err(|e| ToolError::parse(format!("Failed to format JSON: {e}")))?;

    String::from_utf8(serializer.into_inner())
        .map_err(|e| ToolError::parse(format!("Formatted JSON is not UTF-8: {e}")))
}

/// Remove all insignificant whitespace.
pub fn minify_json(input: &str) -> Result<String> {
    let value = parse(input)?;
    serde_json::to_string(&value).map_err(|e| ToolError::parse(format!("Failed to minify JSON: {e}")))
}

/// Check whether `input` is valid JSON, reporting where parsing failed.
pub fn validate_json(input: &str) -> JsonValidation {
    match serde_json::from_str::<Value>(input) {
        Ok(_) => JsonValidation {
            valid: true,
            error: None,
            line: None,
            column: None,
        },
        Err(e) => JsonValidation {
            valid: false,
            error: Some(e.to_string()),
            line: Some(e.line()),
            column: Some(e.column()),
        },
    }
}

/// Serialize with sorted keys, for stable diffs.
pub fn format_json_sorted(input: &str, indent: usize) -> Result<String> {
    let value = sort_keys(parse(input)?);
    let raw = serde_json::to_string(&value)
        .map_err(|e| ToolError::parse(format!("Failed to format JSON: {e}")))?;
    format_json(&raw, indent)
}

fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, sort_keys(v)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn arb_json() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| json!(n)),
            "[a-z \"\\\\]{0,8}".prop_map(Value::String),
        ];
        leaf.prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                prop::collection::btree_map("[a-z]{1,4}", inner, 0..4)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        })
    }

    proptest! {
        #[test]
        fn prop_format_preserves_structure(value in arb_json(), indent in 0usize..5) {
            let raw = serde_json::to_string(&value).unwrap();
            let formatted = format_json(&raw, indent).unwrap();
            prop_assert_eq!(serde_json::from_str::<Value>(&formatted).unwrap(), value);
        }

        #[test]
        fn prop_minify_is_idempotent(value in arb_json()) {
            let raw = serde_json::to_string_pretty(&value).unwrap();
            let once = minify_json(&raw).unwrap();
            prop_assert_eq!(minify_json(&once).unwrap(), once);
        }
    }

    #[test]
    fn test_format_json_two_spaces() {
        let out = format_json(r#"{"a":1,"b":[true,null]}"#, 2).unwrap();
        assert_eq!(out, "{\n  \"a\": 1,\n  \"b\": [\n    true,\n    null\n  ]\n}");
    }

    #[test]
    fn test_format_json_preserves_key_order() {
        let out = format_json(r#"{"zeta":1,"alpha":2}"#, 2).unwrap();
        assert!(out.find("zeta").unwrap() < out.find("alpha").unwrap());
    }

    #[test]
    fn test_format_json_sorted() {
        let out = format_json_sorted(r#"{"zeta":1,"alpha":{"y":1,"x":2}}"#, 2).unwrap();
        assert!(out.find("alpha").unwrap() < out.find("zeta").unwrap());
        assert!(out.find("\"x\"").unwrap() < out.find("\"y\"").unwrap());
    }

    #[test]
    fn test_format_json_invalid() {
        let err = format_json("{\"a\": }", 2).unwrap_err();
        assert!(matches!(err, ToolError::Parse(_)));
        assert!(err.to_string().contains("Invalid JSON"));
    }

    #[test]
    fn test_format_json_empty_input() {
        assert_eq!(format_json("  ", 2), Err(ToolError::EmptyInput));
    }

    #[test]
    fn test_minify_json() {
        let out = minify_json("{\n  \"a\": [1, 2],\n  \"b\": \"x y\"\n}").unwrap();
        assert_eq!(out, r#"{"a":[1,2],"b":"x y"}"#);
    }

    #[test]
    fn test_validate_json_reports_position() {
        let result = validate_json("{\n  \"a\": 1,\n}");
        assert!(!result.valid);
        assert_eq!(result.line, Some(3));
        assert!(result.error.is_some());
    }

    #[test]
    fn test_validate_json_valid() {
        let result = validate_json("[1, 2, 3]");
        assert!(result.valid);
        assert!(result.error.is_none());
    }
}
