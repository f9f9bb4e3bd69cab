use super::{json_result, parse_args, text_result, tool, unknown_tool, Tool, ToolOutcome};
use serde::Deserialize;
use serde_json::json;
use toolbelt_core::config::Config;
use toolbelt_core::format::css::{beautify_css, minify_css};
use toolbelt_core::format::json::{format_json, format_json_sorted, minify_json, validate_json};
use toolbelt_core::format::markdown::markdown_to_html;
use toolbelt_core::format::sql::{format_sql, minify_sql, SqlFormatOptions};

pub fn tools() -> Vec<Tool> {
    vec![
        tool(
            "format_json",
            "Pretty-print or minify JSON. Key order is preserved unless sort_keys is set.",
            json!({
                "type": "object",
                "properties": {
                    "input": {"type": "string"},
                    "indent": {"type": "number", "description": "Spaces per level (default from config, usually 2)"},
                    "minify": {"type": "boolean"},
                    "sort_keys": {"type": "boolean"}
                },
                "required": ["input"]
            }),
        ),
        tool(
            "format_json_validate",
            "Check whether input is valid JSON and report the error position.",
            json!({
                "type": "object",
                "properties": {"input": {"type": "string"}},
                "required": ["input"]
            }),
        ),
        tool(
            "format_sql",
            "Format SQL with one clause per line, or minify it.",
            json!({
                "type": "object",
                "properties": {
                    "input": {"type": "string"},
                    "indent": {"type": "number"},
                    "uppercase_keywords": {"type": "boolean", "description": "Default true"},
                    "minify": {"type": "boolean"}
                },
                "required": ["input"]
            }),
        ),
        tool(
            "format_css",
            "Beautify or minify CSS.",
            json!({
                "type": "object",
                "properties": {
                    "input": {"type": "string"},
                    "indent": {"type": "number"},
                    "minify": {"type": "boolean"}
                },
                "required": ["input"]
            }),
        ),
        tool(
            "format_markdown",
            "Render Markdown to HTML.",
            json!({
                "type": "object",
                "properties": {"input": {"type": "string"}},
                "required": ["input"]
            }),
        ),
    ]
}

#[derive(Deserialize)]
struct FormatArgs {
    input: String,
    indent: Option<usize>,
    #[serde(default)]
    minify: bool,
    #[serde(default)]
    sort_keys: bool,
    uppercase_keywords: Option<bool>,
}

pub fn call(name: &str, arguments: Option<serde_json::Value>, config: &Config) -> ToolOutcome {
    let args: FormatArgs = parse_args(arguments)?;
    let input = args.input.as_str();
    match name {
        "format_json" => {
            let indent = args.indent.unwrap_or(config.json_indent);
            text_result(match (args.minify, args.sort_keys) {
                (true, _) => minify_json(input),
                (false, true) => format_json_sorted(input, indent),
                (false, false) => format_json(input, indent),
            })
        }
        "format_json_validate" => json_result(Ok(validate_json(input))),
        "format_sql" => text_result(if args.minify {
            minify_sql(input)
        } else {
            format_sql(
                input,
                SqlFormatOptions {
                    indent: args.indent.unwrap_or(config.sql_indent),
                    uppercase_keywords: args.uppercase_keywords.unwrap_or(true),
                },
            )
        }),
        "format_css" => text_result(if args.minify {
            minify_css(input)
        } else {
            beautify_css(input, args.indent.unwrap_or(config.css_indent))
        }),
        "format_markdown" => text_result(Ok(markdown_to_html(input))),
        _ => unknown_tool(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(outcome: ToolOutcome) -> String {
        outcome.unwrap()["content"][0]["text"].as_str().unwrap().to_string()
    }

    #[test]
    fn test_json_uses_configured_indent() {
        let config = Config {
            json_indent: 4,
            ..Config::default()
        };
        let out = text_of(call("format_json", Some(json!({"input": "{\"a\":1}"})), &config));
        assert_eq!(out, "{\n    \"a\": 1\n}");
    }

    #[test]
    fn test_json_minify() {
        let out = call(
            "format_json",
            Some(json!({"input": "{ \"a\" : [1, 2] }", "minify": true})),
            &Config::default(),
        );
        assert_eq!(text_of(out), r#"{"a":[1,2]}"#);
    }

    #[test]
    fn test_validate_reports_position() {
        let out = text_of(call(
            "format_json_validate",
            Some(json!({"input": "{\n  \"a\": }"})),
            &Config::default(),
        ));
        let report: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(report["valid"], false);
        assert_eq!(report["line"], 2);
    }
}
