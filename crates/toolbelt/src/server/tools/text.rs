use super::{json_result, parse_args, text_result, tool, unknown_tool, Tool, ToolOutcome};
use serde::Deserialize;
use serde_json::json;
use std::collections::BTreeMap;
use toolbelt_core::error::require_input;
use toolbelt_core::text::case::{convert_all, convert_case, CaseStyle};
use toolbelt_core::text::lines::{dedupe_lines, remove_extra_whitespace, reverse_text, sort_lines, SortOptions};
use toolbelt_core::text::slug::{slugify, SlugOptions};
use toolbelt_core::text::stats::text_stats;

pub fn tools() -> Vec<Tool> {
    vec![
        tool(
            "text_case",
            "Convert text to a case style. Without a style, returns every style.",
            json!({
                "type": "object",
                "properties": {
                    "input": {"type": "string"},
                    "style": {
                        "type": "string",
                        "enum": ["upper", "lower", "title", "sentence", "camel", "pascal", "snake", "kebab", "constant", "alternating"]
                    }
                },
                "required": ["input"]
            }),
        ),
        tool(
            "text_stats",
            "Count characters, words, sentences, paragraphs and estimate reading time.",
            json!({
                "type": "object",
                "properties": {"input": {"type": "string"}},
                "required": ["input"]
            }),
        ),
        tool(
            "text_slug",
            "Turn text into a URL slug.",
            json!({
                "type": "object",
                "properties": {
                    "input": {"type": "string"},
                    "separator": {"type": "string", "description": "Single character (default '-')"},
                    "lowercase": {"type": "boolean"},
                    "max_length": {"type": "number"}
                },
                "required": ["input"]
            }),
        ),
        tool(
            "text_lines",
            "Line utilities: reverse, dedupe, sort or squeeze whitespace.",
            json!({
                "type": "object",
                "properties": {
                    "input": {"type": "string"},
                    "operation": {"type": "string", "enum": ["reverse", "dedupe", "sort", "squeeze"]},
                    "ignore_case": {"type": "boolean"},
                    "descending": {"type": "boolean"},
                    "numeric": {"type": "boolean"}
                },
                "required": ["input", "operation"]
            }),
        ),
    ]
}

#[derive(Deserialize)]
struct CaseArgs {
    input: String,
    style: Option<CaseStyle>,
}

#[derive(Deserialize)]
struct InputArgs {
    input: String,
}

#[derive(Deserialize)]
struct SlugArgs {
    input: String,
    #[serde(flatten)]
    options: SlugOptions,
}

#[derive(Deserialize)]
#[serde(rename_all = "lowercase")]
enum LineOperation {
    Reverse,
    Dedupe,
    Sort,
    Squeeze,
}

#[derive(Deserialize)]
struct LinesArgs {
    input: String,
    operation: LineOperation,
    #[serde(flatten)]
    sort: SortOptions,
}

pub fn call(name: &str, arguments: Option<serde_json::Value>) -> ToolOutcome {
    match name {
        "text_case" => {
            let args: CaseArgs = parse_args(arguments)?;
            match args.style {
                Some(style) => text_result(require_input(&args.input).map(|s| convert_case(s, style))),
                None => json_result(require_input(&args.input).map(|s| {
                    convert_all(s)
                        .into_iter()
                        .map(|(style, value)| (style.name(), value))
                        .collect::<BTreeMap<_, _>>()
                })),
            }
        }
        "text_stats" => {
            let args: InputArgs = parse_args(arguments)?;
            json_result(require_input(&args.input).map(text_stats))
        }
        "text_slug" => {
            let args: SlugArgs = parse_args(arguments)?;
            text_result(require_input(&args.input).map(|s| slugify(s, &args.options)))
        }
        "text_lines" => {
            let args: LinesArgs = parse_args(arguments)?;
            let input = require_input(&args.input);
            text_result(input.map(|s| match args.operation {
                LineOperation::Reverse => reverse_text(s),
                LineOperation::Dedupe => dedupe_lines(s, args.sort.ignore_case),
                LineOperation::Sort => sort_lines(s, args.sort),
                LineOperation::Squeeze => remove_extra_whitespace(s),
            }))
        }
        _ => unknown_tool(name),
    }
}
