use super::{json_result, parse_args, text_result, tool, unknown_tool, JsonRpcError, Tool, ToolOutcome, INVALID_PARAMS};
use serde::Deserialize;
use serde_json::json;
use toolbelt_core::convert::color::{color_formats, contrast_report};
use toolbelt_core::convert::currency::{convert_currency, parse_rates};
use toolbelt_core::convert::number_base::{convert_all, convert_base};
use toolbelt_core::convert::roman::{from_roman, to_roman};
use toolbelt_core::convert::timestamp::{parse_timestamp, EpochUnit};
use toolbelt_core::convert::units::convert_unit;

pub fn tools() -> Vec<Tool> {
    vec![
        tool(
            "convert_roman",
            "Convert between integers (1-3999) and Roman numerals. The direction follows the input.",
            json!({
                "type": "object",
                "properties": {"input": {"type": "string", "description": "A number or a numeral"}},
                "required": ["input"]
            }),
        ),
        tool(
            "convert_base",
            "Convert an integer between bases 2 to 36. Without a target base, shows binary, octal, decimal and hex.",
            json!({
                "type": "object",
                "properties": {
                    "input": {"type": "string"},
                    "from": {"type": "number", "description": "Default 10"},
                    "to": {"type": "number"}
                },
                "required": ["input"]
            }),
        ),
        tool(
            "convert_unit",
            "Convert a length, mass, temperature, volume, area, speed, time or data quantity.",
            json!({
                "type": "object",
                "properties": {
                    "value": {"type": "number"},
                    "from": {"type": "string", "description": "Unit symbol, e.g. km"},
                    "to": {"type": "string"}
                },
                "required": ["value", "from", "to"]
            }),
        ),
        tool(
            "convert_currency",
            "Convert an amount using a supplied rate table.",
            json!({
                "type": "object",
                "properties": {
                    "amount": {"type": "number"},
                    "from": {"type": "string"},
                    "to": {"type": "string"},
                    "base": {"type": "string", "description": "Currency the rates are quoted against (default USD)"},
                    "rates": {"type": "string", "description": "CODE=rate pairs separated by commas, e.g. EUR=0.92,GBP=0.79"}
                },
                "required": ["amount", "from", "to", "rates"]
            }),
        ),
        tool(
            "convert_color",
            "Show a color as hex, rgb() and hsl(). With a background, report the WCAG contrast ratio instead.",
            json!({
                "type": "object",
                "properties": {
                    "input": {"type": "string"},
                    "contrast": {"type": "string", "description": "Background color to check against"}
                },
                "required": ["input"]
            }),
        ),
        tool(
            "convert_timestamp",
            "Convert a unix timestamp or a date string to every common representation.",
            json!({
                "type": "object",
                "properties": {
                    "input": {"type": "string"},
                    "unit": {"type": "string", "enum": ["seconds", "millis"]}
                },
                "required": ["input"]
            }),
        ),
    ]
}

#[derive(Deserialize)]
struct RomanArgs {
    input: String,
}

#[derive(Deserialize)]
struct BaseArgs {
    input: String,
    #[serde(default = "decimal")]
    from: u32,
    to: Option<u32>,
}

fn decimal() -> u32 {
    10
}

#[derive(Deserialize)]
struct UnitArgs {
    value: f64,
    from: String,
    to: String,
}

#[derive(Deserialize)]
struct CurrencyArgs {
    amount: f64,
    from: String,
    to: String,
    #[serde(default = "usd")]
    base: String,
    rates: String,
}

fn usd() -> String {
    "USD".to_string()
}

#[derive(Deserialize)]
struct ColorArgs {
    input: String,
    contrast: Option<String>,
}

#[derive(Deserialize)]
struct TimestampArgs {
    input: String,
    unit: Option<String>,
}

fn epoch_unit(unit: Option<&str>) -> Result<Option<EpochUnit>, JsonRpcError> {
    match unit {
        None => Ok(None),
        Some("seconds" | "s") => Ok(Some(EpochUnit::Seconds)),
        Some("millis" | "ms") => Ok(Some(EpochUnit::Millis)),
        Some(other) => Err(JsonRpcError::new(
            INVALID_PARAMS,
            format!("Invalid arguments: unknown unit '{other}'"),
        )),
    }
}

pub fn call(name: &str, arguments: Option<serde_json::Value>) -> ToolOutcome {
    match name {
        "convert_roman" => {
            let args: RomanArgs = parse_args(arguments)?;
            let input = args.input.trim();
            text_result(match input.parse::<u32>() {
                Ok(number) => to_roman(number),
                Err(_) => from_roman(input).map(|n| n.to_string()),
            })
        }
        "convert_base" => {
            let args: BaseArgs = parse_args(arguments)?;
            match args.to {
                Some(to) => text_result(convert_base(&args.input, args.from, to)),
                None => json_result(convert_all(&args.input, args.from)),
            }
        }
        "convert_unit" => {
            let args: UnitArgs = parse_args(arguments)?;
            json_result(convert_unit(args.value, &args.from, &args.to))
        }
        "convert_currency" => {
            let args: CurrencyArgs = parse_args(arguments)?;
            json_result(
                parse_rates(&args.base, &args.rates)
                    .and_then(|table| convert_currency(&table, args.amount, &args.from, &args.to)),
            )
        }
        "convert_color" => {
            let args: ColorArgs = parse_args(arguments)?;
            match args.contrast {
                Some(background) => json_result(contrast_report(&args.input, &background)),
                None => json_result(color_formats(&args.input)),
            }
        }
        "convert_timestamp" => {
            let args: TimestampArgs = parse_args(arguments)?;
            let unit = epoch_unit(args.unit.as_deref())?;
            json_result(parse_timestamp(&args.input, unit, chrono::Utc::now()))
        }
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
    fn test_roman_direction_follows_input() {
        assert_eq!(text_of(call("convert_roman", Some(json!({"input": "1994"})))), "MCMXCIV");
        assert_eq!(text_of(call("convert_roman", Some(json!({"input": "mcmxciv"})))), "1994");
    }

    #[test]
    fn test_base_with_target() {
        let out = call("convert_base", Some(json!({"input": "255", "to": 16})));
        assert_eq!(text_of(out).to_lowercase(), "ff");
    }

    #[test]
    fn test_currency_through_rate_table() {
        let out = text_of(call(
            "convert_currency",
            Some(json!({"amount": 100, "from": "USD", "to": "EUR", "rates": "EUR=0.5"})),
        ));
        let conversion: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(conversion["result"], json!(50.0));
    }

    #[test]
    fn test_unknown_epoch_unit() {
        let err = call("convert_timestamp", Some(json!({"input": "0", "unit": "days"}))).unwrap_err();
        assert_eq!(err.code, INVALID_PARAMS);
    }
}
