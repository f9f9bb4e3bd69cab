use super::{json_result, parse_args, tool, unknown_tool, Tool, ToolOutcome};
use serde::{Deserialize, Serialize};
use serde_json::json;
use toolbelt_core::calc::age::{calculate_age, parse_date};
use toolbelt_core::calc::aspect::{parse_ratio, resize, Known};
use toolbelt_core::calc::bmi::{calculate_bmi, BodyMeasure};
use toolbelt_core::calc::loan::{calculate_loan, LoanInput};
use toolbelt_core::calc::percentage::{percent_change, percent_of, what_percent};
use toolbelt_core::calc::salary::{convert_salary, PayPeriod, WorkSchedule};
use toolbelt_core::calc::tip::{calculate_tip, TipInput};
use toolbelt_core::ToolError;

pub fn tools() -> Vec<Tool> {
    vec![
        tool(
            "calc_tip",
            "Tip amount, total and per-person share for a bill.",
            json!({
                "type": "object",
                "properties": {
                    "bill": {"type": "number"},
                    "tip_percent": {"type": "number"},
                    "split": {"type": "number", "description": "People sharing the bill (default 1)"}
                },
                "required": ["bill", "tip_percent"]
            }),
        ),
        tool(
            "calc_aspect",
            "Reduce an aspect ratio, or fill in the missing dimension for a known width or height.",
            json!({
                "type": "object",
                "properties": {
                    "ratio": {"type": "string", "description": "e.g. 16:9 or 1920x1080"},
                    "width": {"type": "number"},
                    "height": {"type": "number"}
                },
                "required": ["ratio"]
            }),
        ),
        tool(
            "calc_percent",
            "Percentage math: a% of b, what percent a is of b, or the change from a to b.",
            json!({
                "type": "object",
                "properties": {
                    "operation": {"type": "string", "enum": ["of", "what", "change"]},
                    "a": {"type": "number"},
                    "b": {"type": "number"}
                },
                "required": ["operation", "a", "b"]
            }),
        ),
        tool(
            "calc_loan",
            "Monthly payment, total paid and total interest of an amortized loan.",
            json!({
                "type": "object",
                "properties": {
                    "principal": {"type": "number"},
                    "annual_rate": {"type": "number", "description": "Percent per year"},
                    "months": {"type": "number"}
                },
                "required": ["principal", "annual_rate", "months"]
            }),
        ),
        tool(
            "calc_salary",
            "Express a salary paid per period in every other period.",
            json!({
                "type": "object",
                "properties": {
                    "amount": {"type": "number"},
                    "period": {"type": "string", "enum": ["hourly", "daily", "weekly", "monthly", "yearly"]},
                    "hours_per_week": {"type": "number"},
                    "days_per_week": {"type": "number"},
                    "weeks_per_year": {"type": "number"}
                },
                "required": ["amount", "period"]
            }),
        ),
        tool(
            "calc_bmi",
            "Body mass index and category from metric or imperial measurements.",
            json!({
                "type": "object",
                "properties": {
                    "system": {"type": "string", "enum": ["metric", "imperial"]},
                    "weight_kg": {"type": "number"},
                    "height_cm": {"type": "number"},
                    "weight_lb": {"type": "number"},
                    "height_in": {"type": "number"}
                },
                "required": ["system"]
            }),
        ),
        tool(
            "calc_age",
            "Age in years, months and days, plus days until the next birthday.",
            json!({
                "type": "object",
                "properties": {
                    "birth_date": {"type": "string", "description": "YYYY-MM-DD"},
                    "today": {"type": "string", "description": "YYYY-MM-DD (default: today)"}
                },
                "required": ["birth_date"]
            }),
        ),
    ]
}

#[derive(Deserialize)]
struct AspectArgs {
    ratio: String,
    width: Option<u64>,
    height: Option<u64>,
}

#[derive(Serialize)]
struct AspectOutput {
    ratio: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    width: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    height: Option<u64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "lowercase")]
enum PercentOperation {
    Of,
    What,
    Change,
}

#[derive(Deserialize)]
struct PercentArgs {
    operation: PercentOperation,
    a: f64,
    b: f64,
}

#[derive(Serialize)]
struct PercentOutput {
    result: f64,
}

#[derive(Deserialize)]
struct SalaryArgs {
    amount: f64,
    period: PayPeriod,
    #[serde(flatten)]
    schedule: WorkSchedule,
}

#[derive(Deserialize)]
struct AgeArgs {
    birth_date: String,
    today: Option<String>,
}

fn aspect(args: AspectArgs) -> toolbelt_core::Result<AspectOutput> {
    let ratio = parse_ratio(&args.ratio)?;
    let known = match (args.width, args.height) {
        (Some(_), Some(_)) => return Err(ToolError::invalid("Give a width or a height, not both")),
        (Some(width), None) => Some(Known::Width(width)),
        (None, Some(height)) => Some(Known::Height(height)),
        (None, None) => None,
    };
    let dims = known.map(|known| resize(ratio, known)).transpose()?;
    Ok(AspectOutput {
        ratio: ratio.to_string(),
        width: dims.map(|d| d.width),
        height: dims.map(|d| d.height),
    })
}

fn age(args: AgeArgs) -> toolbelt_core::Result<toolbelt_core::calc::age::Age> {
    let birth = parse_date(&args.birth_date)?;
    let today = match args.today {
        Some(today) => parse_date(&today)?,
        None => chrono::Local::now().date_naive(),
    };
    calculate_age(birth, today)
}

pub fn call(name: &str, arguments: Option<serde_json::Value>) -> ToolOutcome {
    match name {
        "calc_tip" => {
            let args: TipInput = parse_args(arguments)?;
            json_result(calculate_tip(&args))
        }
        "calc_aspect" => json_result(aspect(parse_args(arguments)?)),
        "calc_percent" => {
            let args: PercentArgs = parse_args(arguments)?;
            let result = match args.operation {
                PercentOperation::Of => Ok(percent_of(args.a, args.b)),
                PercentOperation::What => what_percent(args.a, args.b),
                PercentOperation::Change => percent_change(args.a, args.b),
            };
            json_result(result.map(|result| PercentOutput { result }))
        }
        "calc_loan" => {
            let args: LoanInput = parse_args(arguments)?;
            json_result(calculate_loan(&args))
        }
        "calc_salary" => {
            let args: SalaryArgs = parse_args(arguments)?;
            json_result(convert_salary(args.amount, args.period, &args.schedule))
        }
        "calc_bmi" => {
            let measure: BodyMeasure = parse_args(arguments)?;
            json_result(calculate_bmi(measure))
        }
        "calc_age" => json_result(age(parse_args(arguments)?)),
        _ => unknown_tool(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn json_of(outcome: ToolOutcome) -> Value {
        let result = outcome.unwrap();
        assert!(result.get("isError").is_none(), "tool failed: {result}");
        serde_json::from_str(result["content"][0]["text"].as_str().unwrap()).unwrap()
    }

    #[test]
    fn test_aspect_fills_height() {
        let out = json_of(call("calc_aspect", Some(json!({"ratio": "1920x1080", "width": 1280}))));
        assert_eq!(out["ratio"], "16:9");
        assert_eq!(out["height"], 720);
    }

    #[test]
    fn test_percent_change() {
        let out = json_of(call("calc_percent", Some(json!({"operation": "change", "a": 50, "b": 75}))));
        assert_eq!(out["result"], json!(50.0));
    }

    #[test]
    fn test_percent_of_zero_whole_is_a_tool_error() {
        let out = call("calc_percent", Some(json!({"operation": "what", "a": 5, "b": 0}))).unwrap();
        assert_eq!(out["isError"], true);
    }

    #[test]
    fn test_age_with_fixed_today() {
        let out = json_of(call(
            "calc_age",
            Some(json!({"birth_date": "2000-01-15", "today": "2024-01-15"})),
        ));
        assert_eq!(out["years"], 24);
        assert_eq!(out["days_to_birthday"], 0);
    }

    #[test]
    fn test_bmi_tagged_by_system() {
        let out = json_of(call(
            "calc_bmi",
            Some(json!({"system": "metric", "weight_kg": 70, "height_cm": 175})),
        ));
        assert_eq!(out["bmi"], json!(22.9));
        assert_eq!(out["category"], "normal");
    }
}
