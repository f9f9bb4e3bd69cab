use super::{json_result, parse_args, tool, unknown_tool, Tool, ToolOutcome};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::json;
use toolbelt_core::inspect::cron::{parse_cron, CronSchedule};
use toolbelt_core::inspect::ip::{inspect_ip, subnet};
use toolbelt_core::inspect::user_agent::parse_user_agent;
use toolbelt_core::ToolError;

const MAX_RUNS: usize = 50;

pub fn tools() -> Vec<Tool> {
    let input_only = |description: &str| {
        json!({
            "type": "object",
            "properties": {"input": {"type": "string", "description": description}},
            "required": ["input"]
        })
    };

    vec![
        tool(
            "inspect_cron",
            "Describe a five-field cron expression in plain English and list its next run times.",
            json!({
                "type": "object",
                "properties": {
                    "input": {"type": "string", "description": "e.g. */15 9-17 * * MON-FRI or @daily"},
                    "next": {"type": "number", "description": "How many upcoming runs to list (default 5)"},
                    "after": {"type": "string", "description": "Start time YYYY-MM-DDTHH:MM (default: now, local)"}
                },
                "required": ["input"]
            }),
        ),
        tool(
            "inspect_ip",
            "Classify an IPv4 or IPv6 address (private, loopback, multicast, ...).",
            input_only("An IP address"),
        ),
        tool(
            "inspect_subnet",
            "Network, broadcast, mask and host range of an IPv4 CIDR block.",
            input_only("CIDR notation, e.g. 192.168.1.0/24"),
        ),
        tool(
            "inspect_user_agent",
            "Browser, engine, operating system and device class of a User-Agent string.",
            input_only("A User-Agent header value"),
        ),
    ]
}

#[derive(Deserialize)]
struct CronArgs {
    input: String,
    #[serde(default = "five")]
    next: usize,
    after: Option<String>,
}

fn five() -> usize {
    5
}

#[derive(Deserialize)]
struct InputArgs {
    input: String,
}

#[derive(Serialize)]
struct CronReport {
    #[serde(flatten)]
    schedule: CronSchedule,
    next_runs: Vec<String>,
}

fn cron(args: CronArgs) -> toolbelt_core::Result<CronReport> {
    if args.next > MAX_RUNS {
        return Err(ToolError::invalid(format!("At most {MAX_RUNS} runs can be listed")));
    }
    let schedule = parse_cron(&args.input)?;
    let after = match args.after.as_deref().map(str::trim) {
        Some(raw) => NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
            .map_err(|_| ToolError::parse(format!("Expected YYYY-MM-DDTHH:MM, got '{raw}'")))?,
        None => chrono::Local::now().naive_local(),
    };
    let next_runs = schedule
        .next_runs(after, args.next)
        .iter()
        .map(|t| t.format("%Y-%m-%dT%H:%M").to_string())
        .collect();
    Ok(CronReport {
        schedule,
        next_runs,
    })
}

pub fn call(name: &str, arguments: Option<serde_json::Value>) -> ToolOutcome {
    match name {
        "inspect_cron" => json_result(cron(parse_args(arguments)?)),
        "inspect_ip" => {
            let args: InputArgs = parse_args(arguments)?;
            json_result(inspect_ip(&args.input))
        }
        "inspect_subnet" => {
            let args: InputArgs = parse_args(arguments)?;
            json_result(subnet(&args.input))
        }
        "inspect_user_agent" => {
            let args: InputArgs = parse_args(arguments)?;
            json_result(parse_user_agent(&args.input))
        }
        _ => unknown_tool(name),
    }
}
