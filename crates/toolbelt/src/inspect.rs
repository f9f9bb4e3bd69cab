use crate::input::read_input;
use crate::output::OutputArgs;
use crate::prelude::*;
use colored::Colorize;
use serde::Serialize;
use toolbelt_core::inspect::cron::{parse_cron, CronSchedule};
use toolbelt_core::inspect::ip::{inspect_ip, subnet};
use toolbelt_core::inspect::user_agent::parse_user_agent;

#[derive(Debug, clap::Parser)]
#[command(name = "inspect")]
#[command(about = "Explain cron expressions, IP addresses, subnets and user agents")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Describe a five-field cron expression and list upcoming runs
    #[clap(name = "cron")]
    Cron(CronOptions),

    /// Classify an IPv4 or IPv6 address
    #[clap(name = "ip")]
    Ip(InputOptions),

    /// Network, broadcast and host range of an IPv4 CIDR block
    #[clap(name = "subnet")]
    Subnet(InputOptions),

    /// Browser, OS and device of a user agent string
    #[clap(name = "ua")]
    UserAgent(InputOptions),
}

#[derive(Debug, clap::Args)]
pub struct CronOptions {
    /// Expression such as "*/15 9-17 * * MON-FRI"
    pub expression: String,

    /// How many upcoming runs to list
    #[arg(short, long, default_value = "5")]
    pub next: usize,

    #[clap(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, clap::Args)]
pub struct InputOptions {
    /// Value to inspect. Reads stdin if omitted.
    pub input: Option<String>,

    #[clap(flatten)]
    pub output: OutputArgs,
}

#[derive(Serialize)]
struct CronReport {
    #[serde(flatten)]
    schedule: CronSchedule,
    next_runs: Vec<String>,
}

fn or_unknown(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "unknown".to_string())
}

pub async fn run(app: App, _global: crate::Global) -> Result<()> {
    match app.command {
        Commands::Cron(options) => {
            let schedule = parse_cron(&options.expression)?;
            let now = chrono::Local::now().naive_local();
            let next_runs = schedule
                .next_runs(now, options.next)
                .iter()
                .map(|t| t.format("%a %Y-%m-%d %H:%M").to_string())
                .collect();
            let report = CronReport {
                schedule,
                next_runs,
            };
            options.output.emit(&report, |r| {
                let s = &r.schedule;
                let mut table = new_table();
                for field in [&s.minute, &s.hour, &s.day_of_month, &s.month, &s.day_of_week] {
                    let values = if field.is_wildcard() {
                        "every".to_string()
                    } else {
                        field
                            .values
                            .iter()
                            .map(|v| v.to_string())
                            .collect::<Vec<_>>()
                            .join(",")
                    };
                    table.add_row(prettytable::row![field.name.bold(), field.expression, values]);
                }
                let mut out = f!("{}\n{table}", s.description.green());
                if !r.next_runs.is_empty() {
                    out.push_str(&f!("{}\n", "Next runs".bold()));
                    for run in &r.next_runs {
                        out.push_str(&f!("  {run}\n"));
                    }
                }
                out.trim_end().to_string()
            })
        }
        Commands::Ip(options) => {
            let report = inspect_ip(&read_input(options.input)?)?;
            options.output.emit(&report, |r| {
                let mut table = new_table();
                table.add_row(prettytable::row!["Address".bold(), r.address]);
                table.add_row(prettytable::row!["Version".bold(), f!("IPv{}", r.version)]);
                table.add_row(prettytable::row!["Class".bold(), r.class.label()]);
                table.add_row(prettytable::row!["Expanded".bold(), r.expanded]);
                table.to_string()
            })
        }
        Commands::Subnet(options) => {
            let net = subnet(&read_input(options.input)?)?;
            options.output.emit(&net, |n| {
                let mut table = new_table();
                table.add_row(prettytable::row!["Network".bold(), f!("{}/{}", n.network, n.prefix)]);
                table.add_row(prettytable::row!["Netmask".bold(), n.netmask]);
                table.add_row(prettytable::row!["Wildcard".bold(), n.wildcard]);
                table.add_row(prettytable::row!["Broadcast".bold(), n.broadcast]);
                table.add_row(prettytable::row![
                    "Hosts".bold(),
                    f!("{} - {}", n.first_host, n.last_host)
                ]);
                table.add_row(prettytable::row!["Usable".bold(), n.usable_hosts]);
                table.to_string()
            })
        }
        Commands::UserAgent(options) => {
            let info = parse_user_agent(&read_input(options.input)?)?;
            options.output.emit(&info, |i| {
                let mut table = new_table();
                let browser = match &i.browser_version {
                    Some(version) => f!("{} {version}", or_unknown(&i.browser)),
                    None => or_unknown(&i.browser),
                };
                let os = match &i.os_version {
                    Some(version) => f!("{} {version}", or_unknown(&i.os)),
                    None => or_unknown(&i.os),
                };
                table.add_row(prettytable::row!["Browser".bold(), browser]);
                table.add_row(prettytable::row!["Engine".bold(), or_unknown(&i.engine)]);
                table.add_row(prettytable::row!["OS".bold(), os]);
                table.add_row(prettytable::row!["Device".bold(), f!("{:?}", i.device)]);
                table.to_string()
            })
        }
    }
}
