use crate::output::OutputArgs;
use crate::prelude::*;
use colored::Colorize;
use serde::Serialize;
use toolbelt_core::calc::age::{calculate_age, parse_date};
use toolbelt_core::calc::aspect::{parse_ratio, resize, Known};
use toolbelt_core::calc::bmi::{calculate_bmi, BodyMeasure};
use toolbelt_core::calc::loan::{calculate_loan, LoanInput};
use toolbelt_core::calc::percentage::{percent_change, percent_of, what_percent};
use toolbelt_core::calc::salary::{convert_salary, PayPeriod, WorkSchedule};
use toolbelt_core::calc::tip::{calculate_tip, TipInput};

#[derive(Debug, clap::Parser)]
#[command(name = "calc")]
#[command(about = "Tip, aspect ratio, percentage, loan, salary, BMI and age calculators")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Tip, total and per-person share of a bill
    #[clap(name = "tip")]
    Tip(TipOptions),

    /// Reduce a ratio, or size one side from the other
    #[clap(name = "aspect")]
    Aspect(AspectOptions),

    /// Percentages of, between and changes
    #[clap(name = "percent")]
    Percent(PercentApp),

    /// Monthly payment and interest for a fixed-rate loan
    #[clap(name = "loan")]
    Loan(LoanOptions),

    /// A pay amount in every pay period
    #[clap(name = "salary")]
    Salary(SalaryOptions),

    /// Body mass index and WHO category
    #[clap(name = "bmi")]
    Bmi(BmiOptions),

    /// Age in years, months and days
    #[clap(name = "age")]
    Age(AgeOptions),
}

#[derive(Debug, clap::Args)]
pub struct TipOptions {
    /// Bill amount
    pub bill: f64,

    /// Tip percentage
    #[arg(short, long, default_value = "15")]
    pub percent: f64,

    /// Number of people sharing the bill
    #[arg(short, long, default_value = "1")]
    pub split: u32,

    #[clap(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, clap::Args)]
pub struct AspectOptions {
    /// Ratio or dimensions, e.g. 16:9 or 1920x1080
    pub ratio: String,

    /// Known width; prints the matching height
    #[arg(long, conflicts_with = "height")]
    pub width: Option<u64>,

    /// Known height; prints the matching width
    #[arg(long)]
    pub height: Option<u64>,

    #[clap(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, clap::Args)]
pub struct PercentApp {
    #[command(subcommand)]
    pub command: PercentCommands,

    #[clap(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, clap::Subcommand)]
pub enum PercentCommands {
    /// PERCENT % of VALUE
    #[clap(name = "of")]
    Of { percent: f64, value: f64 },

    /// PART is what percent of WHOLE
    #[clap(name = "what")]
    What { part: f64, whole: f64 },

    /// Percent change from FROM to TO
    #[clap(name = "change")]
    Change { from: f64, to: f64 },
}

#[derive(Debug, clap::Args)]
pub struct LoanOptions {
    /// Amount borrowed
    pub principal: f64,

    /// Annual interest rate in percent
    #[arg(short, long)]
    pub rate: f64,

    /// Term in months
    #[arg(short, long)]
    pub months: u32,

    #[clap(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, clap::Args)]
pub struct SalaryOptions {
    /// Pay amount
    pub amount: f64,

    /// hourly, daily, weekly, monthly or yearly
    #[arg(short, long, default_value = "yearly", value_parser = str::parse::<PayPeriod>)]
    pub period: PayPeriod,

    /// Working hours per week
    #[arg(long, default_value = "40")]
    pub hours_per_week: f64,

    /// Working days per week
    #[arg(long, default_value = "5")]
    pub days_per_week: f64,

    /// Paid weeks per year
    #[arg(long, default_value = "52")]
    pub weeks_per_year: f64,

    #[clap(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, clap::Args)]
pub struct BmiOptions {
    /// Weight in kg (lb with --imperial)
    #[arg(short, long)]
    pub weight: f64,

    /// Height in cm (inches with --imperial)
    #[arg(short = 'H', long)]
    pub height: f64,

    /// Use pounds and inches
    #[arg(long)]
    pub imperial: bool,

    #[clap(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, clap::Args)]
pub struct AgeOptions {
    /// Birth date as YYYY-MM-DD
    pub birth: String,

    /// Compute the age on this date instead of today
    #[arg(long)]
    pub on: Option<String>,

    #[clap(flatten)]
    pub output: OutputArgs,
}

#[derive(Serialize)]
struct PercentResult {
    result: f64,
}

pub async fn run(app: App, _global: crate::Global) -> Result<()> {
    match app.command {
        Commands::Tip(options) => {
            let result = calculate_tip(&TipInput {
                bill: options.bill,
                tip_percent: options.percent,
                split: options.split,
            })?;
            options.output.emit(&result, |r| {
                let mut table = new_table();
                table.add_row(prettytable::row!["Tip".bold(), r.tip_amount]);
                table.add_row(prettytable::row!["Total".bold(), r.total]);
                if options.split > 1 {
                    table.add_row(prettytable::row!["Per person".bold(), r.per_person]);
                }
                table.to_string()
            })
        }
        Commands::Aspect(options) => {
            let ratio = parse_ratio(&options.ratio)?;
            let known = match (options.width, options.height) {
                (Some(width), _) => Some(Known::Width(width)),
                (None, Some(height)) => Some(Known::Height(height)),
                (None, None) => None,
            };
            match known {
                Some(known) => {
                    let dims = resize(ratio, known)?;
                    options
                        .output
                        .emit(&dims, |d| f!("{}x{} ({ratio})", d.width, d.height))
                }
                None => options.output.emit(&ratio, |r| r.to_string()),
            }
        }
        Commands::Percent(app) => {
            let (result, label) = match app.command {
                PercentCommands::Of { percent, value } => {
                    (percent_of(percent, value), f!("{percent}% of {value}"))
                }
                PercentCommands::What { part, whole } => {
                    (what_percent(part, whole)?, f!("{part} of {whole} (%)"))
                }
                PercentCommands::Change { from, to } => {
                    (percent_change(from, to)?, f!("{from} → {to} (%)"))
                }
            };
            app.output
                .emit(&PercentResult { result }, |r| f!("{label} = {}", r.result.to_string().bold()))
        }
        Commands::Loan(options) => {
            let result = calculate_loan(&LoanInput {
                principal: options.principal,
                annual_rate: options.rate,
                months: options.months,
            })?;
            options.output.emit(&result, |r| {
                let mut table = new_table();
                table.add_row(prettytable::row!["Monthly payment".bold(), r.monthly_payment]);
                table.add_row(prettytable::row!["Total paid".bold(), r.total_paid]);
                table.add_row(prettytable::row!["Total interest".bold(), r.total_interest]);
                table.to_string()
            })
        }
        Commands::Salary(options) => {
            let schedule = WorkSchedule {
                hours_per_week: options.hours_per_week,
                days_per_week: options.days_per_week,
                weeks_per_year: options.weeks_per_year,
            };
            let breakdown = convert_salary(options.amount, options.period, &schedule)?;
            options.output.emit(&breakdown, |b| {
                let mut table = new_table();
                table.add_row(prettytable::row!["Hourly".bold(), b.hourly]);
                table.add_row(prettytable::row!["Daily".bold(), b.daily]);
                table.add_row(prettytable::row!["Weekly".bold(), b.weekly]);
                table.add_row(prettytable::row!["Monthly".bold(), b.monthly]);
                table.add_row(prettytable::row!["Yearly".bold(), b.yearly]);
                table.to_string()
            })
        }
        Commands::Bmi(options) => {
            let measure = if options.imperial {
                BodyMeasure::Imperial {
                    weight_lb: options.weight,
                    height_in: options.height,
                }
            } else {
                BodyMeasure::Metric {
                    weight_kg: options.weight,
                    height_cm: options.height,
                }
            };
            let result = calculate_bmi(measure)?;
            options
                .output
                .emit(&result, |r| f!("BMI {} ({})", r.bmi.to_string().bold(), r.category.label()))
        }
        Commands::Age(options) => {
            let birth = parse_date(&options.birth)?;
            let today = match &options.on {
                Some(date) => parse_date(date)?,
                None => chrono::Local::now().date_naive(),
            };
            let age = calculate_age(birth, today)?;
            options.output.emit(&age, |a| {
                let mut out = f!(
                    "{} years, {} months, {} days ({} days in total)",
                    a.years.to_string().bold(),
                    a.months,
                    a.days,
                    a.total_days
                );
                if a.days_to_birthday == 0 {
                    out.push_str(&f!("\n{}", "Happy birthday!".green()));
                } else {
                    out.push_str(&f!("\nNext birthday in {} days", a.days_to_birthday));
                }
                out
            })
        }
    }
}
