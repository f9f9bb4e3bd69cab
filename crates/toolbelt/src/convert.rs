use crate::input::read_input;
use crate::output::OutputArgs;
use crate::prelude::*;
use colored::Colorize;
use std::path::PathBuf;
use toolbelt_core::convert::color::{color_formats, contrast_report, parse_color};
use toolbelt_core::convert::currency::{convert_currency, parse_rates};
use toolbelt_core::convert::number_base::{convert_all, convert_base};
use toolbelt_core::convert::roman::{from_roman, to_roman};
use toolbelt_core::convert::timestamp::{parse_timestamp, EpochUnit};
use toolbelt_core::convert::units::{convert_unit, format_quantity};
use toolbelt_core::error::require_input;

#[derive(Debug, clap::Parser)]
#[command(name = "convert")]
#[command(about = "Roman numerals, number bases, units, currency, colors and timestamps")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Numbers to Roman numerals and back (direction is detected)
    #[clap(name = "roman")]
    Roman(RomanOptions),

    /// Integers between bases 2 to 36
    #[clap(name = "base")]
    Base(BaseOptions),

    /// Length, mass, temperature and data sizes
    #[clap(name = "unit")]
    Unit(UnitOptions),

    /// Currency amounts against a rate table you provide
    #[clap(name = "currency")]
    Currency(CurrencyOptions),

    /// HEX, RGB and HSL forms of a color, with optional contrast check
    #[clap(name = "color")]
    Color(ColorOptions),

    /// Unix timestamps to dates and back
    #[clap(name = "timestamp")]
    Timestamp(TimestampOptions),
}

#[derive(Debug, clap::Args)]
pub struct RomanOptions {
    /// A number from 1 to 3999 or a Roman numeral
    pub input: Option<String>,

    #[clap(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, clap::Args)]
pub struct BaseOptions {
    /// Integer to convert (prefixes like 0x and 0b are accepted)
    pub input: Option<String>,

    /// Base the input is written in
    #[arg(short, long, default_value = "10")]
    pub from: u32,

    /// Target base (binary, octal, decimal and hex when omitted)
    #[arg(short, long)]
    pub to: Option<u32>,

    #[clap(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, clap::Args)]
pub struct UnitOptions {
    /// Quantity to convert
    #[arg(allow_negative_numbers = true)]
    pub value: f64,

    /// Source unit (e.g. km, lb, f, mib)
    pub from: String,

    /// Target unit
    pub to: String,

    #[clap(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, clap::Args)]
pub struct CurrencyOptions {
    /// Amount to convert
    pub amount: f64,

    /// Source currency code
    pub from: String,

    /// Target currency code
    pub to: String,

    /// Base currency the rates are quoted against
    #[arg(long, default_value = "USD")]
    pub base: String,

    /// Rates as CODE=rate pairs, e.g. "EUR=0.92,GBP=0.79"
    #[arg(long, env = "TOOLBELT_RATES", conflicts_with = "rates_file")]
    pub rates: Option<String>,

    /// File with one CODE=rate pair per line
    #[arg(long)]
    pub rates_file: Option<PathBuf>,

    #[clap(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, clap::Args)]
pub struct ColorOptions {
    /// #rgb, #rrggbb, rgb(...) or hsl(...)
    pub input: Option<String>,

    /// Report the WCAG contrast ratio against this background
    #[arg(short, long)]
    pub contrast: Option<String>,

    #[clap(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, clap::Args)]
pub struct TimestampOptions {
    /// Unix time or a date (defaults to now)
    pub input: Option<String>,

    /// Read a bare number as seconds
    #[arg(long, conflicts_with = "millis")]
    pub seconds: bool,

    /// Read a bare number as milliseconds
    #[arg(long)]
    pub millis: bool,

    #[clap(flatten)]
    pub output: OutputArgs,
}

pub async fn run(app: App, _global: crate::Global) -> Result<()> {
    match app.command {
        Commands::Roman(options) => {
            let input = read_input(options.input)?;
            let input = require_input(&input)?.trim();
            let result = match input.parse::<u32>() {
                Ok(n) => to_roman(n)?,
                Err(_) => from_roman(input)?.to_string(),
            };
            options.output.emit_text(&result)
        }
        Commands::Base(options) => {
            let input = read_input(options.input)?;
            match options.to {
                Some(to) => options
                    .output
                    .emit_text(&convert_base(&input, options.from, to)?),
                None => {
                    let all = convert_all(&input, options.from)?;
                    options.output.emit(&all, |c| {
                        let mut table = new_table();
                        table.add_row(prettytable::row!["Binary".bold(), c.binary]);
                        table.add_row(prettytable::row!["Octal".bold(), c.octal]);
                        table.add_row(prettytable::row!["Decimal".bold(), c.decimal]);
                        table.add_row(prettytable::row!["Hexadecimal".bold(), c.hexadecimal]);
                        table.to_string()
                    })
                }
            }
        }
        Commands::Unit(options) => {
            let conversion = convert_unit(options.value, &options.from, &options.to)?;
            options.output.emit(&conversion, |c| {
                f!(
                    "{} {} = {} {}",
                    format_quantity(c.value),
                    c.from,
                    format_quantity(c.result).bold(),
                    c.to
                )
            })
        }
        Commands::Currency(options) => {
            let raw = match (&options.rates, &options.rates_file) {
                (Some(rates), _) => rates.clone(),
                (None, Some(path)) => std::fs::read_to_string(path)
                    .with_context(|| f!("Failed to read {}", path.display()))?,
                (None, None) => {
                    return Err(eyre!(
                        "Currency conversion needs rates: pass --rates or --rates-file"
                    ))
                }
            };
            let table = parse_rates(&options.base, &raw)?;
            let conversion = convert_currency(&table, options.amount, &options.from, &options.to)?;
            options.output.emit(&conversion, |c| {
                f!(
                    "{} {} = {} {} (rate {})",
                    c.amount,
                    c.from,
                    c.result.to_string().bold(),
                    c.to,
                    c.rate
                )
            })
        }
        Commands::Color(options) => {
            let input = read_input(options.input)?;
            let formats = color_formats(&input)?;
            match options.contrast {
                Some(background) => {
                    let report = contrast_report(&input, &background)?;
                    let background = parse_color(&background)?.to_hex();
                    options.output.emit(&report, |r| {
                        let mark = |ok: bool| if ok { "pass".green() } else { "fail".red() };
                        let mut table = new_table();
                        table.add_row(prettytable::row![
                            "Contrast".bold(),
                            f!("{}:1 ({} on {background})", r.ratio, formats.hex)
                        ]);
                        table.add_row(prettytable::row!["AA normal text".bold(), mark(r.aa_normal)]);
                        table.add_row(prettytable::row!["AA large text".bold(), mark(r.aa_large)]);
                        table.add_row(prettytable::row!["AAA normal text".bold(), mark(r.aaa_normal)]);
                        table.add_row(prettytable::row!["AAA large text".bold(), mark(r.aaa_large)]);
                        table.to_string()
                    })
                }
                None => options.output.emit(&formats, |c| {
                    let mut table = new_table();
                    table.add_row(prettytable::row!["HEX".bold(), c.hex]);
                    table.add_row(prettytable::row!["RGB".bold(), c.rgb]);
                    table.add_row(prettytable::row!["HSL".bold(), c.hsl]);
                    table.to_string()
                }),
            }
        }
        Commands::Timestamp(options) => {
            let now = chrono::Utc::now();
            let input = options
                .input
                .unwrap_or_else(|| now.timestamp().to_string());
            let unit = if options.millis {
                Some(EpochUnit::Millis)
            } else if options.seconds {
                Some(EpochUnit::Seconds)
            } else {
                None
            };
            let info = parse_timestamp(&input, unit, now)?;
            options.output.emit(&info, |i| {
                let mut table = new_table();
                table.add_row(prettytable::row!["Unix (s)".bold(), i.unix_seconds]);
                table.add_row(prettytable::row!["Unix (ms)".bold(), i.unix_millis]);
                table.add_row(prettytable::row!["RFC 3339".bold(), i.rfc3339]);
                table.add_row(prettytable::row!["Relative".bold(), i.relative]);
                table.to_string()
            })
        }
    }
}
