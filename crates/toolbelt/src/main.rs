use crate::prelude::{eprintln, *};
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;

mod calc;
mod clipboard;
mod config;
mod convert;
mod draw;
mod encode;
mod error;
mod format;
mod generate;
mod http;
mod input;
mod inspect;
mod net;
mod output;
mod prelude;
mod server;
mod store;
mod text;
mod track;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Small single-purpose utilities: formatters, encoders, converters, calculators, generators and trackers"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Whether to display additional information.
    #[clap(long, env = "TOOLBELT_VERBOSE", global = true, default_value = "false")]
    verbose: bool,

    /// Directory where trackers keep their data
    #[clap(long, env = "TOOLBELT_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// Path to the configuration file
    #[clap(long, env = "TOOLBELT_CONFIG", global = true)]
    config: Option<PathBuf>,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Case conversion, statistics and line utilities
    Text(crate::text::App),

    /// JSON, SQL, CSS and Markdown formatters
    Format(crate::format::App),

    /// Base64, hex, URL, HTML entity, JWT and hash tools
    Encode(crate::encode::App),

    /// Roman numerals, number bases, units, currency, colors and timestamps
    Convert(crate::convert::App),

    /// Tip, aspect ratio, percentage, loan, salary, BMI and age calculators
    Calc(crate::calc::App),

    /// UUIDs, passwords, palettes, gradients, lorem ipsum and ASCII art
    Generate(crate::generate::App),

    /// SVG placeholders, favicons, barcodes and blobs
    Draw(crate::draw::App),

    /// Todo list, sticky notes, habits, water intake, quotes, world clock and stopwatch
    Track(crate::track::App),

    /// Public IP, YouTube thumbnails, speed test and device facts
    Net(crate::net::App),

    /// Cron expressions, IP addresses and user agents
    Inspect(crate::inspect::App),

    /// Serve the pure tools over JSON-RPC
    Serve(crate::server::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    let result = match app.command {
        SubCommands::Text(sub_app) => crate::text::run(sub_app, app.global).await,
        SubCommands::Format(sub_app) => crate::format::run(sub_app, app.global).await,
        SubCommands::Encode(sub_app) => crate::encode::run(sub_app, app.global).await,
        SubCommands::Convert(sub_app) => crate::convert::run(sub_app, app.global).await,
        SubCommands::Calc(sub_app) => crate::calc::run(sub_app, app.global).await,
        SubCommands::Generate(sub_app) => crate::generate::run(sub_app, app.global).await,
        SubCommands::Draw(sub_app) => crate::draw::run(sub_app, app.global).await,
        SubCommands::Track(sub_app) => crate::track::run(sub_app, app.global).await,
        SubCommands::Net(sub_app) => crate::net::run(sub_app, app.global).await,
        SubCommands::Inspect(sub_app) => crate::inspect::run(sub_app, app.global).await,
        SubCommands::Serve(sub_app) => crate::server::run(sub_app, app.global).await,
    };

    match result {
        // Blank input is a no-op, not a failure.
        Err(report) if is_empty_input(&report) => {
            eprintln!("{}", "Nothing to do: input is empty".yellow());
            Ok(())
        }
        other => other.map_err(|err: color_eyre::eyre::Report| eyre!(err)),
    }
}

fn is_empty_input(report: &color_eyre::eyre::Report) -> bool {
    report
        .downcast_ref::<toolbelt_core::ToolError>()
        .is_some_and(|e| e.is_empty_input())
}
