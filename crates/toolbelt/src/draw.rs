use crate::input::read_input;
use crate::output::FileArgs;
use crate::prelude::*;
use rand::Rng;
use toolbelt_core::draw::barcode::{barcode_file_name, barcode_plan, BarcodeOptions};
use toolbelt_core::draw::favicon::{favicon_file_name, favicon_plan, FaviconOptions, FaviconShape};
use toolbelt_core::draw::placeholder::{placeholder_file_name, placeholder_plan, PlaceholderOptions};
use toolbelt_core::draw::{render_svg, DrawPlan};
use toolbelt_core::generate::blob::{blob_file_name, blob_plan, BlobOptions};

#[derive(Debug, clap::Parser)]
#[command(name = "draw")]
#[command(about = "Placeholder images, favicons, barcodes and blobs as SVG files")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// A solid image with its dimensions written in the middle
    #[clap(name = "placeholder")]
    Placeholder(PlaceholderArgs),

    /// A one or two letter favicon
    #[clap(name = "favicon")]
    Favicon(FaviconArgs),

    /// A Code 39 barcode
    #[clap(name = "barcode")]
    Barcode(BarcodeArgs),

    /// A random organic blob shape
    #[clap(name = "blob")]
    Blob(BlobArgs),
}

#[derive(Debug, clap::Args)]
pub struct PlaceholderArgs {
    pub width: u32,

    pub height: u32,

    /// Text in the middle (defaults to WIDTHxHEIGHT)
    #[arg(long)]
    pub label: Option<String>,

    /// Background color
    #[arg(long, default_value = "#cccccc")]
    pub bg: String,

    /// Text color
    #[arg(long, default_value = "#555555")]
    pub fg: String,

    #[clap(flatten)]
    pub file: FileArgs,
}

#[derive(Debug, clap::Args)]
pub struct FaviconArgs {
    /// One or two letters
    pub letters: String,

    /// square, rounded or circle
    #[arg(long, default_value = "rounded", value_parser = str::parse::<FaviconShape>)]
    pub shape: FaviconShape,

    /// Edge length in pixels (16, 32, 48, 64, 128 or 256)
    #[arg(long, default_value = "64")]
    pub size: u32,

    #[arg(long, default_value = "#2563eb")]
    pub bg: String,

    #[arg(long, default_value = "#ffffff")]
    pub fg: String,

    #[clap(flatten)]
    pub file: FileArgs,
}

#[derive(Debug, clap::Args)]
pub struct BarcodeArgs {
    /// Data to encode. Reads stdin if omitted.
    pub data: Option<String>,

    /// Width of a narrow bar in pixels
    #[arg(long, default_value = "2")]
    pub module: u32,

    /// Bar height in pixels
    #[arg(long, default_value = "80")]
    pub height: u32,

    /// Leave the human-readable text out
    #[arg(long)]
    pub no_text: bool,

    #[clap(flatten)]
    pub file: FileArgs,
}

#[derive(Debug, clap::Args)]
pub struct BlobArgs {
    /// Edge length in pixels
    #[arg(long, default_value = "400")]
    pub size: u32,

    /// Number of control points (3 to 20)
    #[arg(long, default_value = "6")]
    pub points: u32,

    /// How irregular the outline is (0 to 100)
    #[arg(long, default_value = "40")]
    pub randomness: u32,

    /// Seed for a reproducible shape (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, default_value = "#8b5cf6")]
    pub fill: String,

    #[clap(flatten)]
    pub file: FileArgs,
}

fn write_plan(file: &FileArgs, plan: &DrawPlan, name: &str) -> Result<()> {
    let svg = render_svg(plan);
    log::debug!("Rendered {}x{} SVG with {} shapes", plan.width, plan.height, plan.shapes.len());
    file.write(name, svg.as_bytes())
}

pub async fn run(app: App, _global: crate::Global) -> Result<()> {
    match app.command {
        Commands::Placeholder(args) => {
            let options = PlaceholderOptions {
                label: args.label,
                background: args.bg,
                foreground: args.fg,
                ..PlaceholderOptions::new(args.width, args.height)
            };
            write_plan(&args.file, &placeholder_plan(&options)?, &placeholder_file_name(&options))
        }
        Commands::Favicon(args) => {
            let options = FaviconOptions {
                letters: args.letters,
                shape: args.shape,
                background: args.bg,
                foreground: args.fg,
                size: args.size,
            };
            write_plan(&args.file, &favicon_plan(&options)?, &favicon_file_name(&options))
        }
        Commands::Barcode(args) => {
            let data = read_input(args.data)?;
            let data = data.trim();
            let options = BarcodeOptions {
                module: args.module,
                height: args.height,
                show_text: !args.no_text,
                ..BarcodeOptions::default()
            };
            write_plan(&args.file, &barcode_plan(data, &options)?, &barcode_file_name(data))
        }
        Commands::Blob(args) => {
            let seed = args
                .seed
                .unwrap_or_else(|| rand::thread_rng().gen_range(1..1_000_000));
            let options = BlobOptions {
                size: args.size,
                points: args.points,
                randomness: args.randomness,
                seed,
                fill: args.fill,
            };
            if args.seed.is_none() {
                log::info!("Using seed {seed}");
            }
            write_plan(&args.file, &blob_plan(&options)?, &blob_file_name(&options))
        }
    }
}
