use crate::input::read_input;
use crate::output::OutputArgs;
use crate::prelude::*;
use colored::Colorize;
use rand::rngs::OsRng;
use serde::Serialize;
use toolbelt_core::generate::ascii_art::{fully_supported, render_ascii_art, AsciiArtOptions};
use toolbelt_core::generate::gradient::{css_gradient, random_gradient, ColorStop, GradientKind};
use toolbelt_core::generate::lorem::{lorem, LoremUnit};
use toolbelt_core::generate::palette::{harmony_palette, random_palette, Harmony, Swatch};
use toolbelt_core::generate::password::{
    estimate_strength, generate_password, PasswordEstimate, PasswordOptions, Strength,
};
use toolbelt_core::generate::uuid::{generate_uuids, validate_uuid};

#[derive(Debug, clap::Parser)]
#[command(name = "generate")]
#[command(about = "UUIDs, passwords, palettes, gradients, placeholder text and ASCII art")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Generate or validate v4 UUIDs
    #[clap(name = "uuid")]
    Uuid(UuidOptions),

    /// Generate passwords and estimate their strength
    #[clap(name = "password")]
    Password(PasswordArgs),

    /// Random or harmonious color palettes
    #[clap(name = "palette")]
    Palette(PaletteOptions),

    /// CSS linear or radial gradients
    #[clap(name = "gradient")]
    Gradient(GradientOptions),

    /// Lorem ipsum placeholder text
    #[clap(name = "lorem")]
    Lorem(LoremOptions),

    /// Render text as big block letters
    #[clap(name = "ascii")]
    Ascii(AsciiOptions),
}

#[derive(Debug, clap::Args)]
pub struct UuidOptions {
    /// How many UUIDs to generate
    #[arg(short = 'n', long, default_value = "1")]
    pub count: usize,

    /// Validate this UUID instead of generating
    #[arg(long)]
    pub validate: Option<String>,

    #[clap(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, clap::Args)]
pub struct PasswordArgs {
    /// Password length
    #[arg(short, long, default_value = "16")]
    pub length: usize,

    /// How many passwords to generate
    #[arg(short = 'n', long, default_value = "1")]
    pub count: usize,

    /// Leave out lowercase letters
    #[arg(long)]
    pub no_lower: bool,

    /// Leave out uppercase letters
    #[arg(long)]
    pub no_upper: bool,

    /// Leave out digits
    #[arg(long)]
    pub no_digits: bool,

    /// Leave out symbols
    #[arg(long)]
    pub no_symbols: bool,

    /// Skip look-alike characters such as l, 1, O and 0
    #[arg(long)]
    pub exclude_ambiguous: bool,

    /// Estimate the strength of an existing password instead
    #[arg(long)]
    pub check: Option<String>,

    #[clap(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, clap::Args)]
pub struct PaletteOptions {
    /// Number of random colors
    #[arg(short = 'n', long, default_value = "5", conflicts_with = "harmony")]
    pub count: usize,

    /// complementary, analogous, triadic or monochromatic
    #[arg(long, requires = "base", value_parser = str::parse::<Harmony>)]
    pub harmony: Option<Harmony>,

    /// Base color for --harmony
    #[arg(long)]
    pub base: Option<String>,

    #[clap(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, clap::Args)]
pub struct GradientOptions {
    /// Color stops such as "#ff0000" or "blue 40%" (random when omitted)
    pub stops: Vec<String>,

    /// Angle in degrees for a linear gradient
    #[arg(short, long, default_value = "90", conflicts_with = "radial")]
    pub angle: u16,

    /// Radial instead of linear
    #[arg(long)]
    pub radial: bool,

    #[clap(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, clap::Args)]
pub struct LoremOptions {
    /// How many units to produce
    #[arg(default_value = "3")]
    pub count: usize,

    /// Count words
    #[arg(long, conflicts_with = "sentences")]
    pub words: bool,

    /// Count sentences
    #[arg(long)]
    pub sentences: bool,

    /// Start with "Lorem ipsum dolor sit amet"
    #[arg(long)]
    pub classic: bool,

    #[clap(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, clap::Args)]
pub struct AsciiOptions {
    /// Text to render. Reads stdin if omitted.
    pub text: Option<String>,

    /// Character used for lit cells
    #[arg(long, default_value = "#")]
    pub fill: char,

    /// Blank columns between letters
    #[arg(long, default_value = "1")]
    pub spacing: usize,

    #[clap(flatten)]
    pub output: OutputArgs,
}

#[derive(Serialize)]
struct GeneratedPassword {
    password: String,
    #[serde(flatten)]
    estimate: PasswordEstimate,
}

fn strength_label(estimate: &PasswordEstimate) -> String {
    let label = f!("{:?}", estimate.strength);
    let painted = match estimate.strength {
        s if s >= Strength::Strong => label.green(),
        Strength::Fair => label.yellow(),
        _ => label.red(),
    };
    f!("{painted} ({} bits)", estimate.entropy_bits)
}

fn palette_table(swatches: &[Swatch]) -> String {
    let mut table = new_table();
    table.add_row(prettytable::row!["HEX".bold(), "RGB".bold(), "HSL".bold()]);
    for swatch in swatches {
        table.add_row(prettytable::row![swatch.hex, swatch.rgb, swatch.hsl]);
    }
    table.to_string()
}

pub async fn run(app: App, _global: crate::Global) -> Result<()> {
    match app.command {
        Commands::Uuid(options) => {
            if let Some(candidate) = &options.validate {
                let check = validate_uuid(candidate)?;
                return options.output.emit(&check, |c| match (c.valid, c.version) {
                    (true, Some(version)) => f!("{} (version {version})", "Valid".green()),
                    (true, None) => "Valid".green().to_string(),
                    (false, _) => "Invalid".red().to_string(),
                });
            }
            let uuids = generate_uuids(&mut OsRng, options.count)?;
            options.output.emit(&uuids, |u| u.join("\n"))
        }
        Commands::Password(options) => {
            if let Some(existing) = &options.check {
                let estimate = estimate_strength(existing);
                return options.output.emit(&estimate, strength_label);
            }
            let settings = PasswordOptions {
                length: options.length,
                lowercase: !options.no_lower,
                uppercase: !options.no_upper,
                digits: !options.no_digits,
                symbols: !options.no_symbols,
                exclude_ambiguous: options.exclude_ambiguous,
            };
            let passwords = (0..options.count.max(1))
                .map(|_| {
                    let password = generate_password(&mut OsRng, &settings)?;
                    let estimate = estimate_strength(&password);
                    Ok(GeneratedPassword { password, estimate })
                })
                .collect::<Result<Vec<_>>>()?;
            options.output.emit(&passwords, |list| {
                list.iter()
                    .map(|p| f!("{}  {}", p.password, strength_label(&p.estimate).dimmed()))
                    .collect::<Vec<_>>()
                    .join("\n")
            })
        }
        Commands::Palette(options) => {
            let swatches = match (options.harmony, &options.base) {
                (Some(harmony), Some(base)) => harmony_palette(base, harmony)?,
                _ => random_palette(&mut rand::thread_rng(), options.count)?,
            };
            options.output.emit(&swatches, |s| palette_table(s))
        }
        Commands::Gradient(options) => {
            let css = if options.stops.is_empty() {
                random_gradient(&mut rand::thread_rng())?
            } else {
                let stops = options
                    .stops
                    .iter()
                    .map(|raw| ColorStop::parse(raw))
                    .collect::<Result<Vec<_>, _>>()?;
                let kind = if options.radial {
                    GradientKind::Radial
                } else {
                    GradientKind::Linear {
                        angle: options.angle,
                    }
                };
                css_gradient(&kind, &stops)?
            };
            options.output.emit_text(&f!("background: {css};"))
        }
        Commands::Lorem(options) => {
            let unit = if options.words {
                LoremUnit::Words
            } else if options.sentences {
                LoremUnit::Sentences
            } else {
                LoremUnit::Paragraphs
            };
            let text = lorem(&mut rand::thread_rng(), unit, options.count, options.classic)?;
            options.output.emit_text(&text)
        }
        Commands::Ascii(options) => {
            let text = read_input(options.text)?;
            if !fully_supported(&text) {
                log::warn!("Some characters have no glyph and will be left blank");
            }
            let art = render_ascii_art(
                &text,
                &AsciiArtOptions {
                    fill: options.fill,
                    spacing: options.spacing,
                },
            )?;
            options.output.emit_text(&art)
        }
    }
}
