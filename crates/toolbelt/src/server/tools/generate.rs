use super::{json_result, parse_args, text_result, tool, unknown_tool, Tool, ToolOutcome};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use serde_json::json;
use toolbelt_core::generate::ascii_art::{render_ascii_art, AsciiArtOptions};
use toolbelt_core::generate::gradient::{css_gradient, random_gradient, ColorStop, GradientKind};
use toolbelt_core::generate::lorem::{lorem, LoremUnit};
use toolbelt_core::generate::palette::{harmony_palette, random_palette, Harmony};
use toolbelt_core::generate::password::{estimate_strength, generate_password, PasswordEstimate, PasswordOptions};
use toolbelt_core::generate::uuid::{generate_uuids, validate_uuid};
use toolbelt_core::ToolError;

pub fn tools() -> Vec<Tool> {
    vec![
        tool(
            "generate_uuid",
            "Generate random v4 UUIDs, or validate one.",
            json!({
                "type": "object",
                "properties": {
                    "count": {"type": "number", "description": "Default 1"},
                    "validate": {"type": "string", "description": "Check this UUID instead of generating"}
                }
            }),
        ),
        tool(
            "generate_password",
            "Generate a random password with a strength estimate, or estimate the strength of a given one.",
            json!({
                "type": "object",
                "properties": {
                    "length": {"type": "number", "description": "Default 16"},
                    "lowercase": {"type": "boolean"},
                    "uppercase": {"type": "boolean"},
                    "digits": {"type": "boolean"},
                    "symbols": {"type": "boolean"},
                    "exclude_ambiguous": {"type": "boolean"},
                    "check": {"type": "string", "description": "Estimate this password instead of generating"}
                }
            }),
        ),
        tool(
            "generate_palette",
            "Random color palette, or a harmony palette built from a base color.",
            json!({
                "type": "object",
                "properties": {
                    "count": {"type": "number", "description": "Default 5"},
                    "base": {"type": "string"},
                    "harmony": {"type": "string", "enum": ["complementary", "analogous", "triadic", "monochromatic"]}
                }
            }),
        ),
        tool(
            "generate_gradient",
            "CSS gradient over the given color stops, or a random one when no stops are given.",
            json!({
                "type": "object",
                "properties": {
                    "stops": {"type": "array", "items": {"type": "string"}, "description": "e.g. [\"#ff0000\", \"blue 80%\"]"},
                    "angle": {"type": "number", "description": "Degrees, default 90"},
                    "radial": {"type": "boolean"}
                }
            }),
        ),
        tool(
            "generate_lorem",
            "Placeholder lorem ipsum text.",
            json!({
                "type": "object",
                "properties": {
                    "unit": {"type": "string", "enum": ["words", "sentences", "paragraphs"]},
                    "count": {"type": "number", "description": "Default 3"},
                    "classic": {"type": "boolean", "description": "Start with 'Lorem ipsum dolor sit amet'"}
                }
            }),
        ),
        tool(
            "generate_ascii_art",
            "Render text as block-letter ASCII art.",
            json!({
                "type": "object",
                "properties": {
                    "input": {"type": "string"},
                    "fill": {"type": "string", "description": "Single character, default '#'"},
                    "spacing": {"type": "number"}
                },
                "required": ["input"]
            }),
        ),
    ]
}

#[derive(Deserialize)]
struct UuidArgs {
    #[serde(default = "one")]
    count: usize,
    validate: Option<String>,
}

fn one() -> usize {
    1
}

#[derive(Deserialize)]
struct PasswordArgs {
    #[serde(flatten)]
    options: PasswordOptions,
    check: Option<String>,
}

#[derive(Serialize)]
struct GeneratedPassword {
    password: String,
    #[serde(flatten)]
    estimate: PasswordEstimate,
}

#[derive(Deserialize)]
struct PaletteArgs {
    #[serde(default = "five")]
    count: usize,
    base: Option<String>,
    harmony: Option<Harmony>,
}

fn five() -> usize {
    5
}

#[derive(Deserialize)]
struct GradientArgs {
    #[serde(default)]
    stops: Vec<String>,
    #[serde(default = "right_angle")]
    angle: u16,
    #[serde(default)]
    radial: bool,
}

fn right_angle() -> u16 {
    90
}

#[derive(Deserialize)]
struct LoremArgs {
    #[serde(default = "paragraphs")]
    unit: LoremUnit,
    #[serde(default = "three")]
    count: usize,
    #[serde(default)]
    classic: bool,
}

fn paragraphs() -> LoremUnit {
    LoremUnit::Paragraphs
}

fn three() -> usize {
    3
}

#[derive(Deserialize)]
struct AsciiArtArgs {
    input: String,
    #[serde(flatten)]
    options: AsciiArtOptions,
}

fn palette(args: PaletteArgs) -> toolbelt_core::Result<Vec<toolbelt_core::generate::palette::Swatch>> {
    match (args.base, args.harmony) {
        (Some(base), Some(harmony)) => harmony_palette(&base, harmony),
        (None, Some(_)) => Err(ToolError::invalid("A harmony needs a base color")),
        _ => random_palette(&mut rand::thread_rng(), args.count),
    }
}

fn gradient(args: GradientArgs) -> toolbelt_core::Result<String> {
    if args.stops.is_empty() {
        return random_gradient(&mut rand::thread_rng());
    }
    let stops = args
        .stops
        .iter()
        .map(|raw| ColorStop::parse(raw))
        .collect::<toolbelt_core::Result<Vec<_>>>()?;
    let kind = if args.radial {
        GradientKind::Radial
    } else {
        GradientKind::Linear { angle: args.angle }
    };
    css_gradient(&kind, &stops)
}

pub fn call(name: &str, arguments: Option<serde_json::Value>) -> ToolOutcome {
    match name {
        "generate_uuid" => {
            let args: UuidArgs = parse_args(arguments)?;
            match args.validate {
                Some(uuid) => json_result(validate_uuid(&uuid)),
                None => text_result(generate_uuids(&mut OsRng, args.count).map(|ids| ids.join("\n"))),
            }
        }
        "generate_password" => {
            let args: PasswordArgs = parse_args(arguments)?;
            match args.check {
                Some(password) => json_result(Ok(estimate_strength(&password))),
                None => json_result(generate_password(&mut OsRng, &args.options).map(|password| {
                    GeneratedPassword {
                        estimate: estimate_strength(&password),
                        password,
                    }
                })),
            }
        }
        "generate_palette" => json_result(palette(parse_args(arguments)?)),
        "generate_gradient" => text_result(gradient(parse_args(arguments)?)),
        "generate_lorem" => {
            let args: LoremArgs = parse_args(arguments)?;
            text_result(lorem(&mut rand::thread_rng(), args.unit, args.count, args.classic))
        }
        "generate_ascii_art" => {
            let args: AsciiArtArgs = parse_args(arguments)?;
            text_result(render_ascii_art(&args.input, &args.options))
        }
        _ => unknown_tool(name),
    }
}
