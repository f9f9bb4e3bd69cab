//! Code 39 barcodes
//!
//! Each symbol is nine elements, bar and space alternating and starting with
//! a bar, three of them wide. Symbols are separated by a narrow space and the
//! data is framed by the `*` start/stop symbol.

use serde::{Deserialize, Serialize};

use super::plan::{DrawPlan, Shape, TextAnchor};
use crate::error::{require_input, Result, ToolError};
use crate::text::slug::{slugify, SlugOptions};

pub const MAX_DATA: usize = 40;

/// Wide-to-narrow element ratio.
const WIDE: u32 = 3;
/// Blank modules on either side.
const QUIET_ZONE: u32 = 10;

/// `1` marks a wide element.
const PATTERNS: [(char, &str); 44] = [
    ('0', "000110100"),
    ('1', "100100001"),
    ('2', "001100001"),
    ('3', "101100000"),
    ('4', "000110001"),
    ('5', "100110000"),
    ('6', "001110000"),
    ('7', "000100101"),
    ('8', "100100100"),
    ('9', "001100100"),
    ('A', "100001001"),
    ('B', "001001001"),
    ('C', "101001000"),
    ('D', "000011001"),
    ('E', "100011000"),
    ('F', "001011000"),
    ('G', "000001101"),
    ('H', "100001100"),
    ('I', "001001100"),
    ('J', "000011100"),
    ('K', "100000011"),
    ('L', "001000011"),
    ('M', "101000010"),
    ('N', "000010011"),
    ('O', "100010010"),
    ('P', "001010010"),
    ('Q', "000000111"),
    ('R', "100000110"),
    ('S', "001000110"),
    ('T', "000010110"),
    ('U', "110000001"),
    ('V', "011000001"),
    ('W', "111000000"),
    ('X', "010010001"),
    ('Y', "110010000"),
    ('Z', "011010000"),
    ('-', "010000101"),
    ('.', "110000100"),
    (' ', "011000100"),
    ('$', "010101000"),
    ('/', "010100010"),
    ('+', "010001010"),
    ('%', "000101010"),
    ('*', "010010100"),
];

fn pattern(c: char) -> Option<&'static str> {
    PATTERNS.iter().find(|(k, _)| *k == c).map(|(_, p)| *p)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarcodeOptions {
    /// Width of a narrow element in pixels.
    pub module: u32,
    pub height: u32,
    pub show_text: bool,
    pub foreground: String,
    pub background: String,
}

impl Default for BarcodeOptions {
    fn default() -> Self {
        Self {
            module: 2,
            height: 80,
            show_text: true,
            foreground: "#000000".to_string(),
            background: "#ffffff".to_string(),
        }
    }
}

/// Bar runs as `(offset, width)` in modules, quiet zone included.
///
/// Lowercase letters are folded to uppercase; anything else outside the
/// Code 39 set is rejected, as is a literal `*`.
pub fn encode_code39(data: &str) -> Result<(Vec<(u32, u32)>, u32)> {
    let data = require_input(data)?;
    if data.chars().count() > MAX_DATA {
        return Err(ToolError::invalid(format!("Barcode data is limited to {MAX_DATA} characters")));
    }

    let mut symbols = Vec::with_capacity(data.len() + 2);
    symbols.push('*');
    for c in data.chars() {
        let upper = c.to_ascii_uppercase();
        if upper == '*' || pattern(upper).is_none() {
            return Err(ToolError::invalid(format!("'{c}' cannot be encoded in Code 39")));
        }
        symbols.push(upper);
    }
    symbols.push('*');

    let mut bars = Vec::new();
    let mut x = QUIET_ZONE;
    for (i, symbol) in symbols.iter().enumerate() {
        if i > 0 {
            x += 1;
        }
        let Some(elements) = pattern(*symbol) else {
            continue;
        };
        for (j, element) in elements.chars().enumerate() {
            let width = if element == '1' { WIDE } else { 1 };
            if j % 2 == 0 {
                bars.push((x, width));
            }
            x += width;
        }
    }
    Ok((bars, x + QUIET_ZONE))
}

pub fn barcode_file_name(data: &str) -> String {
    let slug = slugify(data, &SlugOptions::default());
    if slug.is_empty() {
        "barcode.svg".to_string()
    } else {
        format!("barcode-{slug}.svg")
    }
}

pub fn barcode_plan(data: &str, options: &BarcodeOptions) -> Result<DrawPlan> {
    if options.module == 0 || options.height == 0 {
        return Err(ToolError::invalid("Module width and height must be positive"));
    }
    let (bars, modules) = encode_code39(data)?;
    let module = f64::from(options.module);
    let text_band = if options.show_text { 24 } else { 0 };

    let mut plan = DrawPlan::new(modules * options.module, options.height + text_band)
        .with_background(options.background.clone());
    for (offset, width) in bars {
        plan.push(Shape::Rect {
            x: f64::from(offset) * module,
            y: 0.0,
            width: f64::from(width) * module,
            height: f64::from(options.height),
            rx: 0.0,
            fill: options.foreground.clone(),
        });
    }
    if options.show_text {
        plan.push(Shape::Text {
            x: f64::from(plan.width) / 2.0,
            y: f64::from(options.height) + 12.0,
            content: data.trim().to_ascii_uppercase(),
            font_size: 14.0,
            fill: options.foreground.clone(),
            anchor: TextAnchor::Middle,
            bold: false,
        });
    }
    Ok(plan)
}
