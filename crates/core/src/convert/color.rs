//! Color parsing and conversion
//!
//! Accepts `#rgb`, `#rrggbb`, `rgb(r, g, b)` and `hsl(h, s%, l%)` and converts
//! between the three notations. Contrast follows the WCAG 2.x relative
//! luminance formula.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::{require_input, Result, ToolError};

static RGB_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^rgba?\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*(?:,\s*[\d.]+\s*)?\)$")
        .expect("rgb regex")
});

static HSL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^hsla?\(\s*(-?[\d.]+)(?:deg)?\s*,\s*([\d.]+)%\s*,\s*([\d.]+)%\s*(?:,\s*[\d.]+\s*)?\)$",
    )
    .expect("hsl regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Hue in degrees `[0, 360)`, saturation and lightness in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    pub const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn to_css(self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }

    pub fn to_hsl(self) -> Hsl {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;
        let delta = max - min;

        if delta == 0.0 {
            return Hsl {
                h: 0.0,
                s: 0.0,
                l: l * 100.0,
            };
        }

        let s = delta / (1.0 - (2.0 * l - 1.0).abs());
        let h = if max == r {
            60.0 * (((g - b) / delta).rem_euclid(6.0))
        } else if max == g {
            60.0 * ((b - r) / delta + 2.0)
        } else {
            60.0 * ((r - g) / delta + 4.0)
        };

        Hsl {
            h: h.rem_euclid(360.0),
            s: s * 100.0,
            l: l * 100.0,
        }
    }

    /// WCAG relative luminance in `[0, 1]`.
    pub fn luminance(self) -> f64 {
        fn channel(c: u8) -> f64 {
            let c = f64::from(c) / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        0.2126 * channel(self.r) + 0.7152 * channel(self.g) + 0.0722 * channel(self.b)
    }

    /// Black or white, whichever reads better on top of `self`.
    pub fn readable_text(self) -> Rgb {
        if contrast_ratio(self, Rgb::BLACK) >= contrast_ratio(self, Rgb::WHITE) {
            Rgb::BLACK
        } else {
            Rgb::WHITE
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Hsl {
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self {
            h: h.rem_euclid(360.0),
            s: s.clamp(0.0, 100.0),
            l: l.clamp(0.0, 100.0),
        }
    }

    pub fn to_rgb(self) -> Rgb {
        let s = self.s.clamp(0.0, 100.0) / 100.0;
        let l = self.l.clamp(0.0, 100.0) / 100.0;
        let h = self.h.rem_euclid(360.0);

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - ((h / 60.0).rem_euclid(2.0) - 1.0).abs());
        let m = l - c / 2.0;
        let (r, g, b) = match h {
            h if h < 60.0 => (c, x, 0.0),
            h if h < 120.0 => (x, c, 0.0),
            h if h < 180.0 => (0.0, c, x),
            h if h < 240.0 => (0.0, x, c),
            h if h < 300.0 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        let to_byte = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Rgb::new(to_byte(r), to_byte(g), to_byte(b))
    }

    pub fn to_css(self) -> String {
        format!(
            "hsl({}, {}%, {}%)",
            self.h.round() as i64 % 360,
            self.s.round() as i64,
            self.l.round() as i64
        )
    }
}

/// Parse any of the supported notations.
pub fn parse_color(input: &str) -> Result<Rgb> {
    let input = require_input(input)?.trim();

    if let Some(hex) = input.strip_prefix('#') {
        return parse_hex(hex);
    }
    if let Some(caps) = RGB_RE.captures(input) {
        let channel = |i: usize| -> Result<u8> {
            caps[i]
                .parse::<u8>()
                .map_err(|_| ToolError::invalid(format!("RGB channel out of range: {}", &caps[i])))
        };
        return Ok(Rgb::new(channel(1)?, channel(2)?, channel(3)?));
    }
    if let Some(caps) = HSL_RE.captures(input) {
        let number = |i: usize| -> Result<f64> {
            caps[i]
                .parse::<f64>()
                .map_err(|_| ToolError::parse(format!("Invalid number '{}'", &caps[i])))
        };
        let (h, s, l) = (number(1)?, number(2)?, number(3)?);
        if s > 100.0 || l > 100.0 {
            return Err(ToolError::invalid("Saturation and lightness must be at most 100%"));
        }
        return Ok(Hsl::new(h, s, l).to_rgb());
    }
    if input.len() == 6 || input.len() == 3 {
        if let Ok(rgb) = parse_hex(input) {
            return Ok(rgb);
        }
    }

    Err(ToolError::parse(format!("Unrecognized color '{input}'")))
}

fn parse_hex(hex: &str) -> Result<Rgb> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ToolError::parse(format!("Invalid hex color '#{hex}'")));
    }
    let expanded: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 => hex.to_string(),
        _ => return Err(ToolError::parse(format!("Hex colors have 3 or 6 digits, got '#{hex}'"))),
    };
    let byte = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16);
    match (byte(0), byte(2), byte(4)) {
        (Ok(r), Ok(g), Ok(b)) => Ok(Rgb::new(r, g, b)),
        _ => Err(ToolError::parse(format!("Invalid hex color '#{hex}'"))),
    }
}

pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let (la, lb) = (a.luminance(), b.luminance());
    let (hi, lo) = if la >= lb { (la, lb) } else { (lb, la) };
    (hi + 0.05) / (lo + 0.05)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorFormats {
    pub hex: String,
    pub rgb: String,
    pub hsl: String,
}

pub fn color_formats(input: &str) -> Result<ColorFormats> {
    let rgb = parse_color(input)?;
    Ok(ColorFormats {
        hex: rgb.to_hex(),
        rgb: rgb.to_css(),
        hsl: rgb.to_hsl().to_css(),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContrastReport {
    /// Rounded to two decimals.
    pub ratio: f64,
    pub aa_normal: bool,
    pub aa_large: bool,
    pub aaa_normal: bool,
    pub aaa_large: bool,
}

pub fn contrast_report(foreground: &str, background: &str) -> Result<ContrastReport> {
    let ratio = contrast_ratio(parse_color(foreground)?, parse_color(background)?);
    Ok(ContrastReport {
        ratio: (ratio * 100.0).round() / 100.0,
        aa_normal: ratio >= 4.5,
        aa_large: ratio >= 3.0,
        aaa_normal: ratio >= 7.0,
        aaa_large: ratio >= 4.5,
    })
}
