use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::plan::{DrawPlan, Shape, TextAnchor};
use crate::convert::color::parse_color;
use crate::error::{Result, ToolError};

pub const SIZES: [u32; 6] = [16, 32, 48, 64, 128, 256];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaviconShape {
    Square,
    Rounded,
    Circle,
}

impl FromStr for FaviconShape {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "square" => Ok(FaviconShape::Square),
            "rounded" => Ok(FaviconShape::Rounded),
            "circle" => Ok(FaviconShape::Circle),
            other => Err(ToolError::invalid(format!("Unknown favicon shape '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaviconOptions {
    pub letters: String,
    pub shape: FaviconShape,
    pub background: String,
    pub foreground: String,
    pub size: u32,
}

impl Default for FaviconOptions {
    fn default() -> Self {
        Self {
            letters: "A".to_string(),
            shape: FaviconShape::Rounded,
            background: "#2563eb".to_string(),
            foreground: "#ffffff".to_string(),
            size: 64,
        }
    }
}

pub fn favicon_file_name(options: &FaviconOptions) -> String {
    format!("favicon-{}.svg", options.size)
}

pub fn favicon_plan(options: &FaviconOptions) -> Result<DrawPlan> {
    let letters = options.letters.trim();
    let count = letters.chars().count();
    if !(1..=2).contains(&count) {
        return Err(ToolError::invalid("A favicon takes one or two letters"));
    }
    if !SIZES.contains(&options.size) {
        return Err(ToolError::invalid(format!(
            "Size must be one of {}",
            SIZES.map(|s| s.to_string()).join(", ")
        )));
    }
    let background = parse_color(&options.background)?.to_hex();
    let foreground = parse_color(&options.foreground)?.to_hex();

    let side = f64::from(options.size);
    let backdrop = match options.shape {
        FaviconShape::Circle => Shape::Circle {
            cx: side / 2.0,
            cy: side / 2.0,
            r: side / 2.0,
            fill: background,
        },
        FaviconShape::Square | FaviconShape::Rounded => Shape::Rect {
            x: 0.0,
            y: 0.0,
            width: side,
            height: side,
            rx: if options.shape == FaviconShape::Rounded {
                side * 0.2
            } else {
                0.0
            },
            fill: background,
        },
    };

    let mut plan = DrawPlan::new(options.size, options.size);
    plan.push(backdrop).push(Shape::Text {
        x: side / 2.0,
        y: side / 2.0,
        content: letters.to_uppercase(),
        font_size: if count == 1 { side * 0.6 } else { side * 0.45 },
        fill: foreground,
        anchor: TextAnchor::Middle,
        bold: true,
    });
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::plan::render_svg;

    #[test]
    fn test_rounded_default() {
        let svg = render_svg(&favicon_plan(&FaviconOptions::default()).unwrap());
        assert!(svg.contains(r##"<rect x="0" y="0" width="64" height="64" rx="12.8" fill="#2563eb"/>"##));
        assert!(svg.contains(">A</text>"));
        assert!(svg.contains(r#"font-size="38.4""#));
    }

    #[test]
    fn test_circle_two_letters() {
        let options = FaviconOptions {
            letters: "rs".into(),
            shape: FaviconShape::Circle,
            size: 32,
            ..FaviconOptions::default()
        };
        let svg = render_svg(&favicon_plan(&options).unwrap());
        assert!(svg.contains(r#"<circle cx="16" cy="16" r="16""#));
        assert!(svg.contains(">RS</text>"));
        assert_eq!(favicon_file_name(&options), "favicon-32.svg");
    }

    #[test]
    fn test_square_has_no_radius() {
        let options = FaviconOptions {
            shape: FaviconShape::Square,
            ..FaviconOptions::default()
        };
        assert!(!render_svg(&favicon_plan(&options).unwrap()).contains("rx="));
    }

    #[test]
    fn test_validation() {
        let too_many = FaviconOptions {
            letters: "ABC".into(),
            ..FaviconOptions::default()
        };
        assert!(favicon_plan(&too_many).is_err());

        let odd_size = FaviconOptions {
            size: 50,
            ..FaviconOptions::default()
        };
        assert!(favicon_plan(&odd_size).is_err());
    }
}
