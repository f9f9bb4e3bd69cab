use serde::{Deserialize, Serialize};

use super::plan::{DrawPlan, Shape, TextAnchor};
use crate::convert::color::parse_color;
use crate::error::{Result, ToolError};

pub const MAX_SIDE: u32 = 4000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceholderOptions {
    pub width: u32,
    pub height: u32,
    #[serde(default = "default_background")]
    pub background: String,
    #[serde(default = "default_foreground")]
    pub foreground: String,
    /// Defaults to `{width}×{height}`.
    #[serde(default)]
    pub label: Option<String>,
}

fn default_background() -> String {
    "#cccccc".to_string()
}

fn default_foreground() -> String {
    "#555555".to_string()
}

impl PlaceholderOptions {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            background: default_background(),
            foreground: default_foreground(),
            label: None,
        }
    }
}

pub fn placeholder_file_name(options: &PlaceholderOptions) -> String {
    format!("placeholder-{}x{}.svg", options.width, options.height)
}

pub fn placeholder_plan(options: &PlaceholderOptions) -> Result<DrawPlan> {
    let (w, h) = (options.width, options.height);
    if w == 0 || h == 0 || w > MAX_SIDE || h > MAX_SIDE {
        return Err(ToolError::invalid(format!(
            "Width and height must be between 1 and {MAX_SIDE}"
        )));
    }
    let background = parse_color(&options.background)?.to_hex();
    let foreground = parse_color(&options.foreground)?.to_hex();

    let label = match options.label.as_deref().map(str::trim) {
        Some(label) if !label.is_empty() => label.to_string(),
        _ => format!("{w}×{h}"),
    };

    // Fit the label to roughly 80% of the width, capped by a fifth of the height.
    let chars = label.chars().count().max(1) as f64;
    let font_size = (f64::from(w) * 0.8 / (chars * 0.6))
        .min(f64::from(h) / 5.0)
        .max(8.0)
        .floor();

    let mut plan = DrawPlan::new(w, h).with_background(background);
    plan.push(Shape::Text {
        x: f64::from(w) / 2.0,
        y: f64::from(h) / 2.0,
        content: label,
        font_size,
        fill: foreground,
        anchor: TextAnchor::Middle,
        bold: false,
    });
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::plan::render_svg;

    #[test]
    fn test_default_label() {
        let plan = placeholder_plan(&PlaceholderOptions::new(300, 150)).unwrap();
        let svg = render_svg(&plan);
        assert!(svg.contains(">300×150</text>"));
        assert!(svg.contains(r##"fill="#cccccc""##));
        assert!(svg.contains(r#"x="150" y="75""#));
    }

    #[test]
    fn test_custom_label_and_colors() {
        let options = PlaceholderOptions {
            background: "#000".into(),
            foreground: "rgb(255, 255, 255)".into(),
            label: Some("Hero image".into()),
            ..PlaceholderOptions::new(640, 360)
        };
        let svg = render_svg(&placeholder_plan(&options).unwrap());
        assert!(svg.contains(">Hero image</text>"));
        assert!(svg.contains(r##"fill="#ffffff""##));
    }

    #[test]
    fn test_file_name() {
        assert_eq!(
            placeholder_file_name(&PlaceholderOptions::new(300, 150)),
            "placeholder-300x150.svg"
        );
    }

    #[test]
    fn test_rejects_bad_size() {
        assert!(placeholder_plan(&PlaceholderOptions::new(0, 10)).is_err());
        assert!(placeholder_plan(&PlaceholderOptions::new(10, MAX_SIDE + 1)).is_err());
    }

    #[test]
    fn test_rejects_bad_color() {
        let options = PlaceholderOptions {
            background: "nope".into(),
            ..PlaceholderOptions::new(10, 10)
        };
        assert!(placeholder_plan(&options).is_err());
    }
}
