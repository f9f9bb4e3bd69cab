//! Draw plans and their SVG rendering
//!
//! A [`DrawPlan`] is a canvas size, a background and an ordered list of
//! [`Shape`]s painted back to front. Rendering is a pure function, so the same
//! plan always yields byte-identical SVG.

use std::fmt::Write as _;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    fn as_str(self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum Shape {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        /// Corner radius.
        rx: f64,
        fill: String,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
        fill: String,
    },
    Text {
        x: f64,
        y: f64,
        content: String,
        font_size: f64,
        fill: String,
        anchor: TextAnchor,
        bold: bool,
    },
    Path {
        d: String,
        fill: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawPlan {
    pub width: u32,
    pub height: u32,
    /// `None` leaves the canvas transparent.
    pub background: Option<String>,
    pub shapes: Vec<Shape>,
}

impl DrawPlan {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            background: None,
            shapes: Vec::new(),
        }
    }

    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.background = Some(color.into());
        self
    }

    pub fn push(&mut self, shape: Shape) -> &mut Self {
        self.shapes.push(shape);
        self
    }
}

/// Trims a float to at most two decimals without trailing zeros.
pub fn num(value: f64) -> String {
    let text = format!("{:.2}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

fn attr(value: &str) -> String {
    html_escape::encode_double_quoted_attribute(value).into_owned()
}

pub fn render_svg(plan: &DrawPlan) -> String {
    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = plan.width,
        h = plan.height
    );
    svg.push('\n');

    if let Some(background) = &plan.background {
        let _ = writeln!(
            svg,
            r#"  <rect width="100%" height="100%" fill="{}"/>"#,
            attr(background)
        );
    }

    for shape in &plan.shapes {
        match shape {
            Shape::Rect {
                x,
                y,
                width,
                height,
                rx,
                fill,
            } => {
                let corner = if *rx > 0.0 {
                    format!(r#" rx="{}""#, num(*rx))
                } else {
                    String::new()
                };
                let _ = writeln!(
                    svg,
                    r#"  <rect x="{}" y="{}" width="{}" height="{}"{corner} fill="{}"/>"#,
                    num(*x),
                    num(*y),
                    num(*width),
                    num(*height),
                    attr(fill)
                );
            }
            Shape::Circle { cx, cy, r, fill } => {
                let _ = writeln!(
                    svg,
                    r#"  <circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
                    num(*cx),
                    num(*cy),
                    num(*r),
                    attr(fill)
                );
            }
            Shape::Text {
                x,
                y,
                content,
                font_size,
                fill,
                anchor,
                bold,
            } => {
                let weight = if *bold { r#" font-weight="bold""# } else { "" };
                let _ = writeln!(
                    svg,
                    r#"  <text x="{}" y="{}" font-family="sans-serif" font-size="{}"{weight} fill="{}" text-anchor="{}" dominant-baseline="central">{}</text>"#,
                    num(*x),
                    num(*y),
                    num(*font_size),
                    attr(fill),
                    anchor.as_str(),
                    html_escape::encode_text(content)
                );
            }
            Shape::Path { d, fill } => {
                let _ = writeln!(svg, r#"  <path d="{}" fill="{}"/>"#, attr(d), attr(fill));
            }
        }
    }

    svg.push_str("</svg>\n");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_plan() {
        let svg = render_svg(&DrawPlan::new(10, 20));
        assert_eq!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"10\" height=\"20\" viewBox=\"0 0 10 20\">\n</svg>\n"
        );
    }

    #[test]
    fn test_shapes_in_order() {
        let mut plan = DrawPlan::new(100, 100).with_background("#eee");
        plan.push(Shape::Circle {
            cx: 50.0,
            cy: 50.0,
            r: 25.5,
            fill: "red".into(),
        })
        .push(Shape::Text {
            x: 50.0,
            y: 50.0,
            content: "a<b".into(),
            font_size: 12.0,
            fill: "#000".into(),
            anchor: TextAnchor::Middle,
            bold: true,
        });

        let svg = render_svg(&plan);
        let bg = svg.find("<rect width=\"100%\"").unwrap();
        let circle = svg.find("<circle cx=\"50\" cy=\"50\" r=\"25.5\"").unwrap();
        let text = svg.find(">a&lt;b</text>").unwrap();
        assert!(bg < circle && circle < text);
        assert!(svg.contains("font-weight=\"bold\""));
    }

    #[test]
    fn test_attribute_escaping() {
        let mut plan = DrawPlan::new(1, 1);
        plan.push(Shape::Path {
            d: "M0 0".into(),
            fill: "\"><script>".into(),
        });
        assert!(!render_svg(&plan).contains("<script>"));
    }

    #[test]
    fn test_num() {
        assert_eq!(num(3.0), "3");
        assert_eq!(num(2.456), "2.46");
        assert_eq!(num(-0.001), "0");
    }
}
