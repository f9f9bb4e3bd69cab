use serde::{Deserialize, Serialize};

use crate::convert::color::{parse_color, Hsl};
use crate::error::{Result, ToolError};
use crate::random::RandomSource;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GradientKind {
    Linear { angle: u16 },
    Radial,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub color: String,
    /// Percent along the gradient line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<f64>,
}

impl ColorStop {
    /// Parse `color` or `color position%`.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        let (color, position) = match raw.rsplit_once(' ') {
            Some((color, pos)) if pos.ends_with('%') && !color.trim().ends_with(',') => {
                let value: f64 = pos
                    .trim_end_matches('%')
                    .parse()
                    .map_err(|_| ToolError::parse(format!("Invalid stop position '{pos}'")))?;
                (color.trim(), Some(value))
            }
            _ => (raw, None),
        };
        Ok(ColorStop {
            color: color.to_string(),
            position,
        })
    }
}

/// CSS `linear-gradient(...)` or `radial-gradient(...)` over `stops`.
///
/// Every stop color is validated and normalized to hex.
pub fn css_gradient(kind: &GradientKind, stops: &[ColorStop]) -> Result<String> {
    if stops.len() < 2 {
        return Err(ToolError::invalid("A gradient needs at least two color stops"));
    }

    let mut parts = Vec::with_capacity(stops.len() + 1);
    match kind {
        GradientKind::Linear { angle } => {
            if *angle > 360 {
                return Err(ToolError::invalid("Angle must be between 0 and 360"));
            }
            parts.push(format!("{angle}deg"));
        }
        GradientKind::Radial => parts.push("circle".to_string()),
    }

    for stop in stops {
        let hex = parse_color(&stop.color)?.to_hex();
        parts.push(match stop.position {
            Some(p) if !(0.0..=100.0).contains(&p) => {
                return Err(ToolError::invalid(format!("Stop position {p}% is outside 0-100%")))
            }
            Some(p) => format!("{hex} {p}%"),
            None => hex,
        });
    }

    let function = match kind {
        GradientKind::Linear { .. } => "linear-gradient",
        GradientKind::Radial => "radial-gradient",
    };
    Ok(format!("{function}({})", parts.join(", ")))
}

/// Two vivid colors roughly a third of the wheel apart at a random angle.
pub fn random_gradient(rng: &mut impl RandomSource) -> Result<String> {
    let hue = rng.between(0.0, 360.0);
    let offset = rng.between(60.0, 180.0);
    let angle = (rng.below(8) * 45) as u16;
    let stops = [hue, hue + offset].map(|h| ColorStop {
        color: Hsl::new(h, rng.between(65.0, 90.0), rng.between(45.0, 60.0))
            .to_rgb()
            .to_hex(),
        position: None,
    });
    css_gradient(&GradientKind::Linear { angle }, &stops)
}
