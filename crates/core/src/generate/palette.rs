use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::convert::color::{parse_color, Hsl, Rgb};
use crate::error::{Result, ToolError};
use crate::random::RandomSource;

pub const MAX_COLORS: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Harmony {
    Complementary,
    Analogous,
    Triadic,
    Monochromatic,
}

impl FromStr for Harmony {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "complementary" => Ok(Harmony::Complementary),
            "analogous" => Ok(Harmony::Analogous),
            "triadic" => Ok(Harmony::Triadic),
            "monochromatic" => Ok(Harmony::Monochromatic),
            other => Err(ToolError::invalid(format!("Unknown harmony '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Swatch {
    pub hex: String,
    pub rgb: String,
    pub hsl: String,
}

impl From<Rgb> for Swatch {
    fn from(color: Rgb) -> Self {
        Swatch {
            hex: color.to_hex(),
            rgb: color.to_css(),
            hsl: color.to_hsl().to_css(),
        }
    }
}

/// `count` colors with evenly spread hues from a random starting point,
/// pleasant saturation and mid lightness.
pub fn random_palette(rng: &mut impl RandomSource, count: usize) -> Result<Vec<Swatch>> {
    if count == 0 || count > MAX_COLORS {
        return Err(ToolError::invalid(format!("Count must be between 1 and {MAX_COLORS}")));
    }
    let start = rng.between(0.0, 360.0);
    let step = 360.0 / count as f64;
    Ok((0..count)
        .map(|i| {
            let hue = start + step * i as f64 + rng.between(-step / 4.0, step / 4.0);
            let saturation = rng.between(55.0, 85.0);
            let lightness = rng.between(40.0, 65.0);
            Hsl::new(hue, saturation, lightness).to_rgb().into()
        })
        .collect())
}

/// Colors that harmonize with `base`. The base color is always first.
pub fn harmony_palette(base: &str, harmony: Harmony) -> Result<Vec<Swatch>> {
    let rgb = parse_color(base)?;
    let Hsl { h, s, l } = rgb.to_hsl();

    let colors: Vec<Rgb> = match harmony {
        Harmony::Complementary => vec![rgb, Hsl::new(h + 180.0, s, l).to_rgb()],
        Harmony::Analogous => vec![
            rgb,
            Hsl::new(h - 30.0, s, l).to_rgb(),
            Hsl::new(h + 30.0, s, l).to_rgb(),
        ],
        Harmony::Triadic => vec![
            rgb,
            Hsl::new(h + 120.0, s, l).to_rgb(),
            Hsl::new(h + 240.0, s, l).to_rgb(),
        ],
        Harmony::Monochromatic => {
            let mut shades = vec![rgb];
            shades.extend(
                [-30.0, -15.0, 15.0, 30.0]
                    .into_iter()
                    .map(|delta| Hsl::new(h, s, (l + delta).clamp(5.0, 95.0)).to_rgb()),
            );
            shades
        }
    };
    Ok(colors.into_iter().map(Swatch::from).collect())
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn test_random_palette_size_and_shape() {
        let mut rng = StdRng::seed_from_u64(9);
        let palette = random_palette(&mut rng, 5).unwrap();
        assert_eq!(palette.len(), 5);
        for swatch in &palette {
            assert_eq!(swatch.hex.len(), 7);
            assert!(swatch.hex.starts_with('#'));
        }
    }

    #[test]
    fn test_random_palette_bounds() {
        let mut rng = StdRng::seed_from_u64(9);
        assert!(random_palette(&mut rng, 0).is_err());
        assert!(random_palette(&mut rng, MAX_COLORS + 1).is_err());
    }

    #[test]
    fn test_complementary_of_red() {
        let palette = harmony_palette("#ff0000", Harmony::Complementary).unwrap();
        let hexes: Vec<&str> = palette.iter().map(|s| s.hex.as_str()).collect();
        assert_eq!(hexes, ["#ff0000", "#00ffff"]);
    }

    #[test]
    fn test_triadic_of_red() {
        let palette = harmony_palette("rgb(255, 0, 0)", Harmony::Triadic).unwrap();
        let hexes: Vec<&str> = palette.iter().map(|s| s.hex.as_str()).collect();
        assert_eq!(hexes, ["#ff0000", "#00ff00", "#0000ff"]);
    }

    #[test]
    fn test_monochromatic_keeps_hue() {
        let palette = harmony_palette("#3366cc", Harmony::Monochromatic).unwrap();
        assert_eq!(palette.len(), 5);
        for swatch in &palette {
            assert!(swatch.hsl.starts_with("hsl(220,"), "{}", swatch.hsl);
        }
    }

    #[test]
    fn test_harmony_from_str() {
        assert_eq!("Triadic".parse::<Harmony>().unwrap(), Harmony::Triadic);
        assert!("tetradic".parse::<Harmony>().is_err());
    }
}
