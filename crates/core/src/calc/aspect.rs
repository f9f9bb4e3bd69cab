use serde::Serialize;

use crate::error::{Result, ToolError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AspectRatio {
    pub width: u64,
    pub height: u64,
}

impl AspectRatio {
    pub fn as_f64(self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

impl std::fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.width, self.height)
    }
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Reduce `width:height` by their greatest common divisor.
pub fn reduce(width: u64, height: u64) -> Result<AspectRatio> {
    if width == 0 || height == 0 {
        return Err(ToolError::invalid("Width and height must be positive"));
    }
    let divisor = gcd(width, height);
    Ok(AspectRatio {
        width: width / divisor,
        height: height / divisor,
    })
}

/// Parse `16:9`, `16x9` or `16/9`.
pub fn parse_ratio(input: &str) -> Result<AspectRatio> {
    let (w, h) = input
        .trim()
        .split_once([':', 'x', 'X', '/'])
        .ok_or_else(|| ToolError::parse(format!("Expected a ratio like 16:9, got '{}'", input.trim())))?;
    let parse = |s: &str| {
        s.trim()
            .parse::<u64>()
            .map_err(|_| ToolError::parse(format!("'{}' is not a whole number", s.trim())))
    };
    reduce(parse(w)?, parse(h)?)
}

/// The dimension a ratio implies for a known one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Known {
    Width(u64),
    Height(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dimensions {
    pub width: u64,
    pub height: u64,
}

/// Fill in the missing dimension, rounded to the nearest integer.
pub fn resize(ratio: AspectRatio, known: Known) -> Result<Dimensions> {
    if ratio.width == 0 || ratio.height == 0 {
        return Err(ToolError::invalid("Ratio terms must be positive"));
    }
    let dims = match known {
        Known::Width(width) => Dimensions {
            width,
            height: (width as f64 * ratio.height as f64 / ratio.width as f64).round() as u64,
        },
        Known::Height(height) => Dimensions {
            width: (height as f64 * ratio.width as f64 / ratio.height as f64).round() as u64,
            height,
        },
    };
    Ok(dims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduce() {
        assert_eq!(reduce(1920, 1080).unwrap().to_string(), "16:9");
        assert_eq!(reduce(1024, 768).unwrap().to_string(), "4:3");
        assert_eq!(reduce(7, 3).unwrap().to_string(), "7:3");
    }

    #[test]
    fn test_reduce_rejects_zero() {
        assert!(reduce(0, 10).is_err());
    }

    #[test]
    fn test_parse_ratio() {
        assert_eq!(parse_ratio("21 : 9").unwrap(), AspectRatio { width: 7, height: 3 });
        assert_eq!(parse_ratio("3840x2160").unwrap().to_string(), "16:9");
        assert!(parse_ratio("wide").is_err());
    }

    #[test]
    fn test_resize() {
        let ratio = parse_ratio("16:9").unwrap();
        assert_eq!(
            resize(ratio, Known::Width(1280)).unwrap(),
            Dimensions { width: 1280, height: 720 }
        );
        assert_eq!(resize(ratio, Known::Height(100)).unwrap().width, 178);
    }
}
