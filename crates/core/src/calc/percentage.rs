use crate::error::{Result, ToolError};

use super::money::round2;

/// `percent`% of `value`.
pub fn percent_of(percent: f64, value: f64) -> f64 {
    round2(value * percent / 100.0)
}

/// What percent `part` is of `whole`.
pub fn what_percent(part: f64, whole: f64) -> Result<f64> {
    if whole == 0.0 {
        return Err(ToolError::invalid("Cannot take a percentage of zero"));
    }
    Ok(round2(part / whole * 100.0))
}

/// Percent change going from `from` to `to`. Negative for a decrease.
pub fn percent_change(from: f64, to: f64) -> Result<f64> {
    if from == 0.0 {
        return Err(ToolError::invalid("Percent change from zero is undefined"));
    }
    Ok(round2((to - from) / from.abs() * 100.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_of() {
        assert_eq!(percent_of(15.0, 200.0), 30.0);
        assert_eq!(percent_of(12.5, 80.0), 10.0);
    }

    #[test]
    fn test_what_percent() {
        assert_eq!(what_percent(1.0, 3.0).unwrap(), 33.33);
        assert!(what_percent(1.0, 0.0).is_err());
    }

    #[test]
    fn test_percent_change() {
        assert_eq!(percent_change(50.0, 75.0).unwrap(), 50.0);
        assert_eq!(percent_change(80.0, 60.0).unwrap(), -25.0);
        assert_eq!(percent_change(-10.0, -5.0).unwrap(), 50.0);
        assert!(percent_change(0.0, 5.0).is_err());
    }
}
