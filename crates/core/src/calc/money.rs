use std::fmt;

use serde::{Deserialize, Serialize};

/// Round half away from zero to two decimals.
///
/// A cent value within a few ULPs of `.5` counts as a tie, so binary
/// representation error (`1.005 * 100 == 100.49999…`) does not round down.
/// Values far from a tie go through `f64::round` untouched, which keeps
/// large whole amounts exact.
pub fn round2(x: f64) -> f64 {
    if !x.is_finite() {
        return x;
    }
    let scaled = x * 100.0;
    let whole = scaled.trunc();
    let fraction = (scaled - whole).abs();
    let tolerance = scaled.abs() * f64::EPSILON * 4.0;
    let cents = if (fraction - 0.5).abs() <= tolerance {
        whole + scaled.signum()
    } else {
        scaled.round()
    };
    let rounded = cents / 100.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// A currency-like amount, always held rounded to cents.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(f64);

impl Money {
    pub const ZERO: Money = Money(0.0);

    pub fn new(amount: f64) -> Self {
        Money(round2(amount))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl From<f64> for Money {
    fn from(amount: f64) -> Self {
        Money::new(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2_half_up() {
        assert_eq!(round2(1.005), 1.01);
        assert_eq!(round2(2.675), 2.68);
        assert_eq!(round2(28.745), 28.75);
        assert_eq!(round2(10.0 / 3.0), 3.33);
    }

    #[test]
    fn test_round2_negative_is_away_from_zero() {
        assert_eq!(round2(-1.005), -1.01);
        assert_eq!(round2(-0.001), 0.0);
    }

    #[test]
    fn test_round2_large_amounts_stay_exact() {
        assert_eq!(round2(5e9), 5e9);
        assert_eq!(round2(1e12), 1e12);
        assert_eq!(round2(1e14), 1e14);
        assert_eq!(round2(1_000_000_000_000.125), 1_000_000_000_000.13);
        assert_eq!(Money::new(1e12).to_string(), "1000000000000.00");
    }

    #[test]
    fn test_display_two_decimals() {
        assert_eq!(Money::new(115.0).to_string(), "115.00");
        assert_eq!(Money::new(0.1 + 0.2).to_string(), "0.30");
        assert_eq!(Money::ZERO.to_string(), "0.00");
    }

    #[test]
    fn test_serializes_as_number() {
        assert_eq!(serde_json::to_string(&Money::new(28.75)).unwrap(), "28.75");
    }
}
