use serde::{Deserialize, Serialize};

use crate::error::{Result, ToolError};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "system", rename_all = "lowercase")]
pub enum BodyMeasure {
    Metric { weight_kg: f64, height_cm: f64 },
    Imperial { weight_lb: f64, height_in: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// WHO adult cut-offs.
    pub fn from_bmi(bmi: f64) -> Self {
        match bmi {
            b if b < 18.5 => BmiCategory::Underweight,
            b if b < 25.0 => BmiCategory::Normal,
            b if b < 30.0 => BmiCategory::Overweight,
            _ => BmiCategory::Obese,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BmiResult {
    /// One decimal place.
    pub bmi: f64,
    pub category: BmiCategory,
}

pub fn calculate_bmi(measure: BodyMeasure) -> Result<BmiResult> {
    let (kg, metres) = match measure {
        BodyMeasure::Metric {
            weight_kg,
            height_cm,
        } => (weight_kg, height_cm / 100.0),
        BodyMeasure::Imperial {
            weight_lb,
            height_in,
        } => (weight_lb * 0.453_592_37, height_in * 0.0254),
    };
    if !(kg.is_finite() && kg > 0.0) || !(metres.is_finite() && metres > 0.0) {
        return Err(ToolError::invalid("Weight and height must be positive"));
    }

    let bmi = kg / (metres * metres);
    Ok(BmiResult {
        bmi: (bmi * 10.0).round() / 10.0,
        category: BmiCategory::from_bmi(bmi),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric() {
        let out = calculate_bmi(BodyMeasure::Metric {
            weight_kg: 70.0,
            height_cm: 175.0,
        })
        .unwrap();
        assert_eq!(out.bmi, 22.9);
        assert_eq!(out.category, BmiCategory::Normal);
    }

    #[test]
    fn test_imperial() {
        let out = calculate_bmi(BodyMeasure::Imperial {
            weight_lb: 200.0,
            height_in: 68.0,
        })
        .unwrap();
        assert_eq!(out.bmi, 30.4);
        assert_eq!(out.category.label(), "Obese");
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(BmiCategory::from_bmi(18.4), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_bmi(25.0), BmiCategory::Overweight);
    }

    #[test]
    fn test_zero_height() {
        assert!(calculate_bmi(BodyMeasure::Metric {
            weight_kg: 70.0,
            height_cm: 0.0
        })
        .is_err());
    }
}
