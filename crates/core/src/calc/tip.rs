use serde::{Deserialize, Serialize};

use super::money::Money;
use crate::error::{Result, ToolError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TipInput {
    pub bill: f64,
    pub tip_percent: f64,
    #[serde(default = "default_split")]
    pub split: u32,
}

fn default_split() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TipResult {
    pub tip_amount: Money,
    pub total: Money,
    pub per_person: Money,
}

pub fn calculate_tip(input: &TipInput) -> Result<TipResult> {
    if !input.bill.is_finite() || input.bill < 0.0 {
        return Err(ToolError::invalid("Bill must be a non-negative amount"));
    }
    if !input.tip_percent.is_finite() || input.tip_percent < 0.0 {
        return Err(ToolError::invalid("Tip percent must be non-negative"));
    }
    if input.split == 0 {
        return Err(ToolError::invalid("Split must be at least 1"));
    }

    let tip = input.bill * input.tip_percent / 100.0;
    let total = input.bill + tip;

    Ok(TipResult {
        tip_amount: Money::new(tip),
        total: Money::new(total),
        per_person: Money::new(total / f64::from(input.split)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tip(bill: f64, tip_percent: f64, split: u32) -> Result<TipResult> {
        calculate_tip(&TipInput {
            bill,
            tip_percent,
            split,
        })
    }

    #[test]
    fn test_reference_split() {
        let result = tip(100.0, 15.0, 4).unwrap();
        assert_eq!(result.tip_amount.to_string(), "15.00");
        assert_eq!(result.total.to_string(), "115.00");
        assert_eq!(result.per_person.to_string(), "28.75");
    }

    #[test]
    fn test_uneven_split_rounds_to_cents() {
        let result = tip(50.0, 18.0, 3).unwrap();
        assert_eq!(result.total.to_string(), "59.00");
        assert_eq!(result.per_person.to_string(), "19.67");
    }

    #[test]
    fn test_large_bill_keeps_whole_amount() {
        let result = tip(1e12, 0.0, 1).unwrap();
        assert_eq!(result.total.to_string(), "1000000000000.00");
        assert_eq!(result.per_person.to_string(), "1000000000000.00");
    }

    #[test]
    fn test_zero_split_rejected() {
        assert!(matches!(tip(10.0, 10.0, 0), Err(ToolError::Validation(_))));
    }

    #[test]
    fn test_negative_bill_rejected() {
        assert!(tip(-1.0, 10.0, 1).is_err());
    }

    #[test]
    fn test_split_defaults_to_one() {
        let input: TipInput = serde_json::from_str(r#"{"bill": 20, "tip_percent": 10}"#).unwrap();
        assert_eq!(input.split, 1);
    }
}
