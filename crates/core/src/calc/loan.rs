use serde::{Deserialize, Serialize};

use super::money::Money;
use crate::error::{Result, ToolError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanInput {
    pub principal: f64,
    /// Nominal annual rate in percent.
    pub annual_rate: f64,
    pub months: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoanResult {
    pub monthly_payment: Money,
    pub total_paid: Money,
    pub total_interest: Money,
}

/// Fixed-payment amortization. A zero rate divides the principal evenly.
pub fn calculate_loan(input: &LoanInput) -> Result<LoanResult> {
    if !input.principal.is_finite() || input.principal <= 0.0 {
        return Err(ToolError::invalid("Principal must be positive"));
    }
    if !input.annual_rate.is_finite() || input.annual_rate < 0.0 {
        return Err(ToolError::invalid("Rate must be non-negative"));
    }
    if input.months == 0 {
        return Err(ToolError::invalid("Term must be at least one month"));
    }

    let n = f64::from(input.months);
    let r = input.annual_rate / 100.0 / 12.0;
    let payment = if r == 0.0 {
        input.principal / n
    } else {
        input.principal * r / (1.0 - (1.0 + r).powf(-n))
    };
    let total = payment * n;

    Ok(LoanResult {
        monthly_payment: Money::new(payment),
        total_paid: Money::new(total),
        total_interest: Money::new(total - input.principal),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_mortgage() {
        let result = calculate_loan(&LoanInput {
            principal: 200_000.0,
            annual_rate: 6.0,
            months: 360,
        })
        .unwrap();
        assert_eq!(result.monthly_payment.to_string(), "1199.10");
        assert_eq!(result.total_interest.to_string(), "231676.38");
    }

    #[test]
    fn test_zero_rate_divides_evenly() {
        let result = calculate_loan(&LoanInput {
            principal: 1200.0,
            annual_rate: 0.0,
            months: 12,
        })
        .unwrap();
        assert_eq!(result.monthly_payment.to_string(), "100.00");
        assert_eq!(result.total_interest.to_string(), "0.00");
    }

    #[test]
    fn test_zero_months_rejected() {
        let err = calculate_loan(&LoanInput {
            principal: 1.0,
            annual_rate: 1.0,
            months: 0,
        })
        .unwrap_err();
        assert!(matches!(err, ToolError::Validation(_)));
    }
}
