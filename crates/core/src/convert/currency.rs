//! Currency conversion against a caller-supplied rate table.
//!
//! Rates are plain input data keyed by ISO code, each expressed as units of
//! that currency per one unit of the table's base currency.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::calc::money::Money;
use crate::error::{Result, ToolError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    pub base: String,
    pub rates: BTreeMap<String, f64>,
}

impl RateTable {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: normalize_code(&base.into()),
            rates: BTreeMap::new(),
        }
    }

    pub fn with_rate(mut self, code: &str, rate: f64) -> Self {
        self.rates.insert(normalize_code(code), rate);
        self
    }

    /// Units of `code` per one unit of the base currency.
    pub fn rate(&self, code: &str) -> Result<f64> {
        let code = normalize_code(code);
        if code == self.base {
            return Ok(1.0);
        }
        let rate = *self
            .rates
            .get(&code)
            .ok_or_else(|| ToolError::invalid(format!("No rate for currency '{code}'")))?;
        if !rate.is_finite() || rate <= 0.0 {
            return Err(ToolError::invalid(format!("Rate for '{code}' must be positive")));
        }
        Ok(rate)
    }

    pub fn codes(&self) -> Vec<String> {
        let mut codes: Vec<String> = self.rates.keys().cloned().collect();
        if !self.rates.contains_key(&self.base) {
            codes.push(self.base.clone());
            codes.sort();
        }
        codes
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrencyConversion {
    pub amount: f64,
    pub from: String,
    pub to: String,
    /// Units of `to` per one unit of `from`.
    pub rate: f64,
    pub result: Money,
}

pub fn convert_currency(
    table: &RateTable,
    amount: f64,
    from: &str,
    to: &str,
) -> Result<CurrencyConversion> {
    if !amount.is_finite() {
        return Err(ToolError::invalid("Amount must be a finite number"));
    }
    let from_rate = table.rate(from)?;
    let to_rate = table.rate(to)?;
    let rate = to_rate / from_rate;

    Ok(CurrencyConversion {
        amount,
        from: normalize_code(from),
        to: normalize_code(to),
        rate,
        result: Money::new(amount * rate),
    })
}

/// Parse `CODE=rate` pairs separated by commas or newlines.
pub fn parse_rates(base: &str, raw: &str) -> Result<RateTable> {
    let mut table = RateTable::new(base);
    for pair in raw.split([',', '\n']).map(str::trim).filter(|p| !p.is_empty()) {
        let (code, rate) = pair
            .split_once('=')
            .ok_or_else(|| ToolError::parse(format!("Expected CODE=rate, got '{pair}'")))?;
        let rate: f64 = rate
            .trim()
            .parse()
            .map_err(|_| ToolError::parse(format!("Invalid rate '{}'", rate.trim())))?;
        table = table.with_rate(code, rate);
    }
    Ok(table)
}

fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RateTable {
        RateTable::new("usd").with_rate("EUR", 0.9).with_rate("jpy", 150.0)
    }

    #[test]
    fn test_convert_from_base() {
        let out = convert_currency(&table(), 10.0, "USD", "EUR").unwrap();
        assert_eq!(out.result.to_string(), "9.00");
        assert_eq!(out.to, "EUR");
    }

    #[test]
    fn test_convert_cross_rate() {
        let out = convert_currency(&table(), 9.0, "eur", "jpy").unwrap();
        assert_eq!(out.result.to_string(), "1500.00");
    }

    #[test]
    fn test_result_is_rounded() {
        let table = RateTable::new("USD").with_rate("GBP", 0.7913);
        let out = convert_currency(&table, 3.0, "USD", "GBP").unwrap();
        assert_eq!(out.result.to_string(), "2.37");
    }

    #[test]
    fn test_missing_rate() {
        let err = convert_currency(&table(), 1.0, "USD", "CHF").unwrap_err();
        assert!(err.to_string().contains("CHF"));
    }

    #[test]
    fn test_parse_rates() {
        let table = parse_rates("USD", "EUR=0.9, GBP = 0.8\nJPY=150").unwrap();
        assert_eq!(table.codes(), ["EUR", "GBP", "JPY", "USD"]);
        assert!(parse_rates("USD", "EUR:0.9").is_err());
    }

    #[test]
    fn test_non_positive_rate_rejected() {
        let table = RateTable::new("USD").with_rate("XXX", 0.0);
        assert!(convert_currency(&table, 1.0, "USD", "XXX").is_err());
    }
}
