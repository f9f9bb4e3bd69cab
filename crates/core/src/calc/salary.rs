use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::money::Money;
use crate::error::{Result, ToolError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayPeriod {
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl FromStr for PayPeriod {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hourly" | "hour" => Ok(PayPeriod::Hourly),
            "daily" | "day" => Ok(PayPeriod::Daily),
            "weekly" | "week" => Ok(PayPeriod::Weekly),
            "monthly" | "month" => Ok(PayPeriod::Monthly),
            "yearly" | "year" | "annual" | "annually" => Ok(PayPeriod::Yearly),
            other => Err(ToolError::invalid(format!("Unknown pay period '{other}'"))),
        }
    }
}

/// Working-time assumptions used to move between periods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkSchedule {
    pub hours_per_week: f64,
    pub days_per_week: f64,
    pub weeks_per_year: f64,
}

impl Default for WorkSchedule {
    fn default() -> Self {
        Self {
            hours_per_week: 40.0,
            days_per_week: 5.0,
            weeks_per_year: 52.0,
        }
    }
}

impl WorkSchedule {
    fn validate(&self) -> Result<()> {
        let checks = [
            (self.hours_per_week, 168.0, "Hours per week"),
            (self.days_per_week, 7.0, "Days per week"),
            (self.weeks_per_year, 53.0, "Weeks per year"),
        ];
        for (value, max, name) in checks {
            if !value.is_finite() || value <= 0.0 || value > max {
                return Err(ToolError::invalid(format!("{name} must be in (0, {max}]")));
            }
        }
        Ok(())
    }

    /// How many of `period` fit in a year.
    fn per_year(&self, period: PayPeriod) -> f64 {
        match period {
            PayPeriod::Hourly => self.hours_per_week * self.weeks_per_year,
            PayPeriod::Daily => self.days_per_week * self.weeks_per_year,
            PayPeriod::Weekly => self.weeks_per_year,
            PayPeriod::Monthly => 12.0,
            PayPeriod::Yearly => 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalaryBreakdown {
    pub hourly: Money,
    pub daily: Money,
    pub weekly: Money,
    pub monthly: Money,
    pub yearly: Money,
}

/// Express `amount` paid per `period` in every period.
pub fn convert_salary(
    amount: f64,
    period: PayPeriod,
    schedule: &WorkSchedule,
) -> Result<SalaryBreakdown> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(ToolError::invalid("Amount must be non-negative"));
    }
    schedule.validate()?;

    let yearly = amount * schedule.per_year(period);
    let per = |p: PayPeriod| Money::new(yearly / schedule.per_year(p));

    Ok(SalaryBreakdown {
        hourly: per(PayPeriod::Hourly),
        daily: per(PayPeriod::Daily),
        weekly: per(PayPeriod::Weekly),
        monthly: per(PayPeriod::Monthly),
        yearly: Money::new(yearly),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yearly_to_everything() {
        let out = convert_salary(52_000.0, PayPeriod::Yearly, &WorkSchedule::default()).unwrap();
        assert_eq!(out.hourly.to_string(), "25.00");
        assert_eq!(out.daily.to_string(), "200.00");
        assert_eq!(out.weekly.to_string(), "1000.00");
        assert_eq!(out.monthly.to_string(), "4333.33");
    }

    #[test]
    fn test_hourly_with_custom_schedule() {
        let schedule = WorkSchedule {
            hours_per_week: 30.0,
            days_per_week: 4.0,
            weeks_per_year: 48.0,
        };
        let out = convert_salary(20.0, PayPeriod::Hourly, &schedule).unwrap();
        assert_eq!(out.yearly.to_string(), "28800.00");
        assert_eq!(out.daily.to_string(), "150.00");
    }

    #[test]
    fn test_period_from_str() {
        assert_eq!("Annual".parse::<PayPeriod>().unwrap(), PayPeriod::Yearly);
        assert!("fortnightly".parse::<PayPeriod>().is_err());
    }

    #[test]
    fn test_bad_schedule() {
        let schedule = WorkSchedule {
            hours_per_week: 0.0,
            ..WorkSchedule::default()
        };
        assert!(convert_salary(1.0, PayPeriod::Hourly, &schedule).is_err());
    }
}
