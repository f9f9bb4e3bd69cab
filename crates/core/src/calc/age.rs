use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;

use crate::error::{Result, ToolError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Age {
    pub years: u32,
    pub months: u32,
    pub days: u32,
    pub total_days: i64,
    /// Days until the next birthday; zero on the birthday itself.
    pub days_to_birthday: i64,
}

pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| ToolError::parse(format!("Expected a YYYY-MM-DD date, got '{}'", input.trim())))
}

/// Calendar age from `birth` to `today`.
pub fn calculate_age(birth: NaiveDate, today: NaiveDate) -> Result<Age> {
    if birth > today {
        return Err(ToolError::invalid("Birth date is in the future"));
    }

    let span = (today.year() - birth.year()) * 12 + today.month() as i32 - birth.month() as i32;
    let mut months_total = span.max(0) as u32;

    // `checked_add_months` clamps to the month's last day, so a 29 February
    // birth reaches its anniversary on 28 February in common years.
    let add = |months: u32| {
        birth
            .checked_add_months(Months::new(months))
            .ok_or_else(|| ToolError::invalid("Date out of range"))
    };
    let mut anchor = add(months_total)?;
    if anchor > today {
        months_total -= 1;
        anchor = add(months_total)?;
    }
    let days = (today - anchor).num_days().max(0) as u32;

    Ok(Age {
        years: months_total / 12,
        months: months_total % 12,
        days,
        total_days: (today - birth).num_days(),
        days_to_birthday: days_to_birthday(birth, today)?,
    })
}

fn days_to_birthday(birth: NaiveDate, today: NaiveDate) -> Result<i64> {
    let years_elapsed = (today.year() - birth.year()).max(0) as u32;
    let mut next = birth
        .checked_add_months(Months::new(years_elapsed * 12))
        .ok_or_else(|| ToolError::invalid("Date out of range"))?;
    if next < today {
        next = birth
            .checked_add_months(Months::new((years_elapsed + 1) * 12))
            .ok_or_else(|| ToolError::invalid("Date out of range"))?;
    }
    Ok((next - today).num_days())
}
