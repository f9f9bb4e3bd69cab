//! Five-field cron expressions
//!
//! `minute hour day-of-month month day-of-week`, each field accepting `*`,
//! single values, `a-b` ranges, `/n` steps and comma lists. Months and weekdays
//! also accept three-letter names, and weekday `7` is Sunday. The `@hourly`
//! style macros expand to their five-field form.
//!
//! When both day fields are restricted a day matches if *either* does, as in
//! Vixie cron.

use std::collections::BTreeSet;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::error::{require_input, Result, ToolError};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// How far ahead [`CronSchedule::next_runs`] looks before giving up.
const SEARCH_DAYS: i64 = 366 * 5;

#[derive(Debug, Clone, Copy)]
struct FieldSpec {
    name: &'static str,
    unit: &'static str,
    min: u32,
    max: u32,
    names: &'static [&'static str],
}

const FIELDS: [FieldSpec; 5] = [
    FieldSpec {
        name: "minute",
        unit: "minute",
        min: 0,
        max: 59,
        names: &[],
    },
    FieldSpec {
        name: "hour",
        unit: "hour",
        min: 0,
        max: 23,
        names: &[],
    },
    FieldSpec {
        name: "day-of-month",
        unit: "day",
        min: 1,
        max: 31,
        names: &[],
    },
    FieldSpec {
        name: "month",
        unit: "month",
        min: 1,
        max: 12,
        names: &MONTH_NAMES,
    },
    FieldSpec {
        name: "day-of-week",
        unit: "day",
        // 7 is accepted and folded onto 0
        min: 0,
        max: 7,
        names: &DAY_NAMES,
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CronField {
    pub name: &'static str,
    pub expression: String,
    pub values: Vec<u32>,
    #[serde(skip)]
    wildcard: bool,
}

impl CronField {
    pub fn is_wildcard(&self) -> bool {
        self.wildcard
    }

    fn matches(&self, value: u32) -> bool {
        self.values.binary_search(&value).is_ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CronSchedule {
    pub expression: String,
    pub minute: CronField,
    pub hour: CronField,
    pub day_of_month: CronField,
    pub month: CronField,
    pub day_of_week: CronField,
    pub description: String,
}

pub fn parse_cron(input: &str) -> Result<CronSchedule> {
    let input = require_input(input)?.trim();
    let expanded = expand_macro(input)?;

    let parts: Vec<&str> = expanded.split_whitespace().collect();
    if parts.len() != 5 {
        return Err(ToolError::invalid(format!(
            "Expected 5 fields (minute hour day-of-month month day-of-week), found {}",
            parts.len()
        )));
    }

    let fields: Vec<CronField> = parts
        .iter()
        .zip(FIELDS.iter())
        .map(|(raw, spec)| parse_field(raw, spec))
        .collect::<Result<_>>()?;
    let [minute, hour, day_of_month, month, day_of_week]: [CronField; 5] = fields
        .try_into()
        .map_err(|_| ToolError::invalid("Expected 5 cron fields"))?;

    let mut schedule = CronSchedule {
        expression: input.to_string(),
        minute,
        hour,
        day_of_month,
        month,
        day_of_week,
        description: String::new(),
    };
    schedule.description = describe(&schedule);
    Ok(schedule)
}

fn expand_macro(input: &str) -> Result<String> {
    if !input.starts_with('@') {
        return Ok(input.to_string());
    }
    let expanded = match input.to_ascii_lowercase().as_str() {
        "@yearly" | "@annually" => "0 0 1 1 *",
        "@monthly" => "0 0 1 * *",
        "@weekly" => "0 0 * * 0",
        "@daily" | "@midnight" => "0 0 * * *",
        "@hourly" => "0 * * * *",
        _ => return Err(ToolError::invalid(format!("Unknown cron macro '{input}'"))),
    };
    Ok(expanded.to_string())
}

fn field_error(spec: &FieldSpec, raw: &str, reason: impl std::fmt::Display) -> ToolError {
    ToolError::invalid(format!("Invalid {} field '{raw}': {reason}", spec.name))
}

fn parse_value(token: &str, spec: &FieldSpec, raw: &str) -> Result<u32> {
    let value = match token.parse::<u32>() {
        Ok(n) => n,
        Err(_) => {
            let lower = token.to_ascii_lowercase();
            let index = spec
                .names
                .iter()
                .position(|name| lower.len() >= 3 && name.to_ascii_lowercase().starts_with(&lower))
                .ok_or_else(|| field_error(spec, raw, format!("'{token}' is not a number")))?;
            // Month names are 1-based, weekday names 0-based
            index as u32 + spec.min
        }
    };
    if value < spec.min || value > spec.max {
        return Err(field_error(
            spec,
            raw,
            format!("{value} is outside {}-{}", spec.min, spec.max),
        ));
    }
    Ok(value)
}

fn parse_field(raw: &str, spec: &FieldSpec) -> Result<CronField> {
    let mut values = BTreeSet::new();

    for item in raw.split(',') {
        if item.is_empty() {
            return Err(field_error(spec, raw, "empty list item"));
        }
        let (range, step) = match item.split_once('/') {
            Some((range, step)) => {
                let step: u32 = step
                    .parse()
                    .map_err(|_| field_error(spec, raw, format!("step '{step}' is not a number")))?;
                if step == 0 {
                    return Err(field_error(spec, raw, "step must be at least 1"));
                }
                (range, Some(step))
            }
            None => (item, None),
        };

        let (start, end) = if range == "*" {
            (spec.min, if spec.max == 7 { 6 } else { spec.max })
        } else if let Some((a, b)) = range.split_once('-') {
            let (a, b) = (parse_value(a, spec, raw)?, parse_value(b, spec, raw)?);
            if a > b {
                return Err(field_error(spec, raw, format!("range {a}-{b} is reversed")));
            }
            (a, b)
        } else {
            let start = parse_value(range, spec, raw)?;
            // `a/n` runs from a to the field maximum
            (start, if step.is_some() { spec.max } else { start })
        };

        let step = step.unwrap_or(1) as usize;
        for value in (start..=end).step_by(step) {
            values.insert(if spec.max == 7 && value == 7 { 0 } else { value });
        }
    }

    Ok(CronField {
        name: spec.name,
        expression: raw.to_string(),
        values: values.into_iter().collect(),
        wildcard: raw == "*",
    })
}

impl CronSchedule {
    fn day_matches(&self, date: NaiveDate) -> bool {
        let dom = self.day_of_month.matches(date.day());
        let dow = self
            .day_of_week
            .matches(date.weekday().num_days_from_sunday());
        match (self.day_of_month.wildcard, self.day_of_week.wildcard) {
            (true, true) => true,
            (true, false) => dow,
            (false, true) => dom,
            (false, false) => dom || dow,
        }
    }

    /// The next `count` run times strictly after `after`.
    pub fn next_runs(&self, after: NaiveDateTime, count: usize) -> Vec<NaiveDateTime> {
        let mut runs = Vec::with_capacity(count);
        let start_day = after.date();

        for offset in 0..SEARCH_DAYS {
            if runs.len() >= count {
                break;
            }
            let Some(date) = start_day.checked_add_signed(Duration::days(offset)) else {
                break;
            };
            if !self.month.matches(date.month()) || !self.day_matches(date) {
                continue;
            }
            for &hour in &self.hour.values {
                for &minute in &self.minute.values {
                    let Some(at) = date.and_hms_opt(hour, minute, 0) else {
                        continue;
                    };
                    if at > after && runs.len() < count {
                        runs.push(at);
                    }
                }
            }
        }
        runs
    }
}

fn join_words(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [one] => one.clone(),
        [init @ .., last] => format!("{} and {last}", init.join(", ")),
    }
}

fn label(spec: &FieldSpec, value: u32) -> String {
    let value = if spec.max == 7 && value == 7 { 0 } else { value };
    spec.names
        .get((value - spec.min) as usize)
        .map(|name| name.to_string())
        .unwrap_or_else(|| value.to_string())
}

fn describe_items(field: &CronField, spec: &FieldSpec) -> String {
    let items: Vec<String> = field
        .expression
        .split(',')
        .map(|item| {
            let (range, step) = match item.split_once('/') {
                Some((range, step)) => (range, Some(step)),
                None => (item, None),
            };
            let range_text = if range == "*" {
                None
            } else if let Some((a, b)) = range.split_once('-') {
                let a = parse_value(a, spec, item).map(|v| label(spec, v)).unwrap_or_default();
                let b = parse_value(b, spec, item).map(|v| label(spec, v)).unwrap_or_default();
                Some(format!("{a} through {b}"))
            } else {
                Some(parse_value(range, spec, item).map(|v| label(spec, v)).unwrap_or_default())
            };
            match (range_text, step) {
                (None, Some(step)) => format!("every {step} {}s", spec.unit),
                (None, None) => format!("every {}", spec.unit),
                (Some(range), Some(step)) if range.contains("through") => {
                    format!("every {step} {}s from {range}", spec.unit)
                }
                (Some(start), Some(step)) => {
                    format!("every {step} {}s starting at {start}", spec.unit)
                }
                (Some(range), None) => range,
            }
        })
        .collect();
    join_words(&items)
}

fn is_step(field: &CronField) -> Option<&str> {
    field.expression.strip_prefix("*/")
}

fn single(field: &CronField) -> Option<u32> {
    match field.values.as_slice() {
        [v] if field.expression.parse::<u32>().is_ok() => Some(*v),
        _ => None,
    }
}

fn describe(schedule: &CronSchedule) -> String {
    let [minute_spec, hour_spec, dom_spec, month_spec, dow_spec] = FIELDS;
    let (minute, hour) = (&schedule.minute, &schedule.hour);

    let mut text = match (single(minute), single(hour)) {
        (Some(m), Some(h)) => format!("At {h:02}:{m:02}"),
        _ => {
            let minute_part = if minute.wildcard {
                "Every minute".to_string()
            } else if let Some(n) = is_step(minute) {
                format!("Every {n} minutes")
            } else {
                format!("At minute {}", describe_items(minute, &minute_spec))
            };
            let past = !minute.wildcard && is_step(minute).is_none();
            let hour_part = if hour.wildcard {
                if past {
                    " past every hour".to_string()
                } else {
                    String::new()
                }
            } else if let Some(n) = is_step(hour) {
                if past {
                    format!(" past every {n} hours")
                } else {
                    format!(", every {n} hours")
                }
            } else if past {
                format!(" past hour {}", describe_items(hour, &hour_spec))
            } else {
                format!(", during hour {}", describe_items(hour, &hour_spec))
            };
            minute_part + &hour_part
        }
    };

    if !schedule.day_of_month.wildcard {
        text.push_str(&format!(
            ", on day {} of the month",
            describe_items(&schedule.day_of_month, &dom_spec)
        ));
    }
    if !schedule.month.wildcard {
        text.push_str(&format!(", in {}", describe_items(&schedule.month, &month_spec)));
    }
    if !schedule.day_of_week.wildcard {
        let joiner = if schedule.day_of_month.wildcard {
            ", on"
        } else {
            " or on"
        };
        text.push_str(&format!(
            "{joiner} {}",
            describe_items(&schedule.day_of_week, &dow_spec)
        ));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn describe_expr(expr: &str) -> String {
        parse_cron(expr).unwrap().description
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(describe_expr("* * * * *"), "Every minute");
        assert_eq!(describe_expr("*/15 * * * *"), "Every 15 minutes");
        assert_eq!(describe_expr("0 9 * * 1-5"), "At 09:00, on Monday through Friday");
        assert_eq!(describe_expr("30 2 1 * *"), "At 02:30, on day 1 of the month");
        assert_eq!(describe_expr("0 */2 * * *"), "At minute 0 past every 2 hours");
        assert_eq!(describe_expr("5,10 * * * *"), "At minute 5 and 10 past every hour");
        assert_eq!(
            describe_expr("@yearly"),
            "At 00:00, on day 1 of the month, in January"
        );
        assert_eq!(
            describe_expr("0 12 * jan-mar sun"),
            "At 12:00, in January through March, on Sunday"
        );
    }

    #[test]
    fn test_values() {
        let schedule = parse_cron("0-10/5 1,2 */10 * 7").unwrap();
        assert_eq!(schedule.minute.values, [0, 5, 10]);
        assert_eq!(schedule.hour.values, [1, 2]);
        assert_eq!(schedule.day_of_month.values, [1, 11, 21, 31]);
        assert_eq!(schedule.day_of_week.values, [0]);
        assert_eq!(schedule.month.values.len(), 12);
    }

    #[test]
    fn test_invalid_field_is_named() {
        let err = parse_cron("60 * * * *").unwrap_err();
        assert!(err.to_string().contains("minute"), "{err}");

        let err = parse_cron("0 0 * 13 *").unwrap_err();
        assert!(err.to_string().contains("month"), "{err}");

        let err = parse_cron("0 0 * * 1-9").unwrap_err();
        assert!(err.to_string().contains("day-of-week"), "{err}");

        let err = parse_cron("*/0 * * * *").unwrap_err();
        assert!(err.to_string().contains("step"), "{err}");
    }

    #[test]
    fn test_wrong_field_count() {
        assert!(matches!(parse_cron("* * *"), Err(ToolError::Validation(_))));
        assert!(parse_cron("@fortnightly").is_err());
    }

    #[test]
    fn test_next_runs() {
        let after = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();
        // 2024-03-01 is a Friday
        let runs = parse_cron("0 9 * * 1-5").unwrap().next_runs(after, 3);
        let days: Vec<u32> = runs.iter().map(|r| r.day()).collect();
        assert_eq!(days, [1, 4, 5]);
        assert_eq!(runs[0].time(), chrono::NaiveTime::from_hms_opt(9, 0, 0).unwrap());
    }

    #[test]
    fn test_day_fields_are_ored() {
        let after = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        // 15th of the month or any Monday
        let runs = parse_cron("0 0 15 * 1").unwrap().next_runs(after, 3);
        let days: Vec<u32> = runs.iter().map(|r| r.day()).collect();
        assert_eq!(days, [4, 11, 15]);
    }
}
