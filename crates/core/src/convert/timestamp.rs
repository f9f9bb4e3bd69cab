use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::Serialize;

use crate::error::{require_input, Result, ToolError};

/// Values at or above this magnitude are read as milliseconds.
const MILLIS_THRESHOLD: i64 = 100_000_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EpochUnit {
    Seconds,
    Millis,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimestampInfo {
    pub unix_seconds: i64,
    pub unix_millis: i64,
    pub rfc3339: String,
    /// Human offset from `now`, e.g. "3 days ago".
    pub relative: String,
}

/// Interpret `input` as either a unix timestamp or a date string.
///
/// Bare integers are seconds unless `unit` says otherwise; with no unit, values
/// with 12 or more digits are taken as milliseconds. Date strings may be
/// RFC 3339, `YYYY-MM-DD HH:MM:SS` (UTC) or `YYYY-MM-DD`.
pub fn parse_timestamp(
    input: &str,
    unit: Option<EpochUnit>,
    now: DateTime<Utc>,
) -> Result<TimestampInfo> {
    let input = require_input(input)?.trim();

    let instant = match input.parse::<i64>() {
        Ok(value) => from_epoch(value, unit)?,
        Err(_) => parse_date(input)?,
    };

    Ok(TimestampInfo {
        unix_seconds: instant.timestamp(),
        unix_millis: instant.timestamp_millis(),
        rfc3339: instant.to_rfc3339_opts(SecondsFormat::Secs, true),
        relative: relative_to(instant, now),
    })
}

fn from_epoch(value: i64, unit: Option<EpochUnit>) -> Result<DateTime<Utc>> {
    let unit = unit.unwrap_or(if value.abs() >= MILLIS_THRESHOLD {
        EpochUnit::Millis
    } else {
        EpochUnit::Seconds
    });
    let instant = match unit {
        EpochUnit::Seconds => DateTime::<Utc>::from_timestamp(value, 0),
        EpochUnit::Millis => DateTime::<Utc>::from_timestamp_millis(value),
    };
    instant.ok_or_else(|| ToolError::invalid(format!("Timestamp {value} is out of range")))
}

fn parse_date(input: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::<FixedOffset>::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M:%S") {
        return Ok(Utc.from_utc_datetime(&naive));
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }
    Err(ToolError::parse(format!(
        "'{input}' is neither a unix timestamp nor a recognized date"
    )))
}

pub fn relative_to(instant: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = now.signed_duration_since(instant).num_seconds();
    let magnitude = delta.unsigned_abs();
    if magnitude < 45 {
        return "just now".to_string();
    }

    let (count, unit) = match magnitude {
        s if s < 3_600 => (s / 60, "minute"),
        s if s < 86_400 => (s / 3_600, "hour"),
        s if s < 2_592_000 => (s / 86_400, "day"),
        s if s < 31_536_000 => (s / 2_592_000, "month"),
        s => (s / 31_536_000, "year"),
    };
    let count = count.max(1);
    let plural = if count == 1 { "" } else { "s" };

    if delta > 0 {
        format!("{count} {unit}{plural} ago")
    } else {
        format!("in {count} {unit}{plural}")
    }
}
