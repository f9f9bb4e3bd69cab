//! World clock
//!
//! Cities are kept either by IANA zone (so daylight saving follows the tz
//! database) or by a fixed UTC offset the user typed.

use chrono::{DateTime, FixedOffset, Offset, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{require_input, Result, ToolError};
use crate::storage::{KeyValueStore, PersistedList};

pub const KEY: &str = "world-clock-cities";

pub const KNOWN_CITIES: [(&str, &str); 16] = [
    ("London", "Europe/London"),
    ("Paris", "Europe/Paris"),
    ("Berlin", "Europe/Berlin"),
    ("Cairo", "Africa/Cairo"),
    ("Moscow", "Europe/Moscow"),
    ("Dubai", "Asia/Dubai"),
    ("Mumbai", "Asia/Kolkata"),
    ("Kathmandu", "Asia/Kathmandu"),
    ("Singapore", "Asia/Singapore"),
    ("Tokyo", "Asia/Tokyo"),
    ("Sydney", "Australia/Sydney"),
    ("Auckland", "Pacific/Auckland"),
    ("Sao Paulo", "America/Sao_Paulo"),
    ("New York", "America/New_York"),
    ("Chicago", "America/Chicago"),
    ("Los Angeles", "America/Los_Angeles"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Zone {
    /// IANA zone name such as `Europe/London`.
    #[serde(rename = "tz")]
    Named(String),
    /// Minutes east of UTC, no daylight saving.
    #[serde(rename = "offset_minutes")]
    Fixed(i32),
}

impl Zone {
    /// An IANA zone name, or else a UTC offset (see [`parse_offset`]).
    pub fn parse(input: &str) -> Result<Self> {
        let raw = require_input(input)?.trim();
        match raw.parse::<Tz>() {
            Ok(tz) => Ok(Zone::Named(tz.name().to_string())),
            Err(_) if raw.contains('/') => {
                Err(ToolError::parse(format!("Unknown time zone '{raw}'")))
            }
            Err(_) => parse_offset(raw).map(Zone::Fixed),
        }
    }

    /// The offset in force at `now`.
    pub fn offset_at(&self, now: DateTime<Utc>) -> Result<FixedOffset> {
        match self {
            Zone::Named(name) => {
                let tz: Tz = name
                    .parse()
                    .map_err(|_| ToolError::parse(format!("Unknown time zone '{name}'")))?;
                Ok(now.with_timezone(&tz).offset().fix())
            }
            Zone::Fixed(minutes) => FixedOffset::east_opt(minutes * 60)
                .ok_or_else(|| ToolError::invalid(format!("Bad UTC offset {minutes}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    #[serde(flatten)]
    pub zone: Zone,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CityTime {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    pub offset: String,
    pub time: String,
    pub date: String,
    /// Calendar days ahead of (positive) or behind UTC.
    pub day_delta: i64,
}

/// Parses `+05:30`, `-8`, `UTC+1`, `GMT-03:00` and bare `Z`/`UTC`.
pub fn parse_offset(input: &str) -> Result<i32> {
    let raw = require_input(input)?.trim();
    let upper = raw.to_ascii_uppercase();
    let rest = upper
        .strip_prefix("UTC")
        .or_else(|| upper.strip_prefix("GMT"))
        .unwrap_or(&upper);
    if rest.is_empty() || rest == "Z" {
        return Ok(0);
    }

    let bad = || ToolError::parse(format!("Invalid UTC offset '{raw}'"));
    let (sign, digits) = match rest.as_bytes()[0] {
        b'+' => (1, &rest[1..]),
        b'-' => (-1, &rest[1..]),
        _ => return Err(bad()),
    };
    let (hours, minutes) = match digits.split_once(':') {
        Some((h, m)) => (h, m),
        None if digits.len() == 4 => digits.split_at(2),
        None => (digits, "0"),
    };
    let hours: i32 = hours.parse().map_err(|_| bad())?;
    let minutes: i32 = minutes.parse().map_err(|_| bad())?;
    if hours > 14 || minutes >= 60 || hours * 60 + minutes > 14 * 60 {
        return Err(ToolError::invalid(format!(
            "UTC offset '{raw}' is outside -14:00 to +14:00"
        )));
    }
    Ok(sign * (hours * 60 + minutes))
}

pub fn format_offset(minutes: i32) -> String {
    let sign = if minutes < 0 { '-' } else { '+' };
    let abs = minutes.abs();
    format!("UTC{sign}{:02}:{:02}", abs / 60, abs % 60)
}

pub fn known_zone(name: &str) -> Option<&'static str> {
    KNOWN_CITIES
        .iter()
        .find(|(city, _)| city.eq_ignore_ascii_case(name.trim()))
        .map(|(_, zone)| *zone)
}

pub fn city_time(city: &City, now: DateTime<Utc>) -> Result<CityTime> {
    let offset = city.zone.offset_at(now)?;
    let local = now.with_timezone(&offset);
    let day_delta = (local.date_naive() - now.date_naive()).num_days();
    Ok(CityTime {
        name: city.name.clone(),
        zone: match &city.zone {
            Zone::Named(name) => Some(name.clone()),
            Zone::Fixed(_) => None,
        },
        offset: format_offset(offset.local_minus_utc() / 60),
        time: local.format("%H:%M:%S").to_string(),
        date: local.format("%a %Y-%m-%d").to_string(),
        day_delta,
    })
}

pub struct WorldClock<S> {
    list: PersistedList<S, City>,
}

impl<S: KeyValueStore> WorldClock<S> {
    pub fn open(store: S) -> Result<Self> {
        Ok(Self {
            list: PersistedList::open(store, KEY)?,
        })
    }

    /// Adds a city. Without an explicit zone the name must be a known city.
    pub fn add(&mut self, name: &str, zone: Option<&str>) -> Result<City> {
        let name = require_input(name)?.trim().to_string();
        let zone = match zone {
            Some(z) => Zone::parse(z)?,
            None => known_zone(&name).map(|z| Zone::Named(z.to_string())).ok_or_else(|| {
                ToolError::invalid(format!("Unknown city '{name}'; pass its time zone or UTC offset"))
            })?,
        };
        if self.list.items().iter().any(|c| c.name.eq_ignore_ascii_case(&name)) {
            return Err(ToolError::invalid(format!("'{name}' is already on the clock")));
        }
        let city = City { name, zone };
        self.list.push(city.clone())?;
        Ok(city)
    }

    pub fn remove(&mut self, name: &str) -> Result<()> {
        match self.list.remove(|c| c.name.eq_ignore_ascii_case(name.trim()))? {
            0 => Err(ToolError::invalid(format!("'{}' is not on the clock", name.trim()))),
            _ => Ok(()),
        }
    }

    pub fn cities(&self) -> &[City] {
        self.list.items()
    }

    pub fn times(&self, now: DateTime<Utc>) -> Result<Vec<CityTime>> {
        self.list.items().iter().map(|c| city_time(c, now)).collect()
    }

    pub fn into_store(self) -> S {
        self.list.into_store()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_parse_offset_shapes() {
        assert_eq!(parse_offset("+05:30").unwrap(), 330);
        assert_eq!(parse_offset("UTC-8").unwrap(), -480);
        assert_eq!(parse_offset("gmt+0545").unwrap(), 345);
        assert_eq!(parse_offset("Z").unwrap(), 0);
        assert_eq!(parse_offset("UTC").unwrap(), 0);
        assert!(parse_offset("+15").is_err());
        assert!(parse_offset("5").is_err());
        assert!(parse_offset("+ab").is_err());
    }

    #[test]
    fn test_format_offset() {
        assert_eq!(format_offset(330), "UTC+05:30");
        assert_eq!(format_offset(-180), "UTC-03:00");
        assert_eq!(format_offset(0), "UTC+00:00");
    }

    #[test]
    fn test_times_cross_midnight() {
        let mut clock = WorldClock::open(MemoryStore::new()).unwrap();
        clock.add("Tokyo", None).unwrap();
        clock.add("los angeles", None).unwrap();
        clock.add("Base", Some("+00:00")).unwrap();

        let now = Utc.with_ymd_and_hms(2024, 1, 15, 20, 30, 0).unwrap();
        let times = clock.times(now).unwrap();
        assert_eq!(times[0].time, "05:30:00");
        assert_eq!(times[0].day_delta, 1);
        assert_eq!(times[1].time, "12:30:00");
        assert_eq!(times[1].day_delta, 0);
        assert_eq!(times[2].date, "Mon 2024-01-15");
    }

    #[test]
    fn test_unknown_city_needs_offset() {
        let mut clock = WorldClock::open(MemoryStore::new()).unwrap();
        assert!(clock.add("Atlantis", None).is_err());
        clock.add("Atlantis", Some("-02:00")).unwrap();
        assert!(clock.add("atlantis", Some("+01:00")).is_err());
        clock.remove("ATLANTIS").unwrap();
        assert!(clock.remove("Atlantis").is_err());
    }

    #[test]
    fn test_cities_persist() {
        let mut clock = WorldClock::open(MemoryStore::new()).unwrap();
        clock.add("Mumbai", None).unwrap();
        let clock = WorldClock::open(clock.into_store()).unwrap();
        assert_eq!(clock.cities()[0].zone, Zone::Named("Asia/Kolkata".into()));
    }

    #[test]
    fn test_known_cities_follow_daylight_saving() {
        let mut clock = WorldClock::open(MemoryStore::new()).unwrap();
        clock.add("London", None).unwrap();
        clock.add("New York", None).unwrap();
        clock.add("Sydney", None).unwrap();

        let winter = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        let times = clock.times(winter).unwrap();
        assert_eq!(times[0].offset, "UTC+00:00");
        assert_eq!(times[1].offset, "UTC-05:00");
        assert_eq!(times[2].offset, "UTC+11:00");

        let summer = Utc.with_ymd_and_hms(2024, 7, 15, 12, 0, 0).unwrap();
        let times = clock.times(summer).unwrap();
        assert_eq!(times[0].offset, "UTC+01:00");
        assert_eq!(times[0].time, "13:00:00");
        assert_eq!(times[1].offset, "UTC-04:00");
        assert_eq!(times[2].offset, "UTC+10:00");
        assert_eq!(times[0].zone.as_deref(), Some("Europe/London"));
    }

    #[test]
    fn test_zone_parse() {
        assert_eq!(Zone::parse("Europe/Lisbon").unwrap(), Zone::Named("Europe/Lisbon".into()));
        assert_eq!(Zone::parse("+05:30").unwrap(), Zone::Fixed(330));
        assert!(Zone::parse("Mars/Olympus").is_err());
    }

    #[test]
    fn test_city_storage_shape() {
        let named = City {
            name: "Tokyo".into(),
            zone: Zone::Named("Asia/Tokyo".into()),
        };
        assert_eq!(
            serde_json::to_value(&named).unwrap(),
            serde_json::json!({"name": "Tokyo", "tz": "Asia/Tokyo"})
        );
        let fixed: City = serde_json::from_str(r#"{"name": "Base", "offset_minutes": -120}"#).unwrap();
        assert_eq!(fixed.zone, Zone::Fixed(-120));
    }
}
