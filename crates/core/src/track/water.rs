use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ToolError};
use crate::storage::{KeyValueStore, PersistedList};

pub const KEY: &str = "water-intake";

pub const DEFAULT_GOAL_ML: u32 = 2000;
/// Largest single log accepted.
pub const MAX_LOG_ML: u32 = 5000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaterEntry {
    pub date: NaiveDate,
    pub ml: u32,
    pub logged_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaterSummary {
    pub date: NaiveDate,
    pub total_ml: u32,
    pub goal_ml: u32,
    pub remaining_ml: u32,
    /// Progress towards the goal, capped at 100.
    pub percent: f64,
    pub glasses: usize,
}

pub struct WaterLog<S> {
    list: PersistedList<S, WaterEntry>,
}

impl<S: KeyValueStore> WaterLog<S> {
    pub fn open(store: S) -> Result<Self> {
        Ok(Self {
            list: PersistedList::open(store, KEY)?,
        })
    }

    pub fn log(&mut self, date: NaiveDate, ml: u32, now: DateTime<Utc>) -> Result<()> {
        if ml == 0 || ml > MAX_LOG_ML {
            return Err(ToolError::invalid(format!(
                "Amount must be between 1 and {MAX_LOG_ML} ml"
            )));
        }
        self.list.push(WaterEntry {
            date,
            ml,
            logged_at: now,
        })
    }

    /// Drops the latest entry for `date`, returning its amount.
    pub fn undo(&mut self, date: NaiveDate) -> Result<Option<u32>> {
        self.list.mutate(|items| {
            let last = items.iter().rposition(|e| e.date == date)?;
            Some(items.remove(last).ml)
        })
    }

    pub fn reset_day(&mut self, date: NaiveDate) -> Result<usize> {
        self.list.remove(|e| e.date == date)
    }

    pub fn total(&self, date: NaiveDate) -> u32 {
        self.list
            .items()
            .iter()
            .filter(|e| e.date == date)
            .map(|e| e.ml)
            .sum()
    }

    pub fn summary(&self, date: NaiveDate, goal_ml: u32) -> Result<WaterSummary> {
        if goal_ml == 0 {
            return Err(ToolError::invalid("Daily goal must be positive"));
        }
        let total_ml = self.total(date);
        let percent = (f64::from(total_ml) / f64::from(goal_ml) * 1000.0).round() / 10.0;
        Ok(WaterSummary {
            date,
            total_ml,
            goal_ml,
            remaining_ml: goal_ml.saturating_sub(total_ml),
            percent: percent.min(100.0),
            glasses: self.list.items().iter().filter(|e| e.date == date).count(),
        })
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

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap()
    }

    #[test]
    fn test_summary_per_day() {
        let mut log = WaterLog::open(MemoryStore::new()).unwrap();
        log.log(day(1), 250, now()).unwrap();
        log.log(day(1), 500, now()).unwrap();
        log.log(day(2), 300, now()).unwrap();

        let summary = log.summary(day(1), DEFAULT_GOAL_ML).unwrap();
        assert_eq!(summary.total_ml, 750);
        assert_eq!(summary.remaining_ml, 1250);
        assert_eq!(summary.percent, 37.5);
        assert_eq!(summary.glasses, 2);
    }

    #[test]
    fn test_percent_caps_at_goal() {
        let mut log = WaterLog::open(MemoryStore::new()).unwrap();
        log.log(day(1), 3000, now()).unwrap();
        let summary = log.summary(day(1), 2000).unwrap();
        assert_eq!(summary.percent, 100.0);
        assert_eq!(summary.remaining_ml, 0);
    }

    #[test]
    fn test_undo_and_reset() {
        let mut log = WaterLog::open(MemoryStore::new()).unwrap();
        log.log(day(1), 200, now()).unwrap();
        log.log(day(1), 400, now()).unwrap();
        assert_eq!(log.undo(day(1)).unwrap(), Some(400));
        assert_eq!(log.undo(day(3)).unwrap(), None);
        assert_eq!(log.reset_day(day(1)).unwrap(), 1);
        assert_eq!(log.total(day(1)), 0);
    }

    #[test]
    fn test_rejects_bad_amounts() {
        let mut log = WaterLog::open(MemoryStore::new()).unwrap();
        assert!(log.log(day(1), 0, now()).is_err());
        assert!(log.log(day(1), MAX_LOG_ML + 1, now()).is_err());
        assert!(log.summary(day(1), 0).is_err());
    }

    #[test]
    fn test_reload() {
        let mut log = WaterLog::open(MemoryStore::new()).unwrap();
        log.log(day(4), 330, now()).unwrap();
        let log = WaterLog::open(log.into_store()).unwrap();
        assert_eq!(log.total(day(4)), 330);
    }
}
