//! Daily habit tracker
//!
//! A habit is a name plus the set of dates it was completed on. The streak
//! counts consecutive completed days ending today. If today is not done yet
//! the run ending yesterday still counts, so a streak does not reset at
//! midnight.

use std::collections::BTreeSet;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{next_id, not_found};
use crate::error::{require_input, Result, ToolError};
use crate::storage::{KeyValueStore, PersistedList};

pub const KEY: &str = "habits";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub completed: BTreeSet<NaiveDate>,
}

impl Habit {
    pub fn is_done_on(&self, date: NaiveDate) -> bool {
        self.completed.contains(&date)
    }

    pub fn streak(&self, today: NaiveDate) -> u32 {
        let mut day = if self.is_done_on(today) {
            today
        } else {
            match today.pred_opt() {
                Some(d) => d,
                None => return 0,
            }
        };
        let mut streak = 0;
        while self.is_done_on(day) {
            streak += 1;
            day = match day.checked_sub_days(Days::new(1)) {
                Some(d) => d,
                None => break,
            };
        }
        streak
    }

    /// Longest run of consecutive days ever recorded.
    pub fn best_streak(&self) -> u32 {
        let mut best = 0;
        let mut run = 0;
        let mut previous: Option<NaiveDate> = None;
        for &date in &self.completed {
            run = match previous {
                Some(p) if p.succ_opt() == Some(date) => run + 1,
                _ => 1,
            };
            best = best.max(run);
            previous = Some(date);
        }
        best
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HabitStatus {
    pub id: u64,
    pub name: String,
    pub done_today: bool,
    pub streak: u32,
    pub best_streak: u32,
}

pub struct HabitTracker<S> {
    list: PersistedList<S, Habit>,
}

impl<S: KeyValueStore> HabitTracker<S> {
    pub fn open(store: S) -> Result<Self> {
        Ok(Self {
            list: PersistedList::open(store, KEY)?,
        })
    }

    pub fn add(&mut self, name: &str) -> Result<Habit> {
        let name = require_input(name)?.trim().to_string();
        if self.list.items().iter().any(|h| h.name.eq_ignore_ascii_case(&name)) {
            return Err(ToolError::invalid(format!("Habit '{name}' already exists")));
        }
        let habit = Habit {
            id: next_id(self.list.items(), |h| h.id),
            name,
            completed: BTreeSet::new(),
        };
        self.list.push(habit.clone())?;
        Ok(habit)
    }

    /// Records `date` as done (or not done) for the habit.
    pub fn mark(&mut self, id: u64, date: NaiveDate, done: bool) -> Result<()> {
        let found = self.list.update(
            |h| h.id == id,
            |h| {
                if done {
                    h.completed.insert(date);
                } else {
                    h.completed.remove(&date);
                }
            },
        )?;
        if !found {
            return Err(not_found("habit", id));
        }
        Ok(())
    }

    /// Flips the habit's state for `date` and returns the new state.
    pub fn toggle(&mut self, id: u64, date: NaiveDate) -> Result<bool> {
        let done = self
            .get(id)
            .map(|h| !h.is_done_on(date))
            .ok_or_else(|| not_found("habit", id))?;
        self.mark(id, date, done)?;
        Ok(done)
    }

    pub fn delete(&mut self, id: u64) -> Result<()> {
        match self.list.remove(|h| h.id == id)? {
            0 => Err(not_found("habit", id)),
            _ => Ok(()),
        }
    }

    pub fn get(&self, id: u64) -> Option<&Habit> {
        self.list.items().iter().find(|h| h.id == id)
    }

    pub fn status(&self, today: NaiveDate) -> Vec<HabitStatus> {
        self.list
            .items()
            .iter()
            .map(|h| HabitStatus {
                id: h.id,
                name: h.name.clone(),
                done_today: h.is_done_on(today),
                streak: h.streak(today),
                best_streak: h.best_streak(),
            })
            .collect()
    }

    pub fn into_store(self) -> S {
        self.list.into_store()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn tracker_with(days: &[u32]) -> (HabitTracker<MemoryStore>, u64) {
        let mut tracker = HabitTracker::open(MemoryStore::new()).unwrap();
        let id = tracker.add("Read").unwrap().id;
        for &d in days {
            tracker.mark(id, day(d), true).unwrap();
        }
        (tracker, id)
    }

    #[test]
    fn test_streak_ending_today() {
        let (tracker, id) = tracker_with(&[1, 3, 4, 5]);
        assert_eq!(tracker.get(id).unwrap().streak(day(5)), 3);
    }

    #[test]
    fn test_streak_survives_until_today_is_done() {
        let (tracker, id) = tracker_with(&[3, 4]);
        assert_eq!(tracker.get(id).unwrap().streak(day(5)), 2);
        assert_eq!(tracker.get(id).unwrap().streak(day(6)), 0);
    }

    #[test]
    fn test_best_streak() {
        let (tracker, id) = tracker_with(&[1, 2, 3, 7, 8]);
        assert_eq!(tracker.get(id).unwrap().best_streak(), 3);
    }

    #[test]
    fn test_toggle_and_status() {
        let (mut tracker, id) = tracker_with(&[4]);
        assert!(tracker.toggle(id, day(5)).unwrap());
        let status = &tracker.status(day(5))[0];
        assert!(status.done_today);
        assert_eq!(status.streak, 2);

        assert!(!tracker.toggle(id, day(5)).unwrap());
        assert_eq!(tracker.status(day(5))[0].streak, 1);
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let (mut tracker, _) = tracker_with(&[]);
        assert!(tracker.add("read").is_err());
        assert!(tracker.mark(42, day(1), true).is_err());
    }

    #[test]
    fn test_dates_round_trip_through_store() {
        let (tracker, id) = tracker_with(&[2]);
        let store = tracker.into_store();
        assert!(store.get(KEY).unwrap().unwrap().contains("2024-03-02"));
        let tracker = HabitTracker::open(store).unwrap();
        assert!(tracker.get(id).unwrap().is_done_on(day(2)));
    }
}
