//! Stopwatch state machine
//!
//! `Idle -> Running -> Paused -> Running -> ... -> Idle`. The caller passes a
//! monotonic `now` (time since some fixed origin) into every transition, so
//! the machine itself never reads a clock.

use std::time::Duration;

use serde::Serialize;

use crate::error::{Result, ToolError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StopwatchState {
    #[default]
    Idle,
    Running,
    Paused,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lap {
    pub number: usize,
    /// Time since the previous lap (or the start).
    pub split: Duration,
    pub total: Duration,
}

#[derive(Debug, Clone, Default)]
pub struct Stopwatch {
    state: StopwatchState,
    /// Elapsed time banked by earlier running stretches.
    banked: Duration,
    running_since: Option<Duration>,
    laps: Vec<Lap>,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> StopwatchState {
        self.state
    }

    pub fn laps(&self) -> &[Lap] {
        &self.laps
    }

    pub fn elapsed(&self, now: Duration) -> Duration {
        match self.running_since {
            Some(since) => self.banked + now.saturating_sub(since),
            None => self.banked,
        }
    }

    /// Starts from idle or resumes from paused.
    pub fn start(&mut self, now: Duration) -> Result<()> {
        if self.state == StopwatchState::Running {
            return Err(ToolError::invalid("Stopwatch is already running"));
        }
        self.state = StopwatchState::Running;
        self.running_since = Some(now);
        Ok(())
    }

    pub fn pause(&mut self, now: Duration) -> Result<()> {
        if self.state != StopwatchState::Running {
            return Err(ToolError::invalid("Stopwatch is not running"));
        }
        self.banked = self.elapsed(now);
        self.running_since = None;
        self.state = StopwatchState::Paused;
        Ok(())
    }

    pub fn lap(&mut self, now: Duration) -> Result<Lap> {
        if self.state != StopwatchState::Running {
            return Err(ToolError::invalid("Laps can only be taken while running"));
        }
        let total = self.elapsed(now);
        let previous = self.laps.last().map_or(Duration::ZERO, |l| l.total);
        let lap = Lap {
            number: self.laps.len() + 1,
            split: total.saturating_sub(previous),
            total,
        };
        self.laps.push(lap.clone());
        Ok(lap)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// `MM:SS.cc`, or `H:MM:SS.cc` past the hour.
pub fn format_duration(d: Duration) -> String {
    let centis = d.as_millis() / 10;
    let (hours, rest) = (centis / 360_000, centis % 360_000);
    let (minutes, rest) = (rest / 6000, rest % 6000);
    let (seconds, centis) = (rest / 100, rest % 100);
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}.{centis:02}")
    } else {
        format!("{minutes:02}:{seconds:02}.{centis:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    #[test]
    fn test_full_cycle() {
        let mut sw = Stopwatch::new();
        assert_eq!(sw.state(), StopwatchState::Idle);

        sw.start(secs(10.0)).unwrap();
        assert_eq!(sw.elapsed(secs(12.5)), secs(2.5));

        sw.pause(secs(13.0)).unwrap();
        assert_eq!(sw.state(), StopwatchState::Paused);
        assert_eq!(sw.elapsed(secs(100.0)), secs(3.0));

        sw.start(secs(20.0)).unwrap();
        assert_eq!(sw.elapsed(secs(21.0)), secs(4.0));

        sw.reset();
        assert_eq!(sw.state(), StopwatchState::Idle);
        assert_eq!(sw.elapsed(secs(50.0)), Duration::ZERO);
    }

    #[test]
    fn test_laps_only_while_running() {
        let mut sw = Stopwatch::new();
        assert!(sw.lap(secs(1.0)).is_err());

        sw.start(secs(0.0)).unwrap();
        let first = sw.lap(secs(5.0)).unwrap();
        let second = sw.lap(secs(7.0)).unwrap();
        assert_eq!((first.number, first.split), (1, secs(5.0)));
        assert_eq!((second.split, second.total), (secs(2.0), secs(7.0)));

        sw.pause(secs(8.0)).unwrap();
        assert!(sw.lap(secs(9.0)).is_err());
        assert_eq!(sw.laps().len(), 2);

        sw.reset();
        assert!(sw.laps().is_empty());
    }

    #[test]
    fn test_invalid_transitions() {
        let mut sw = Stopwatch::new();
        assert!(sw.pause(secs(0.0)).is_err());
        sw.start(secs(0.0)).unwrap();
        assert!(sw.start(secs(1.0)).is_err());
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(65_430)), "01:05.43");
        assert_eq!(format_duration(Duration::from_millis(3_723_050)), "1:02:03.05");
        assert_eq!(format_duration(Duration::ZERO), "00:00.00");
    }
}
