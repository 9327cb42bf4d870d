//! Daily working-window configuration.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

/// The span of local clock hours during which events may be scheduled,
/// e.g. 8-18 for an 08:00-18:00 workday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkWindow {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl WorkWindow {
    pub fn new(start_hour: u32, end_hour: u32) -> Self {
        Self {
            start_hour,
            end_hour,
        }
    }

    pub fn validate(&self) -> Result<(), ScheduleError> {
        if self.start_hour >= self.end_hour || self.end_hour >= 24 {
            return Err(ScheduleError::InvalidWindowBounds {
                start: self.start_hour,
                end: self.end_hour,
            });
        }
        Ok(())
    }

    /// Longest block that fits in a single workday.
    pub fn span_minutes(&self) -> i64 {
        (self.end_hour as i64 - self.start_hour as i64) * 60
    }

    /// Window open on the given day.
    pub fn start_on(&self, day: NaiveDate) -> NaiveDateTime {
        day.and_time(hms(self.start_hour))
    }

    /// Window close on the given day.
    pub fn end_on(&self, day: NaiveDate) -> NaiveDateTime {
        day.and_time(hms(self.end_hour))
    }

    /// Inclusive membership test on `t`'s own date, matching the
    /// projector's filter: starts exactly at the close are still visible.
    pub fn contains(&self, t: NaiveDateTime) -> bool {
        t >= self.start_on(t.date()) && t <= self.end_on(t.date())
    }
}

impl Default for WorkWindow {
    fn default() -> Self {
        Self {
            start_hour: 8,
            end_hour: 18,
        }
    }
}

fn hms(hour: u32) -> NaiveTime {
    // Hours are validated to < 24 before any timeline math runs.
    NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN)
}
