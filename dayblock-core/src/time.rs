//! Slot-grained time arithmetic shared by the finder and the rescheduler.

use chrono::{Duration, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::window::WorkWindow;

/// Scheduling quantum in minutes; every search result is aligned to this grid.
pub const SLOT_MINUTES: i64 = 5;

/// A half-open `[start, end)` span on the local timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeWindow {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Half-open overlap test: windows that merely touch do not conflict.
    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Round up to the next slot boundary, counted from local midnight.
/// Times already on the grid are returned unchanged.
pub fn round_up_to_slot(t: NaiveDateTime) -> NaiveDateTime {
    let midnight = t.date().and_time(NaiveTime::MIN);
    let slot_ms = SLOT_MINUTES * 60_000;
    let elapsed_ms = (t - midnight).num_milliseconds();
    let rem = elapsed_ms % slot_ms;
    if rem == 0 {
        t
    } else {
        midnight + Duration::milliseconds(elapsed_ms - rem + slot_ms)
    }
}

/// Clamp into the workday on `t`'s own date. Times before the window open
/// move to the open; times past the close move to one slot *past* the
/// close, which forces the finder's day-rollover branch.
pub fn clamp_to_workday(t: NaiveDateTime, work: WorkWindow) -> NaiveDateTime {
    let start = work.start_on(t.date());
    let end = work.end_on(t.date());
    if t < start {
        start
    } else if t > end {
        end + Duration::minutes(SLOT_MINUTES)
    } else {
        t
    }
}
