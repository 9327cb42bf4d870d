//! Free-window search over the slotted day grid.

use chrono::{Duration, NaiveDateTime};

use crate::error::ScheduleError;
use crate::time::{clamp_to_workday, round_up_to_slot, TimeWindow};
use crate::window::WorkWindow;

/// How many day rollovers the search tolerates before giving up.
pub const MAX_LOOKAHEAD_DAYS: u32 = 30;

/// Earliest slot-aligned window of `duration_minutes` at or after
/// `desired_start` that fits inside a single workday and overlaps none of
/// the `occupied` intervals.
///
/// The result is duration-exact and fully inside one day's working window.
/// Desired starts outside the workday are clamped first (late starts roll
/// to the next morning). The search fails with `NoWindowFound` rather than
/// scanning past `MAX_LOOKAHEAD_DAYS`.
pub fn find_next_free_window(
    occupied: &[TimeWindow],
    desired_start: NaiveDateTime,
    duration_minutes: i64,
    work: WorkWindow,
) -> Result<TimeWindow, ScheduleError> {
    work.validate()?;
    if duration_minutes <= 0 || duration_minutes > work.span_minutes() {
        return Err(ScheduleError::InvalidDuration(duration_minutes));
    }

    let duration = Duration::minutes(duration_minutes);
    let mut cursor = round_up_to_slot(clamp_to_workday(desired_start, work));
    let mut rollovers = 0u32;

    loop {
        if cursor + duration > work.end_on(cursor.date()) {
            if rollovers >= MAX_LOOKAHEAD_DAYS {
                return Err(ScheduleError::NoWindowFound {
                    days: MAX_LOOKAHEAD_DAYS,
                });
            }
            rollovers += 1;
            cursor = work.start_on(cursor.date() + Duration::days(1));
            continue;
        }

        let candidate = TimeWindow::new(cursor, cursor + duration);
        match occupied.iter().find(|w| w.overlaps(&candidate)) {
            None => return Ok(candidate),
            Some(conflict) => {
                // Steps past the first conflict seen in input order, not the
                // latest-ending one among all overlaps at this cursor. An
                // overlapping window always ends after the cursor, so every
                // step strictly advances and the scan terminates.
                cursor = round_up_to_slot(conflict.end);
            }
        }
    }
}
