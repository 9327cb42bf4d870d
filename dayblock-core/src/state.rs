//! The schedule aggregate the external state owner holds.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::event::CalendarEvent;
use crate::task::Task;
use crate::window::WorkWindow;

/// Canonical task list plus its derived calendar. The core never mutates
/// one of these: every operation takes the old state and hands back a new
/// one, and the owner installs it (single-writer discipline).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleState {
    pub tasks: Vec<Task>,
    /// Derived 1:1 from scheduled tasks; rebuilt wholesale, never patched.
    pub events: Vec<CalendarEvent>,
    /// Current time, always supplied by the owner. The core reads no clock.
    pub now: NaiveDateTime,
    pub work: WorkWindow,
}

impl ScheduleState {
    pub fn new(now: NaiveDateTime, work: WorkWindow) -> Self {
        Self {
            tasks: Vec::new(),
            events: Vec::new(),
            now,
            work,
        }
    }
}
