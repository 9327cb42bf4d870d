//! Calendar events: the derived, disposable projection of tasks onto the
//! timeline. Rebuilt wholesale on every projection, never patched in place.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::time::TimeWindow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Scheduled,
    Completed,
    Canceled,
}

/// `System` marks events derived from tasks; `Manual` is reserved for
/// free-standing events a future surface might add.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventSource {
    Manual,
    System,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    pub starts_at: NaiveDateTime,
    pub ends_at: NaiveDateTime,
    pub status: EventStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<EventSource>,
}

impl CalendarEvent {
    /// The `[start, end)` interval this event claims on the timeline.
    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(self.starts_at, self.ends_at)
    }
}

/// Occupied intervals for conflict testing, taken from the scheduled
/// events only. The finder and the projector both go through this, so the
/// occupancy view can never drift from the visible calendar.
pub fn occupied_windows(events: &[CalendarEvent]) -> Vec<TimeWindow> {
    events
        .iter()
        .filter(|e| e.status == EventStatus::Scheduled)
        .map(CalendarEvent::window)
        .collect()
}
