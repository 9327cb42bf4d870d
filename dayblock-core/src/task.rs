//! Task model for the dayblock planner.
//!
//! Field names serialize in camelCase so state files and any future sync
//! surface share one wire shape.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Todo,
    Doing,
    Done,
}

/// A user-visible unit of work. Small and serializable; the calendar view
/// is derived from it, never stored on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,

    /// Unset until the task is placed on the calendar.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<NaiveDateTime>,

    /// Minutes. Callers enforce the 5-minute floor; the scheduling core
    /// tolerates any positive value.
    pub duration_minutes: i64,

    pub status: TaskStatus,
    pub created_at: NaiveDateTime,

    /// Higher = more important. Carried for display only; no scheduling
    /// path orders by it yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
}

impl Task {
    pub fn new(id: impl Into<String>, title: impl Into<String>, created_at: NaiveDateTime) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            start_time: None,
            duration_minutes: 30,
            status: TaskStatus::Todo,
            created_at,
            priority: None,
        }
    }

    pub fn with_duration(mut self, minutes: i64) -> Self {
        self.duration_minutes = minutes;
        self
    }

    pub fn with_start(mut self, start: NaiveDateTime) -> Self {
        self.start_time = Some(start);
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }
}
