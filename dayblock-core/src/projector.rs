//! Task -> calendar projection.

use chrono::Duration;

use crate::event::{CalendarEvent, EventSource, EventStatus};
use crate::task::{Task, TaskStatus};
use crate::window::WorkWindow;

/// Derive the visible calendar from the task list.
///
/// Done and unscheduled tasks are skipped. A task whose start falls outside
/// the working window on its own date (say, scheduled for midnight) is
/// dropped from the calendar rather than clamped into it. Output is sorted
/// ascending by start time; ties keep input order.
///
/// No validation happens here: an odd duration still yields a structurally
/// valid event, and the finder's own checks are the place that rejects it.
pub fn project_events(tasks: &[Task], work: WorkWindow) -> Vec<CalendarEvent> {
    let mut events: Vec<CalendarEvent> = Vec::new();

    for task in tasks {
        if task.status == TaskStatus::Done {
            continue;
        }
        let Some(starts_at) = task.start_time else {
            continue;
        };
        if !work.contains(starts_at) {
            continue;
        }

        events.push(CalendarEvent {
            id: format!("evt_{}", task.id),
            task_id: Some(task.id.clone()),
            starts_at,
            ends_at: starts_at + Duration::minutes(task.duration_minutes),
            status: EventStatus::Scheduled,
            source: Some(EventSource::System),
        });
    }

    events.sort_by_key(|e| e.starts_at);
    events
}
