//! Pure reducer over the schedule state.
//!
//! The binary loads state, applies exactly one action, and writes the
//! result back — a read-compute-install cycle with a single writer.
//! Nothing in here touches the clock or the disk, so every transition is
//! reproducible in tests.

use anyhow::{bail, Result};
use chrono::NaiveDateTime;
use dayblock_core::{
    find_next_free_window, occupied_windows, project_events, push_down_overdue, ScheduleError,
    ScheduleState, Task, TaskStatus,
};

/// Shortest duration the UI accepts. The core itself tolerates anything
/// positive; this floor is a product rule enforced at the boundary.
pub const MIN_TASK_MINUTES: i64 = 5;

#[derive(Debug, Clone)]
pub enum Action {
    /// Advance the clock and push down overdue blocks.
    Tick { now: NaiveDateTime },
    /// Add a task; without an explicit start it lands in the next free
    /// window at or after `now`.
    AddTask {
        title: String,
        duration_minutes: i64,
        start_time: Option<NaiveDateTime>,
        priority: Option<i32>,
    },
    RemoveTask { id: String },
    EditTask { id: String, patch: TaskPatch },
    CompleteTask { id: String },
}

/// Partial update for `EditTask`. The double `Option` on `start_time`
/// distinguishes "leave alone" from "clear".
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub duration_minutes: Option<i64>,
    pub start_time: Option<Option<NaiveDateTime>>,
    pub status: Option<TaskStatus>,
    pub priority: Option<Option<i32>>,
}

pub fn reduce(state: &ScheduleState, action: Action) -> Result<ScheduleState> {
    match action {
        Action::Tick { now } => {
            let mut next = state.clone();
            next.now = now;
            Ok(push_down_overdue(&next)?)
        }

        Action::AddTask {
            title,
            duration_minutes,
            start_time,
            priority,
        } => {
            if duration_minutes < MIN_TASK_MINUTES {
                bail!("duration must be at least {MIN_TASK_MINUTES} minutes");
            }
            let mut next = state.clone();
            let mut task = Task::new(make_id("task", state), title, state.now)
                .with_duration(duration_minutes);
            task.priority = priority;
            task.start_time = start_time;

            if task.start_time.is_none() {
                let occupied = occupied_windows(&project_events(&next.tasks, next.work));
                match find_next_free_window(&occupied, next.now, duration_minutes, next.work) {
                    Ok(window) => task.start_time = Some(window.start),
                    // Leave it unscheduled; the caller reports the miss.
                    Err(ScheduleError::NoWindowFound { .. }) => {}
                    Err(e) => return Err(e.into()),
                }
            }

            next.tasks.push(task);
            finish(next)
        }

        Action::RemoveTask { id } => {
            let mut next = state.clone();
            next.tasks.retain(|t| t.id != id);
            finish(next)
        }

        Action::EditTask { id, patch } => {
            if let Some(minutes) = patch.duration_minutes {
                if minutes < MIN_TASK_MINUTES {
                    bail!("duration must be at least {MIN_TASK_MINUTES} minutes");
                }
            }
            let mut next = state.clone();
            let Some(task) = next.tasks.iter_mut().find(|t| t.id == id) else {
                bail!("no such task: {id}");
            };
            if let Some(title) = patch.title {
                task.title = title;
            }
            if let Some(minutes) = patch.duration_minutes {
                task.duration_minutes = minutes;
            }
            if let Some(start) = patch.start_time {
                task.start_time = start;
            }
            if let Some(status) = patch.status {
                task.status = status;
            }
            if let Some(priority) = patch.priority {
                task.priority = priority;
            }
            finish(next)
        }

        Action::CompleteTask { id } => {
            let mut next = state.clone();
            let Some(task) = next.tasks.iter_mut().find(|t| t.id == id) else {
                bail!("no such task: {id}");
            };
            task.status = TaskStatus::Done;
            finish(next)
        }
    }
}

/// Every mutation re-projects and then runs the overdue push-down, so a
/// stale block never survives a user action.
fn finish(mut next: ScheduleState) -> Result<ScheduleState> {
    next.events = project_events(&next.tasks, next.work);
    Ok(push_down_overdue(&next)?)
}

/// Deterministic id from the state's clock plus a per-state counter,
/// mirroring the reference `prefix_timestamp_suffix` shape.
fn make_id(prefix: &str, state: &ScheduleState) -> String {
    format!(
        "{}_{:x}_{:x}",
        prefix,
        state.now.and_utc().timestamp_millis(),
        state.tasks.len()
    )
}
