//! Overdue push-down: reflow time blocks that elapsed without completion.

use crate::error::ScheduleError;
use crate::event::occupied_windows;
use crate::finder::find_next_free_window;
use crate::projector::project_events;
use crate::state::ScheduleState;

/// Move every task whose derived event ended before `state.now`, and which
/// is not done, into the next free window at or after `state.now`.
///
/// Overdue tasks are handled in ascending current-start order, so earlier
/// blocks claim their new slot first. Occupancy is rebuilt from the task
/// list after each placement, minus the task's own stale block, which lets
/// a task move past itself and keeps consecutive placements disjoint.
///
/// A task the finder cannot place (nothing free within the look-ahead, or
/// a duration that can never fit one workday) is left unscheduled rather
/// than failing the whole pass. Running this twice with the same `now`
/// changes nothing the second time: every reassigned block now ends after
/// `now`.
pub fn push_down_overdue(state: &ScheduleState) -> Result<ScheduleState, ScheduleError> {
    state.work.validate()?;

    let now = state.now;
    let mut tasks = state.tasks.clone();

    // Projection is start-ordered, so this is also the processing order.
    let overdue: Vec<String> = project_events(&tasks, state.work)
        .iter()
        .filter(|e| e.ends_at < now)
        .filter_map(|e| e.task_id.clone())
        .collect();

    for task_id in overdue {
        let Some(idx) = tasks.iter().position(|t| t.id == task_id) else {
            continue;
        };

        let occupied: Vec<_> = {
            let current = project_events(&tasks, state.work);
            let others: Vec<_> = current
                .into_iter()
                .filter(|e| e.task_id.as_deref() != Some(task_id.as_str()))
                .collect();
            occupied_windows(&others)
        };

        match find_next_free_window(&occupied, now, tasks[idx].duration_minutes, state.work) {
            Ok(window) => tasks[idx].start_time = Some(window.start),
            Err(ScheduleError::NoWindowFound { .. } | ScheduleError::InvalidDuration(_)) => {
                tasks[idx].start_time = None;
            }
            Err(e) => return Err(e),
        }
    }

    let events = project_events(&tasks, state.work);
    Ok(ScheduleState {
        tasks,
        events,
        now: state.now,
        work: state.work,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{Task, TaskStatus};
    use crate::time::TimeWindow;
    use crate::window::WorkWindow;
    use chrono::{Duration, NaiveDate, NaiveDateTime};

    fn dt(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 9)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn state(tasks: Vec<Task>, now: NaiveDateTime) -> ScheduleState {
        let work = WorkWindow::new(8, 18);
        ScheduleState {
            events: project_events(&tasks, work),
            tasks,
            now,
            work,
        }
    }

    #[test]
    fn overdue_task_moves_past_its_own_stale_block() {
        // Ends 10:00, now 10:05. Its own block must not pin it in place.
        let task = Task::new("a", "stale", dt(8, 0))
            .with_start(dt(9, 30))
            .with_duration(30);
        let next = push_down_overdue(&state(vec![task], dt(10, 5))).unwrap();

        assert_eq!(next.tasks[0].start_time, Some(dt(10, 5)));
        assert_eq!(next.events.len(), 1);
        assert_eq!(next.events[0].ends_at, dt(10, 35));
    }

    #[test]
    fn two_overdue_tasks_land_in_disjoint_windows() {
        let a = Task::new("a", "first", dt(8, 0))
            .with_start(dt(9, 0))
            .with_duration(30);
        let b = Task::new("b", "second", dt(8, 0))
            .with_start(dt(9, 40))
            .with_duration(20);
        let next = push_down_overdue(&state(vec![a, b], dt(10, 30))).unwrap();

        // Ascending current-start order: "a" claims 10:30 first.
        assert_eq!(next.tasks[0].start_time, Some(dt(10, 30)));
        assert_eq!(next.tasks[1].start_time, Some(dt(11, 0)));

        let wins: Vec<TimeWindow> = next.events.iter().map(|e| e.window()).collect();
        assert!(!wins[0].overlaps(&wins[1]));
    }

    #[test]
    fn done_and_future_tasks_are_untouched() {
        let mut done = Task::new("done", "finished", dt(8, 0))
            .with_start(dt(8, 0))
            .with_duration(30);
        done.status = TaskStatus::Done;
        let future = Task::new("future", "later", dt(8, 0))
            .with_start(dt(15, 0))
            .with_duration(30);

        let next = push_down_overdue(&state(vec![done.clone(), future.clone()], dt(12, 0))).unwrap();
        assert_eq!(next.tasks[0].start_time, done.start_time);
        assert_eq!(next.tasks[1].start_time, future.start_time);
    }

    #[test]
    fn event_ending_exactly_now_is_not_overdue() {
        let task = Task::new("a", "edge", dt(8, 0))
            .with_start(dt(9, 0))
            .with_duration(60);
        let next = push_down_overdue(&state(vec![task], dt(10, 0))).unwrap();
        assert_eq!(next.tasks[0].start_time, Some(dt(9, 0)));
    }

    #[test]
    fn rebalance_is_idempotent_for_a_fixed_now() {
        let tasks = vec![
            Task::new("a", "one", dt(8, 0)).with_start(dt(8, 0)).with_duration(30),
            Task::new("b", "two", dt(8, 0)).with_start(dt(8, 40)).with_duration(45),
            Task::new("c", "three", dt(8, 0)).with_start(dt(16, 0)).with_duration(30),
        ];
        let once = push_down_overdue(&state(tasks, dt(11, 17))).unwrap();
        let twice = push_down_overdue(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn unplaceable_task_is_left_unscheduled_not_looped_on() {
        // A wall of blockers covering the whole look-ahead.
        let work = WorkWindow::new(8, 18);
        let day0 = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
        let mut tasks: Vec<Task> = (0..32)
            .map(|i| {
                let d = day0 + Duration::days(i);
                Task::new(format!("wall_{i}"), "booked", dt(7, 0))
                    .with_start(work.start_on(d))
                    .with_duration(work.span_minutes())
            })
            .collect();
        tasks.push(
            Task::new("late", "overdue", dt(7, 0))
                .with_start(dt(8, 0))
                .with_duration(30),
        );
        // Give the overdue task a block that already elapsed inside the wall.
        // The wall task on day 0 is also overdue but can only return to its
        // own slot's day or later; what matters here is the "late" task.
        let now = dt(23, 50);

        let next = push_down_overdue(&state(tasks, now)).unwrap();
        let late = next.tasks.iter().find(|t| t.id == "late").unwrap();
        assert_eq!(late.start_time, None);
    }
}
