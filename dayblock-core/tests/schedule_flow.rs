//! End-to-end pipeline tests: add -> project -> push-down across a day.

use chrono::{NaiveDate, NaiveDateTime};
use dayblock_core::{
    find_next_free_window, occupied_windows, project_events, push_down_overdue, ScheduleState,
    Task, TaskStatus, TimeWindow, WorkWindow, SLOT_MINUTES,
};

fn dt(h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 3, 9)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

fn work() -> WorkWindow {
    WorkWindow::new(8, 18)
}

fn make_state(tasks: Vec<Task>, now: NaiveDateTime) -> ScheduleState {
    ScheduleState {
        events: project_events(&tasks, work()),
        tasks,
        now,
        work: work(),
    }
}

#[test]
fn added_tasks_chain_into_back_to_back_windows() {
    let now = dt(8, 0);
    let mut state = make_state(Vec::new(), now);

    for (id, minutes) in [("a", 30), ("b", 45), ("c", 20)] {
        let occupied = occupied_windows(&state.events);
        let window = find_next_free_window(&occupied, now, minutes, state.work).unwrap();
        state
            .tasks
            .push(Task::new(id, id, now).with_start(window.start).with_duration(minutes));
        state.events = project_events(&state.tasks, state.work);
    }

    let starts: Vec<NaiveDateTime> = state.events.iter().map(|e| e.starts_at).collect();
    assert_eq!(starts, vec![dt(8, 0), dt(8, 30), dt(9, 15)]);

    // No pair of derived events overlaps.
    for (i, a) in state.events.iter().enumerate() {
        for b in &state.events[i + 1..] {
            assert!(!a.window().overlaps(&b.window()));
        }
    }
}

#[test]
fn occupancy_always_mirrors_the_projected_calendar() {
    let tasks = vec![
        Task::new("a", "a", dt(8, 0)).with_start(dt(9, 0)).with_duration(30),
        Task::new("b", "b", dt(8, 0)).with_start(dt(14, 0)).with_duration(90),
        Task::new("c", "unscheduled", dt(8, 0)),
    ];
    let events = project_events(&tasks, work());
    let occupied = occupied_windows(&events);

    let from_events: Vec<TimeWindow> = events.iter().map(|e| e.window()).collect();
    assert_eq!(occupied, from_events);
}

#[test]
fn a_full_morning_pushes_down_without_collisions() {
    // Three blocks elapsed by mid-day, one future block stays put.
    let tasks = vec![
        Task::new("standup", "standup", dt(7, 0)).with_start(dt(8, 0)).with_duration(15),
        Task::new("review", "review", dt(7, 0)).with_start(dt(8, 30)).with_duration(45),
        Task::new("email", "email", dt(7, 0)).with_start(dt(9, 30)).with_duration(20),
        Task::new("deep", "deep work", dt(7, 0)).with_start(dt(15, 0)).with_duration(120),
    ];
    let now = dt(12, 3);
    let next = push_down_overdue(&make_state(tasks, now)).unwrap();

    // Everything still has a slot, and nothing overlaps anything else.
    assert_eq!(next.events.len(), 4);
    for (i, a) in next.events.iter().enumerate() {
        for b in &next.events[i + 1..] {
            assert!(!a.window().overlaps(&b.window()), "{a:?} vs {b:?}");
        }
    }

    // Every block sits entirely inside its own day's working window.
    for e in &next.events {
        assert!(e.starts_at >= work().start_on(e.starts_at.date()));
        assert!(e.ends_at <= work().end_on(e.starts_at.date()));
    }

    // Reflowed blocks start at or after now, on the slot grid.
    for task in next.tasks.iter().filter(|t| t.id != "deep") {
        let start = task.start_time.unwrap();
        assert!(start >= now);
        let midnight = start.date().and_hms_opt(0, 0, 0).unwrap();
        assert_eq!((start - midnight).num_minutes() % SLOT_MINUTES, 0);
    }
    let deep = next.tasks.iter().find(|t| t.id == "deep").unwrap();
    assert_eq!(deep.start_time, Some(dt(15, 0)));

    // A second pass at the same time is a no-op.
    assert_eq!(push_down_overdue(&next).unwrap(), next);
}

#[test]
fn completing_a_task_frees_its_window_for_the_next_search() {
    let mut tasks = vec![
        Task::new("a", "a", dt(8, 0)).with_start(dt(9, 0)).with_duration(60),
    ];
    let events = project_events(&tasks, work());
    let before = find_next_free_window(&occupied_windows(&events), dt(9, 0), 30, work()).unwrap();
    assert_eq!(before.start, dt(10, 0));

    tasks[0].status = TaskStatus::Done;
    let events = project_events(&tasks, work());
    assert!(events.is_empty());
    let after = find_next_free_window(&occupied_windows(&events), dt(9, 0), 30, work()).unwrap();
    assert_eq!(after.start, dt(9, 0));
}
