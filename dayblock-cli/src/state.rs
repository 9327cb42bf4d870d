use anyhow::{Context, Result};
use chrono::{Duration, NaiveDateTime};
use dayblock_core::{project_events, ScheduleState, Task, WorkWindow};
use std::fs;
use std::path::PathBuf;

pub fn dayblock_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".dayblock"))
}

pub fn ensure_dayblock_home() -> Result<PathBuf> {
    let dir = dayblock_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn state_path() -> Result<PathBuf> {
    Ok(ensure_dayblock_home()?.join("state.json"))
}

/// Load the persisted schedule, or a fresh empty one when none exists.
/// `now` and the configured workday always win over what was on disk.
pub fn load_state(now: NaiveDateTime, work: WorkWindow) -> Result<ScheduleState> {
    let p = state_path()?;
    if !p.exists() {
        return Ok(ScheduleState::new(now, work));
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    let mut state: ScheduleState = serde_json::from_str(&s).context("parse state.json")?;
    state.now = now;
    state.work = work;
    state.events = project_events(&state.tasks, work);
    Ok(state)
}

pub fn save_state(state: &ScheduleState) -> Result<()> {
    let p = state_path()?;
    let json = serde_json::to_string_pretty(state)?;
    fs::write(&p, json).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

/// Starter tasks for a fresh install, scheduled relative to `now`.
pub fn seed_tasks(now: NaiveDateTime) -> Vec<Task> {
    vec![
        Task::new("task_seed_1", "Write spec", now)
            .with_duration(30)
            .with_start(now + Duration::minutes(5))
            .with_priority(2),
        Task::new("task_seed_2", "Email replies", now)
            .with_duration(20)
            .with_start(now + Duration::minutes(45))
            .with_priority(1),
    ]
}
