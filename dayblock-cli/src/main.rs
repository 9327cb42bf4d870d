use anyhow::{anyhow, Context, Result};
use chrono::{NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use dayblock_core::{ScheduleState, TaskStatus};

mod config;
mod ics;
mod state;
mod store;

use store::{Action, TaskPatch};

#[derive(Parser, Debug)]
#[command(name = "dayblock", version, about = "Task list with a conflict-free day calendar")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create ~/.dayblock with a default config and a couple of demo tasks
    Init,

    /// Add a task; without --at it lands in the next free window
    Add {
        title: String,

        /// Duration in minutes (min 5)
        #[arg(long, default_value_t = 30)]
        duration: i64,

        /// Explicit start: "HH:MM" (today) or "YYYY-MM-DD HH:MM"
        #[arg(long)]
        at: Option<String>,

        /// Informational priority, higher = more important
        #[arg(long)]
        priority: Option<i32>,
    },

    /// Remove a task
    Rm { id: String },

    /// Mark a task done
    Done { id: String },

    /// Edit a task's title, duration, or start time
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        duration: Option<i64>,
        /// New start: "HH:MM" (today) or "YYYY-MM-DD HH:MM"
        #[arg(long)]
        at: Option<String>,
        /// Take the task off the calendar
        #[arg(long)]
        clear_start: bool,
    },

    /// Print the task list and the derived calendar
    Agenda,

    /// Keep re-running the overdue push-down on a timer
    Watch {
        /// Seconds between passes (default: config tick_seconds)
        #[arg(long)]
        interval: Option<u64>,
    },

    /// Write the derived events as an ICS calendar to stdout
    ExportIcs,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config()?;
    let tz: Tz = cfg
        .timezone
        .parse()
        .map_err(|_| anyhow!("invalid timezone in config: {}", cfg.timezone))?;
    let work = cfg.work_window();

    match cli.command {
        Command::Init => {
            config::save_config(&cfg)?;
            let now = local_now(tz);
            let mut st = ScheduleState::new(now, work);
            st.tasks = state::seed_tasks(now);
            let st = store::reduce(&st, Action::Tick { now })?;
            state::save_state(&st)?;
            println!("Initialized {}", state::state_path()?.display());
            print_agenda(&st);
        }

        Command::Add {
            title,
            duration,
            at,
            priority,
        } => {
            let now = local_now(tz);
            let st = state::load_state(now, work)?;
            let start_time = at.map(|s| parse_at(now, &s)).transpose()?;
            let next = store::reduce(
                &st,
                Action::AddTask {
                    title,
                    duration_minutes: duration,
                    start_time,
                    priority,
                },
            )?;
            state::save_state(&next)?;

            let added = next.tasks.last().context("task was not added")?;
            match added.start_time {
                Some(start) => println!("{} scheduled at {}", added.id, start.format("%Y-%m-%d %H:%M")),
                None => println!("{} added, but no free window was found; it stays unscheduled", added.id),
            }
        }

        Command::Rm { id } => {
            let now = local_now(tz);
            let st = state::load_state(now, work)?;
            let next = store::reduce(&st, Action::RemoveTask { id: id.clone() })?;
            state::save_state(&next)?;
            println!("Removed {id}");
        }

        Command::Done { id } => {
            let now = local_now(tz);
            let st = state::load_state(now, work)?;
            let next = store::reduce(&st, Action::CompleteTask { id: id.clone() })?;
            state::save_state(&next)?;
            println!("Done: {id}");
        }

        Command::Edit {
            id,
            title,
            duration,
            at,
            clear_start,
        } => {
            let now = local_now(tz);
            let st = state::load_state(now, work)?;
            let start_time = if clear_start {
                Some(None)
            } else {
                at.map(|s| parse_at(now, &s)).transpose()?.map(Some)
            };
            let patch = TaskPatch {
                title,
                duration_minutes: duration,
                start_time,
                ..TaskPatch::default()
            };
            let next = store::reduce(&st, Action::EditTask { id: id.clone(), patch })?;
            state::save_state(&next)?;
            println!("Edited {id}");
        }

        Command::Agenda => {
            let now = local_now(tz);
            let st = state::load_state(now, work)?;
            let st = store::reduce(&st, Action::Tick { now })?;
            state::save_state(&st)?;
            print_agenda(&st);
        }

        Command::Watch { interval } => {
            let secs = interval.unwrap_or(cfg.tick_seconds).max(1);
            println!("Rebalancing every {secs}s (ctrl-c to stop)");
            let mut ticker = tokio::time::interval(std::time::Duration::from_secs(secs));
            loop {
                ticker.tick().await;
                let now = local_now(tz);
                let st = state::load_state(now, work)?;
                let next = store::reduce(&st, Action::Tick { now })?;
                let moved = count_moved(&st, &next);
                state::save_state(&next)?;
                if moved > 0 {
                    println!("[{}] pushed down {moved} overdue task(s)", now.format("%H:%M:%S"));
                    print_agenda(&next);
                }
            }
        }

        Command::ExportIcs => {
            let now = local_now(tz);
            let st = state::load_state(now, work)?;
            print!("{}", ics::events_to_ics(&st.events, &st.tasks));
        }
    }

    Ok(())
}

fn local_now(tz: Tz) -> NaiveDateTime {
    Utc::now().with_timezone(&tz).naive_local()
}

/// Accept "HH:MM" (on today's date) or a full "YYYY-MM-DD HH:MM".
fn parse_at(now: NaiveDateTime, s: &str) -> Result<NaiveDateTime> {
    if let Ok(t) = NaiveTime::parse_from_str(s, "%H:%M") {
        return Ok(now.date().and_time(t));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M")
        .map_err(|e| anyhow!("invalid start '{s}': {e}"))
}

fn count_moved(before: &ScheduleState, after: &ScheduleState) -> usize {
    after
        .tasks
        .iter()
        .filter(|t| {
            before
                .tasks
                .iter()
                .any(|old| old.id == t.id && old.start_time != t.start_time)
        })
        .count()
}

fn print_agenda(state: &ScheduleState) {
    println!(
        "\n{} | workday {:02}:00-{:02}:00",
        state.now.format("%Y-%m-%d %H:%M"),
        state.work.start_hour,
        state.work.end_hour
    );

    if state.events.is_empty() {
        println!("  (calendar is empty)");
    }
    for e in &state.events {
        let title = e
            .task_id
            .as_ref()
            .and_then(|id| state.tasks.iter().find(|t| &t.id == id))
            .map(|t| t.title.as_str())
            .unwrap_or("(untitled)");
        let marker = if e.ends_at < state.now {
            "!"
        } else if e.starts_at <= state.now {
            ">"
        } else {
            " "
        };
        println!(
            " {marker} {}-{}  {title}  [{}]",
            e.starts_at.format("%H:%M"),
            e.ends_at.format("%H:%M"),
            e.task_id.as_deref().unwrap_or(&e.id)
        );
    }

    let parked: Vec<_> = state
        .tasks
        .iter()
        .filter(|t| t.status != TaskStatus::Done && t.start_time.is_none())
        .collect();
    if !parked.is_empty() {
        println!("  unscheduled:");
        for t in parked {
            println!("    {}  {} ({} min)", t.id, t.title, t.duration_minutes);
        }
    }
}
