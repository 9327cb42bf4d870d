//! dayblock-core: pure scheduling core for the dayblock day planner.
//!
//! Three side-effect-free functions form the pipeline:
//! - [`project_events`] turns the task list into a sorted calendar,
//! - [`find_next_free_window`] locates the earliest conflict-free slot,
//! - [`push_down_overdue`] reflows blocks that elapsed without completion.
//!
//! The state owner (the CLI) composes them, owns all mutation, and passes
//! "now" in explicitly; nothing here reads a clock or touches disk.

pub mod error;
pub mod event;
pub mod finder;
pub mod projector;
pub mod rebalance;
pub mod state;
pub mod task;
pub mod time;
pub mod window;

pub use error::ScheduleError;
pub use event::{occupied_windows, CalendarEvent, EventSource, EventStatus};
pub use finder::{find_next_free_window, MAX_LOOKAHEAD_DAYS};
pub use projector::project_events;
pub use rebalance::push_down_overdue;
pub use state::ScheduleState;
pub use task::{Task, TaskStatus};
pub use time::{clamp_to_workday, round_up_to_slot, TimeWindow, SLOT_MINUTES};
pub use window::WorkWindow;
