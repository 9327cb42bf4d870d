use thiserror::Error;

/// Recoverable scheduling failures. None of these should take the process
/// down; the state owner clears the offending task's start time and tells
/// the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// Duration is non-positive, or longer than one workday so it can
    /// never fit a single-day window.
    #[error("invalid duration: {0} minutes")]
    InvalidDuration(i64),

    /// Workday bounds are inverted or outside 0..24.
    #[error("invalid working window: {start}:00-{end}:00")]
    InvalidWindowBounds { start: u32, end: u32 },

    /// The search gave up after scanning the configured look-ahead.
    #[error("no free window within {days} days")]
    NoWindowFound { days: u32 },
}
