//! Error types for the timetable search engine.
//!
//! Input errors fail fast and are never retried. Transient evaluation
//! failures are handled inside the evaluation pool and never reach the
//! caller. A schedule with a nonzero penalty is *not* an error — the
//! engine is best-effort by design and callers inspect the returned
//! fitness and statistics instead.

use std::fmt;

/// Errors produced by roster/grid validation and run supervision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The course roster contains no courses.
    EmptyRoster,

    /// Two roster entries share the same course code.
    DuplicateCourseCode(String),

    /// The exam grid has zero days or zero slots per day.
    EmptyGrid {
        /// Requested number of exam days.
        num_days: usize,
        /// Requested number of slots per day.
        num_slots: usize,
    },

    /// A search parameter failed validation.
    InvalidConfig(String),

    /// A search run panicked after input validation had passed.
    ///
    /// Reported per-run by the multi-run orchestrator; sibling runs
    /// are unaffected.
    RunPanicked(String),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::EmptyRoster => {
                write!(f, "course roster is empty: nothing to schedule")
            }
            SearchError::DuplicateCourseCode(code) => {
                write!(f, "duplicate course code in roster: {code}")
            }
            SearchError::EmptyGrid {
                num_days,
                num_slots,
            } => {
                write!(
                    f,
                    "exam grid must have at least one day and one slot \
                     (got {num_days} days, {num_slots} slots)"
                )
            }
            SearchError::InvalidConfig(msg) => write!(f, "invalid search config: {msg}"),
            SearchError::RunPanicked(msg) => write!(f, "search run panicked: {msg}"),
        }
    }
}

impl std::error::Error for SearchError {}
