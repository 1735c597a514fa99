//! Error type shared by the date values, pagers and the command-line front end.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    /// The day does not exist in the given month (e.g. February 30).
    #[error("Invalid date: {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },

    #[error("Invalid month: {0} (must be 1-12)")]
    InvalidMonth(u32),

    /// Year outside MIN_YEAR..=MAX_YEAR.
    #[error("Date out of range")]
    DateOutOfRange,

    #[error("Page {page} is out of range (0..{count})")]
    PageOutOfRange { page: usize, count: usize },

    #[error("{what} {value} is outside {first}..={last}")]
    OutOfBounds {
        what: &'static str,
        value: String,
        first: String,
        last: String,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{0}")]
    ConflictingOptions(String),
}

pub type Result<T> = std::result::Result<T, CalendarError>;
