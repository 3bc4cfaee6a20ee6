//! Error types for calendar arithmetic and timeline storage.

use thiserror::Error;

use crate::time_type::TimeType;

/// Which calendar bound a time fell outside of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// Before the calendar's minimum time.
    Left,
    /// After the calendar's maximum time.
    Right,
}

/// Errors from calendar conversion and period arithmetic.
///
/// All variants are recoverable value errors: callers reject the requested
/// change and keep their current state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimeError {
    /// The month or day does not exist in the calendar.
    #[error("invalid {calendar} date {year}-{month}-{day}")]
    InvalidDate {
        calendar: &'static str,
        year: i64,
        month: u32,
        day: u32,
    },

    /// The time of day is not a valid hour/minute/second triple.
    #[error("invalid time of day {hour:02}:{minute:02}:{second:02}")]
    InvalidTime { hour: u32, minute: u32, second: u32 },

    /// A time fell outside the calendar's supported range.
    #[error("{message}")]
    OutOfRange { bound: Bound, message: String },

    /// A period's start was after its end.
    #[error("start time can't be after end time")]
    InvalidPeriod,

    /// A period exceeded the time type's widest zoom.
    #[error("{message}")]
    PeriodTooLong { message: &'static str },

    /// A period fell below the time type's deepest zoom.
    #[error("{message}")]
    PeriodTooShort { message: &'static str },

    /// The operation has no meaning for this time type.
    #[error("{operation} is not supported by the {time_type} time type")]
    Unsupported {
        time_type: TimeType,
        operation: &'static str,
    },

    /// A time string could not be parsed.
    #[error("time not on correct format: '{input}'")]
    Parse { input: String },

    /// A navigation step needed a target time but none was given.
    #[error("navigation step requires a target time")]
    MissingTarget,
}

impl TimeError {
    pub(crate) fn out_of_range(time_type: TimeType, bound: Bound) -> Self {
        let message = match bound {
            Bound::Left => time_type.min_time_message(),
            Bound::Right => time_type.max_time_message(),
        };
        Self::OutOfRange {
            bound,
            message: message.to_string(),
        }
    }
}

/// Errors from a timeline store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DbError {
    #[error("event not found: {0}")]
    EventNotFound(u64),

    #[error("category not found: {0}")]
    CategoryNotFound(u64),

    #[error("category {name} can't be its own ancestor")]
    CategoryCycle { name: String },

    #[error("event uses {found} time but the timeline uses {expected}")]
    TimeTypeMismatch { expected: TimeType, found: TimeType },
}

/// Errors from applying user input to a controller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error(transparent)]
    Time(#[from] TimeError),

    #[error(transparent)]
    Db(#[from] DbError),
}
