//! Error types for date, calendar and day count operations.

use thiserror::Error;

use crate::types::Date;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// The error type for `kurva-core` operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Error in date construction or parsing.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// End date precedes start date for an unsigned year fraction.
    #[error("Invalid date order: {end} is before {start}")]
    InvalidDateOrder {
        /// Start of the period.
        start: Date,
        /// End of the period.
        end: Date,
    },

    /// Unknown or inconsistent calendar, business day convention or day count.
    #[error("Invalid calendar or convention: {reason}")]
    InvalidCalendarOrConvention {
        /// Description of the problem.
        reason: String,
    },

    /// Tenor string could not be parsed.
    #[error("Invalid tenor: '{tenor}'")]
    InvalidTenor {
        /// The offending tenor text.
        tenor: String,
    },

    /// Schedule could not be generated.
    #[error("Schedule error: {reason}")]
    ScheduleError {
        /// Description of the error.
        reason: String,
    },
}

impl CoreError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an invalid date order error.
    #[must_use]
    pub fn invalid_date_order(start: Date, end: Date) -> Self {
        Self::InvalidDateOrder { start, end }
    }

    /// Creates an invalid calendar or convention error.
    #[must_use]
    pub fn invalid_convention(reason: impl Into<String>) -> Self {
        Self::InvalidCalendarOrConvention {
            reason: reason.into(),
        }
    }

    /// Creates an invalid tenor error.
    #[must_use]
    pub fn invalid_tenor(tenor: impl Into<String>) -> Self {
        Self::InvalidTenor {
            tenor: tenor.into(),
        }
    }

    /// Creates a schedule error.
    #[must_use]
    pub fn schedule(reason: impl Into<String>) -> Self {
        Self::ScheduleError {
            reason: reason.into(),
        }
    }
}
