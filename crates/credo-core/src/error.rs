//! Error types for the Credo core crate.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CredoResult<T> = Result<T, CredoError>;

/// The error type for core date, calendar, and schedule operations.
#[derive(Error, Debug, Clone)]
pub enum CredoError {
    /// Error in date calculations or invalid date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// Tenor string or value could not be interpreted.
    #[error("Invalid tenor: {message}")]
    InvalidTenor {
        /// Description of the tenor error.
        message: String,
    },

    /// Schedule generation failed.
    #[error("Invalid schedule: {reason}")]
    InvalidSchedule {
        /// Description of the schedule error.
        reason: String,
    },

    /// Calendar or business day error.
    #[error("Calendar error: {reason}")]
    CalendarError {
        /// Description of the error.
        reason: String,
    },
}

impl CredoError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an invalid tenor error.
    #[must_use]
    pub fn invalid_tenor(message: impl Into<String>) -> Self {
        Self::InvalidTenor {
            message: message.into(),
        }
    }

    /// Creates an invalid schedule error.
    #[must_use]
    pub fn invalid_schedule(reason: impl Into<String>) -> Self {
        Self::InvalidSchedule {
            reason: reason.into(),
        }
    }

    /// Creates a calendar error.
    #[must_use]
    pub fn calendar_error(reason: impl Into<String>) -> Self {
        Self::CalendarError {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CredoError::invalid_date("2025-02-30");
        assert!(err.to_string().contains("2025-02-30"));

        let err = CredoError::invalid_schedule("start after end");
        assert!(err.to_string().contains("start after end"));
    }
}
