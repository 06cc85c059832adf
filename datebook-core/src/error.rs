//! Error types for datebook.

use thiserror::Error;

/// Errors that can occur in datebook operations.
#[derive(Error, Debug)]
pub enum DatebookError {
    #[error("Invalid date key '{key}': {reason}")]
    InvalidDateKey { key: String, reason: String },

    #[error("Invalid year {0}: negative years are not supported")]
    InvalidYear(i32),

    #[error("Invalid month index {0} (expected 0-11)")]
    InvalidMonth(u32),

    #[error("Day {day} is not in {month} (1-{day_count})")]
    InvalidDay {
        day: u32,
        month: String,
        day_count: u32,
    },

    #[error("No date selected")]
    NoSelection,

    #[error("Could not save bookings, changes may be lost on reload: {0}")]
    StorageWrite(String),

    #[error("Could not read storage: {0}")]
    StorageRead(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for datebook operations.
pub type DatebookResult<T> = Result<T, DatebookError>;
