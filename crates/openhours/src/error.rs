//! Error types for openhours operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OpenHoursError {
    /// A clause or time-range term that does not have the expected shape.
    /// Individual malformed fields never produce this; only structure does.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid datetime: {0}")]
    InvalidDatetime(String),
}

pub type Result<T> = std::result::Result<T, OpenHoursError>;
