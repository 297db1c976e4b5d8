//! Error types for hours-engine operations.
//!
//! The interval algebra itself never fails; these cover parsing user input,
//! loading persisted hours, and validating against a timezone catalog.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HoursError {
    #[error("Invalid day: {0}")]
    InvalidDay(String),

    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Missing timezone")]
    MissingTimezone,

    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    #[error("Invalid working hours JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HoursError>;
