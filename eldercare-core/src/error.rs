//! Error types for eldercare.

use thiserror::Error;

/// Errors that can occur while loading schedules or configuration.
///
/// Conflict detection itself never fails; these cover everything around it.
#[derive(Error, Debug)]
pub enum CareError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Schedule not found: {0}")]
    ScheduleNotFound(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("ICS parse error: {0}")]
    IcsParse(String),

    #[error("Recurrence error: {0}")]
    Recurrence(String),

    #[error("Invalid date range: {0}")]
    InvalidRange(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for eldercare operations.
pub type CareResult<T> = Result<T, CareError>;
