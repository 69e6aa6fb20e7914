use thiserror::Error;

use crate::time::TimeOfDay;

#[derive(Error, Debug)]
pub enum TimeError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid time format: {0:?} (expected HH:MM)")]
    InvalidTimeFormat(String),

    #[error("Invalid range: start {start} must be earlier than end {end}")]
    InvalidRange { start: TimeOfDay, end: TimeOfDay },

    #[error("Persistence error: {0}")]
    Persistence(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

pub type TimeResult<T> = Result<T, TimeError>;
