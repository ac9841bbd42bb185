use thiserror::Error;

/// Error for event name validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EventNameError {
    #[error("Event name too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Event name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for event description validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EventDescriptionError {
    #[error("Event description too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error for all event operations
#[derive(Debug, Clone, Error)]
pub enum EventError {
    #[error("Invalid event name: {0}")]
    InvalidName(#[from] EventNameError),

    #[error("Invalid event description: {0}")]
    InvalidDescription(#[from] EventDescriptionError),

    #[error("Event not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
