use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

pub type BookingResult<T> = Result<T, BookingError>;

/// Rejected calendar date input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateParseError {
    #[error("date is empty")]
    Empty,

    #[error("unrecognized date format '{0}', expected DD-MM-YYYY or MM/DD/YYYY")]
    UnrecognizedFormat(String),

    #[error("'{0}' is not a valid calendar date")]
    InvalidDate(String),
}

/// Rejected time-of-day input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeParseError {
    #[error("time is empty")]
    Empty,

    #[error("unrecognized time '{0}', expected HH:MM or H:MM AM/PM")]
    UnrecognizedFormat(String),
}

impl From<DateParseError> for BookingError {
    fn from(err: DateParseError) -> Self {
        BookingError::Validation(err.to_string())
    }
}

impl From<TimeParseError> for BookingError {
    fn from(err: TimeParseError) -> Self {
        BookingError::Validation(err.to_string())
    }
}
