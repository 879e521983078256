//! Error types for cbr-rates

use thiserror::Error;

/// Main error type for cbr-rates
#[derive(Error, Debug)]
pub enum RatesError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Unexpected HTTP status {status} for date {date}")]
    HttpStatusError { status: u16, date: String },

    #[error("Decode error: {0}")]
    DecodeError(String),

    #[error("Field parse error: {field} = {value:?}")]
    FieldParseError { field: &'static str, value: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

impl RatesError {
    /// Whether this error abandons a whole feed day.
    ///
    /// Transport, status and decode failures drop the day and the run
    /// moves on to the next date. Everything else is not a per-day failure.
    pub fn skips_day(&self) -> bool {
        matches!(
            self,
            RatesError::NetworkError(_)
                | RatesError::HttpStatusError { .. }
                | RatesError::DecodeError(_)
        )
    }
}

/// Result type alias for cbr-rates operations
pub type Result<T> = std::result::Result<T, RatesError>;
