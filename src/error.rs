//! Error type shared by the statistics engine.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("row {row}: invalid start time '{value}'")]
    InvalidTimestamp { row: usize, value: String },

    #[error("row {row}: invalid trip duration '{value}'")]
    InvalidDuration { row: usize, value: String },

    #[error("missing required column '{0}'")]
    MissingHeader(String),

    /// An aggregate was requested over zero trips.
    #[error("not enough data for this filter combination")]
    EmptyInput,

    #[error("invalid month '{0}', expected 1-12 or 'all'")]
    InvalidMonth(String),

    #[error("invalid weekday '{0}', expected 0-6 or 'all'")]
    InvalidWeekday(String),

    #[error("unknown city '{0}'")]
    UnknownCity(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StatsError>;
