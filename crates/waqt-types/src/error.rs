use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from waqt operations.
///
/// The schedule calculator itself never fails; these cover parsing,
/// configuration and the remote timetable boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WaqtError {
    /// Wall-clock string was not `HH:mm` or `HH:mm:ss`.
    #[error("Invalid time of day {input:?}: expected HH:mm or HH:mm:ss")]
    InvalidTime { input: String },

    /// Name is not one of the six daily time points.
    #[error("Unknown prayer name {0:?}")]
    UnknownPrayer(String),

    /// Invalid configuration.
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    /// Local wall-clock time has no instant in the configured zone.
    #[error("Local time {time} on {date} cannot be resolved in {zone}")]
    UnresolvableLocalTime {
        date: NaiveDate,
        time: NaiveTime,
        zone: String,
    },

    /// Timetable provider answered, but not with a usable day.
    #[error("Timetable provider error: {0}")]
    ProviderError(String),

    /// Transport failure talking to the timetable provider.
    #[error("Network error: {0}")]
    NetworkError(String),
}

impl WaqtError {
    /// Creates an `InvalidConfiguration` error.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration { reason: reason.into() }
    }

    /// Creates an `InvalidTime` error.
    pub fn invalid_time(input: impl Into<String>) -> Self {
        Self::InvalidTime { input: input.into() }
    }

    /// True for failures that may succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::NetworkError(_))
    }
}
