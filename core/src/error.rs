use crate::model::weekday::Weekday;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProfileError>;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("invalid date key '{key}': expected a YYYY-MM-DD calendar date")]
    InvalidDateFormat { key: String },

    /// No weekday carries an observation, so there is nothing to interpolate from.
    #[error("insufficient data: at least one observation is required to build a weekly profile")]
    InsufficientData,

    #[error("sum of observations for {weekday} overflows a 64-bit integer")]
    Overflow { weekday: Weekday },

    #[error("invalid observation '{input}': {reason}")]
    InvalidObservation { input: String, reason: String },

    #[error("malformed observation document: {0}")]
    Json(#[from] serde_json::Error),
}

impl ProfileError {
    pub(crate) fn invalid_date(key: &str) -> Self {
        ProfileError::InvalidDateFormat {
            key: key.to_string(),
        }
    }

    pub(crate) fn invalid_observation(input: &str, reason: impl Into<String>) -> Self {
        ProfileError::InvalidObservation {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}
