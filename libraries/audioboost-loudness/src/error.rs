//! Error types for segment scheduling

use audioboost_core::BoostError;
use thiserror::Error;

/// Result type for loudness operations
pub type Result<T> = std::result::Result<T, LoudnessError>;

/// Errors that can occur while scheduling segment corrections
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoudnessError {
    /// Segment duration must be at least one tick
    #[error("Invalid segment duration: {0} ticks (must be positive)")]
    InvalidSegmentDuration(i64),

    /// A frame arrived with a timestamp lower than its predecessor
    #[error("Timestamp went backwards: {current} after {previous}")]
    TimestampRegression {
        /// Timestamp of the previous frame
        previous: i64,
        /// Timestamp of the offending frame
        current: i64,
    },
}

impl From<LoudnessError> for BoostError {
    fn from(err: LoudnessError) -> Self {
        match err {
            LoudnessError::InvalidSegmentDuration(_) => BoostError::config(err.to_string()),
            LoudnessError::TimestampRegression { .. } => BoostError::data(err.to_string()),
        }
    }
}
