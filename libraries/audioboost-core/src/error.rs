/// Core error types for AudioBoost
use thiserror::Error;

/// Result type alias using `BoostError`
pub type Result<T> = std::result::Result<T, BoostError>;

/// Core error type for AudioBoost
///
/// Every variant is fatal for the current run.
#[derive(Error, Debug)]
pub enum BoostError {
    /// Input file missing, unreadable, or without an audio stream
    #[error("Input error: {0}")]
    Input(String),

    /// Decoder/encoder failure reported by the codec service
    #[error("Codec error while {operation}: {cause}")]
    Codec {
        /// What the pipeline was doing when the codec failed
        operation: String,
        /// Underlying cause reported by the codec
        cause: String,
    },

    /// Sample data that cannot be processed (non-finite samples, bad timestamps)
    #[error("Data error: {0}")]
    Data(String),

    /// Destination cannot be created or written
    #[error("Output error: {0}")]
    Output(String),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),
}

impl BoostError {
    /// Create an input error
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    /// Create a codec error for the given operation
    pub fn codec(operation: impl Into<String>, cause: impl ToString) -> Self {
        Self::Codec {
            operation: operation.into(),
            cause: cause.to_string(),
        }
    }

    /// Create a data error
    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }

    /// Create an output error
    pub fn output(msg: impl Into<String>) -> Self {
        Self::Output(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
