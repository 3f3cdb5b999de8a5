/// Codec-specific errors
use audioboost_core::BoostError;
use thiserror::Error;

/// Result type alias using `CodecError`
pub type Result<T> = std::result::Result<T, CodecError>;

/// Codec error types
#[derive(Error, Debug)]
pub enum CodecError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// File exists but cannot be opened
    #[error("Cannot open {path}: {cause}")]
    Open {
        /// Path of the input
        path: String,
        /// Underlying I/O error
        cause: std::io::Error,
    },

    /// Container format not recognized
    #[error("Failed to probe file: {0}")]
    Probe(String),

    /// The container has no decodable audio stream
    #[error("No audio stream found")]
    NoAudioTrack,

    /// A stream parameter required for processing is missing
    #[error("Audio stream does not declare its {0}")]
    MissingParameter(&'static str),

    /// No decoder for the stream's codec
    #[error("Failed to create decoder: {0}")]
    UnsupportedCodec(String),

    /// Reading the next packet failed
    #[error("Error reading packet: {0}")]
    ReadPacket(String),

    /// Decoding a packet failed
    #[error("Decode error: {0}")]
    Decode(String),

    /// The stream's parameters changed mid-stream
    #[error("Stream parameters changed mid-stream")]
    StreamChanged,

    /// Decoded floating-point samples contain NaN or infinity
    #[error("Frame at pts {pts} contains invalid samples (NaN or Inf)")]
    NonFiniteSamples {
        /// Timestamp of the offending frame
        pts: i64,
    },

    /// Decoded buffer does not form a valid frame
    #[error("Invalid decoded frame: {0}")]
    InvalidFrame(String),

    /// Output container is not supported
    #[error("Unsupported output container: {0} (only .wav is written)")]
    UnsupportedOutput(String),

    /// Output file cannot be created
    #[error("Cannot create {path}: {cause}")]
    CreateOutput {
        /// Path of the output
        path: String,
        /// Underlying writer error
        cause: String,
    },

    /// Frame layout does not match the encoder
    #[error("Frame has {actual} channels, encoder expects {expected}")]
    ChannelMismatch {
        /// Channels the encoder was opened with
        expected: u16,
        /// Channels in the offered frame
        actual: usize,
    },

    /// Writing encoded samples failed
    #[error("Write error: {0}")]
    Write(String),

    /// Encoder already finalized
    #[error("Encoder already finalized")]
    Finalized,
}

impl From<hound::Error> for CodecError {
    fn from(err: hound::Error) -> Self {
        Self::Write(err.to_string())
    }
}

impl From<CodecError> for BoostError {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::FileNotFound(_)
            | CodecError::Open { .. }
            | CodecError::Probe(_)
            | CodecError::NoAudioTrack
            | CodecError::MissingParameter(_) => BoostError::input(err.to_string()),
            CodecError::UnsupportedCodec(_) => BoostError::codec("opening decoder", err),
            CodecError::ReadPacket(_) => BoostError::codec("reading packet", err),
            CodecError::Decode(_) | CodecError::StreamChanged => {
                BoostError::codec("decoding packet", err)
            }
            CodecError::ChannelMismatch { .. } => BoostError::codec("encoding frame", err),
            CodecError::NonFiniteSamples { .. } | CodecError::InvalidFrame(_) => {
                BoostError::data(err.to_string())
            }
            CodecError::UnsupportedOutput(_)
            | CodecError::CreateOutput { .. }
            | CodecError::Write(_)
            | CodecError::Finalized => BoostError::output(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_input_maps_to_input_error() {
        let err: BoostError = CodecError::FileNotFound("/nope.wav".to_string()).into();
        assert!(matches!(err, BoostError::Input(_)));
    }

    #[test]
    fn decode_failure_maps_to_codec_error() {
        let err: BoostError = CodecError::Decode("bad frame".to_string()).into();
        match err {
            BoostError::Codec { operation, cause } => {
                assert_eq!(operation, "decoding packet");
                assert!(cause.contains("bad frame"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_finite_samples_map_to_data_error() {
        let err: BoostError = CodecError::NonFiniteSamples { pts: 9 }.into();
        assert!(matches!(err, BoostError::Data(_)));
    }

    #[test]
    fn write_failure_maps_to_output_error() {
        let err: BoostError = CodecError::Finalized.into();
        assert!(matches!(err, BoostError::Output(_)));
    }
}
