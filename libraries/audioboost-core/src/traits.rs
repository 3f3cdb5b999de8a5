/// Media codec service traits
///
/// The gain pipeline only talks to decoders and encoders through these two
/// seams. Opening a handle is the implementer's constructor; closing it is `Drop`.
use crate::error::Result;
use crate::types::{AudioFrame, StreamInfo};

/// Decoder side of the codec service
///
/// Implementers produce decoded frames of one audio stream in presentation order.
pub trait FrameSource {
    /// Parameters of the stream being decoded
    fn stream_info(&self) -> &StreamInfo;

    /// Decode the next frame
    ///
    /// Returns `Ok(None)` once the stream is exhausted.
    ///
    /// # Errors
    /// Returns an error if the packet cannot be read or decoded, or if the
    /// decoded samples are not finite
    fn decode_next(&mut self) -> Result<Option<AudioFrame>>;
}

/// Outcome of a single `FrameSink::encode` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeStatus {
    /// The frame was consumed
    Accepted,
    /// The encoder cannot take a frame yet; the same frame must be offered again
    NotReady,
}

/// Encoder side of the codec service
pub trait FrameSink {
    /// Offer a frame to the encoder
    ///
    /// # Errors
    /// Returns an error on any genuine encoder or write failure
    fn encode(&mut self, frame: &AudioFrame) -> Result<EncodeStatus>;

    /// Flush buffered data and write the container trailer
    ///
    /// # Errors
    /// Returns an error if the trailer cannot be written
    fn finalize(&mut self) -> Result<()>;
}

impl<T: FrameSource + ?Sized> FrameSource for Box<T> {
    fn stream_info(&self) -> &StreamInfo {
        (**self).stream_info()
    }

    fn decode_next(&mut self) -> Result<Option<AudioFrame>> {
        (**self).decode_next()
    }
}

impl<T: FrameSink + ?Sized> FrameSink for Box<T> {
    fn encode(&mut self, frame: &AudioFrame) -> Result<EncodeStatus> {
        (**self).encode(frame)
    }

    fn finalize(&mut self) -> Result<()> {
        (**self).finalize()
    }
}
