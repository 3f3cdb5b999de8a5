//! AudioBoost Codec
//!
//! The media codec service behind the gain pipeline.
//!
//! This crate provides:
//! - Decoding via Symphonia (MP3, FLAC, OGG/Vorbis, WAV, AAC/M4A)
//! - Conversion of decoded buffers into planar 16-bit `AudioFrame`s
//! - 16-bit PCM WAV encoding via hound
//! - Stream probing (sample rate, channels, layout, duration)
//!
//! # Example: Decoding
//!
//! ```rust,no_run
//! use audioboost_codec::SymphoniaSource;
//! use audioboost_core::FrameSource;
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut source = SymphoniaSource::open(Path::new("/music/song.flac"))?;
//! println!("{}", source.stream_info());
//!
//! while let Some(frame) = source.decode_next()? {
//!     println!("{} samples at pts {}", frame.sample_count(), frame.pts());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Example: Encoding
//!
//! ```rust,no_run
//! use audioboost_codec::WavSink;
//! use audioboost_core::{AudioFrame, FrameSink, StreamInfo};
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let info = StreamInfo::new(44_100, 2);
//! let mut sink = WavSink::create(Path::new("out.wav"), &info)?;
//! sink.encode(&AudioFrame::silent(2, 1024, 0))?;
//! sink.finalize()?;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]

mod adapter;
mod error;
mod sink;
mod source;

pub use adapter::frame_from_buffer;
pub use error::{CodecError, Result};
pub use sink::WavSink;
pub use source::{probe, SymphoniaSource};
