//! AudioBoost Core
//!
//! Codec-agnostic types, traits, and error handling shared by every AudioBoost crate.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Frame Types**: `AudioFrame` (planar signed 16-bit samples + timestamp)
//! - **Stream Types**: `StreamInfo`, `TimeBase`
//! - **Codec Service Traits**: `FrameSource` (decoder side), `FrameSink` (encoder side)
//! - **Error Handling**: Unified `BoostError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use audioboost_core::AudioFrame;
//!
//! let frame = AudioFrame::new(vec![vec![0, 100, -100], vec![1, 2, 3]], 0).unwrap();
//! assert_eq!(frame.channel_count(), 2);
//! assert_eq!(frame.sample_count(), 3);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

pub use error::{BoostError, Result};
pub use traits::{EncodeStatus, FrameSink, FrameSource};
pub use types::{AudioFrame, StreamInfo, TimeBase};

/// Largest positive 16-bit sample, the 0 dBFS reference
pub const FULL_SCALE: f64 = 32767.0;
