//! AudioBoost - segment-based peak normalization of audio files
//!
//! Decodes the first audio stream of a file, raises the level of quiet
//! segments toward a dBFS ceiling, and writes the result as 16-bit WAV.

pub mod config;
pub mod pipeline;

pub use config::BoostConfig;
pub use pipeline::{analyze, boost, run, BoostReport, NullSink, SegmentCorrection};
