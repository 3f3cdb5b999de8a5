//! Segment-based peak normalization for AudioBoost
//!
//! This crate provides:
//! - Sample peak measurement in dBFS for single frames and accumulated segments
//! - Boost-only gain calculation against a target dBFS ceiling
//! - Saturating 16-bit gain application
//! - A segment scheduler that fires one correction per time window
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌───────────────┐
//! │ AudioFrame  │ ──► │  PeakMeter   │ ──► │ GainDecision  │
//! └─────────────┘     └──────────────┘     └───────────────┘
//!        │                                         │
//!        ▼                                         ▼
//! ┌──────────────────┐                    ┌───────────────┐
//! │ SegmentScheduler │ ─── boundary ────► │  apply_gain   │
//! └──────────────────┘                    └───────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use audioboost_core::AudioFrame;
//! use audioboost_loudness::SegmentScheduler;
//!
//! // Windows of 1000 ticks, boost up to 0 dBFS
//! let mut scheduler = SegmentScheduler::new(1000, 0.0).unwrap();
//!
//! let mut quiet = AudioFrame::new(vec![vec![3277; 500]], 0).unwrap();
//! assert!(scheduler.process(&mut quiet).unwrap().is_none());
//!
//! let mut boundary = AudioFrame::new(vec![vec![3277; 500]], 1000).unwrap();
//! let decision = scheduler.process(&mut boundary).unwrap().unwrap();
//! assert!((decision.linear_gain - 10.0).abs() < 0.01);
//! ```

#![deny(unsafe_code)]

mod analyzer;
mod error;
mod gain;
mod scheduler;

pub use analyzer::{amplitude_to_dbfs, measure_peak_dbfs, PeakMeter};
pub use error::{LoudnessError, Result};
pub use gain::{apply_gain, compute_linear_gain, db_to_linear, GainDecision};
pub use scheduler::SegmentScheduler;

/// Default target ceiling in dBFS
pub const DEFAULT_TARGET_DBFS: f64 = 0.0;

/// Default segment length in milliseconds (two minutes)
pub const DEFAULT_SEGMENT_DURATION_MS: u64 = 120_000;
