//! Segment scheduling
//!
//! Splits a decoded stream into fixed-length windows by presentation timestamp
//! and fires one gain correction each time a window closes.

use crate::analyzer::{amplitude_to_dbfs, PeakMeter};
use crate::error::{LoudnessError, Result};
use crate::gain::{apply_gain, GainDecision};
use audioboost_core::AudioFrame;
use tracing::debug;

/// Boost scheduler over `[segment_start, segment_start + duration)` windows
///
/// Frames inside the current window only contribute to its running peak and
/// pass through unmodified. The first frame whose timestamp reaches the end of
/// the window closes it: the gain for the window's peak is applied to that
/// frame alone, and a new window starts at its timestamp.
///
/// Frames earlier in a window are never corrected retroactively; doing so
/// would require buffering the whole window before encoding. Whatever is
/// still accumulating when the stream ends is dropped without a correction.
///
/// # Example
///
/// ```
/// use audioboost_core::AudioFrame;
/// use audioboost_loudness::SegmentScheduler;
///
/// let mut scheduler = SegmentScheduler::new(100, -1.0).unwrap();
/// let mut frame = AudioFrame::silent(2, 64, 0);
/// assert!(scheduler.process(&mut frame).unwrap().is_none());
/// assert_eq!(scheduler.segment_start(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct SegmentScheduler {
    /// Window length in stream ticks
    duration: i64,
    /// Target ceiling in dBFS
    target_dbfs: f64,
    /// Start of the current window
    segment_start: i64,
    /// Peak of the frames seen in the current window
    meter: PeakMeter,
    /// Frames seen in the current window
    frames_in_segment: u64,
    /// Timestamp of the last frame processed
    last_pts: Option<i64>,
    /// Corrections fired so far
    corrections: u64,
}

impl SegmentScheduler {
    /// Create a scheduler with windows of `duration` ticks
    ///
    /// # Errors
    /// Returns an error if `duration` is not positive
    pub fn new(duration: i64, target_dbfs: f64) -> Result<Self> {
        if duration <= 0 {
            return Err(LoudnessError::InvalidSegmentDuration(duration));
        }

        Ok(Self {
            duration,
            target_dbfs,
            segment_start: 0,
            meter: PeakMeter::new(),
            frames_in_segment: 0,
            last_pts: None,
            corrections: 0,
        })
    }

    /// Feed one frame through the scheduler
    ///
    /// Returns the decision applied to `frame` when it closed a window, or
    /// `None` when it was accumulated and left untouched.
    ///
    /// # Errors
    /// Returns an error if the frame's timestamp is lower than the previous one
    pub fn process(&mut self, frame: &mut AudioFrame) -> Result<Option<GainDecision>> {
        let pts = frame.pts();
        if let Some(previous) = self.last_pts {
            if pts < previous {
                return Err(LoudnessError::TimestampRegression {
                    previous,
                    current: pts,
                });
            }
        }
        self.last_pts = Some(pts);

        if pts < self.segment_end() {
            self.meter.add_frame(frame);
            self.frames_in_segment += 1;
            return Ok(None);
        }

        let decision = GainDecision::new(self.peak_dbfs(), self.target_dbfs);
        apply_gain(frame, decision.linear_gain);
        self.corrections += 1;

        debug!(
            segment_start = self.segment_start,
            boundary_pts = pts,
            frames = self.frames_in_segment,
            samples = self.meter.samples_seen(),
            measured_dbfs = decision.measured_dbfs,
            gain_db = decision.gain_db,
            "Segment closed"
        );

        self.segment_start = pts;
        self.meter.reset();
        self.frames_in_segment = 0;

        Ok(Some(decision))
    }

    /// Window length in ticks
    pub fn duration(&self) -> i64 {
        self.duration
    }

    /// Target ceiling in dBFS
    pub fn target_dbfs(&self) -> f64 {
        self.target_dbfs
    }

    /// Start of the current window
    pub fn segment_start(&self) -> i64 {
        self.segment_start
    }

    /// Exclusive end of the current window
    pub fn segment_end(&self) -> i64 {
        self.segment_start.saturating_add(self.duration)
    }

    /// Running peak of the current window in dBFS
    pub fn peak_dbfs(&self) -> f64 {
        amplitude_to_dbfs(self.meter.peak())
    }

    /// Frames accumulated in the current (still open) window
    pub fn pending_frames(&self) -> u64 {
        self.frames_in_segment
    }

    /// Number of corrections fired so far
    pub fn corrections(&self) -> u64 {
        self.corrections
    }
}
