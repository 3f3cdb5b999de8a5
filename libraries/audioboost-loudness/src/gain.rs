//! Gain calculation and application
//!
//! Gain is boost-only: a segment already at or above the target ceiling is
//! left alone, and silence is never amplified.

use audioboost_core::AudioFrame;
use std::fmt;

/// Convert decibels to a linear multiplier
#[inline]
pub fn db_to_linear(db: f64) -> f64 {
    10.0_f64.powf(db / 20.0)
}

/// Gain chosen for one segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GainDecision {
    /// Measured peak of the segment in dBFS (may be negative infinity)
    pub measured_dbfs: f64,
    /// Target ceiling in dBFS
    pub target_dbfs: f64,
    /// Gain actually applied in dB (0.0 when no boost)
    pub gain_db: f64,
    /// Linear multiplier matching `gain_db`
    pub linear_gain: f64,
}

impl GainDecision {
    /// Decide the gain for a segment peaking at `measured_dbfs`
    pub fn new(measured_dbfs: f64, target_dbfs: f64) -> Self {
        let gain_needed_db = target_dbfs - measured_dbfs;

        // Silence gives +inf here, NaN inputs give NaN
        if !gain_needed_db.is_finite() || gain_needed_db <= 0.0 {
            return Self::unity(measured_dbfs, target_dbfs);
        }

        Self {
            measured_dbfs,
            target_dbfs,
            gain_db: gain_needed_db,
            linear_gain: db_to_linear(gain_needed_db),
        }
    }

    fn unity(measured_dbfs: f64, target_dbfs: f64) -> Self {
        Self {
            measured_dbfs,
            target_dbfs,
            gain_db: 0.0,
            linear_gain: 1.0,
        }
    }

    /// Whether this decision changes any sample
    pub fn is_boost(&self) -> bool {
        self.linear_gain > 1.0
    }
}

impl fmt::Display for GainDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.measured_dbfs == f64::NEG_INFINITY {
            write!(f, "peak: silence, gain: +0.00 dB (x1.000)")
        } else {
            write!(
                f,
                "peak: {:.2} dBFS, gain: {:+.2} dB (x{:.3})",
                self.measured_dbfs, self.gain_db, self.linear_gain
            )
        }
    }
}

/// Linear multiplier that brings `measured_dbfs` up to `target_dbfs`
///
/// Returns exactly 1.0 when the measurement is already at or above the target,
/// or when it is negative infinity (silence).
pub fn compute_linear_gain(measured_dbfs: f64, target_dbfs: f64) -> f64 {
    GainDecision::new(measured_dbfs, target_dbfs).linear_gain
}

/// Multiply every sample of `frame` by `linear_gain`, in place
///
/// Results are rounded to the nearest integer and saturate at the 16-bit
/// limits. Timestamp and channel/sample counts are untouched. A gain of 1.0
/// or a non-finite gain leaves the samples unchanged.
pub fn apply_gain(frame: &mut AudioFrame, linear_gain: f64) {
    if linear_gain == 1.0 || !linear_gain.is_finite() {
        return;
    }

    for sample in frame.samples_mut() {
        let adjusted = (f64::from(*sample) * linear_gain)
            .round()
            .clamp(f64::from(i16::MIN), f64::from(i16::MAX));
        *sample = adjusted as i16;
    }
}
