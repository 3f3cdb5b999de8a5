//! Sample peak analysis
//!
//! Measures the largest absolute sample value over a frame or a run of frames
//! and expresses it in dBFS, where 0 dBFS is a sample of magnitude 32767.

use audioboost_core::{AudioFrame, FULL_SCALE};

/// Convert a peak magnitude to dBFS
///
/// Returns negative infinity for a zero peak (silence).
pub fn amplitude_to_dbfs(peak: u32) -> f64 {
    if peak == 0 {
        return f64::NEG_INFINITY;
    }
    20.0 * (f64::from(peak) / FULL_SCALE).log10()
}

/// Peak level of a single frame in dBFS
///
/// Negative infinity means the frame is digital silence (or empty).
pub fn measure_peak_dbfs(frame: &AudioFrame) -> f64 {
    let mut meter = PeakMeter::new();
    meter.add_frame(frame);
    meter.dbfs()
}

/// Running maximum of absolute sample magnitude
///
/// The peak is tracked in the linear domain and only converted to dBFS on
/// request, so accumulating frame by frame gives the same answer as measuring
/// the concatenated samples at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeakMeter {
    /// Largest |sample| seen so far (0..=32768)
    peak: u32,
    /// Samples folded in since the last reset (all channels)
    samples_seen: u64,
}

impl PeakMeter {
    /// Create an empty meter
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold every sample of a frame into the peak
    pub fn add_frame(&mut self, frame: &AudioFrame) {
        for channel in frame.channels() {
            self.add_samples(channel);
        }
    }

    /// Fold a slice of samples into the peak
    pub fn add_samples(&mut self, samples: &[i16]) {
        // unsigned_abs so that -32768 does not overflow
        let local = samples
            .iter()
            .map(|s| u32::from(s.unsigned_abs()))
            .max()
            .unwrap_or(0);
        self.peak = self.peak.max(local);
        self.samples_seen += samples.len() as u64;
    }

    /// Largest absolute sample value seen
    pub fn peak(&self) -> u32 {
        self.peak
    }

    /// Peak in dBFS (negative infinity when nothing but silence was seen)
    pub fn dbfs(&self) -> f64 {
        amplitude_to_dbfs(self.peak)
    }

    /// Number of samples folded in since the last reset
    pub fn samples_seen(&self) -> u64 {
        self.samples_seen
    }

    /// Forget everything
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
