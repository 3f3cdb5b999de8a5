/// Stream-level parameters
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Seconds per timestamp tick, as the rational `numer / denom`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeBase {
    /// Numerator
    pub numer: u32,
    /// Denominator
    pub denom: u32,
}

impl TimeBase {
    /// Create a new time base
    ///
    /// Returns `None` if either part is zero.
    pub fn new(numer: u32, denom: u32) -> Option<Self> {
        (numer != 0 && denom != 0).then_some(Self { numer, denom })
    }

    /// One tick per sample at the given rate
    pub fn per_sample(sample_rate: u32) -> Option<Self> {
        Self::new(1, sample_rate)
    }

    /// Convert milliseconds into ticks, rounding up, never less than one tick
    pub fn ticks_from_millis(&self, millis: u64) -> i64 {
        let numerator = u128::from(millis) * u128::from(self.denom);
        let denominator = 1000 * u128::from(self.numer);
        let ticks = numerator.div_ceil(denominator).max(1);
        i64::try_from(ticks).unwrap_or(i64::MAX)
    }

    /// Convert a tick count into seconds
    pub fn seconds(&self, ticks: i64) -> f64 {
        ticks as f64 * f64::from(self.numer) / f64::from(self.denom)
    }
}

impl fmt::Display for TimeBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numer, self.denom)
    }
}

/// Parameters of the audio stream selected for processing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamInfo {
    /// Sample rate in Hz
    pub sample_rate: u32,

    /// Number of channels
    pub channels: u16,

    /// Human-readable channel layout (e.g. "FL|FR"), when the container declares one
    pub channel_layout: Option<String>,

    /// Time base of the stream's timestamps, when declared
    pub time_base: Option<TimeBase>,

    /// Total samples per channel, when known up front
    pub n_frames: Option<u64>,

    /// Short codec name
    pub codec: String,
}

impl StreamInfo {
    /// Create stream info with only the mandatory fields
    pub fn new(sample_rate: u32, channels: u16) -> Self {
        Self {
            sample_rate,
            channels,
            channel_layout: None,
            time_base: None,
            n_frames: None,
            codec: "pcm_s16le".to_string(),
        }
    }

    /// Time base used for segment scheduling
    ///
    /// Falls back to one tick per sample when the stream declares none.
    pub fn effective_time_base(&self) -> TimeBase {
        self.time_base
            .or_else(|| TimeBase::per_sample(self.sample_rate))
            .unwrap_or(TimeBase { numer: 1, denom: 1 })
    }

    /// Convert a duration in milliseconds into stream ticks
    pub fn ticks_from_millis(&self, millis: u64) -> i64 {
        self.effective_time_base().ticks_from_millis(millis)
    }

    /// Total duration, when the frame count is known
    pub fn duration(&self) -> Option<Duration> {
        if self.sample_rate == 0 {
            return None;
        }
        self.n_frames
            .map(|n| Duration::from_secs_f64(n as f64 / f64::from(self.sample_rate)))
    }
}

impl fmt::Display for StreamInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Codec:          {}", self.codec)?;
        writeln!(f, "Sample rate:    {} Hz", self.sample_rate)?;
        writeln!(f, "Channels:       {}", self.channels)?;
        match &self.channel_layout {
            Some(layout) => writeln!(f, "Channel layout: {}", layout)?,
            None => writeln!(f, "Channel layout: unknown")?,
        }
        match self.duration() {
            Some(duration) => write!(f, "Duration:       {:.3} s", duration.as_secs_f64()),
            None => write!(f, "Duration:       unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_time_base_is_rejected() {
        assert!(TimeBase::new(0, 44_100).is_none());
        assert!(TimeBase::new(1, 0).is_none());
    }

    #[test]
    fn millis_to_sample_ticks() {
        let tb = TimeBase::per_sample(44_100).unwrap();
        // 120 s at 44.1 kHz
        assert_eq!(tb.ticks_from_millis(120_000), 5_292_000);
        assert_eq!(tb.ticks_from_millis(1), 45);
    }

    #[test]
    fn coarse_time_base_rounds_up_to_one_tick() {
        let tb = TimeBase::new(1, 1).unwrap();
        assert_eq!(tb.ticks_from_millis(500), 1);
        assert_eq!(tb.ticks_from_millis(0), 1);
        assert_eq!(tb.ticks_from_millis(2_500), 3);
    }

    #[test]
    fn missing_time_base_falls_back_to_sample_rate() {
        let info = StreamInfo::new(48_000, 2);
        assert_eq!(info.effective_time_base(), TimeBase::new(1, 48_000).unwrap());
        assert_eq!(info.ticks_from_millis(1_000), 48_000);
    }

    #[test]
    fn duration_from_frame_count() {
        let mut info = StreamInfo::new(44_100, 2);
        assert!(info.duration().is_none());
        info.n_frames = Some(88_200);
        assert!((info.duration().unwrap().as_secs_f64() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn stream_info_serializes() {
        let info = StreamInfo::new(44_100, 1);
        let json = serde_json::to_string(&info).unwrap();
        assert!(json.contains("\"sample_rate\":44100"));
    }
}
