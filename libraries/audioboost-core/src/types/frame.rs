/// Decoded audio frame
use crate::error::{BoostError, Result};

/// A decoded unit of audio as planar signed 16-bit samples
///
/// Every channel holds exactly `sample_count()` samples. The timestamp is in
/// the stream's time-base units (see [`crate::TimeBase`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioFrame {
    channels: Vec<Vec<i16>>,
    pts: i64,
}

impl AudioFrame {
    /// Create a frame from per-channel sample vectors
    ///
    /// # Errors
    /// Returns `BoostError::Data` if there are no channels or the channels
    /// have different lengths
    pub fn new(channels: Vec<Vec<i16>>, pts: i64) -> Result<Self> {
        let Some(first) = channels.first() else {
            return Err(BoostError::data("frame has no channels"));
        };

        let expected = first.len();
        if let Some((index, channel)) = channels
            .iter()
            .enumerate()
            .find(|(_, c)| c.len() != expected)
        {
            return Err(BoostError::data(format!(
                "channel {} has {} samples, expected {}",
                index,
                channel.len(),
                expected
            )));
        }

        Ok(Self { channels, pts })
    }

    /// Create a frame of digital silence
    pub fn silent(channel_count: usize, sample_count: usize, pts: i64) -> Self {
        Self {
            channels: vec![vec![0; sample_count]; channel_count.max(1)],
            pts,
        }
    }

    /// Number of channels (always at least 1)
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Number of samples per channel
    pub fn sample_count(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    /// Check if the frame carries no samples
    pub fn is_empty(&self) -> bool {
        self.sample_count() == 0
    }

    /// Presentation timestamp in time-base units
    pub fn pts(&self) -> i64 {
        self.pts
    }

    /// Samples of one channel
    pub fn channel(&self, index: usize) -> Option<&[i16]> {
        self.channels.get(index).map(Vec::as_slice)
    }

    /// All channels in order
    pub fn channels(&self) -> &[Vec<i16>] {
        &self.channels
    }

    /// Iterate over every sample of every channel
    pub fn samples(&self) -> impl Iterator<Item = i16> + '_ {
        self.channels.iter().flatten().copied()
    }

    /// Mutable access to every sample of every channel
    ///
    /// Channel and sample counts cannot change through this view.
    pub fn samples_mut(&mut self) -> impl Iterator<Item = &mut i16> + '_ {
        self.channels.iter_mut().flat_map(|c| c.iter_mut())
    }

    /// Interleave the channels (`[L, R, L, R, ...]` for stereo)
    pub fn to_interleaved(&self) -> Vec<i16> {
        let frames = self.sample_count();
        let mut interleaved = Vec::with_capacity(frames * self.channel_count());
        for i in 0..frames {
            for channel in &self.channels {
                interleaved.push(channel[i]);
            }
        }
        interleaved
    }
}
