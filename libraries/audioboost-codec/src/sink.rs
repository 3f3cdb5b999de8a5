/// 16-bit PCM WAV encoding using hound
use crate::error::{CodecError, Result};
use audioboost_core::{AudioFrame, EncodeStatus, FrameSink, StreamInfo};
use hound::{SampleFormat, WavSpec, WavWriter};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Encoder handle writing a 16-bit PCM WAV file
///
/// The header is patched with the final sizes by [`FrameSink::finalize`].
/// Dropping an unfinalized sink still closes the file.
pub struct WavSink {
    writer: Option<WavWriter<BufWriter<File>>>,
    path: PathBuf,
    channels: u16,
    frames_written: u64,
}

impl WavSink {
    /// Create the output file with the sample rate and channel count of `info`
    ///
    /// # Errors
    /// Returns an error if the extension is not `.wav` (a missing extension is
    /// accepted) or the file cannot be created
    pub fn create(path: &Path, info: &StreamInfo) -> Result<Self> {
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            if !ext.eq_ignore_ascii_case("wav") {
                return Err(CodecError::UnsupportedOutput(ext.to_string()));
            }
        }

        let spec = WavSpec {
            channels: info.channels,
            sample_rate: info.sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };

        let writer = WavWriter::create(path, spec).map_err(|e| CodecError::CreateOutput {
            path: path.display().to_string(),
            cause: e.to_string(),
        })?;

        debug!(path = %path.display(), ?spec, "Created WAV output");

        Ok(Self {
            writer: Some(writer),
            path: path.to_path_buf(),
            channels: info.channels,
            frames_written: 0,
        })
    }

    /// Samples per channel written so far
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    fn write_frame(&mut self, frame: &AudioFrame) -> Result<()> {
        if frame.channel_count() != usize::from(self.channels) {
            return Err(CodecError::ChannelMismatch {
                expected: self.channels,
                actual: frame.channel_count(),
            });
        }

        let writer = self.writer.as_mut().ok_or(CodecError::Finalized)?;
        for sample in frame.to_interleaved() {
            writer.write_sample(sample)?;
        }
        self.frames_written += frame.sample_count() as u64;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        let writer = self.writer.take().ok_or(CodecError::Finalized)?;
        writer.finalize()?;
        debug!(
            path = %self.path.display(),
            frames = self.frames_written,
            "Finalized WAV output"
        );
        Ok(())
    }
}

impl FrameSink for WavSink {
    fn encode(&mut self, frame: &AudioFrame) -> audioboost_core::Result<EncodeStatus> {
        self.write_frame(frame)?;
        Ok(EncodeStatus::Accepted)
    }

    fn finalize(&mut self) -> audioboost_core::Result<()> {
        Ok(self.finish()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_wav_extension() {
        let dir = tempfile::tempdir().unwrap();
        let info = StreamInfo::new(44_100, 2);
        let result = WavSink::create(&dir.path().join("out.m4a"), &info);
        assert!(matches!(result, Err(CodecError::UnsupportedOutput(ext)) if ext == "m4a"));
    }

    #[test]
    fn rejects_unwritable_destination() {
        let info = StreamInfo::new(44_100, 2);
        let result = WavSink::create(Path::new("/nonexistent/dir/out.wav"), &info);
        assert!(matches!(result, Err(CodecError::CreateOutput { .. })));
    }

    #[test]
    fn rejects_channel_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let info = StreamInfo::new(44_100, 2);
        let mut sink = WavSink::create(&dir.path().join("out.wav"), &info).unwrap();
        let result = sink.write_frame(&AudioFrame::silent(1, 16, 0));
        assert!(matches!(
            result,
            Err(CodecError::ChannelMismatch {
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn finalize_twice_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let info = StreamInfo::new(8_000, 1);
        let mut sink = WavSink::create(&dir.path().join("out.WAV"), &info).unwrap();
        sink.finish().unwrap();
        assert!(matches!(sink.finish(), Err(CodecError::Finalized)));
        assert!(matches!(
            sink.write_frame(&AudioFrame::silent(1, 4, 0)),
            Err(CodecError::Finalized)
        ));
    }
}
