/// Decode → boost → encode driver
use crate::config::BoostConfig;
use audioboost_codec::{SymphoniaSource, WavSink};
use audioboost_core::{
    AudioFrame, BoostError, EncodeStatus, FrameSink, FrameSource, Result, StreamInfo,
};
use audioboost_loudness::{amplitude_to_dbfs, GainDecision, PeakMeter, SegmentScheduler};
use std::fmt;
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// One correction fired by the scheduler
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentCorrection {
    /// Timestamp of the frame that carried the correction
    pub pts: i64,
    /// Same timestamp in seconds
    pub seconds: f64,
    /// Gain chosen for the segment that closed at `pts`
    pub decision: GainDecision,
}

/// Outcome of a run
#[derive(Debug, Clone, PartialEq)]
pub struct BoostReport {
    /// Parameters of the decoded stream
    pub stream: StreamInfo,
    /// Frames decoded and encoded
    pub frames: u64,
    /// Samples per channel decoded and encoded
    pub samples: u64,
    /// Corrections in stream order
    pub corrections: Vec<SegmentCorrection>,
    /// Frames of the last, unclosed segment (never corrected)
    pub trailing_frames: u64,
    /// Peak of the decoded input
    pub input_peak: u32,
    /// Peak of the encoded output
    pub output_peak: u32,
}

impl BoostReport {
    /// Corrections that changed samples
    pub fn boosted_segments(&self) -> usize {
        self.corrections
            .iter()
            .filter(|c| c.decision.is_boost())
            .count()
    }

    /// Input peak in dBFS
    pub fn input_peak_dbfs(&self) -> f64 {
        amplitude_to_dbfs(self.input_peak)
    }

    /// Output peak in dBFS
    pub fn output_peak_dbfs(&self) -> f64 {
        amplitude_to_dbfs(self.output_peak)
    }
}

impl fmt::Display for BoostReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Processed {} frames ({:.2} s)",
            self.frames,
            self.samples as f64 / f64::from(self.stream.sample_rate.max(1))
        )?;
        writeln!(
            f,
            "Segments closed: {} ({} boosted, {} trailing frames uncorrected)",
            self.corrections.len(),
            self.boosted_segments(),
            self.trailing_frames
        )?;
        for correction in &self.corrections {
            writeln!(f, "  at {:>10.3} s  {}", correction.seconds, correction.decision)?;
        }
        write!(
            f,
            "Peak: {:.2} dBFS in, {:.2} dBFS out",
            self.input_peak_dbfs(),
            self.output_peak_dbfs()
        )
    }
}

/// Encoder that discards every frame, used for dry runs
#[derive(Debug, Default)]
pub struct NullSink {
    frames: u64,
}

impl NullSink {
    /// Frames offered so far
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl FrameSink for NullSink {
    fn encode(&mut self, _frame: &AudioFrame) -> Result<EncodeStatus> {
        self.frames += 1;
        Ok(EncodeStatus::Accepted)
    }

    fn finalize(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Run the scheduler over every frame of `source`, writing to `sink`
///
/// A sink that reports `NotReady` is offered the same frame again until it
/// accepts it, or until `encoder_timeout_ms` elapses when one is configured.
/// The sink is finalized only when the whole stream was processed. Any error
/// aborts the run immediately.
pub fn run<S, K>(source: &mut S, sink: &mut K, config: &BoostConfig) -> Result<BoostReport>
where
    S: FrameSource + ?Sized,
    K: FrameSink + ?Sized,
{
    config.validate()?;

    let stream = source.stream_info().clone();
    let time_base = stream.effective_time_base();
    let duration = time_base.ticks_from_millis(config.segment_duration_ms);
    let mut scheduler = SegmentScheduler::new(duration, config.target_dbfs)?;

    info!(
        sample_rate = stream.sample_rate,
        channels = stream.channels,
        segment_ticks = duration,
        target_dbfs = config.target_dbfs,
        "Starting boost"
    );

    let mut input_meter = PeakMeter::new();
    let mut output_meter = PeakMeter::new();
    let mut corrections = Vec::new();
    let mut frames = 0u64;
    let mut samples = 0u64;

    while let Some(mut frame) = source.decode_next()? {
        input_meter.add_frame(&frame);

        if let Some(decision) = scheduler.process(&mut frame)? {
            corrections.push(SegmentCorrection {
                pts: frame.pts(),
                seconds: time_base.seconds(frame.pts()),
                decision,
            });
        }

        output_meter.add_frame(&frame);
        encode_with_retry(sink, &frame, config.encoder_timeout())?;

        frames += 1;
        samples += frame.sample_count() as u64;
    }

    let trailing_frames = scheduler.pending_frames();
    if trailing_frames > 0 {
        warn!(
            frames = trailing_frames,
            segment_start = scheduler.segment_start(),
            "Final partial segment left uncorrected"
        );
    }

    sink.finalize()?;

    let report = BoostReport {
        stream,
        frames,
        samples,
        corrections,
        trailing_frames,
        input_peak: input_meter.peak(),
        output_peak: output_meter.peak(),
    };

    info!(
        frames = report.frames,
        segments = report.corrections.len(),
        boosted = report.boosted_segments(),
        "Boost finished"
    );

    Ok(report)
}

/// Boost `input` into a 16-bit WAV file at `output`
///
/// On failure the partially written output is removed.
pub fn boost(input: &Path, output: &Path, config: &BoostConfig) -> Result<BoostReport> {
    config.validate()?;

    let mut source = SymphoniaSource::open(input)?;
    let mut sink = WavSink::create(output, source.stream_info())?;

    let result = run(&mut source, &mut sink, config);
    drop(sink);

    if result.is_err() {
        if let Err(e) = std::fs::remove_file(output) {
            warn!(path = %output.display(), error = %e, "Failed to remove partial output");
        } else {
            debug!(path = %output.display(), "Removed partial output");
        }
    }

    result
}

/// Dry run over `input`: report what `boost` would do without writing anything
pub fn analyze(input: &Path, config: &BoostConfig) -> Result<BoostReport> {
    let mut source = SymphoniaSource::open(input)?;
    run(&mut source, &mut NullSink::default(), config)
}

fn encode_with_retry<K>(
    sink: &mut K,
    frame: &AudioFrame,
    timeout: Option<Duration>,
) -> Result<()>
where
    K: FrameSink + ?Sized,
{
    let started = Instant::now();
    let mut polls = 0u64;

    loop {
        match sink.encode(frame)? {
            EncodeStatus::Accepted => {
                if polls > 0 {
                    debug!(pts = frame.pts(), polls, "Encoder ready again");
                }
                return Ok(());
            }
            EncodeStatus::NotReady => {
                if polls == 0 {
                    warn!(pts = frame.pts(), "Encoder not ready, waiting");
                }
                polls += 1;

                if let Some(timeout) = timeout {
                    if started.elapsed() >= timeout {
                        return Err(BoostError::codec(
                            "encoding frame",
                            format!(
                                "encoder still not ready after {:?} ({} polls, pts {})",
                                timeout,
                                polls,
                                frame.pts()
                            ),
                        ));
                    }
                }

                thread::yield_now();
            }
        }
    }
}
