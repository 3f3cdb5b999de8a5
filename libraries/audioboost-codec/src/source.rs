/// Audio decoding using Symphonia
use crate::adapter::frame_from_buffer;
use crate::error::{CodecError, Result};
use audioboost_core::{AudioFrame, FrameSource, StreamInfo, TimeBase};
use std::path::Path;
use symphonia::core::codecs::{CodecParameters, Decoder, DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::{FormatOptions, FormatReader};
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::debug;

/// Decoder handle over the first audio stream of a file
///
/// Supports: MP3, FLAC, OGG/Vorbis, WAV, AAC (ADTS and MP4/M4A)
///
/// Dropping the source closes the file and releases the decoder.
pub struct SymphoniaSource {
    /// Format reader (container parser)
    format: Box<dyn FormatReader>,
    /// Audio decoder
    decoder: Box<dyn Decoder>,
    /// Track being decoded
    track_id: u32,
    /// Parameters of that track
    info: StreamInfo,
    /// Frames handed out so far
    frames_decoded: u64,
}

impl SymphoniaSource {
    /// Open a file and create a decoder for its first audio stream
    ///
    /// # Errors
    /// Returns an error if the file is missing or unreadable, its format is
    /// not recognized, it has no audio stream, or no decoder supports the codec
    pub fn open(path: &Path) -> Result<Self> {
        let format = open_format(path)?;

        let track = format
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .ok_or(CodecError::NoAudioTrack)?;

        let track_id = track.id;
        let info = stream_info(&track.codec_params)?;

        let decoder = symphonia::default::get_codecs()
            .make(&track.codec_params, &DecoderOptions::default())
            .map_err(|e| CodecError::UnsupportedCodec(e.to_string()))?;

        debug!(
            path = %path.display(),
            codec = %info.codec,
            sample_rate = info.sample_rate,
            channels = info.channels,
            "Opened audio stream"
        );

        Ok(Self {
            format,
            decoder,
            track_id,
            info,
            frames_decoded: 0,
        })
    }

    /// Number of frames decoded so far
    pub fn frames_decoded(&self) -> u64 {
        self.frames_decoded
    }

    /// Decode the next frame of the selected track
    ///
    /// A packet the decoder rejects ends the run with `CodecError::Decode`;
    /// it is never skipped.
    fn next_frame(&mut self) -> Result<Option<AudioFrame>> {
        loop {
            // Get the next packet
            let packet = match self.format.next_packet() {
                Ok(packet) => packet,
                Err(SymphoniaError::IoError(e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    debug!(frames = self.frames_decoded(), "End of stream");
                    return Ok(None);
                }
                Err(SymphoniaError::ResetRequired) => return Err(CodecError::StreamChanged),
                Err(e) => return Err(CodecError::ReadPacket(e.to_string())),
            };

            // Skip packets that are not for our track
            if packet.track_id() != self.track_id {
                continue;
            }

            let pts = i64::try_from(packet.ts())
                .map_err(|_| CodecError::Decode(format!("timestamp {} out of range", packet.ts())))?;

            // Fatal, unlike a playback loop that would skip the packet
            let decoded = self
                .decoder
                .decode(&packet)
                .map_err(|e| CodecError::Decode(e.to_string()))?;

            let frame = frame_from_buffer(decoded, pts)?;
            self.frames_decoded += 1;
            return Ok(Some(frame));
        }
    }
}

impl FrameSource for SymphoniaSource {
    fn stream_info(&self) -> &StreamInfo {
        &self.info
    }

    fn decode_next(&mut self) -> audioboost_core::Result<Option<AudioFrame>> {
        Ok(self.next_frame()?)
    }
}

/// Read the parameters of a file's first audio stream without decoding it
///
/// # Errors
/// Returns an error if the file is missing or unreadable, its format is not
/// recognized, or it has no audio stream
pub fn probe(path: &Path) -> Result<StreamInfo> {
    let format = open_format(path)?;
    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or(CodecError::NoAudioTrack)?;
    stream_info(&track.codec_params)
}

fn open_format(path: &Path) -> Result<Box<dyn FormatReader>> {
    // Check if file exists
    if !path.exists() {
        return Err(CodecError::FileNotFound(path.display().to_string()));
    }

    let file = std::fs::File::open(path).map_err(|cause| CodecError::Open {
        path: path.display().to_string(),
        cause,
    })?;

    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    // Create a hint to help the format registry guess the format
    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| CodecError::Probe(e.to_string()))?;

    Ok(probed.format)
}

fn stream_info(params: &CodecParameters) -> Result<StreamInfo> {
    let sample_rate = params
        .sample_rate
        .ok_or(CodecError::MissingParameter("sample rate"))?;
    let channels = params
        .channels
        .ok_or(CodecError::MissingParameter("channel layout"))?;

    let codec = symphonia::default::get_codecs()
        .get_codec(params.codec)
        .map(|d| d.short_name.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    Ok(StreamInfo {
        sample_rate,
        channels: channels.count() as u16,
        channel_layout: Some(format!("{:?}", channels)),
        time_base: params
            .time_base
            .and_then(|tb| TimeBase::new(tb.numer, tb.denom)),
        n_frames: params.n_frames,
        codec,
    })
}
