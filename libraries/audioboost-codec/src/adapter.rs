/// Conversion of Symphonia buffers into `AudioFrame`s
use crate::error::{CodecError, Result};
use audioboost_core::AudioFrame;
use symphonia::core::audio::{AudioBuffer, AudioBufferRef, Signal};
use symphonia::core::conv::IntoSample;
use symphonia::core::sample::Sample;

/// Convert a decoded buffer into a planar 16-bit frame
///
/// Integer formats are rescaled to 16 bits. Floating-point buffers are checked
/// for NaN/Inf first; any non-finite sample fails the conversion, as does a
/// buffer without channels.
pub fn frame_from_buffer(decoded: AudioBufferRef<'_>, pts: i64) -> Result<AudioFrame> {
    let channels = match decoded {
        AudioBufferRef::F32(buf) => {
            if !all_finite(&*buf, f32::is_finite) {
                return Err(CodecError::NonFiniteSamples { pts });
            }
            planar_i16(&*buf)
        }
        AudioBufferRef::F64(buf) => {
            if !all_finite(&*buf, f64::is_finite) {
                return Err(CodecError::NonFiniteSamples { pts });
            }
            planar_i16(&*buf)
        }
        AudioBufferRef::S32(buf) => planar_i16(&*buf),
        AudioBufferRef::S24(buf) => planar_i16(&*buf),
        AudioBufferRef::S16(buf) => planar_i16(&*buf),
        AudioBufferRef::S8(buf) => planar_i16(&*buf),
        AudioBufferRef::U32(buf) => planar_i16(&*buf),
        AudioBufferRef::U24(buf) => planar_i16(&*buf),
        AudioBufferRef::U16(buf) => planar_i16(&*buf),
        AudioBufferRef::U8(buf) => planar_i16(&*buf),
    };

    AudioFrame::new(channels, pts).map_err(|e| CodecError::InvalidFrame(e.to_string()))
}

fn all_finite<T, F>(buf: &AudioBuffer<T>, is_finite: F) -> bool
where
    T: Sample,
    F: Fn(T) -> bool,
{
    (0..buf.spec().channels.count()).all(|ch| buf.chan(ch).iter().all(|&s| is_finite(s)))
}

fn planar_i16<T>(buf: &AudioBuffer<T>) -> Vec<Vec<i16>>
where
    T: Sample + IntoSample<i16>,
{
    (0..buf.spec().channels.count())
        .map(|ch| buf.chan(ch).iter().map(|&s| s.into_sample()).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;
    use symphonia::core::audio::{Channels, SignalSpec};

    fn stereo_spec() -> SignalSpec {
        SignalSpec::new(44_100, Channels::FRONT_LEFT | Channels::FRONT_RIGHT)
    }

    #[test]
    fn s16_buffer_is_copied_verbatim() {
        let mut buf = AudioBuffer::<i16>::new(4, stereo_spec());
        buf.render_reserved(Some(4));
        buf.chan_mut(0).copy_from_slice(&[1, -2, 3, i16::MIN]);
        buf.chan_mut(1).copy_from_slice(&[i16::MAX, 0, 0, 7]);

        let frame = frame_from_buffer(AudioBufferRef::S16(Cow::Borrowed(&buf)), 12).unwrap();
        assert_eq!(frame.pts(), 12);
        assert_eq!(frame.channel(0), Some(&[1, -2, 3, i16::MIN][..]));
        assert_eq!(frame.channel(1), Some(&[i16::MAX, 0, 0, 7][..]));
    }

    #[test]
    fn s32_buffer_is_rescaled() {
        let mut buf = AudioBuffer::<i32>::new(2, stereo_spec());
        buf.render_reserved(Some(2));
        buf.chan_mut(0).copy_from_slice(&[i32::MAX, i32::MIN]);
        buf.chan_mut(1).copy_from_slice(&[0, 1 << 16]);

        let frame = frame_from_buffer(AudioBufferRef::S32(Cow::Borrowed(&buf)), 0).unwrap();
        assert_eq!(frame.channel(0), Some(&[i16::MAX, i16::MIN][..]));
        assert_eq!(frame.channel(1), Some(&[0, 1][..]));
    }

    #[test]
    fn nan_samples_are_rejected() {
        let mut buf = AudioBuffer::<f32>::new(3, stereo_spec());
        buf.render_reserved(Some(3));
        buf.chan_mut(1)[2] = f32::NAN;

        let result = frame_from_buffer(AudioBufferRef::F32(Cow::Borrowed(&buf)), 33);
        assert!(matches!(result, Err(CodecError::NonFiniteSamples { pts: 33 })));
    }

    #[test]
    fn infinite_samples_are_rejected() {
        let mut buf = AudioBuffer::<f64>::new(3, stereo_spec());
        buf.render_reserved(Some(3));
        buf.chan_mut(0)[0] = f64::INFINITY;

        let result = frame_from_buffer(AudioBufferRef::F64(Cow::Borrowed(&buf)), 0);
        assert!(matches!(result, Err(CodecError::NonFiniteSamples { .. })));
    }

    #[test]
    fn finite_float_buffer_converts() {
        let mut buf = AudioBuffer::<f32>::new(2, stereo_spec());
        buf.render_reserved(Some(2));
        buf.chan_mut(0).copy_from_slice(&[0.0, 0.5]);
        buf.chan_mut(1).copy_from_slice(&[-0.5, 0.0]);

        let frame = frame_from_buffer(AudioBufferRef::F32(Cow::Borrowed(&buf)), 0).unwrap();
        assert_eq!(frame.channel(0).unwrap()[0], 0);
        assert!((i32::from(frame.channel(0).unwrap()[1]) - 16_384).abs() <= 1);
        assert!((i32::from(frame.channel(1).unwrap()[0]) + 16_384).abs() <= 1);
    }
}
