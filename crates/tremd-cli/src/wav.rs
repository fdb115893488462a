//! WAV file reading and writing, one `Vec<f32>` per channel.

use hound::{SampleFormat, WavReader, WavWriter};
use std::path::Path;

/// Error types for WAV I/O.
#[derive(Debug, thiserror::Error)]
pub enum WavError {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Bit depth the writer does not produce.
    #[error("unsupported bit depth {0} (expected 16, 24, or 32)")]
    UnsupportedBitDepth(u16),

    /// Channels passed to the writer differ in length.
    #[error("channel {channel} has {len} frames, expected {expected}")]
    RaggedChannels {
        /// Offending channel.
        channel: usize,
        /// Its length.
        len: usize,
        /// Length of channel 0.
        expected: usize,
    },
}

/// Convenience result type for WAV I/O.
pub type Result<T> = std::result::Result<T, WavError>;

/// WAV file specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Number of audio channels.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample (16, 24, or 32).
    pub bits_per_sample: u16,
}

impl Default for WavSpec {
    fn default() -> Self {
        Self {
            channels: 1,
            sample_rate: 48000,
            bits_per_sample: 32,
        }
    }
}

impl From<hound::WavSpec> for WavSpec {
    fn from(spec: hound::WavSpec) -> Self {
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
        }
    }
}

impl From<WavSpec> for hound::WavSpec {
    fn from(spec: WavSpec) -> Self {
        hound::WavSpec {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            sample_format: if spec.bits_per_sample == 32 {
                SampleFormat::Float
            } else {
                SampleFormat::Int
            },
        }
    }
}

/// Reads a WAV file into one buffer per channel.
///
/// Integer samples are scaled to `[-1, 1)`.
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(Vec<Vec<f32>>, WavSpec)> {
    let reader = WavReader::open(path)?;
    let spec = WavSpec::from(reader.spec());
    let channels = usize::from(spec.channels.max(1));

    let interleaved: Vec<f32> = match reader.spec().sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    Ok((deinterleave(&interleaved, channels), spec))
}

/// Writes one buffer per channel. `spec.channels` is taken from
/// `channels.len()`.
pub fn write_wav<P: AsRef<Path>>(path: P, channels: &[Vec<f32>], spec: WavSpec) -> Result<()> {
    if !matches!(spec.bits_per_sample, 16 | 24 | 32) {
        return Err(WavError::UnsupportedBitDepth(spec.bits_per_sample));
    }
    let frames = channels.first().map_or(0, Vec::len);
    if let Some((channel, samples)) = channels
        .iter()
        .enumerate()
        .find(|(_, samples)| samples.len() != frames)
    {
        return Err(WavError::RaggedChannels {
            channel,
            len: samples.len(),
            expected: frames,
        });
    }

    let spec = WavSpec {
        channels: channels.len().max(1) as u16,
        ..spec
    };
    let mut writer = WavWriter::create(path, hound::WavSpec::from(spec))?;
    let max_val = (1i64 << (spec.bits_per_sample - 1)) as f32;

    for frame in 0..frames {
        for samples in channels {
            let sample = samples[frame];
            if spec.bits_per_sample == 32 {
                writer.write_sample(sample)?;
            } else {
                let int_sample = (sample * max_val).clamp(-max_val, max_val - 1.0) as i32;
                writer.write_sample(int_sample)?;
            }
        }
    }

    writer.finalize()?;
    Ok(())
}

/// Splits interleaved frames into per-channel buffers. A trailing partial
/// frame is dropped.
pub fn deinterleave(interleaved: &[f32], channels: usize) -> Vec<Vec<f32>> {
    let channels = channels.max(1);
    let frames = interleaved.len() / channels;
    let mut out = vec![Vec::with_capacity(frames); channels];
    for frame in interleaved.chunks_exact(channels) {
        for (buffer, &sample) in out.iter_mut().zip(frame) {
            buffer.push(sample);
        }
    }
    out
}
