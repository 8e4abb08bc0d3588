//! AudioFormat type describing a PCM WAV header.

use hound::{SampleFormat, WavSpec};
use serde::{Deserialize, Serialize};

use crate::error::{Result, WavegenError};

/// Bits per channel sample. The encoder only produces 16-bit values.
pub const BITS_PER_SAMPLE: u16 = 16;

/// Size of the RIFF, `fmt ` and `data` chunk headers for plain PCM.
pub const WAV_HEADER_LEN: u64 = 44;

/// Encoding of the sample data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    /// Linear PCM (WAVE format tag 1).
    #[default]
    Uncompressed,
}

/// Header fields of a PCM WAV file.
///
/// `frame_count` must equal the number of frames actually written; the
/// writer refuses to finalize a file when they differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioFormat {
    /// Number of interleaved channels.
    pub channels: u16,

    /// Bits per channel sample (always 16).
    pub bits_per_sample: u16,

    /// Frames per second.
    pub sample_rate: u32,

    /// Total frames (one sample per channel each).
    pub frame_count: u32,

    /// Compression tag.
    pub compression: Compression,
}

impl AudioFormat {
    /// Creates an uncompressed 16-bit PCM format.
    pub fn pcm16(channels: u16, sample_rate: u32, frame_count: u32) -> Self {
        Self {
            channels,
            bits_per_sample: BITS_PER_SAMPLE,
            sample_rate,
            frame_count,
            compression: Compression::Uncompressed,
        }
    }

    /// Builds a format from a header read by hound.
    ///
    /// Only 16-bit integer PCM is accepted.
    pub fn from_wav_spec(spec: WavSpec, frame_count: u32) -> Result<Self> {
        if spec.sample_format != SampleFormat::Int || spec.bits_per_sample != BITS_PER_SAMPLE {
            return Err(WavegenError::invalid_format(format!(
                "Expected 16-bit integer PCM, found {}-bit {:?}",
                spec.bits_per_sample, spec.sample_format
            )));
        }
        Ok(Self::pcm16(spec.channels, spec.sample_rate, frame_count))
    }

    /// Returns the header description used by hound.
    pub fn wav_spec(&self) -> WavSpec {
        WavSpec {
            channels: self.channels,
            sample_rate: self.sample_rate,
            bits_per_sample: self.bits_per_sample,
            sample_format: SampleFormat::Int,
        }
    }

    /// Bytes per channel sample.
    pub fn sample_width_bytes(&self) -> u16 {
        self.bits_per_sample / 8
    }

    /// Bytes per frame across all channels.
    pub fn block_align(&self) -> u16 {
        self.channels.saturating_mul(self.sample_width_bytes())
    }

    /// Bytes per second of audio.
    pub fn byte_rate(&self) -> u32 {
        self.sample_rate.saturating_mul(self.block_align() as u32)
    }

    /// Size of the `data` chunk payload in bytes.
    pub fn data_len(&self) -> u64 {
        self.frame_count as u64 * self.block_align() as u64
    }

    /// Total file size in bytes, header included.
    pub fn file_len(&self) -> u64 {
        WAV_HEADER_LEN + self.data_len()
    }

    /// Playback duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.frame_count as f64 / self.sample_rate as f64
    }

    /// Returns true if two files can be mixed sample by sample.
    pub fn is_compatible_with(&self, other: &AudioFormat) -> bool {
        self == other
    }

    /// Validates the header fields.
    ///
    /// Returns an error message if validation fails, None otherwise.
    pub fn validate(&self) -> Option<String> {
        if self.channels == 0 {
            return Some("channel count must be > 0".to_string());
        }

        if self.bits_per_sample != BITS_PER_SAMPLE {
            return Some(format!(
                "bits_per_sample must be {}, got {}",
                BITS_PER_SAMPLE, self.bits_per_sample
            ));
        }

        if self.sample_rate == 0 {
            return Some("sample_rate must be > 0".to_string());
        }

        if self.sample_rate as u64 * self.block_align() as u64 > u32::MAX as u64 {
            return Some(format!("byte rate overflows for {} Hz", self.sample_rate));
        }

        // RIFF sizes are 32-bit and count everything after the first 8 bytes.
        if self.file_len() - 8 > u32::MAX as u64 {
            return Some(format!(
                "{} frames do not fit in a RIFF container",
                self.frame_count
            ));
        }

        None
    }
}
