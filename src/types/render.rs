//! RenderReport type describing a written WAV file.
//!
//! Reports are identified by a deterministic render_id computed from the
//! render parameters and the PCM digest, so identical runs produce identical
//! reports.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::PathBuf;

use crate::error::{Result, WavegenError};
use crate::types::{AudioFormat, WaveformSpec};

/// Source label used for mixed files.
pub const COMBINED_SOURCE: &str = "combined";

/// Summary of one WAV file written by the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderReport {
    /// First 16 hex characters of SHA256 over the render parameters.
    pub render_id: String,

    /// Where the file was written.
    pub path: PathBuf,

    /// Wave shape token, or "combined".
    pub source: String,

    /// Frequency as given by the caller, before any scaling.
    pub requested_frequency_hz: Option<f64>,

    /// Frequency the generator actually used.
    pub frequency_hz: Option<f64>,

    /// Clamped amplitude.
    pub amplitude: Option<f64>,

    pub channels: u16,
    pub sample_rate: u32,
    pub bits_per_sample: u16,
    pub frame_count: u32,

    /// Playback duration in seconds.
    pub duration_sec: f64,

    /// Hex SHA256 of the `data` chunk payload.
    pub pcm_sha256: String,
}

impl RenderReport {
    /// Creates a report for a synthesized waveform.
    pub fn for_waveform(
        path: PathBuf,
        spec: &WaveformSpec,
        requested_frequency_hz: f64,
        format: &AudioFormat,
        pcm_sha256: String,
    ) -> Self {
        let source = spec.shape().as_str().to_string();
        let frequency_hz = Some(spec.frequency_hz());
        let amplitude = Some(spec.amplitude());
        let render_id = compute_render_id(&source, frequency_hz, amplitude, format, &pcm_sha256);
        Self {
            render_id,
            path,
            source,
            requested_frequency_hz: Some(requested_frequency_hz),
            frequency_hz,
            amplitude,
            channels: format.channels,
            sample_rate: format.sample_rate,
            bits_per_sample: format.bits_per_sample,
            frame_count: format.frame_count,
            duration_sec: format.duration_seconds(),
            pcm_sha256,
        }
    }

    /// Creates a report for a file mixed from two inputs.
    pub fn for_combined(path: PathBuf, format: &AudioFormat, pcm_sha256: String) -> Self {
        let render_id = compute_render_id(COMBINED_SOURCE, None, None, format, &pcm_sha256);
        Self {
            render_id,
            path,
            source: COMBINED_SOURCE.to_string(),
            requested_frequency_hz: None,
            frequency_hz: None,
            amplitude: None,
            channels: format.channels,
            sample_rate: format.sample_rate,
            bits_per_sample: format.bits_per_sample,
            frame_count: format.frame_count,
            duration_sec: format.duration_seconds(),
            pcm_sha256,
        }
    }

    /// Serializes the report as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            WavegenError::io("Failed to serialize render report", std::io::Error::from(e))
        })
    }
}

/// Computes a deterministic render ID.
///
/// The ID is the first 16 hex characters of the SHA256 hash of:
/// `{source}:{frequency}:{amplitude}:{channels}:{sample_rate}:{frame_count}:{pcm_sha256}`
/// with absent values written as `-`.
pub fn compute_render_id(
    source: &str,
    frequency_hz: Option<f64>,
    amplitude: Option<f64>,
    format: &AudioFormat,
    pcm_sha256: &str,
) -> String {
    let show = |value: Option<f64>| value.map_or_else(|| "-".to_string(), |v| v.to_string());
    let input = format!(
        "{}:{}:{}:{}:{}:{}:{}",
        source,
        show(frequency_hz),
        show(amplitude),
        format.channels,
        format.sample_rate,
        format.frame_count,
        pcm_sha256
    );
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let result = hasher.finalize();
    // Take first 8 bytes (16 hex chars)
    hex::encode(&result[..8])
}
