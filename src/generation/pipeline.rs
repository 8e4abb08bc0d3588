//! Render pipeline.
//!
//! Resolves command-line tokens into a [`WaveformSpec`] and [`AudioFormat`],
//! then streams the generator through the quantizer into the WAV writer.

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info};

use crate::audio::pcm::{duplicate_channels, quantize_stream};
use crate::audio::wav::{write_wav, write_wav_to_buffer};
use crate::config::SynthConfig;
use crate::error::{Result, WavegenError};
use crate::types::{AudioFormat, RenderReport, WaveShape, WaveformSpec};

/// File extension appended to output names.
pub const OUTPUT_EXTENSION: &str = "wav";

/// Parses a frequency token.
///
/// Rejects anything that is not a finite, non-negative number.
pub fn parse_frequency(token: &str) -> Result<f64> {
    match token.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
        _ => Err(WavegenError::invalid_frequency(token)),
    }
}

/// Builds the waveform spec for a wave type and frequency token.
///
/// The frequency is divided by the configured divisor and the sample count is
/// scaled by the configured length multiplier.
pub fn resolve_spec(wave_type: &str, frequency: &str, config: &SynthConfig) -> Result<WaveformSpec> {
    if let Some(reason) = config.validate() {
        return Err(WavegenError::invalid_config(reason));
    }

    let requested = parse_frequency(frequency)?;
    let shape: WaveShape = wave_type.parse()?;

    let spec = WaveformSpec::new(
        shape,
        requested / config.frequency_divisor,
        config.amplitude,
        config.sample_rate,
        config.duration_seconds,
    )?
    .with_length_multiplier(config.length_multiplier)?
    .with_amplitude_mode(config.amplitude_mode);

    debug!(
        shape = %spec.shape(),
        frequency_hz = spec.frequency_hz(),
        amplitude = spec.amplitude(),
        samples = spec.sample_count(),
        "resolved waveform"
    );
    Ok(spec)
}

/// Builds the container format for a spec: one frame per generated sample.
pub fn resolve_format(spec: &WaveformSpec, config: &SynthConfig) -> Result<AudioFormat> {
    let frames = u32::try_from(spec.sample_count()).map_err(|_| {
        WavegenError::invalid_format(format!(
            "{} frames do not fit in a WAV header",
            spec.sample_count()
        ))
    })?;
    let format = AudioFormat::pcm16(config.channels, spec.sample_rate_hz(), frames);
    if let Some(reason) = format.validate() {
        return Err(WavegenError::invalid_format(reason));
    }
    Ok(format)
}

/// Appends the `.wav` extension to an output name.
pub fn output_path(name: &str) -> PathBuf {
    PathBuf::from(format!("{}.{}", name, OUTPUT_EXTENSION))
}

fn frames(spec: &WaveformSpec, format: &AudioFormat) -> impl Iterator<Item = Result<i16>> {
    duplicate_channels(quantize_stream(spec.samples()), format.channels)
}

/// Renders a spec to a WAV file at `path`.
///
/// `requested_frequency_hz` is only recorded in the report.
pub fn render(
    spec: &WaveformSpec,
    format: &AudioFormat,
    requested_frequency_hz: f64,
    path: &Path,
) -> Result<RenderReport> {
    let start = Instant::now();
    let summary = write_wav(path, format, frames(spec, format))?;
    info!(
        path = %path.display(),
        frames = summary.frame_count,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "rendered waveform"
    );

    Ok(RenderReport::for_waveform(
        path.to_path_buf(),
        spec,
        requested_frequency_hz,
        format,
        summary.pcm_sha256,
    ))
}

/// Renders a spec to an in-memory WAV file.
pub fn render_to_buffer(spec: &WaveformSpec, format: &AudioFormat) -> Result<Vec<u8>> {
    let (bytes, _) = write_wav_to_buffer(format, frames(spec, format))?;
    Ok(bytes)
}

/// Runs the whole pipeline: tokens in, `<output_name>.wav` out.
///
/// Configuration errors are raised before the output file is touched.
///
/// # Example
///
/// ```ignore
/// use wavegen::{synthesize, SynthConfig};
///
/// let report = synthesize("sine", "440", "tone", &SynthConfig::default())?;
/// assert_eq!(report.frame_count, 352_800);
/// ```
pub fn synthesize(
    wave_type: &str,
    frequency: &str,
    output_name: &str,
    config: &SynthConfig,
) -> Result<RenderReport> {
    let requested = parse_frequency(frequency)?;
    let spec = resolve_spec(wave_type, frequency, config)?;
    let format = resolve_format(&spec, config)?;
    render(&spec, &format, requested, &output_path(output_name))
}
