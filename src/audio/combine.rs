//! Mixing of two WAV files.
//!
//! Both inputs are scaled by their shared peak magnitude and averaged, so the
//! louder file keeps its level relative to the quieter one.

use std::path::Path;

use tracing::info;

use crate::audio::pcm::quantize_stream;
use crate::audio::wav::{read_format, read_wav, write_wav, DecodedWav};
use crate::error::{Result, WavegenError};
use crate::types::{AudioFormat, RenderReport};

/// Default output name for mixed files.
pub const DEFAULT_COMBINED_NAME: &str = "Combined_Audio";

/// Largest absolute sample value, as a float.
pub fn peak(samples: &[i16]) -> f64 {
    samples
        .iter()
        .map(|s| (*s as i32).unsigned_abs())
        .max()
        .unwrap_or(0) as f64
}

fn ensure_compatible(first: &AudioFormat, second: &AudioFormat) -> Result<()> {
    if first.is_compatible_with(second) {
        return Ok(());
    }
    Err(WavegenError::incompatible_audio(format!(
        "{} ch / {} Hz / {} frames vs {} ch / {} Hz / {} frames",
        first.channels,
        first.sample_rate,
        first.frame_count,
        second.channels,
        second.sample_rate,
        second.frame_count
    )))
}

/// Mixes two decoded files into normalized samples in [-1, 1].
///
/// The files must share channel count, bit depth, sample rate and length.
pub fn mix(first: &DecodedWav, second: &DecodedWav) -> Result<Vec<f64>> {
    ensure_compatible(&first.format, &second.format)?;

    let reference = peak(&first.samples).max(peak(&second.samples));
    if reference == 0.0 {
        return Ok(vec![0.0; first.samples.len()]);
    }

    Ok(first
        .samples
        .iter()
        .zip(&second.samples)
        .map(|(a, b)| 0.5 * (*a as f64 / reference + *b as f64 / reference))
        .collect())
}

/// Mixes the WAV files at `first` and `second` into `output`.
///
/// The output uses the first file's format. Nothing is written if the files
/// are incompatible or unreadable. Headers are compared before any sample
/// data is decoded.
pub fn combine(first: &Path, second: &Path, output: &Path) -> Result<RenderReport> {
    ensure_compatible(&read_format(first)?, &read_format(second)?)?;

    let a = read_wav(first)?;
    let b = read_wav(second)?;
    let mixed = mix(&a, &b)?;

    info!(
        first = %first.display(),
        second = %second.display(),
        output = %output.display(),
        "combining audio files"
    );

    let format = a.format;
    let summary = write_wav(output, &format, quantize_stream(mixed.into_iter().map(Ok)))?;
    Ok(RenderReport::for_combined(
        output.to_path_buf(),
        &format,
        summary.pcm_sha256,
    ))
}
