//! WAV file writer and reader for PCM output.
//!
//! Writes 16-bit PCM WAV files using the hound crate. File output is staged in
//! a temporary file next to the destination and only moved into place once the
//! header has been finalized, so a failed render never leaves a file behind.

use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Read, Seek, Write};
use std::path::Path;

use hound::{WavReader, WavWriter};
use sha2::{Digest, Sha256};
use tempfile::{Builder, NamedTempFile};
use tracing::debug;

use crate::error::{Result, WavegenError};
use crate::types::AudioFormat;

/// What the writer produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavSummary {
    /// Frames written (equals the header's frame count).
    pub frame_count: u32,
    /// Hex SHA256 of the `data` chunk payload.
    pub pcm_sha256: String,
}

/// A decoded 16-bit PCM WAV file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedWav {
    pub format: AudioFormat,
    /// Interleaved channel samples.
    pub samples: Vec<i16>,
}

/// Writes interleaved PCM values to a WAV file at `path`.
///
/// `samples` must supply exactly `format.frame_count * format.channels`
/// values. Any error, including a count mismatch, leaves no file at `path`.
///
/// # Example
///
/// ```ignore
/// use wavegen::audio::write_wav;
/// use wavegen::types::AudioFormat;
///
/// let format = AudioFormat::pcm16(2, 44100, 2);
/// write_wav(Path::new("click.wav"), &format, vec![Ok(0), Ok(0), Ok(100), Ok(100)])?;
/// ```
pub fn write_wav<I>(path: &Path, format: &AudioFormat, samples: I) -> Result<WavSummary>
where
    I: IntoIterator<Item = Result<i16>>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staging = staging_file(dir).map_err(|e| {
        WavegenError::io(
            format!("Failed to create temporary file in {}", dir.display()),
            e,
        )
    })?;
    debug!(staging = %staging.path().display(), "staging WAV output");

    let summary = write_stream(BufWriter::new(staging.as_file_mut()), format, samples)?;

    staging.as_file().sync_all().map_err(|e| {
        WavegenError::io(format!("Failed to flush {}", staging.path().display()), e)
    })?;
    staging.persist(path).map_err(|e| {
        WavegenError::io(format!("Failed to write {}", path.display()), e.error)
    })?;

    debug!(path = %path.display(), frames = summary.frame_count, "WAV file written");
    Ok(summary)
}

/// Creates the staging file with the mode a plain `File::create` would get.
fn staging_file(dir: &Path) -> std::io::Result<NamedTempFile> {
    let mut builder = Builder::new();
    builder.prefix(".wavegen-").suffix(".tmp");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    builder.tempfile_in(dir)
}

/// Writes interleaved PCM values to an in-memory WAV buffer.
///
/// Returns the complete file contents.
pub fn write_wav_to_buffer<I>(format: &AudioFormat, samples: I) -> Result<(Vec<u8>, WavSummary)>
where
    I: IntoIterator<Item = Result<i16>>,
{
    let mut cursor = Cursor::new(Vec::new());
    let summary = write_stream(&mut cursor, format, samples)?;
    Ok((cursor.into_inner(), summary))
}

fn write_stream<W, I>(sink: W, format: &AudioFormat, samples: I) -> Result<WavSummary>
where
    W: Write + Seek,
    I: IntoIterator<Item = Result<i16>>,
{
    if let Some(reason) = format.validate() {
        return Err(WavegenError::invalid_format(reason));
    }

    let channels = format.channels as u64;
    let expected_samples = format.frame_count as u64 * channels;

    let mut writer = WavWriter::new(sink, format.wav_spec())
        .map_err(|e| WavegenError::wav("Failed to create WAV writer", e))?;
    let mut hasher = Sha256::new();
    let mut written: u64 = 0;

    for sample in samples {
        let value = sample?;
        if written == expected_samples {
            return Err(WavegenError::frame_count_mismatch(
                format.frame_count,
                written / channels + 1,
            ));
        }
        writer
            .write_sample(value)
            .map_err(|e| WavegenError::wav("Failed to write sample", e))?;
        hasher.update(value.to_le_bytes());
        written += 1;
    }

    if written != expected_samples {
        return Err(WavegenError::frame_count_mismatch(
            format.frame_count,
            written.div_ceil(channels),
        ));
    }

    writer
        .finalize()
        .map_err(|e| WavegenError::wav("Failed to finalize WAV file", e))?;

    Ok(WavSummary {
        frame_count: format.frame_count,
        pcm_sha256: hex::encode(hasher.finalize()),
    })
}

/// Reads a 16-bit PCM WAV file.
pub fn read_wav(path: &Path) -> Result<DecodedWav> {
    let reader = WavReader::open(path)
        .map_err(|e| WavegenError::wav(format!("Failed to open {}", path.display()), e))?;
    decode(reader)
}

/// Reads a 16-bit PCM WAV file from memory.
pub fn read_wav_from_buffer(bytes: &[u8]) -> Result<DecodedWav> {
    let reader = WavReader::new(BufReader::new(bytes))
        .map_err(|e| WavegenError::wav("Failed to parse WAV data", e))?;
    decode(reader)
}

fn decode<R: Read>(reader: WavReader<R>) -> Result<DecodedWav> {
    let format = AudioFormat::from_wav_spec(reader.spec(), reader.duration())?;
    let samples = reader
        .into_samples::<i16>()
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| WavegenError::wav("Failed to read samples", e))?;

    if samples.len() as u64 != format.frame_count as u64 * format.channels as u64 {
        return Err(WavegenError::invalid_format(format!(
            "Data chunk holds {} samples, header declares {} frames of {} channels",
            samples.len(),
            format.frame_count,
            format.channels
        )));
    }

    Ok(DecodedWav { format, samples })
}

/// Reads only the header of a WAV file.
pub fn read_format(path: &Path) -> Result<AudioFormat> {
    let file = File::open(path)
        .map_err(|e| WavegenError::io(format!("Failed to open {}", path.display()), e))?;
    let reader = WavReader::new(BufReader::new(file))
        .map_err(|e| WavegenError::wav(format!("Failed to parse {}", path.display()), e))?;
    AudioFormat::from_wav_spec(reader.spec(), reader.duration())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::pcm::{dequantize, quantize};
    use crate::error::ErrorCode;
    use tempfile::tempdir;

    fn values(v: &[i16]) -> Vec<Result<i16>> {
        v.iter().copied().map(Ok).collect()
    }

    #[test]
    fn write_wav_creates_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.wav");
        let format = AudioFormat::pcm16(2, 44100, 3);

        let summary = write_wav(&path, &format, values(&[0, 0, 100, 100, -5, -5])).unwrap();
        assert_eq!(summary.frame_count, 3);
        assert!(path.exists());

        let reader = hound::WavReader::open(&path).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 2);
        assert_eq!(spec.sample_rate, 44100);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(spec.sample_format, hound::SampleFormat::Int);
        assert_eq!(reader.duration(), 3);

        // Only the destination remains; the staging file was renamed.
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn written_file_has_default_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        let plain = dir.path().join("plain.txt");
        write_wav(&path, &AudioFormat::pcm16(1, 8000, 1), values(&[7])).unwrap();
        File::create(&plain).unwrap();

        let mode = |p: &Path| std::fs::metadata(p).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode(&path), mode(&plain));
    }

    #[test]
    fn header_is_canonical_pcm() {
        let format = AudioFormat::pcm16(2, 44100, 2);
        let (bytes, _) = write_wav_to_buffer(&format, values(&[1, 1, -1, -1])).unwrap();

        assert_eq!(bytes.len() as u64, format.file_len());
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(u32::from_le_bytes(bytes[4..8].try_into().unwrap()), 36 + 8);
        assert_eq!(&bytes[8..12], b"WAVE");
        assert_eq!(&bytes[12..16], b"fmt ");
        assert_eq!(u32::from_le_bytes(bytes[16..20].try_into().unwrap()), 16);
        assert_eq!(u16::from_le_bytes(bytes[20..22].try_into().unwrap()), 1);
        assert_eq!(u16::from_le_bytes(bytes[22..24].try_into().unwrap()), 2);
        assert_eq!(u32::from_le_bytes(bytes[24..28].try_into().unwrap()), 44100);
        assert_eq!(u32::from_le_bytes(bytes[28..32].try_into().unwrap()), 176_400);
        assert_eq!(u16::from_le_bytes(bytes[32..34].try_into().unwrap()), 4);
        assert_eq!(u16::from_le_bytes(bytes[34..36].try_into().unwrap()), 16);
        assert_eq!(&bytes[36..40], b"data");
        assert_eq!(u32::from_le_bytes(bytes[40..44].try_into().unwrap()), 8);
        assert_eq!(&bytes[44..], &[0x01, 0x00, 0x01, 0x00, 0xff, 0xff, 0xff, 0xff]);
    }

    #[test]
    fn pcm_digest_covers_data_chunk() {
        let format = AudioFormat::pcm16(1, 8000, 2);
        let (bytes, summary) = write_wav_to_buffer(&format, values(&[258, -3])).unwrap();
        let expected = hex::encode(Sha256::digest(&bytes[44..]));
        assert_eq!(summary.pcm_sha256, expected);
    }

    #[test]
    fn short_stream_is_a_format_error_and_leaves_no_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("short.wav");
        let format = AudioFormat::pcm16(2, 44100, 4);

        let err = write_wav(&path, &format, values(&[1, 1, 2, 2])).unwrap_err();
        assert_eq!(err.code, ErrorCode::FormatError);
        assert!(!path.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn long_stream_is_a_format_error() {
        let format = AudioFormat::pcm16(1, 44100, 2);
        let err = write_wav_to_buffer(&format, values(&[1, 2, 3])).unwrap_err();
        assert_eq!(err.code, ErrorCode::FormatError);
        assert!(err.message.contains("3 supplied"));
    }

    #[test]
    fn partial_frame_is_a_format_error() {
        let format = AudioFormat::pcm16(2, 44100, 2);
        let err = write_wav_to_buffer(&format, values(&[1, 1, 2])).unwrap_err();
        assert_eq!(err.code, ErrorCode::FormatError);
    }

    #[test]
    fn upstream_error_leaves_no_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.wav");
        let format = AudioFormat::pcm16(1, 44100, 3);
        let samples = vec![Ok(1), Err(WavegenError::sample_out_of_range(4.0)), Ok(3)];

        let err = write_wav(&path, &format, samples).unwrap_err();
        assert_eq!(err.code, ErrorCode::QuantizationError);
        assert!(!path.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn failed_write_keeps_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("keep.wav");
        std::fs::write(&path, b"previous").unwrap();

        let format = AudioFormat::pcm16(1, 44100, 2);
        assert!(write_wav(&path, &format, values(&[1])).is_err());
        assert_eq!(std::fs::read(&path).unwrap(), b"previous");
    }

    #[test]
    fn missing_directory_is_io_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("out.wav");
        let format = AudioFormat::pcm16(1, 44100, 1);
        let err = write_wav(&path, &format, values(&[0])).unwrap_err();
        assert_eq!(err.code, ErrorCode::IoError);
    }

    #[test]
    fn invalid_format_rejected_before_writing() {
        let format = AudioFormat::pcm16(0, 44100, 0);
        let err = write_wav_to_buffer(&format, Vec::new()).unwrap_err();
        assert_eq!(err.code, ErrorCode::FormatError);
    }

    #[test]
    fn read_back_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("round.wav");
        let original = [0.0, 0.25, -0.5, 0.999, -1.0];
        let format = AudioFormat::pcm16(1, 22050, original.len() as u32);

        write_wav(&path, &format, original.iter().map(|s| quantize(*s))).unwrap();
        let decoded = read_wav(&path).unwrap();

        assert_eq!(decoded.format, format);
        for (value, sample) in decoded.samples.iter().zip(original) {
            assert!((dequantize(*value) - sample).abs() <= 1.0 / 32767.0);
        }
        assert_eq!(read_format(&path).unwrap(), format);
    }

    #[test]
    fn read_rejects_float_wav() {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 32000,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
            writer.write_sample(0.5f32).unwrap();
            writer.finalize().unwrap();
        }
        let err = read_wav_from_buffer(cursor.get_ref()).unwrap_err();
        assert_eq!(err.code, ErrorCode::FormatError);
    }

    #[test]
    fn read_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let err = read_wav(&dir.path().join("nope.wav")).unwrap_err();
        assert_eq!(err.code, ErrorCode::IoError);
    }
}
