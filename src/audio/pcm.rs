//! 16-bit PCM quantization.
//!
//! Samples are scaled by 32767 and rounded half-to-even. Nothing is clipped:
//! a value that lands outside the `i16` range is an error.

use crate::error::{Result, WavegenError};

/// Full-scale magnitude of a 16-bit sample.
pub const PCM_SCALE: f64 = 32767.0;

/// Converts one sample into a PCM value.
pub fn quantize(sample: f64) -> Result<i16> {
    let scaled = (sample * PCM_SCALE).round_ties_even();
    if scaled.is_nan() || scaled < i16::MIN as f64 || scaled > i16::MAX as f64 {
        return Err(WavegenError::sample_out_of_range(sample));
    }
    Ok(scaled as i16)
}

/// Converts a PCM value back into a sample.
pub fn dequantize(value: i16) -> f64 {
    value as f64 / PCM_SCALE
}

/// Quantizes a fallible sample stream, passing upstream errors through.
pub fn quantize_stream<I>(samples: I) -> impl Iterator<Item = Result<i16>>
where
    I: IntoIterator<Item = Result<f64>>,
{
    samples.into_iter().map(|sample| sample.and_then(quantize))
}

/// Repeats every value once per channel, producing interleaved frames.
pub fn duplicate_channels<I>(values: I, channels: u16) -> DuplicateChannels<I::IntoIter>
where
    I: IntoIterator<Item = Result<i16>>,
{
    DuplicateChannels {
        inner: values.into_iter(),
        channels,
        current: None,
        remaining: 0,
    }
}

/// Iterator returned by [`duplicate_channels`].
#[derive(Debug)]
pub struct DuplicateChannels<I> {
    inner: I,
    channels: u16,
    current: Option<i16>,
    remaining: u16,
}

impl<I> Iterator for DuplicateChannels<I>
where
    I: Iterator<Item = Result<i16>>,
{
    type Item = Result<i16>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            match self.inner.next()? {
                Ok(value) => {
                    self.current = Some(value);
                    self.remaining = self.channels;
                }
                Err(e) => return Some(Err(e)),
            }
        }
        if self.remaining == 0 {
            // Zero channels: nothing to emit for any value.
            return None;
        }
        self.remaining -= 1;
        self.current.map(Ok)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn quantize_full_scale() {
        assert_eq!(quantize(0.0).unwrap(), 0);
        assert_eq!(quantize(1.0).unwrap(), 32767);
        assert_eq!(quantize(-1.0).unwrap(), -32767);
        assert_eq!(quantize(0.5).unwrap(), 16384);
    }

    #[test]
    fn quantize_rounds_half_to_even() {
        // 0.5 / 32767 and 1.5 / 32767 scale to exact halves.
        assert_eq!(quantize(0.5 / PCM_SCALE).unwrap(), 0);
        assert_eq!(quantize(1.5 / PCM_SCALE).unwrap(), 2);
        assert_eq!(quantize(2.5 / PCM_SCALE).unwrap(), 2);
        assert_eq!(quantize(-2.5 / PCM_SCALE).unwrap(), -2);
    }

    #[test]
    fn quantize_accepts_the_negative_extreme() {
        assert_eq!(quantize(-32768.0 / PCM_SCALE).unwrap(), i16::MIN);
    }

    #[test]
    fn quantize_rejects_out_of_range() {
        for sample in [1.001, -1.01, 2.0, f64::NAN, f64::INFINITY] {
            let err = quantize(sample).unwrap_err();
            assert_eq!(err.code, ErrorCode::QuantizationError);
        }
    }

    #[test]
    fn dequantize_error_within_one_step() {
        for sample in [-1.0, -0.73, -0.1, 0.0, 0.000_01, 0.42, 0.999] {
            let back = dequantize(quantize(sample).unwrap());
            assert!((back - sample).abs() <= 1.0 / PCM_SCALE);
        }
    }

    #[test]
    fn quantize_stream_passes_errors_through() {
        let input = vec![
            Ok(0.5),
            Err(WavegenError::non_finite_sample(1, f64::NAN)),
            Ok(3.0),
        ];
        let out: Vec<_> = quantize_stream(input).collect();
        assert_eq!(out[0].as_ref().unwrap(), &16384);
        assert_eq!(out[1].as_ref().unwrap_err().code, ErrorCode::ComputationError);
        assert_eq!(out[2].as_ref().unwrap_err().code, ErrorCode::QuantizationError);
    }

    #[test]
    fn duplicate_channels_interleaves() {
        let out: Vec<i16> = duplicate_channels(vec![Ok(1), Ok(-2), Ok(3)], 2)
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(out, vec![1, 1, -2, -2, 3, 3]);

        let mono: Vec<i16> = duplicate_channels(vec![Ok(7), Ok(8)], 1)
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(mono, vec![7, 8]);
    }

    #[test]
    fn duplicate_channels_stops_on_error() {
        let input = vec![Ok(1), Err(WavegenError::sample_out_of_range(2.0)), Ok(3)];
        let result: Result<Vec<i16>> = duplicate_channels(input, 2).collect();
        assert_eq!(result.unwrap_err().code, ErrorCode::QuantizationError);
    }
}
