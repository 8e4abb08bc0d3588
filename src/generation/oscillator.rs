//! Periodic waveform formulas.
//!
//! Each shape is a pure function of time. [`Samples`] walks the time steps
//! `t_i = i / sample_rate` in order and yields one sample per step.

use std::f64::consts::PI;

use crate::error::{Result, WavegenError};
use crate::types::{AmplitudeMode, WaveShape, WaveformSpec};

/// Maps a value to -1, 0 or 1 by its sign.
pub fn sign(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// `amplitude * sin(2π f t)`.
pub fn sine(frequency_hz: f64, amplitude: f64, t: f64) -> f64 {
    amplitude * (2.0 * PI * frequency_hz * t).sin()
}

/// Sign of the scaled sine. Only ever -1, 0 or 1.
pub fn square(frequency_hz: f64, amplitude: f64, t: f64) -> f64 {
    sign(sine(frequency_hz, amplitude, t))
}

/// Unit triangle wave starting at 0 and rising.
pub fn triangle(frequency_hz: f64, t: f64) -> f64 {
    // The period term divides by f; its limit at f = 0 is a flat line.
    if frequency_hz == 0.0 {
        return 0.0;
    }
    let k = (2.0 * t * frequency_hz + 0.5).floor();
    let parity = if k.rem_euclid(2.0) == 0.0 { 1.0 } else { -1.0 };
    4.0 * frequency_hz * (t - k / (2.0 * frequency_hz)) * parity
}

/// Unit sawtooth wave in [-1, 1).
pub fn sawtooth(frequency_hz: f64, t: f64) -> f64 {
    2.0 * (t * frequency_hz - (0.5 + t * frequency_hz).floor())
}

/// Evaluates the waveform described by `spec` at time `t`.
pub fn sample_at(spec: &WaveformSpec, t: f64) -> f64 {
    let f = spec.frequency_hz();
    let a = spec.amplitude();
    let unit_gain = match spec.amplitude_mode() {
        AmplitudeMode::SineOnly => 1.0,
        AmplitudeMode::AllShapes => a,
    };

    match spec.shape() {
        WaveShape::Sine => sine(f, a, t),
        WaveShape::Square => square(f, a, t),
        WaveShape::Triangle => unit_gain * triangle(f, t),
        WaveShape::Sawtooth => unit_gain * sawtooth(f, t),
    }
}

/// Time-ordered sample stream for a [`WaveformSpec`].
///
/// Yields exactly [`WaveformSpec::sample_count`] items. A non-finite sample
/// is reported as a computation error instead of being passed downstream.
#[derive(Debug, Clone)]
pub struct Samples {
    spec: WaveformSpec,
    index: u64,
    len: u64,
}

impl Samples {
    pub fn new(spec: WaveformSpec) -> Self {
        Self {
            len: spec.sample_count(),
            spec,
            index: 0,
        }
    }
}

impl Iterator for Samples {
    type Item = Result<f64>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.len {
            return None;
        }
        let index = self.index;
        self.index += 1;

        let value = sample_at(&self.spec, self.spec.time_at(index));
        if value.is_finite() {
            Some(Ok(value))
        } else {
            Some(Err(WavegenError::non_finite_sample(index, value)))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.len - self.index).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Samples {}

impl WaveformSpec {
    /// Returns the lazy sample stream for this spec.
    pub fn samples(&self) -> Samples {
        Samples::new(*self)
    }
}

/// Generates every sample into memory.
pub fn generate(spec: &WaveformSpec) -> Result<Vec<f64>> {
    spec.samples().collect()
}
