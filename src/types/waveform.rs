//! Waveform description types.
//!
//! A [`WaveformSpec`] fully determines the sample sequence the generator
//! produces. It is validated once on construction and immutable afterwards.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WavegenError};

/// Periodic waveform shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaveShape {
    Sine,
    Square,
    Triangle,
    Sawtooth,
}

impl WaveShape {
    /// All shapes, in command-line order.
    pub const ALL: [WaveShape; 4] = [
        WaveShape::Sine,
        WaveShape::Square,
        WaveShape::Triangle,
        WaveShape::Sawtooth,
    ];

    /// Returns the lowercase token for the shape.
    pub fn as_str(&self) -> &'static str {
        match self {
            WaveShape::Sine => "sine",
            WaveShape::Square => "square",
            WaveShape::Triangle => "triangle",
            WaveShape::Sawtooth => "sawtooth",
        }
    }

    /// Parses a shape from a token, ignoring case.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|shape| shape.as_str().eq_ignore_ascii_case(s))
    }
}

impl FromStr for WaveShape {
    type Err = WavegenError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s).ok_or_else(|| WavegenError::invalid_wave_type(s))
    }
}

impl fmt::Display for WaveShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which shapes the clamped amplitude scales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmplitudeMode {
    /// Amplitude multiplies sine and square only; triangle and sawtooth
    /// always span the full [-1, 1] range.
    #[default]
    SineOnly,

    /// Amplitude multiplies every shape.
    AllShapes,
}

/// Hard-clamps an amplitude into [0.0, 1.0].
pub fn clamp_amplitude(amplitude: f64) -> f64 {
    amplitude.clamp(0.0, 1.0)
}

/// Complete description of one channel's worth of samples.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WaveformSpec {
    shape: WaveShape,
    frequency_hz: f64,
    amplitude: f64,
    duration_seconds: f64,
    sample_rate_hz: u32,
    length_multiplier: f64,
    amplitude_mode: AmplitudeMode,
}

impl WaveformSpec {
    /// Creates a spec with a length multiplier of 1 and [`AmplitudeMode::SineOnly`].
    ///
    /// The amplitude is clamped into [0, 1]. Returns a configuration error if
    /// the frequency is negative or not finite, the amplitude is NaN, the
    /// duration is not positive, or the sample rate is zero.
    pub fn new(
        shape: WaveShape,
        frequency_hz: f64,
        amplitude: f64,
        sample_rate_hz: u32,
        duration_seconds: f64,
    ) -> Result<Self> {
        if !(frequency_hz.is_finite() && frequency_hz >= 0.0) {
            return Err(WavegenError::invalid_frequency(&frequency_hz.to_string()));
        }
        if amplitude.is_nan() {
            return Err(WavegenError::invalid_config("Amplitude must be a number"));
        }
        if sample_rate_hz == 0 {
            return Err(WavegenError::invalid_config("Sample rate must be > 0"));
        }
        if !(duration_seconds.is_finite() && duration_seconds > 0.0) {
            return Err(WavegenError::invalid_config(format!(
                "Duration must be a positive number of seconds, got {}",
                duration_seconds
            )));
        }

        Ok(Self {
            shape,
            frequency_hz,
            amplitude: clamp_amplitude(amplitude),
            duration_seconds,
            sample_rate_hz,
            length_multiplier: 1.0,
            amplitude_mode: AmplitudeMode::SineOnly,
        })
    }

    /// Returns a copy generating `multiplier` times as many samples.
    pub fn with_length_multiplier(mut self, multiplier: f64) -> Result<Self> {
        if !(multiplier.is_finite() && multiplier > 0.0) {
            return Err(WavegenError::invalid_config(format!(
                "Length multiplier must be a positive number, got {}",
                multiplier
            )));
        }
        self.length_multiplier = multiplier;
        Ok(self)
    }

    /// Returns a copy using the given amplitude mode.
    pub fn with_amplitude_mode(mut self, mode: AmplitudeMode) -> Self {
        self.amplitude_mode = mode;
        self
    }

    pub fn shape(&self) -> WaveShape {
        self.shape
    }

    pub fn frequency_hz(&self) -> f64 {
        self.frequency_hz
    }

    /// Amplitude after clamping.
    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    pub fn duration_seconds(&self) -> f64 {
        self.duration_seconds
    }

    pub fn sample_rate_hz(&self) -> u32 {
        self.sample_rate_hz
    }

    pub fn length_multiplier(&self) -> f64 {
        self.length_multiplier
    }

    pub fn amplitude_mode(&self) -> AmplitudeMode {
        self.amplitude_mode
    }

    /// Number of samples: `floor(sample_rate * length_multiplier * duration)`.
    pub fn sample_count(&self) -> u64 {
        (self.sample_rate_hz as f64 * self.length_multiplier * self.duration_seconds).floor() as u64
    }

    /// Time in seconds of the sample at `index`.
    pub fn time_at(&self, index: u64) -> f64 {
        index as f64 / self.sample_rate_hz as f64
    }
}
