//! Synthesis configuration module.
//!
//! Holds the fixed rendering parameters (sample rate, channel layout, duration)
//! as an immutable value passed into the pipeline driver.

use serde::{Deserialize, Serialize};

use crate::types::AmplitudeMode;

/// Output sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

/// Number of output channels (stereo, each sample duplicated).
pub const DEFAULT_CHANNELS: u16 = 2;

/// Nominal render duration in seconds.
pub const DEFAULT_DURATION_SECONDS: f64 = 2.0;

/// Number of samples generated per nominal sample slot.
///
/// The generator emits `sample_rate * 4 * duration` samples. Together with
/// [`DEFAULT_FREQUENCY_DIVISOR`] this keeps the pitch ratio the caller asked for.
pub const DEFAULT_LENGTH_MULTIPLIER: f64 = 4.0;

/// Requested frequencies are divided by this before synthesis.
pub const DEFAULT_FREQUENCY_DIVISOR: f64 = 4.0;

/// Amplitude used when none is given.
pub const DEFAULT_AMPLITUDE: f64 = 1.0;

/// Rendering configuration.
///
/// Built once at startup from command-line options and never mutated while a
/// render is in progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthConfig {
    /// Sample rate written to the WAV header.
    pub sample_rate: u32,

    /// Channel count written to the WAV header.
    pub channels: u16,

    /// Nominal duration in seconds.
    pub duration_seconds: f64,

    /// See [`DEFAULT_LENGTH_MULTIPLIER`].
    pub length_multiplier: f64,

    /// See [`DEFAULT_FREQUENCY_DIVISOR`].
    pub frequency_divisor: f64,

    /// Requested amplitude before clamping.
    pub amplitude: f64,

    /// Which shapes the amplitude is applied to.
    pub amplitude_mode: AmplitudeMode,
}

impl SynthConfig {
    /// Creates a SynthConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy with a different requested amplitude.
    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }

    /// Returns a copy with a different amplitude mode.
    pub fn with_amplitude_mode(mut self, mode: AmplitudeMode) -> Self {
        self.amplitude_mode = mode;
        self
    }

    /// Validates the configuration.
    ///
    /// Returns an error message if validation fails, None otherwise.
    /// Amplitude is not range-checked here because it is clamped, not rejected.
    pub fn validate(&self) -> Option<String> {
        if self.sample_rate == 0 {
            return Some("sample_rate must be > 0".to_string());
        }

        if self.channels == 0 {
            return Some("channels must be > 0".to_string());
        }

        if !(self.duration_seconds.is_finite() && self.duration_seconds > 0.0) {
            return Some(format!(
                "duration_seconds must be a positive number, got {}",
                self.duration_seconds
            ));
        }

        if !(self.length_multiplier.is_finite() && self.length_multiplier > 0.0) {
            return Some(format!(
                "length_multiplier must be a positive number, got {}",
                self.length_multiplier
            ));
        }

        if !(self.frequency_divisor.is_finite() && self.frequency_divisor > 0.0) {
            return Some(format!(
                "frequency_divisor must be a positive number, got {}",
                self.frequency_divisor
            ));
        }

        if self.amplitude.is_nan() {
            return Some("amplitude must be a number".to_string());
        }

        None
    }

    /// Number of samples a render with this configuration produces.
    pub fn sample_count(&self) -> u64 {
        (self.sample_rate as f64 * self.length_multiplier * self.duration_seconds).floor() as u64
    }
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            channels: DEFAULT_CHANNELS,
            duration_seconds: DEFAULT_DURATION_SECONDS,
            length_multiplier: DEFAULT_LENGTH_MULTIPLIER,
            frequency_divisor: DEFAULT_FREQUENCY_DIVISOR,
            amplitude: DEFAULT_AMPLITUDE,
            amplitude_mode: AmplitudeMode::default(),
        }
    }
}
