//! Error types for wavegen.
//!
//! Every failure in the pipeline is reported as a [`WavegenError`] carrying an
//! [`ErrorCode`]. Errors are returned up to `main`, which is the only place the
//! process exits.

use std::fmt;

/// Error codes identifying the pipeline stage that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Bad or missing arguments, unknown wave type, invalid frequency.
    /// Trigger: anything rejected before the first sample is produced.
    ConfigurationError,

    /// Synthesis produced a non-finite sample.
    /// Trigger: frequency large enough to overflow the waveform formula.
    ComputationError,

    /// A sample cannot be represented as a 16-bit PCM value.
    /// Trigger: scaled sample outside [-32768, 32767], or NaN.
    QuantizationError,

    /// Filesystem failure while reading or writing a WAV file.
    IoError,

    /// WAV header fields are inconsistent or unsupported.
    /// Trigger: frame count mismatch, non-PCM input, incompatible files.
    FormatError,
}

impl ErrorCode {
    /// Returns the string representation of the error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ConfigurationError => "CONFIGURATION_ERROR",
            ErrorCode::ComputationError => "COMPUTATION_ERROR",
            ErrorCode::QuantizationError => "QUANTIZATION_ERROR",
            ErrorCode::IoError => "IO_ERROR",
            ErrorCode::FormatError => "FORMAT_ERROR",
        }
    }

    /// Returns a human-readable description of the error.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::ConfigurationError => "Invalid waveform configuration",
            ErrorCode::ComputationError => "Waveform synthesis produced a non-numeric sample",
            ErrorCode::QuantizationError => "Sample is outside the 16-bit PCM range",
            ErrorCode::IoError => "Failed to read or write an audio file",
            ErrorCode::FormatError => "Audio container fields are inconsistent or unsupported",
        }
    }

    /// Returns a recovery hint suggesting how to resolve this error.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCode::ConfigurationError => {
                "Use one of sine, square, triangle, sawtooth and a non-negative frequency \
                 (e.g. wavegen sine 440 tone)"
            }
            ErrorCode::ComputationError => "Try a lower frequency",
            ErrorCode::QuantizationError => "Keep the amplitude within 0.0 to 1.0",
            ErrorCode::IoError => {
                "Check that the output directory exists and is writable, and that input files exist"
            }
            ErrorCode::FormatError => {
                "Use 16-bit PCM WAV files with matching channel count, sample rate and length"
            }
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type for wavegen operations.
#[derive(Debug)]
pub struct WavegenError {
    /// The error code identifying the type of error.
    pub code: ErrorCode,
    /// Human-readable error message with context.
    pub message: String,
    /// Optional underlying cause of the error.
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl WavegenError {
    /// Creates a new WavegenError with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new WavegenError with an underlying cause.
    pub fn with_source(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a CONFIGURATION_ERROR for an unrecognized wave type token.
    pub fn invalid_wave_type(token: &str) -> Self {
        Self::new(
            ErrorCode::ConfigurationError,
            format!("Wrong wave type: {:?}", token),
        )
    }

    /// Creates a CONFIGURATION_ERROR for a frequency that is not a non-negative number.
    pub fn invalid_frequency(token: &str) -> Self {
        Self::new(
            ErrorCode::ConfigurationError,
            format!("Incorrect frequency: {:?}", token),
        )
    }

    /// Creates a CONFIGURATION_ERROR for any other rejected setting.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigurationError, reason)
    }

    /// Creates a COMPUTATION_ERROR for a non-finite sample.
    pub fn non_finite_sample(index: u64, value: f64) -> Self {
        Self::new(
            ErrorCode::ComputationError,
            format!("Error while calculating wave: sample {} is {}", index, value),
        )
    }

    /// Creates a QUANTIZATION_ERROR for a sample outside the 16-bit range.
    pub fn sample_out_of_range(value: f64) -> Self {
        Self::new(
            ErrorCode::QuantizationError,
            format!("Sample {} does not fit in 16-bit PCM", value),
        )
    }

    /// Creates an IO_ERROR with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::with_source(ErrorCode::IoError, context, source)
    }

    /// Wraps a hound error, keeping filesystem failures apart from format failures.
    pub fn wav(context: impl Into<String>, source: hound::Error) -> Self {
        let code = match source {
            hound::Error::IoError(_) => ErrorCode::IoError,
            _ => ErrorCode::FormatError,
        };
        let context = context.into();
        Self::with_source(code, format!("{}: {}", context, source), source)
    }

    /// Creates a FORMAT_ERROR for header fields that cannot be written.
    pub fn invalid_format(reason: impl Into<String>) -> Self {
        Self::new(ErrorCode::FormatError, reason)
    }

    /// Creates a FORMAT_ERROR when the supplied frames disagree with the header.
    pub fn frame_count_mismatch(expected: u32, actual: u64) -> Self {
        Self::new(
            ErrorCode::FormatError,
            format!(
                "Frame count mismatch: header declares {} frames, {} supplied",
                expected, actual
            ),
        )
    }

    /// Creates a FORMAT_ERROR for two files that cannot be mixed.
    pub fn incompatible_audio(reason: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::FormatError,
            format!("Incompatible audio files: {}", reason.into()),
        )
    }
}

impl fmt::Display for WavegenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}. Recovery: {}",
            self.code,
            self.message,
            self.code.recovery_hint()
        )
    }
}

impl std::error::Error for WavegenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Result type alias using WavegenError.
pub type Result<T> = std::result::Result<T, WavegenError>;
