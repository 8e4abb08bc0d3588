//! wavegen: periodic waveform synthesis to 16-bit PCM WAV files.
//!
//! Generates sine, square, triangle and sawtooth waves and writes them as
//! stereo RIFF/WAVE files. The pipeline is a single forward pass:
//! generator, quantizer, container writer.
//!
//! # Modules
//!
//! - [`types`]: Core data types (WaveformSpec, AudioFormat, RenderReport)
//! - [`config`]: Render configuration (SynthConfig)
//! - [`generation`]: Oscillators and the render pipeline
//! - [`audio`]: PCM quantization, WAV I/O, file mixing
//! - [`error`]: Error types and codes (WavegenError, ErrorCode)
//!
//! # Example
//!
//! ```rust,ignore
//! use wavegen::{synthesize, SynthConfig};
//!
//! // Writes tone.wav: 2 channels, 16-bit, 44100 Hz
//! let report = synthesize("sine", "440", "tone", &SynthConfig::default())?;
//! println!("{} frames, id {}", report.frame_count, report.render_id);
//! ```

pub mod audio;
pub mod cli;
pub mod config;
pub mod error;
pub mod generation;
pub mod types;

// Re-export commonly used types at crate root for convenience
pub use config::SynthConfig;
pub use error::{ErrorCode, Result, WavegenError};
pub use generation::synthesize;
pub use types::{AmplitudeMode, AudioFormat, RenderReport, WaveShape, WaveformSpec};
