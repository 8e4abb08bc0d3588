//! Core types for wavegen.
//!
//! This module re-exports all the core data types used by the pipeline:
//! - [`WaveformSpec`]: Everything the generator needs to produce samples
//! - [`AudioFormat`]: Header fields of the PCM WAV container
//! - [`RenderReport`]: Summary of a written file

mod format;
mod render;
mod waveform;

// Re-export all types at the module level
pub use format::{AudioFormat, Compression, BITS_PER_SAMPLE, WAV_HEADER_LEN};
pub use render::{compute_render_id, RenderReport, COMBINED_SOURCE};
pub use waveform::{clamp_amplitude, AmplitudeMode, WaveShape, WaveformSpec};
