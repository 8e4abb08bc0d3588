//! Waveform generation module.
//!
//! Provides the per-shape oscillator formulas and the render pipeline that
//! drives them into a WAV file.

pub mod oscillator;
pub mod pipeline;

// Re-export commonly used items
pub use oscillator::{generate, Samples};
pub use pipeline::{
    output_path, parse_frequency, render, render_to_buffer, resolve_format, resolve_spec,
    synthesize,
};
