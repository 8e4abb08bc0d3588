//! Audio output module.
//!
//! Provides 16-bit PCM quantization, WAV file writing and reading, and mixing
//! of two WAV files.

pub mod combine;
pub mod pcm;
pub mod wav;

// Re-export commonly used items
pub use combine::{combine, DEFAULT_COMBINED_NAME};
pub use pcm::{dequantize, quantize, PCM_SCALE};
pub use wav::{read_wav, write_wav, write_wav_to_buffer, DecodedWav, WavSummary};
