//! Audio Engine Module
//!
//! Core audio types and plumbing:
//! - Mono audio buffer
//! - Linear-interpolation resampler
//! - Decoder and byte sink collaborators

pub mod buffer;
pub mod io;
pub mod resample;

pub use buffer::{linear_to_db, AudioBuffer, CHANNEL_COUNT, TARGET_SAMPLE_RATE};
pub use io::{import_wav, AudioDecoder, ByteSink, FileSink, HoundDecoder, MemorySink};
pub use resample::{resample, resample_buffer, resample_linear};
