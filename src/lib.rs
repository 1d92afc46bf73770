//! Clipforge - Device-Compliant Sound Clip Builder
//!
//! Generates, trims and exports short mono clips as canonical 16-bit PCM WAV
//! files that a constrained target device will accept (44.1kHz, 2-5 seconds,
//! at most 1 MiB).
//!
//! # Pipeline
//!
//! generator or decoded file → optional resample → trim/effects →
//! WAV encode → compliance check → byte sink
//!
//! Every stage takes its input by reference and returns a new value, so calls
//! from independent sessions never share state.
//!
//! ```
//! use clipforge::codec::{encode_wav_default, parse_wav_header};
//! use clipforge::dsp::{trim, EffectParameters, TrimRange};
//! use clipforge::synth::generate;
//!
//! let chime = generate("chime-classic", 44100).unwrap();
//! let clip = trim(&chime, TrimRange::new(0.0, 1.5), &EffectParameters::default()).unwrap();
//! let format = parse_wav_header(&encode_wav_default(&clip).unwrap()).unwrap();
//! assert_eq!(format.sample_rate, 44100);
//! ```

pub mod cli;
pub mod codec;
pub mod compliance;
pub mod dsp;
pub mod engine;
pub mod error;
pub mod pipeline;
pub mod synth;

pub use error::{ClipforgeError, Result};
