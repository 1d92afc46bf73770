//! Clip editing
//!
//! Trimming with fades, volume and normalization.

mod trim;

pub use trim::{trim, EffectParameters, TrimEngine, TrimRange, DEFAULT_NORMALIZE_CEILING};
