//! Sound Generator Library
//!
//! Procedural presets rendered from closed-form oscillator math. The same
//! `(preset id, sample rate)` always gives the same samples, except for the
//! noise presets (`static-burst`, `glitch-zap`) which use the supplied RNG.

pub mod oscillator;
mod generators;
mod registry;

pub use registry::{
    generate, generate_with_rng, presets, registry, GeneratorFn, Preset, PresetCategory,
    PresetRegistry, DEFAULT_PRESET_ID,
};
