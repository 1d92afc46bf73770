//! Preset registry
//!
//! An immutable table from preset id to generator. Lookups of unknown ids
//! resolve to [`DEFAULT_PRESET_ID`] instead of failing.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use log::{debug, warn};
use rand::RngCore;
use serde::Serialize;

use super::generators;
use crate::engine::buffer::AudioBuffer;
use crate::error::{ClipforgeError, Result};

/// Preset used for unknown ids
pub const DEFAULT_PRESET_ID: &str = "chime-classic";

/// Generator strategy: sample rate and entropy source in, samples out
pub type GeneratorFn = fn(u32, &mut dyn RngCore) -> Vec<f32>;

/// Broad grouping for listing presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetCategory {
    Chime,
    Alert,
    Sweep,
    Melodic,
    Effect,
}

impl PresetCategory {
    /// Lowercase name, same as the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            PresetCategory::Chime => "chime",
            PresetCategory::Alert => "alert",
            PresetCategory::Sweep => "sweep",
            PresetCategory::Melodic => "melodic",
            PresetCategory::Effect => "effect",
        }
    }
}

impl fmt::Display for PresetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named generator with its metadata
#[derive(Debug, Clone, Serialize)]
pub struct Preset {
    pub id: &'static str,
    pub name: &'static str,
    pub category: PresetCategory,
    /// Nominal length of the generated clip
    pub duration_secs: f64,
    /// False for presets that draw noise from the RNG
    pub deterministic: bool,
    #[serde(skip)]
    generator: GeneratorFn,
}

impl Preset {
    const fn new(
        id: &'static str,
        name: &'static str,
        category: PresetCategory,
        duration_secs: f64,
        deterministic: bool,
        generator: GeneratorFn,
    ) -> Self {
        Self {
            id,
            name,
            category,
            duration_secs,
            deterministic,
            generator,
        }
    }

    /// Render this preset
    ///
    /// # Errors
    /// * `InvalidSampleRate` - If `sample_rate` is zero
    pub fn render(&self, sample_rate: u32, rng: &mut dyn RngCore) -> Result<AudioBuffer> {
        if sample_rate == 0 {
            return Err(ClipforgeError::InvalidSampleRate { rate: sample_rate });
        }
        let samples = (self.generator)(sample_rate, rng);
        debug!(
            "Generated preset '{}': {} samples at {} Hz",
            self.id,
            samples.len(),
            sample_rate
        );
        AudioBuffer::from_samples(samples, sample_rate)
    }
}

/// Immutable map from preset id to [`Preset`]
#[derive(Debug)]
pub struct PresetRegistry {
    presets: Vec<Preset>,
    index: HashMap<&'static str, usize>,
    default_index: usize,
}

impl PresetRegistry {
    /// Build a registry. The first preset whose id is `default_id` becomes
    /// the fallback; if none matches, the first preset is.
    pub fn new(presets: Vec<Preset>, default_id: &str) -> Self {
        let index: HashMap<&'static str, usize> = presets
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id, i))
            .collect();
        let default_index = index.get(default_id).copied().unwrap_or(0);
        Self {
            presets,
            index,
            default_index,
        }
    }

    /// The built-in preset table
    pub fn builtin() -> Self {
        use PresetCategory::*;

        let presets = vec![
            Preset::new("chime-classic", "Classic Chime", Chime, 2.0, true, generators::chime_classic),
            Preset::new("bell-soft", "Soft Bell", Chime, 2.5, true, generators::bell_soft),
            Preset::new("beep-double", "Double Beep", Alert, 2.0, true, generators::beep_double),
            Preset::new("alarm-pulse", "Pulse Alarm", Alert, 3.0, true, generators::alarm_pulse),
            Preset::new("sweep-up", "Rising Sweep", Sweep, 2.0, true, generators::sweep_up),
            Preset::new("sweep-down", "Falling Sweep", Sweep, 2.0, true, generators::sweep_down),
            Preset::new("arpeggio", "Major Arpeggio", Melodic, 2.4, true, generators::arpeggio),
            Preset::new("harmonic-pad", "Harmonic Pad", Melodic, 3.0, true, generators::harmonic_pad),
            Preset::new("power-up", "Power Up", Effect, 2.5, true, generators::power_up),
            Preset::new("static-burst", "Static Burst", Effect, 2.0, false, generators::static_burst),
            Preset::new("glitch-zap", "Glitch Zap", Effect, 2.0, false, generators::glitch_zap),
        ];
        Self::new(presets, DEFAULT_PRESET_ID)
    }

    /// Exact lookup
    pub fn get(&self, id: &str) -> Option<&Preset> {
        self.index.get(id).map(|&i| &self.presets[i])
    }

    /// Lookup with fallback to the default preset
    pub fn resolve(&self, id: &str) -> &Preset {
        match self.get(id) {
            Some(preset) => preset,
            None => {
                let fallback = self.default_preset();
                warn!("Unknown preset '{}', using '{}'", id, fallback.id);
                fallback
            }
        }
    }

    pub fn default_preset(&self) -> &Preset {
        &self.presets[self.default_index]
    }

    /// Presets in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Preset> {
        self.presets.iter()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

/// Shared built-in registry
pub fn registry() -> &'static PresetRegistry {
    static REGISTRY: OnceLock<PresetRegistry> = OnceLock::new();
    REGISTRY.get_or_init(PresetRegistry::builtin)
}

/// Built-in presets in declaration order
pub fn presets() -> impl Iterator<Item = &'static Preset> {
    registry().iter()
}

/// Generate a preset using thread-local entropy for the noisy presets
pub fn generate(preset_id: &str, sample_rate: u32) -> Result<AudioBuffer> {
    generate_with_rng(preset_id, sample_rate, &mut rand::thread_rng())
}

/// Generate a preset with a caller-supplied entropy source
///
/// Passing a seeded RNG makes every preset reproducible.
pub fn generate_with_rng(
    preset_id: &str,
    sample_rate: u32,
    rng: &mut dyn RngCore,
) -> Result<AudioBuffer> {
    registry().resolve(preset_id).render(sample_rate, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use test_case::test_case;

    #[test]
    fn test_builtin_ids_unique() {
        let registry = PresetRegistry::builtin();
        assert_eq!(registry.index.len(), registry.len());
    }

    #[test]
    fn test_unknown_id_falls_back_to_default() {
        let preset = registry().resolve("does-not-exist");
        assert_eq!(preset.id, DEFAULT_PRESET_ID);
    }

    #[test]
    fn test_unknown_id_generates_default_output() {
        let fallback = generate("nope", 8000).unwrap();
        let chime = generate(DEFAULT_PRESET_ID, 8000).unwrap();
        assert_eq!(fallback, chime);
    }

    #[test]
    fn test_zero_sample_rate() {
        assert!(matches!(
            generate("chime-classic", 0),
            Err(ClipforgeError::InvalidSampleRate { rate: 0 })
        ));
    }

    #[test]
    fn test_missing_default_uses_first() {
        let registry = PresetRegistry::new(
            vec![Preset::new(
                "only",
                "Only",
                PresetCategory::Chime,
                2.0,
                true,
                generators::chime_classic,
            )],
            "missing",
        );
        assert_eq!(registry.default_preset().id, "only");
    }

    #[test_case("chime-classic", 2.0)]
    #[test_case("bell-soft", 2.5)]
    #[test_case("alarm-pulse", 3.0)]
    #[test_case("arpeggio", 2.4)]
    #[test_case("power-up", 2.5)]
    fn test_nominal_duration(id: &str, secs: f64) {
        let mut rng = StdRng::seed_from_u64(0);
        let buffer = generate_with_rng(id, 44100, &mut rng).unwrap();
        assert_eq!(buffer.len(), (secs * 44100.0).round() as usize);
        assert_eq!(registry().get(id).map(|p| p.duration_secs), Some(secs));
    }

    #[test_case(PresetCategory::Chime, "chime")]
    #[test_case(PresetCategory::Alert, "alert")]
    #[test_case(PresetCategory::Sweep, "sweep")]
    #[test_case(PresetCategory::Melodic, "melodic")]
    #[test_case(PresetCategory::Effect, "effect")]
    fn test_category_names_match_serialized(category: PresetCategory, name: &str) {
        assert_eq!(category.to_string(), name);
        assert_eq!(
            serde_json::to_string(&category).unwrap(),
            format!("\"{}\"", name)
        );
    }

    #[test]
    fn test_noisy_presets_flagged() {
        let noisy: Vec<&str> = presets().filter(|p| !p.deterministic).map(|p| p.id).collect();
        assert_eq!(noisy, vec!["static-burst", "glitch-zap"]);
    }
}
