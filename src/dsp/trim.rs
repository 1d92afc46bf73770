//! Trim and Effects Engine
//!
//! Cuts `[start, end)` out of a buffer, then applies, in order:
//! fade-in, fade-out, volume, and optional peak normalization.

use std::path::Path;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::engine::buffer::AudioBuffer;
use crate::error::{ClipforgeError, Result};

/// Default normalization ceiling
pub const DEFAULT_NORMALIZE_CEILING: f32 = 0.95;

/// A time range in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrimRange {
    pub start: f64,
    pub end: f64,
}

impl TrimRange {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Whole buffer
    pub fn full(buffer: &AudioBuffer) -> Self {
        Self::new(0.0, buffer.duration_secs())
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Check `0 <= start < end <= duration`
    ///
    /// `end` may overshoot `duration` by half a sample period so that
    /// `duration_secs()` round trips cleanly.
    ///
    /// # Errors
    /// * `InvalidRange` - If the range is empty, reversed, or out of bounds
    pub fn check(&self, buffer: &AudioBuffer) -> Result<()> {
        let duration = buffer.duration_secs();
        let slack = 0.5 / buffer.sample_rate() as f64;
        let valid = self.start.is_finite()
            && self.end.is_finite()
            && self.start >= 0.0
            && self.start < self.end
            && self.end <= duration + slack;

        if valid {
            Ok(())
        } else {
            Err(ClipforgeError::InvalidRange {
                start: self.start,
                end: self.end,
                duration,
            })
        }
    }
}

/// Effect settings for a trim
///
/// # Example
/// ```
/// use clipforge::dsp::EffectParameters;
///
/// let effects = EffectParameters::default()
///     .with_volume(0.8)
///     .with_fades(0.05, 0.2)
///     .with_normalize(0.95);
/// assert_eq!(effects.volume, 0.8);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectParameters {
    /// Linear gain in [0, 1]
    pub volume: f32,
    pub fade_in_secs: f64,
    pub fade_out_secs: f64,
    /// Peak ceiling to normalize to, if any
    pub normalize_to: Option<f32>,
}

impl Default for EffectParameters {
    fn default() -> Self {
        Self {
            volume: 1.0,
            fade_in_secs: 0.0,
            fade_out_secs: 0.0,
            normalize_to: None,
        }
    }
}

impl EffectParameters {
    /// Short fades that remove clicks at the cut points
    pub fn declick() -> Self {
        Self::default().with_fades(0.01, 0.01)
    }

    /// Declicked and normalized to the default ceiling
    pub fn ringtone() -> Self {
        Self::declick()
            .with_fades(0.02, 0.1)
            .with_normalize(DEFAULT_NORMALIZE_CEILING)
    }

    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = volume;
        self
    }

    pub fn with_fades(mut self, fade_in_secs: f64, fade_out_secs: f64) -> Self {
        self.fade_in_secs = fade_in_secs;
        self.fade_out_secs = fade_out_secs;
        self
    }

    pub fn with_normalize(mut self, ceiling: f32) -> Self {
        self.normalize_to = Some(ceiling);
        self
    }

    /// Load settings from a JSON file; missing fields take defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Volume clamped to [0, 1]; NaN becomes 0
    fn clamped_volume(&self) -> f32 {
        if self.volume.is_nan() {
            0.0
        } else {
            self.volume.clamp(0.0, 1.0)
        }
    }
}

/// Fade length in samples, clipped to half the region
fn fade_samples(secs: f64, sample_rate: u32, region_len: usize) -> usize {
    if !secs.is_finite() || secs <= 0.0 {
        return 0;
    }
    ((secs * sample_rate as f64).round() as usize).min(region_len / 2)
}

/// Trim `buffer` to `range` and apply `effects`
///
/// # Errors
/// * `InvalidRange` - See [`TrimRange::check`]
pub fn trim(buffer: &AudioBuffer, range: TrimRange, effects: &EffectParameters) -> Result<AudioBuffer> {
    range.check(buffer)?;

    let rate = buffer.sample_rate() as f64;
    let len = buffer.len();
    let start = ((range.start * rate).round() as usize).min(len);
    let end = ((range.end * rate).round() as usize).min(len);
    if start >= end {
        return Err(ClipforgeError::InvalidRange {
            start: range.start,
            end: range.end,
            duration: buffer.duration_secs(),
        });
    }

    let mut region = buffer.samples()[start..end].to_vec();
    let n = region.len();

    let fade_in = fade_samples(effects.fade_in_secs, buffer.sample_rate(), n);
    let fade_out = fade_samples(effects.fade_out_secs, buffer.sample_rate(), n);
    let volume = effects.clamped_volume();

    debug!(
        "Trim {}..{} ({} samples), fade in {} / out {}, volume {:.2}",
        start, end, n, fade_in, fade_out, volume
    );

    for (i, sample) in region.iter_mut().take(fade_in).enumerate() {
        *sample *= i as f32 / fade_in as f32;
    }
    for (i, sample) in region.iter_mut().enumerate().skip(n - fade_out) {
        *sample *= (n - 1 - i) as f32 / fade_out as f32;
    }
    if volume != 1.0 {
        for sample in region.iter_mut() {
            *sample *= volume;
        }
    }

    if let Some(ceiling) = effects.normalize_to {
        normalize(&mut region, ceiling);
    }

    AudioBuffer::from_samples(region, buffer.sample_rate())
}

/// Rescale so the true peak equals `ceiling`. Silent input is left alone.
fn normalize(samples: &mut [f32], ceiling: f32) {
    let peak = samples.iter().map(|s| s.abs()).fold(0.0_f32, f32::max);
    if peak == 0.0 {
        warn!("Normalization skipped: buffer is silent");
        return;
    }
    let gain = ceiling / peak;
    debug!("Normalizing peak {:.4} -> {:.4} (gain {:.4})", peak, ceiling, gain);
    for sample in samples.iter_mut() {
        *sample *= gain;
    }
}

/// Holds the clip currently being edited
///
/// Every trim reads the loaded buffer and returns a fresh one; the loaded
/// buffer itself is never modified.
#[derive(Debug, Clone, Default)]
pub struct TrimEngine {
    source: Option<AudioBuffer>,
}

impl TrimEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source(buffer: AudioBuffer) -> Self {
        Self {
            source: Some(buffer),
        }
    }

    /// Replace the loaded buffer
    pub fn load(&mut self, buffer: AudioBuffer) {
        self.source = Some(buffer);
    }

    pub fn unload(&mut self) -> Option<AudioBuffer> {
        self.source.take()
    }

    pub fn source(&self) -> Option<&AudioBuffer> {
        self.source.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.source.is_some()
    }

    /// Trim the loaded buffer
    ///
    /// # Errors
    /// * `NoAudioLoaded` - If nothing is loaded
    /// * `InvalidRange` - See [`TrimRange::check`]
    pub fn trim(&self, range: TrimRange, effects: &EffectParameters) -> Result<AudioBuffer> {
        let source = self.source.as_ref().ok_or(ClipforgeError::NoAudioLoaded)?;
        trim(source, range, effects)
    }
}

// ============================================================================
// Tests
// ============================================================================
