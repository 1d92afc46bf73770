//! Sample rate conversion
//!
//! Linear interpolation between the two source samples around each output
//! position. No anti-alias filter: fine for short UI clips, not for mastering.

use log::debug;

use crate::engine::buffer::AudioBuffer;
use crate::error::Result;

/// Resample a buffer's samples to `target_rate`
///
/// Returns the raw sample array; wrap it with [`AudioBuffer::from_samples`]
/// or use [`resample_buffer`] to keep the rate attached.
pub fn resample(buffer: &AudioBuffer, target_rate: u32) -> Vec<f32> {
    resample_linear(buffer.samples(), buffer.sample_rate(), target_rate)
}

/// Resample into a new buffer at `target_rate`
pub fn resample_buffer(buffer: &AudioBuffer, target_rate: u32) -> Result<AudioBuffer> {
    AudioBuffer::from_samples(resample(buffer, target_rate), target_rate)
}

/// Linear interpolation resampling
///
/// For output index `i` the source position is `i * source_rate / target_rate`.
/// The upper neighbour index is clamped to the last sample. Output length is
/// `round(source_len / ratio)`.
pub fn resample_linear(samples: &[f32], source_rate: u32, target_rate: u32) -> Vec<f32> {
    if samples.is_empty() || source_rate == 0 || target_rate == 0 {
        return Vec::new();
    }

    let ratio = source_rate as f64 / target_rate as f64;
    let source_len = samples.len();
    let last = source_len - 1;
    let target_len = (source_len as f64 / ratio).round() as usize;

    debug!(
        "Resampling {} samples {} Hz -> {} Hz ({} samples)",
        source_len, source_rate, target_rate, target_len
    );

    (0..target_len)
        .map(|i| {
            let src_pos = i as f64 * ratio;
            let src_idx = (src_pos.floor() as usize).min(last);
            let next_idx = (src_idx + 1).min(last);
            let frac = src_pos - src_pos.floor();

            let a = samples[src_idx] as f64;
            let b = samples[next_idx] as f64;
            (a * (1.0 - frac) + b * frac) as f32
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
