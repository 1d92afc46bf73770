//! Audio Buffer
//!
//! Mono 32-bit float sample buffer shared by every pipeline stage.
//! Stages never mutate a buffer they were handed; each returns a new one.

use crate::error::{ClipforgeError, Result};

// ============================================================================
// Constants
// ============================================================================

/// Sample rate the target device expects (44.1kHz)
pub const TARGET_SAMPLE_RATE: u32 = 44100;

/// Channel count of every buffer (mono)
pub const CHANNEL_COUNT: u16 = 1;

// ============================================================================
// Helper Functions
// ============================================================================

/// Convert linear amplitude to decibels
///
/// Returns -f32::INFINITY for zero input.
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    if linear <= 0.0 {
        f32::NEG_INFINITY
    } else {
        20.0 * linear.log10()
    }
}

// ============================================================================
// Audio Buffer
// ============================================================================

/// Mono audio buffer
///
/// # Example
/// ```
/// use clipforge::engine::AudioBuffer;
///
/// let buffer = AudioBuffer::from_samples(vec![0.0; 44100], 44100).unwrap();
/// assert_eq!(buffer.len(), 44100);
/// assert_eq!(buffer.duration_secs(), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl AudioBuffer {
    /// Create a buffer of `num_samples` zeroed samples
    pub fn silent(num_samples: usize, sample_rate: u32) -> Result<Self> {
        Self::from_samples(vec![0.0; num_samples], sample_rate)
    }

    /// Wrap existing samples
    ///
    /// # Errors
    /// * `InvalidSampleRate` - If `sample_rate` is zero
    pub fn from_samples(samples: Vec<f32>, sample_rate: u32) -> Result<Self> {
        if sample_rate == 0 {
            return Err(ClipforgeError::InvalidSampleRate { rate: sample_rate });
        }
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Sample rate in Hz
    #[inline]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Always 1
    #[inline]
    pub fn channel_count(&self) -> u16 {
        CHANNEL_COUNT
    }

    /// Number of samples
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds (`len / sample_rate`)
    #[inline]
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    #[inline]
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Consume the buffer and return its samples
    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }

    /// True peak (largest absolute sample value)
    pub fn peak(&self) -> f32 {
        self.samples.iter().map(|s| s.abs()).fold(0.0_f32, f32::max)
    }

    /// Peak level in dBFS. -inf for silent or empty buffers.
    pub fn peak_db(&self) -> f32 {
        linear_to_db(self.peak())
    }

    /// Check that all samples are finite (not NaN or Infinity)
    pub fn is_finite(&self) -> bool {
        self.samples.iter().all(|s| s.is_finite())
    }
}

// ============================================================================
// Tests
// ============================================================================
