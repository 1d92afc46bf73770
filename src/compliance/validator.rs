//! Compliance rules
//!
//! Each rule yields its own [`ValidationResult`]; the combined verdict merges
//! them in declaration order. Nothing here fails with an error: a bad range is
//! an ordinary outcome while the user drags trim handles.

use serde::{Deserialize, Serialize};

use super::constraints::DeviceConstraints;
use crate::codec::wav::{parse_wav_header, WAVE_FORMAT_PCM, WAV_HEADER_SIZE};

/// Absorbs float noise in `end - start` at the inclusive bounds
const DURATION_TOLERANCE: f64 = 1e-9;

/// Verdict with human-readable reasons
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            errors: vec![message.into()],
        }
    }

    /// Combine with another result, keeping message order
    pub fn merge(mut self, other: ValidationResult) -> Self {
        self.valid &= other.valid;
        self.errors.extend(other.errors);
        self
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}

impl FromIterator<ValidationResult> for ValidationResult {
    fn from_iter<I: IntoIterator<Item = ValidationResult>>(iter: I) -> Self {
        iter.into_iter().fold(Self::ok(), Self::merge)
    }
}

impl DeviceConstraints {
    /// Duration rule: `min <= end - start <= max`
    pub fn check_duration(&self, start: f64, end: f64) -> ValidationResult {
        let duration = end - start;
        if !duration.is_finite() {
            ValidationResult::failed(format!("Invalid range: {} to {}", start, end))
        } else if duration < self.min_duration_secs - DURATION_TOLERANCE {
            ValidationResult::failed(format!(
                "Clip too short: {:.1}s (minimum {:.1}s)",
                duration, self.min_duration_secs
            ))
        } else if duration > self.max_duration_secs + DURATION_TOLERANCE {
            ValidationResult::failed(format!(
                "Clip too long: {:.1}s (maximum {:.1}s)",
                duration, self.max_duration_secs
            ))
        } else {
            ValidationResult::ok()
        }
    }

    /// Size of a canonical WAV holding `end - start` seconds
    ///
    /// `44 + floor(rate * (end - start)) * frame_size`, saturating at
    /// `u64::MAX`. A NaN duration counts as zero frames.
    pub fn estimate_file_size(&self, start: f64, end: f64) -> u64 {
        let frames = (self.sample_rate as f64 * (end - start)).floor().max(0.0) as u64;
        frames
            .saturating_mul(self.frame_size())
            .saturating_add(WAV_HEADER_SIZE as u64)
    }

    /// File-size rule on the estimated size
    pub fn check_file_size(&self, start: f64, end: f64) -> ValidationResult {
        self.check_size(self.estimate_file_size(start, end))
    }

    fn check_size(&self, size: u64) -> ValidationResult {
        if size > self.max_file_size {
            ValidationResult::failed(format!(
                "File too large: {} bytes (maximum {} bytes)",
                size, self.max_file_size
            ))
        } else {
            ValidationResult::ok()
        }
    }

    /// All range rules: duration, then file size
    pub fn validate(&self, start: f64, end: f64) -> ValidationResult {
        [
            self.check_duration(start, end),
            self.check_file_size(start, end),
        ]
        .into_iter()
        .collect()
    }

    /// Check an encoded blob: header format, then actual size
    pub fn validate_encoded(&self, bytes: &[u8]) -> ValidationResult {
        let format = match parse_wav_header(bytes) {
            Ok(format) => format,
            Err(e) => return ValidationResult::failed(format!("Unreadable WAV: {}", e)),
        };

        let mut mismatches = Vec::new();
        if format.audio_format != WAVE_FORMAT_PCM {
            mismatches.push(format!("format tag {}", format.audio_format));
        }
        if format.num_channels != self.channels {
            mismatches.push(format!("{} channels", format.num_channels));
        }
        if format.sample_rate != self.sample_rate {
            mismatches.push(format!("{} Hz", format.sample_rate));
        }
        if format.bits_per_sample != self.bits_per_sample {
            mismatches.push(format!("{}-bit", format.bits_per_sample));
        }

        let format_result = if mismatches.is_empty() {
            ValidationResult::ok()
        } else {
            ValidationResult::failed(format!(
                "Format mismatch: expected PCM {} ch {}-bit {} Hz, got {}",
                self.channels,
                self.bits_per_sample,
                self.sample_rate,
                mismatches.join(", ")
            ))
        };

        format_result.merge(self.check_size(bytes.len() as u64))
    }
}

/// Validate a range against the default device profile
pub fn validate_for_target(start: f64, end: f64) -> ValidationResult {
    DeviceConstraints::default().validate(start, end)
}

/// Estimated WAV size for a range under the default device profile
pub fn estimate_file_size(start: f64, end: f64) -> u64 {
    DeviceConstraints::default().estimate_file_size(start, end)
}

/// Validate an encoded blob against the default device profile
pub fn validate_encoded(bytes: &[u8]) -> ValidationResult {
    DeviceConstraints::default().validate_encoded(bytes)
}
