//! Device constraint profile

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Shortest accepted clip (seconds)
pub const MIN_DURATION: f64 = 2.0;

/// Longest accepted clip (seconds)
pub const MAX_DURATION: f64 = 5.0;

/// Largest accepted file (1 MiB)
pub const MAX_FILE_SIZE: u64 = 1_048_576;

/// What the target device accepts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConstraints {
    pub min_duration_secs: f64,
    pub max_duration_secs: f64,
    pub max_file_size: u64,
    pub sample_rate: u32,
    pub channels: u16,
    pub bits_per_sample: u16,
}

impl Default for DeviceConstraints {
    fn default() -> Self {
        Self {
            min_duration_secs: MIN_DURATION,
            max_duration_secs: MAX_DURATION,
            max_file_size: MAX_FILE_SIZE,
            sample_rate: 44100,
            channels: 1,
            bits_per_sample: 16,
        }
    }
}

impl DeviceConstraints {
    /// Load a profile from JSON; missing fields take defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Bytes per sample frame
    pub fn frame_size(&self) -> u64 {
        self.channels as u64 * (self.bits_per_sample as u64 / 8)
    }
}
