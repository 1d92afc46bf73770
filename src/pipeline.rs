//! End-to-end export
//!
//! Range check → trim/effects → encode at the device rate → blob check →
//! hand off to a [`ByteSink`]. Nothing reaches the sink unless every rule
//! passes.

use log::{info, warn};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::codec::wav::{encode_wav, parse_wav_header, WaveFormat, WAV_MIME_TYPE};
use crate::compliance::{DeviceConstraints, ValidationResult};
use crate::dsp::{trim, EffectParameters, TrimRange};
use crate::engine::buffer::AudioBuffer;
use crate::engine::io::ByteSink;
use crate::error::Result;

/// Outcome of one export
#[derive(Debug, Clone, Serialize)]
pub struct ExportReport {
    pub validation: ValidationResult,
    /// True once the sink accepted the blob
    pub written: bool,
    pub content_type: &'static str,
    pub byte_count: usize,
    pub duration_secs: f64,
    pub format: Option<WaveFormat>,
    /// Hex SHA-256 of the encoded blob
    pub sha256: Option<String>,
}

impl ExportReport {
    fn rejected(validation: ValidationResult) -> Self {
        Self {
            validation,
            written: false,
            content_type: WAV_MIME_TYPE,
            byte_count: 0,
            duration_secs: 0.0,
            format: None,
            sha256: None,
        }
    }
}

/// Trims, encodes and validates clips for one device profile
#[derive(Debug, Clone, Default)]
pub struct ExportPipeline {
    pub constraints: DeviceConstraints,
    pub effects: EffectParameters,
}

impl ExportPipeline {
    pub fn new(constraints: DeviceConstraints, effects: EffectParameters) -> Self {
        Self {
            constraints,
            effects,
        }
    }

    /// Trim and encode without validating or writing
    pub fn render(&self, source: &AudioBuffer, range: TrimRange) -> Result<Vec<u8>> {
        let clip = trim(source, range, &self.effects)?;
        encode_wav(&clip, self.constraints.sample_rate)
    }

    /// Run the whole export
    ///
    /// Compliance failures come back in the report with `written == false`.
    ///
    /// # Errors
    /// * `InvalidRange` - If `range` does not fit `source`
    /// * Any error the sink returns
    pub fn export(
        &self,
        source: &AudioBuffer,
        range: TrimRange,
        sink: &mut dyn ByteSink,
    ) -> Result<ExportReport> {
        let range_check = self.constraints.validate(range.start, range.end);
        if !range_check.valid {
            warn!("Export rejected: {}", range_check.errors.join("; "));
            return Ok(ExportReport::rejected(range_check));
        }

        let bytes = self.render(source, range)?;
        let validation = range_check.merge(self.constraints.validate_encoded(&bytes));
        if !validation.valid {
            warn!("Encoded clip rejected: {}", validation.errors.join("; "));
            return Ok(ExportReport::rejected(validation));
        }

        let format = parse_wav_header(&bytes)?;
        sink.accept(&bytes, WAV_MIME_TYPE)?;

        let report = ExportReport {
            validation,
            written: true,
            content_type: WAV_MIME_TYPE,
            byte_count: bytes.len(),
            duration_secs: format.duration_secs(),
            format: Some(format),
            sha256: Some(format!("{:x}", Sha256::digest(&bytes))),
        };
        info!(
            "Exported {:.2}s clip ({} bytes)",
            report.duration_secs, report.byte_count
        );
        Ok(report)
    }
}
