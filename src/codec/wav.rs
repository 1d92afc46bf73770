//! Canonical RIFF/WAVE codec
//!
//! Byte layout written by [`encode_wav`]:
//!
//! ```text
//! 0  "RIFF"            4  u32 chunk size (36 + data size)
//! 8  "WAVE"           12  "fmt "
//! 16 u32 16           20  u16 audio format (1 = PCM)
//! 22 u16 channels     24  u32 sample rate
//! 28 u32 byte rate    32  u16 block align
//! 34 u16 bits/sample  36  "data"
//! 40 u32 data size    44  i16 LE samples
//! ```
//!
//! The parser only understands this canonical 44-byte layout. Files with
//! extra chunks before `data` go through [`crate::engine::HoundDecoder`].

use log::debug;
use serde::{Deserialize, Serialize};

use crate::engine::buffer::{AudioBuffer, CHANNEL_COUNT, TARGET_SAMPLE_RATE};
use crate::engine::resample::resample;
use crate::error::{ClipforgeError, Result};

/// Content type declared for every encoded blob
pub const WAV_MIME_TYPE: &str = "audio/wav";

/// Size of the canonical header
pub const WAV_HEADER_SIZE: usize = 44;

/// PCM format tag
pub const WAVE_FORMAT_PCM: u16 = 1;

const BITS_PER_SAMPLE: u16 = 16;
const BYTES_PER_SAMPLE: usize = 2;

/// Format fields read from (or written into) a canonical header
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveFormat {
    pub audio_format: u16,
    pub num_channels: u16,
    pub sample_rate: u32,
    pub bits_per_sample: u16,
    pub data_size: u32,
}

impl WaveFormat {
    /// Bytes per second of audio, widened so extreme rates cannot wrap
    pub fn byte_rate(&self) -> u64 {
        self.sample_rate as u64 * self.num_channels as u64 * self.bits_per_sample as u64 / 8
    }

    /// Bytes per frame
    pub fn block_align(&self) -> u16 {
        self.num_channels * self.bits_per_sample / 8
    }

    /// `data_size / byte_rate`
    pub fn duration_secs(&self) -> f64 {
        self.data_size as f64
            / (self.sample_rate as f64
                * self.num_channels as f64
                * (self.bits_per_sample as f64 / 8.0))
    }
}

// ============================================================================
// Encoder
// ============================================================================

/// Encode a buffer as 16-bit mono PCM WAV at `target_rate`
///
/// The buffer is resampled first when its rate differs from `target_rate`.
/// Samples are clamped to [-1, 1] here and nowhere earlier in the pipeline.
///
/// # Errors
/// * `InvalidSampleRate` - If `target_rate` is zero
/// * `Encode` - If the data size or byte rate would not fit a 32-bit field
pub fn encode_wav(buffer: &AudioBuffer, target_rate: u32) -> Result<Vec<u8>> {
    if target_rate == 0 {
        return Err(ClipforgeError::InvalidSampleRate { rate: target_rate });
    }

    let resampled;
    let samples = if buffer.sample_rate() != target_rate {
        debug!(
            "Encoding requires resample {} Hz -> {} Hz",
            buffer.sample_rate(),
            target_rate
        );
        resampled = resample(buffer, target_rate);
        &resampled[..]
    } else {
        buffer.samples()
    };

    let data_size = samples
        .len()
        .checked_mul(BYTES_PER_SAMPLE)
        .and_then(|n| u32::try_from(n).ok())
        .filter(|n| n.checked_add(36).is_some())
        .ok_or_else(|| ClipforgeError::Encode {
            reason: format!("{} samples exceed the RIFF size limit", samples.len()),
        })?;

    let format = WaveFormat {
        audio_format: WAVE_FORMAT_PCM,
        num_channels: CHANNEL_COUNT,
        sample_rate: target_rate,
        bits_per_sample: BITS_PER_SAMPLE,
        data_size,
    };
    let byte_rate = u32::try_from(format.byte_rate()).map_err(|_| ClipforgeError::Encode {
        reason: format!("byte rate at {} Hz exceeds 32 bits", target_rate),
    })?;

    let mut bytes = Vec::with_capacity(WAV_HEADER_SIZE + data_size as usize);
    write_header(&mut bytes, &format, byte_rate);
    for &sample in samples {
        bytes.extend_from_slice(&float_to_i16(sample).to_le_bytes());
    }

    debug!(
        "Encoded {} samples into {} bytes",
        samples.len(),
        bytes.len()
    );
    Ok(bytes)
}

/// Encode at the device rate (44.1kHz)
pub fn encode_wav_default(buffer: &AudioBuffer) -> Result<Vec<u8>> {
    encode_wav(buffer, TARGET_SAMPLE_RATE)
}

/// Convert a float sample to int16
///
/// Clamps to [-1, 1], then scales negatives by 32768 and positives by 32767
/// so neither end overflows.
#[inline]
pub fn float_to_i16(sample: f32) -> i16 {
    let s = sample.clamp(-1.0, 1.0);
    let scaled = if s < 0.0 {
        s * 32768.0
    } else {
        s * 32767.0
    };
    scaled.round() as i16
}

/// Inverse of [`float_to_i16`]
#[inline]
pub fn i16_to_float(sample: i16) -> f32 {
    if sample < 0 {
        sample as f32 / 32768.0
    } else {
        sample as f32 / 32767.0
    }
}

fn write_header(bytes: &mut Vec<u8>, format: &WaveFormat, byte_rate: u32) {
    // RIFF header
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + format.data_size).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");

    // fmt sub-chunk
    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&format.audio_format.to_le_bytes());
    bytes.extend_from_slice(&format.num_channels.to_le_bytes());
    bytes.extend_from_slice(&format.sample_rate.to_le_bytes());
    bytes.extend_from_slice(&byte_rate.to_le_bytes());
    bytes.extend_from_slice(&format.block_align().to_le_bytes());
    bytes.extend_from_slice(&format.bits_per_sample.to_le_bytes());

    // data sub-chunk
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&format.data_size.to_le_bytes());
}

// ============================================================================
// Decoder
// ============================================================================

/// Parse the canonical 44-byte header
///
/// Sample data past the header is never read, so truncated data is fine.
///
/// # Errors
/// * `Format` - Missing "RIFF"/"WAVE" magic, a header shorter than 44 bytes,
///   or zero-valued rate/channel/bit fields that leave duration undefined
pub fn parse_wav_header(bytes: &[u8]) -> Result<WaveFormat> {
    if bytes.get(0..4) != Some(b"RIFF".as_slice()) {
        return Err(ClipforgeError::format("missing RIFF marker at offset 0"));
    }
    if bytes.get(8..12) != Some(b"WAVE".as_slice()) {
        return Err(ClipforgeError::format("missing WAVE marker at offset 8"));
    }
    if bytes.len() < WAV_HEADER_SIZE {
        return Err(ClipforgeError::format(format!(
            "header truncated at {} bytes (need {})",
            bytes.len(),
            WAV_HEADER_SIZE
        )));
    }

    let format = WaveFormat {
        audio_format: read_u16(bytes, 20),
        num_channels: read_u16(bytes, 22),
        sample_rate: read_u32(bytes, 24),
        bits_per_sample: read_u16(bytes, 34),
        data_size: read_u32(bytes, 40),
    };

    if format.sample_rate == 0 || format.num_channels == 0 || format.bits_per_sample == 0 {
        return Err(ClipforgeError::format(format!(
            "zero-valued format field (rate {}, channels {}, bits {})",
            format.sample_rate, format.num_channels, format.bits_per_sample
        )));
    }

    Ok(format)
}

/// Decode a canonical 16-bit PCM blob back into a mono buffer
///
/// Multichannel frames are averaged. Only complete frames present in `bytes`
/// are decoded, even if the header declares more.
///
/// # Errors
/// * `Format` - See [`parse_wav_header`]
/// * `UnsupportedFormat` - If the data is not 16-bit PCM
pub fn decode_wav(bytes: &[u8]) -> Result<AudioBuffer> {
    let format = parse_wav_header(bytes)?;

    if format.audio_format != WAVE_FORMAT_PCM || format.bits_per_sample != BITS_PER_SAMPLE {
        return Err(ClipforgeError::UnsupportedFormat {
            format: format!(
                "format tag {} with {}-bit samples (only 16-bit PCM)",
                format.audio_format, format.bits_per_sample
            ),
        });
    }

    let declared_end = WAV_HEADER_SIZE.saturating_add(format.data_size as usize);
    let data = &bytes[WAV_HEADER_SIZE..declared_end.min(bytes.len())];
    let channels = format.num_channels as usize;

    let samples = data
        .chunks_exact(channels * BYTES_PER_SAMPLE)
        .map(|frame| {
            let sum: f32 = frame
                .chunks_exact(BYTES_PER_SAMPLE)
                .map(|b| i16_to_float(i16::from_le_bytes([b[0], b[1]])))
                .sum();
            sum / channels as f32
        })
        .collect();

    AudioBuffer::from_samples(samples, format.sample_rate)
}

#[inline]
fn read_u16(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

#[inline]
fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

// ============================================================================
// Tests
// ============================================================================
