//! Collaborator boundaries: decoding external audio and handing off bytes
//!
//! The core never touches files or the network itself. Decoding of user
//! supplied audio goes through an [`AudioDecoder`]; encoded output is handed to
//! a [`ByteSink`] together with its content type.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use hound::{SampleFormat, WavReader};
use log::{debug, info};

use crate::engine::buffer::AudioBuffer;
use crate::error::{ClipforgeError, Result};

/// Decodes an externally supplied audio file into a mono buffer
pub trait AudioDecoder {
    /// Decode `bytes` into a mono buffer at the file's own sample rate
    fn decode(&self, bytes: &[u8]) -> Result<AudioBuffer>;
}

/// Receives an encoded blob for storage or download
pub trait ByteSink {
    fn accept(&mut self, bytes: &[u8], content_type: &str) -> Result<()>;
}

// ============================================================================
// Decoder
// ============================================================================

/// WAV decoder backed by `hound`
///
/// Unlike [`crate::codec::parse_wav_header`] this walks the chunk list, so it
/// reads extended layouts and any integer or float bit depth. Multichannel
/// files are downmixed to mono by averaging.
#[derive(Debug, Clone, Copy, Default)]
pub struct HoundDecoder;

impl AudioDecoder for HoundDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<AudioBuffer> {
        let reader = WavReader::new(Cursor::new(bytes)).map_err(|e| {
            ClipforgeError::InvalidAudio {
                reason: format!("Failed to open WAV data: {}", e),
                source: Some(Box::new(e)),
            }
        })?;

        let spec = reader.spec();
        let channels = spec.channels as usize;
        if channels == 0 {
            return Err(ClipforgeError::UnsupportedFormat {
                format: "0-channel audio".to_string(),
            });
        }

        debug!(
            "Decoding WAV: {} Hz, {} ch, {}-bit {:?}",
            spec.sample_rate, spec.channels, spec.bits_per_sample, spec.sample_format
        );

        let interleaved = read_samples_as_f32(reader, spec.bits_per_sample, spec.sample_format)?;
        AudioBuffer::from_samples(downmix(&interleaved, channels), spec.sample_rate)
    }
}

/// Import a WAV file from disk through [`HoundDecoder`]
///
/// # Errors
/// * `FileNotFound` - If the file does not exist
/// * `InvalidAudio` - If the file is not a valid WAV file
/// * `UnsupportedFormat` - If the bit depth cannot be read
pub fn import_wav(path: &Path) -> Result<AudioBuffer> {
    if !path.exists() {
        return Err(ClipforgeError::FileNotFound {
            path: path.display().to_string(),
            source: None,
        });
    }

    let bytes = std::fs::read(path)?;
    let buffer = HoundDecoder.decode(&bytes)?;
    info!(
        "Imported {} ({:.2}s at {} Hz)",
        path.display(),
        buffer.duration_secs(),
        buffer.sample_rate()
    );
    Ok(buffer)
}

// ============================================================================
// Sinks
// ============================================================================

/// Writes the blob to a file
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ByteSink for FileSink {
    fn accept(&mut self, bytes: &[u8], content_type: &str) -> Result<()> {
        std::fs::write(&self.path, bytes)?;
        info!(
            "Wrote {} bytes ({}) to {}",
            bytes.len(),
            content_type,
            self.path.display()
        );
        Ok(())
    }
}

/// Keeps the last accepted blob in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

impl ByteSink for MemorySink {
    fn accept(&mut self, bytes: &[u8], content_type: &str) -> Result<()> {
        self.bytes = bytes.to_vec();
        self.content_type = Some(content_type.to_string());
        Ok(())
    }
}

// ============================================================================
// Internal helper functions
// ============================================================================

/// Read samples from WAV reader and convert to f32
fn read_samples_as_f32<R: std::io::Read>(
    mut reader: WavReader<R>,
    bits_per_sample: u16,
    sample_format: SampleFormat,
) -> Result<Vec<f32>> {
    let invalid = |bits: &str, e: hound::Error| ClipforgeError::InvalidAudio {
        reason: format!("Failed to read {} samples: {}", bits, e),
        source: Some(Box::new(e)),
    };

    match sample_format {
        SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<std::result::Result<Vec<f32>, _>>()
            .map_err(|e| invalid("float", e)),
        SampleFormat::Int => match bits_per_sample {
            8 => reader
                .samples::<i8>()
                .map(|s| s.map(|v| v as f32 / 128.0))
                .collect::<std::result::Result<Vec<f32>, _>>()
                .map_err(|e| invalid("8-bit", e)),
            16 => reader
                .samples::<i16>()
                .map(|s| s.map(|v| v as f32 / 32768.0))
                .collect::<std::result::Result<Vec<f32>, _>>()
                .map_err(|e| invalid("16-bit", e)),
            // 24-bit stored as i32 in hound
            24 => reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / 8388608.0))
                .collect::<std::result::Result<Vec<f32>, _>>()
                .map_err(|e| invalid("24-bit", e)),
            32 => reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / 2147483648.0))
                .collect::<std::result::Result<Vec<f32>, _>>()
                .map_err(|e| invalid("32-bit int", e)),
            _ => Err(ClipforgeError::UnsupportedFormat {
                format: format!("{}-bit integer audio", bits_per_sample),
            }),
        },
    }
}

/// Average interleaved frames down to one channel
fn downmix(interleaved: &[f32], channels: usize) -> Vec<f32> {
    if channels == 1 {
        return interleaved.to_vec();
    }
    interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use hound::{WavSpec, WavWriter};
    use tempfile::tempdir;

    fn write_stereo_fixture(path: &Path) {
        let spec = WavSpec {
            channels: 2,
            sample_rate: 22050,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(path, spec).unwrap();
        for _ in 0..2205 {
            writer.write_sample(16384_i16).unwrap();
            writer.write_sample(-16384_i16).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_downmix_stereo() {
        let mono = downmix(&[1.0, 0.0, 0.5, 0.5], 2);
        assert_eq!(mono, vec![0.5, 0.5]);
    }

    #[test]
    fn test_import_stereo_downmixes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stereo.wav");
        write_stereo_fixture(&path);

        let buffer = import_wav(&path).unwrap();
        assert_eq!(buffer.sample_rate(), 22050);
        assert_eq!(buffer.len(), 2205);
        assert!(buffer.samples().iter().all(|s| s.abs() < 1e-6));
    }

    #[test]
    fn test_import_float_wav() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("float.wav");
        let spec = WavSpec {
            channels: 1,
            sample_rate: 48000,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let mut writer = WavWriter::create(&path, spec).unwrap();
        for _ in 0..480 {
            writer.write_sample(0.25_f32).unwrap();
        }
        writer.finalize().unwrap();

        let buffer = import_wav(&path).unwrap();
        assert_eq!(buffer.len(), 480);
        assert_eq!(buffer.samples()[0], 0.25);
    }

    #[test]
    fn test_import_nonexistent_file() {
        let result = import_wav(Path::new("/nonexistent/path/audio.wav"));
        match result.unwrap_err() {
            ClipforgeError::FileNotFound { path, .. } => {
                assert!(path.contains("nonexistent"));
            }
            other => panic!("Expected FileNotFound error, got: {:?}", other),
        }
    }

    #[test]
    fn test_decode_garbage_is_invalid_audio() {
        let result = HoundDecoder.decode(b"definitely not a wav file");
        assert!(matches!(result, Err(ClipforgeError::InvalidAudio { .. })));
    }

    #[test]
    fn test_file_sink_writes_bytes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.wav");
        let mut sink = FileSink::new(&path);
        sink.accept(b"RIFF", "audio/wav").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"RIFF");
    }

    #[test]
    fn test_memory_sink_records_content_type() {
        let mut sink = MemorySink::default();
        sink.accept(&[1, 2, 3], "audio/wav").unwrap();
        assert_eq!(sink.bytes, vec![1, 2, 3]);
        assert_eq!(sink.content_type.as_deref(), Some("audio/wav"));
    }
}
