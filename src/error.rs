//! Error handling for Clipforge
//!
//! Codec and trim failures are returned as errors. Compliance failures are
//! never errors: they come back as [`crate::compliance::ValidationResult`].

use thiserror::Error;

/// Result type alias for Clipforge operations
pub type Result<T> = std::result::Result<T, ClipforgeError>;

/// Main error type for Clipforge operations
#[derive(Error, Debug)]
pub enum ClipforgeError {
    // Container Errors
    #[error("Malformed WAV container: {reason}")]
    Format { reason: String },

    #[error("Unsupported audio format: {format}")]
    UnsupportedFormat { format: String },

    #[error("Cannot encode audio: {reason}")]
    Encode { reason: String },

    // Editing Errors
    #[error("Invalid trim range {start:.3}s..{end:.3}s (audio is {duration:.3}s)")]
    InvalidRange { start: f64, end: f64, duration: f64 },

    #[error("No audio loaded")]
    NoAudioLoaded,

    #[error("Invalid sample rate: {rate} Hz")]
    InvalidSampleRate { rate: u32 },

    #[error("Invalid audio: {reason}")]
    InvalidAudio {
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // File Errors
    #[error("File not found: {path}")]
    FileNotFound {
        path: String,
        #[source]
        source: Option<std::io::Error>,
    },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClipforgeError {
    pub(crate) fn format(reason: impl Into<String>) -> Self {
        ClipforgeError::Format {
            reason: reason.into(),
        }
    }

    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            ClipforgeError::Format { .. } => "FORMAT_ERROR",
            ClipforgeError::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            ClipforgeError::Encode { .. } => "ENCODE_ERROR",
            ClipforgeError::InvalidRange { .. } => "INVALID_RANGE",
            ClipforgeError::NoAudioLoaded => "NO_AUDIO_LOADED",
            ClipforgeError::InvalidSampleRate { .. } => "INVALID_SAMPLE_RATE",
            ClipforgeError::InvalidAudio { .. } => "INVALID_AUDIO",
            ClipforgeError::FileNotFound { .. } => "FILE_NOT_FOUND",
            ClipforgeError::Io(_) => "IO_ERROR",
            ClipforgeError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Check if the caller can fix the input and try again
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ClipforgeError::InvalidRange { .. }
                | ClipforgeError::NoAudioLoaded
                | ClipforgeError::FileNotFound { .. }
                | ClipforgeError::UnsupportedFormat { .. }
        )
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            ClipforgeError::Format { .. } => vec![
                "Only canonical 44-byte-header PCM WAV files can be inspected",
                "Re-export the file as 16-bit PCM WAV",
            ],
            ClipforgeError::UnsupportedFormat { .. } => vec![
                "Convert to 16-bit PCM WAV",
                "Import through the external decoder instead",
            ],
            ClipforgeError::InvalidRange { .. } => vec![
                "Make sure the start time is before the end time",
                "Keep the selection inside the clip duration",
            ],
            ClipforgeError::NoAudioLoaded => vec![
                "Pick a preset or import a file before trimming",
            ],
            ClipforgeError::FileNotFound { .. } => vec![
                "Check the file path is correct",
                "Verify the file hasn't been moved or deleted",
            ],
            _ => vec![],
        }
    }
}
