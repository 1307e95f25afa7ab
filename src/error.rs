//! Error types for the stsift recovery toolkit.
//!
//! Classification never fails; these errors cover the surrounding
//! operations (reading artifacts, loading configuration, reassembling
//! backup streams) where the caller genuinely has to react to a fault.

use thiserror::Error;

/// Main error type for stsift operations.
#[derive(Debug, Error)]
pub enum SiftError {
    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input file exceeds the configured ceiling
    #[error("File size of {found} bytes exceeds the maximum allowed size of {limit} bytes")]
    FileTooLarge { limit: u64, found: u64 },

    /// Configuration could not be parsed or is inconsistent
    #[error("Configuration error: {0}")]
    Config(String),

    /// Fragment stream could not be walked
    #[error("Fragment error at offset {offset:#x}: {message}")]
    Fragment { offset: u64, message: String },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for stsift operations
pub type Result<T> = std::result::Result<T, SiftError>;
