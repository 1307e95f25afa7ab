//! Classification verdict handed to the renamer.

use super::format::FormatTag;
use serde::{Deserialize, Serialize};

/// Proof-backed: decompression succeeded or a header-stored size matched.
pub const CONFIDENCE_PROVEN: u8 = 100;
/// Lowest confidence a positive verdict may carry.
pub const CONFIDENCE_FLOOR: u8 = 90;
/// Nothing matched.
pub const CONFIDENCE_NONE: u8 = 0;

/// Extension reported for buffers no validator accepted.
pub const UNKNOWN_EXTENSION: &str = "";

/// One classification decision for one input buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub format: Option<FormatTag>,
    /// Uppercase, at most three characters; empty for the unknown verdict.
    pub extension: String,
    pub confidence: u8,
    pub reason: String,
    /// Original filename stem recovered from the content, if any.
    pub embedded_name: Option<String>,
}

impl ClassificationResult {
    /// Build a positive verdict. Confidence is clamped into `90..=100`.
    pub fn accept(
        format: FormatTag,
        extension: &str,
        confidence: u8,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            format: Some(format),
            extension: extension.to_ascii_uppercase(),
            confidence: confidence.clamp(CONFIDENCE_FLOOR, CONFIDENCE_PROVEN),
            reason: reason.into(),
            embedded_name: None,
        }
    }

    /// The universal "nothing matched" outcome.
    pub fn unknown(reason: impl Into<String>) -> Self {
        Self {
            format: None,
            extension: UNKNOWN_EXTENSION.to_string(),
            confidence: CONFIDENCE_NONE,
            reason: reason.into(),
            embedded_name: None,
        }
    }

    pub fn with_embedded_name(mut self, name: Option<String>) -> Self {
        self.embedded_name = name;
        self
    }

    pub fn is_unknown(&self) -> bool {
        self.format.is_none()
    }

    pub fn is_proven(&self) -> bool {
        self.confidence == CONFIDENCE_PROVEN
    }

    /// Serialize to JSON string
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON string
    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}
