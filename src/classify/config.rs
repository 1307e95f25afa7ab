//! Configuration for the classification engine.
//!
//! Thresholds that are still being tuned against labeled corpora live
//! here rather than in code, with defaults matching the shipped behavior.

use crate::error::{Result, SiftError};
use serde::{Deserialize, Serialize};

/// Master configuration for the classification pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Text evidence classifier thresholds.
    pub text: TextConfig,
    /// Size ceilings for structural validators and file input.
    pub limits: LimitConfig,
}

impl ClassifierConfig {
    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject settings that would break the margin invariant.
    pub fn validate(&self) -> Result<()> {
        if self.text.margin < 1 {
            return Err(SiftError::Config(format!(
                "text.margin must be at least 1 (got {})",
                self.text.margin
            )));
        }
        if !(0.0..1.0).contains(&self.text.max_binary_ratio) {
            return Err(SiftError::Config(format!(
                "text.max_binary_ratio must be in [0, 1) (got {})",
                self.text.max_binary_ratio
            )));
        }
        if !(0.0..=1.0).contains(&self.text.min_ascii_ratio) {
            return Err(SiftError::Config(format!(
                "text.min_ascii_ratio must be in [0, 1] (got {})",
                self.text.min_ascii_ratio
            )));
        }
        Ok(())
    }
}

/// Text classifier thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Minimum winning score (default: 6).
    pub strong_min: i32,
    /// Minimum lead over the runner-up (default: 3).
    pub margin: i32,
    /// Points an embedded filename adds to its matching candidate (default: 3).
    pub embedded_name_nudge: i32,
    /// Largest tolerated share of non-printable ASCII bytes (default: 0.05).
    pub max_binary_ratio: f64,
    /// Smallest share of ASCII bytes in the whole buffer (default: 0.5).
    pub min_ascii_ratio: f64,
    /// Lines scanned for embedded filenames (default: 20).
    pub header_scan_lines: usize,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            strong_min: 6,
            margin: 3,
            embedded_name_nudge: 3,
            max_binary_ratio: 0.05,
            min_ascii_ratio: 0.5,
            header_scan_lines: 20,
        }
    }
}

/// Size ceilings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitConfig {
    /// Largest plausible resource file (default: 1 MiB).
    pub max_rsc_size: usize,
    /// Largest plausible executable segment (default: 20 MiB).
    pub max_segment: u32,
    /// Largest plausible Devpac object (default: 5 MiB).
    pub max_object_size: usize,
    /// Largest file accepted from disk (default: 100 MiB).
    pub max_file_size: u64,
}

impl Default for LimitConfig {
    fn default() -> Self {
        Self {
            max_rsc_size: 1024 * 1024,
            max_segment: 20 * 1024 * 1024,
            max_object_size: 5 * 1024 * 1024,
            max_file_size: 100 * 1024 * 1024,
        }
    }
}
