//! Target filenames for classified artifacts.
//!
//! Produces `<stem>[-<embedded>].<EXT>` from a verdict. Nothing here
//! touches the filesystem; the caller applies the plan.

use crate::core::{ClassificationResult, CONFIDENCE_FLOOR};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Longest extension a legacy 8.3 filesystem will take.
pub const MAX_EXTENSION_LEN: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenamePlan {
    /// Rename to this filename (no directory component).
    Rename(String),
    /// Leave the original name untouched.
    Skip(String),
}

impl RenamePlan {
    pub fn target(&self) -> Option<&str> {
        match self {
            RenamePlan::Rename(name) => Some(name),
            RenamePlan::Skip(_) => None,
        }
    }
}

fn skip(original: &Path, reason: String) -> RenamePlan {
    info!(file = %original.display(), reason = %reason, "SKIP");
    RenamePlan::Skip(reason)
}

/// Plan the rename of `original` according to `result`.
pub fn plan_rename(original: &Path, result: &ClassificationResult) -> RenamePlan {
    if result.is_unknown() {
        return skip(original, format!("unknown format: {}", result.reason));
    }
    if result.confidence < CONFIDENCE_FLOOR {
        return skip(original, format!("confidence {} too low", result.confidence));
    }

    let ext = result.extension.to_ascii_uppercase();
    if ext.is_empty() || ext.len() > MAX_EXTENSION_LEN {
        return skip(original, format!("extension {ext:?} not representable"));
    }

    let current = original.extension().and_then(|e| e.to_str()).unwrap_or("");
    if current.eq_ignore_ascii_case(&ext) {
        return skip(original, format!("already .{ext}"));
    }

    let stem = original
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match result.embedded_name.as_deref() {
        Some(embedded) if !embedded.is_empty() && !embedded.eq_ignore_ascii_case(&stem) => {
            format!("{stem}-{embedded}.{ext}")
        }
        _ => format!("{stem}.{ext}"),
    };
    RenamePlan::Rename(name)
}
