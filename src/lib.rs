//! Content-based file type recovery for Atari ST artifacts.
//!
//! Classifies carved or reassembled files whose names were lost, proving
//! binary formats structurally (exact sizes, decompression oracles) and
//! scoring text formats on weighted evidence. The result is either a
//! high-confidence verdict or an explicit unknown; nothing is guessed.

/// Core data types module
pub mod core;

pub mod classify;
pub mod error;
pub mod logging;
pub mod oracle;
pub mod recover;
pub mod text;

pub use crate::classify::{classify, Classifier, ClassifierConfig};
pub use crate::core::{ClassificationResult, FormatTag, RejectKind, Rejection, Tier};
pub use crate::error::{Result, SiftError};
pub use crate::oracle::{
    decode_marker_run, decode_scanline_run, encode_marker_run, DecodeError, DecompressionResult,
};
pub use crate::recover::{reassemble, Reassembly};
