//! Decompression oracles.
//!
//! A decoder here is a yes/no proof: it either reproduces exactly the
//! number of bytes the caller expects, or it fails. Failures never carry
//! partial output.

pub mod gem_raster;
pub mod marker_run;
pub mod packbits;
pub mod scanline;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use gem_raster::decode_gem_raster;
pub use marker_run::{decode_marker_run, encode_marker_run, expand_marker_run, MARKER};
pub use packbits::decode_packbits_scanlines;
pub use scanline::decode_scanline_run;

/// Why a decoder gave up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum DecodeError {
    /// A control sequence needs more bytes than the input holds.
    #[error("incomplete control sequence at offset {offset:#x}")]
    IncompleteSequence { offset: usize },

    /// Output overran or fell short of the declared target.
    #[error("decoded length mismatch: expected {expected} bytes, produced {produced}")]
    LengthMismatch { expected: usize, produced: usize },

    /// Caller-supplied parameters cannot describe a valid stream.
    #[error("invalid decoder parameter: {0}")]
    InvalidParameter(&'static str),

    /// A control byte outside the scheme's vocabulary.
    #[error("malformed control byte {byte:#04x} at offset {offset:#x}")]
    Malformed { offset: usize, byte: u8 },
}

/// Outcome of one oracle run.
///
/// `ok` implies `output.len()` equals the requested target exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecompressionResult {
    pub ok: bool,
    pub output: Bytes,
    pub consumed_input_len: usize,
    pub error: Option<DecodeError>,
}

impl DecompressionResult {
    pub(crate) fn success(output: Vec<u8>, consumed_input_len: usize) -> Self {
        Self {
            ok: true,
            output: Bytes::from(output),
            consumed_input_len,
            error: None,
        }
    }

    pub(crate) fn failure(error: DecodeError, consumed_input_len: usize) -> Self {
        Self {
            ok: false,
            output: Bytes::new(),
            consumed_input_len,
            error: Some(error),
        }
    }

    /// Collapse into a `Result`, for callers that propagate with `?`.
    pub fn into_result(self) -> Result<Bytes, DecodeError> {
        match self.error {
            None if self.ok => Ok(self.output),
            Some(e) => Err(e),
            None => Err(DecodeError::LengthMismatch {
                expected: 0,
                produced: self.output.len(),
            }),
        }
    }
}

/// Capacity hint that never trusts a header-declared size blindly.
pub(crate) fn capacity_hint(target: usize) -> usize {
    target.min(1 << 20)
}
