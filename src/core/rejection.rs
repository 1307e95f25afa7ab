//! Typed "does not match" outcomes for validators.

use super::reader::OutOfBounds;
use crate::oracle::DecodeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Why a validator declined a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectKind {
    /// Cheap pre-filter failed (size, magic); the validator never parsed.
    NotApplicable,
    /// A header read fell outside the buffer.
    OutOfBounds,
    /// A record or relocation stream ended before its terminator.
    Truncated,
    /// The decompression proof failed.
    Decompression,
    /// A header field violated a format invariant.
    InvalidField,
    /// Text candidates did not separate by the required margin.
    Ambiguous,
}

impl fmt::Display for RejectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use RejectKind::*;
        match self {
            NotApplicable => write!(f, "NotApplicable"),
            OutOfBounds => write!(f, "OutOfBounds"),
            Truncated => write!(f, "Truncated"),
            Decompression => write!(f, "Decompression"),
            InvalidField => write!(f, "InvalidField"),
            Ambiguous => write!(f, "Ambiguous"),
        }
    }
}

/// Concrete rejection with a short human-readable detail.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{kind}: {detail}")]
pub struct Rejection {
    pub kind: RejectKind,
    pub detail: String,
}

impl Rejection {
    pub fn new(kind: RejectKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    pub fn not_applicable(detail: impl Into<String>) -> Self {
        Self::new(RejectKind::NotApplicable, detail)
    }

    pub fn invalid(detail: impl Into<String>) -> Self {
        Self::new(RejectKind::InvalidField, detail)
    }

    pub fn truncated(detail: impl Into<String>) -> Self {
        Self::new(RejectKind::Truncated, detail)
    }
}

impl From<OutOfBounds> for Rejection {
    fn from(e: OutOfBounds) -> Self {
        Self::new(RejectKind::OutOfBounds, e.to_string())
    }
}

impl From<DecodeError> for Rejection {
    fn from(e: DecodeError) -> Self {
        Self::new(RejectKind::Decompression, e.to_string())
    }
}

/// Outcome of a single validator.
pub type Validation = Result<super::verdict::ClassificationResult, Rejection>;
