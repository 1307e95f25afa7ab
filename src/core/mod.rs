//! Core data types: buffer access, format table, verdicts, rejections.

pub mod format;
pub mod reader;
pub mod rejection;
pub mod verdict;

pub use format::{FormatDescriptor, FormatTag, Tier, DESCRIPTORS, SCREEN_BYTES};
pub use reader::{ByteReader, OutOfBounds};
pub use rejection::{RejectKind, Rejection, Validation};
pub use verdict::{ClassificationResult, CONFIDENCE_FLOOR, CONFIDENCE_NONE, CONFIDENCE_PROVEN};
