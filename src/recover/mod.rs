//! Reassembly of files from a fragmented backup stream.
//!
//! The stream is a sequence of fragments; payloads accumulate into the
//! current file until a fragment carries the last-fragment flag.
//! Compressed payloads are expanded with the marker-run scheme. Damage is
//! reported as warnings and the walk continues where it can.

pub mod fragments;

use crate::core::ByteReader;
use crate::error::Result;
use crate::oracle::expand_marker_run;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

pub use fragments::{FragmentHeader, FRAGMENT_HEADER_SIZE};

/// One reassembled file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveredFile {
    /// `NNNNN.TXT`, numbered from 1 in stream order.
    pub name: String,
    pub data: Bytes,
    pub fragments: usize,
    pub compressed: bool,
}

/// Damage noticed during the walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FragmentWarning {
    /// Payload ran past the end of the stream.
    Truncated {
        fragment: usize,
        expected: usize,
        found: usize,
    },
    /// Compressed payload could not be expanded; the fragment was dropped.
    Decompression { fragment: usize, message: String },
    /// Data was pending when the stream ended.
    IncompleteFile { pending: usize },
}

#[derive(Debug, Clone, Default)]
pub struct Reassembly {
    pub files: Vec<RecoveredFile>,
    pub warnings: Vec<FragmentWarning>,
}

impl Reassembly {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

fn recovered_name(counter: usize) -> String {
    format!("{counter:05}.TXT")
}

/// Walk `stream` and rebuild every file it holds.
///
/// Fails only when a header is unreadable in a way that means the walk
/// lost sync.
pub fn reassemble(stream: &[u8]) -> Result<Reassembly> {
    let r = ByteReader::new(stream);
    let mut out = Reassembly::default();
    let mut pending: Vec<u8> = Vec::new();
    let mut pending_fragments = 0usize;
    let mut pending_compressed = false;
    let mut offset = 0usize;
    let mut fragment = 0usize;

    while let Some(header) = FragmentHeader::parse(&r, offset)? {
        fragment += 1;
        let start = offset + FRAGMENT_HEADER_SIZE;
        let len = header.len as usize;
        let available = stream.len().saturating_sub(start).min(len);
        let payload = &stream[start..start + available];

        if available < len {
            warn!(fragment, expected = len, found = available, "fragment truncated");
            out.warnings.push(FragmentWarning::Truncated {
                fragment,
                expected: len,
                found: available,
            });
        }

        let content = if header.compressed {
            match expand_marker_run(payload) {
                Ok(expanded) => Some(expanded),
                Err(e) => {
                    warn!(fragment, error = %e, "fragment decompression failed, skipping");
                    out.warnings.push(FragmentWarning::Decompression {
                        fragment,
                        message: e.to_string(),
                    });
                    None
                }
            }
        } else {
            Some(payload.to_vec())
        };

        if let Some(content) = content {
            debug!(
                fragment,
                stored = len,
                expanded = content.len(),
                compressed = header.compressed,
                last = header.last,
                "fragment"
            );
            pending.extend_from_slice(&content);
            pending_fragments += 1;
            pending_compressed |= header.compressed;

            if header.last {
                let file = RecoveredFile {
                    name: recovered_name(out.files.len() + 1),
                    data: Bytes::from(std::mem::take(&mut pending)),
                    fragments: pending_fragments,
                    compressed: pending_compressed,
                };
                debug!(name = %file.name, size = file.data.len(), "file reassembled");
                out.files.push(file);
                pending_fragments = 0;
                pending_compressed = false;
            }
        }

        offset = start.saturating_add(header.stride());
    }

    if !pending.is_empty() {
        warn!(pending = pending.len(), "stream ended inside a file");
        out.warnings.push(FragmentWarning::IncompleteFile {
            pending: pending.len(),
        });
    }

    info!(
        files = out.files.len(),
        fragments = fragment,
        warnings = out.warnings.len(),
        "reassembly complete"
    );
    Ok(out)
}
