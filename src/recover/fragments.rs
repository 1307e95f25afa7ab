//! Fragment headers of the hard-disk backup stream.
//!
//! Each fragment is an 8-byte big-endian header followed by its payload
//! and, when the payload length is odd, one pad byte.

use crate::core::{ByteReader, OutOfBounds};
use crate::error::{Result, SiftError};
use serde::{Deserialize, Serialize};

pub const FRAGMENT_HEADER_SIZE: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FragmentHeader {
    /// Stored payload length, before any expansion.
    pub len: u32,
    pub compressed: bool,
    /// Closes the current file.
    pub last: bool,
}

fn flag(word: u16, name: &str, offset: usize) -> Result<bool> {
    match word {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(SiftError::Fragment {
            offset: offset as u64,
            message: format!("{name} flag {other:#06x} is neither 0 nor 1"),
        }),
    }
}

impl FragmentHeader {
    /// Parse the header at `offset`, or `None` when fewer than 8 bytes remain.
    ///
    /// A flag word other than 0 or 1 means the walk has lost sync with the
    /// stream and is reported as an error.
    pub fn parse(r: &ByteReader<'_>, offset: usize) -> Result<Option<Self>> {
        if r.len().saturating_sub(offset) < FRAGMENT_HEADER_SIZE {
            return Ok(None);
        }
        let read = |e: OutOfBounds| SiftError::Fragment {
            offset: offset as u64,
            message: format!("{e}"),
        };
        let len = r.read_u32be(offset).map_err(read)?;
        let compressed = flag(r.read_u16be(offset + 4).map_err(read)?, "compression", offset)?;
        let last = flag(r.read_u16be(offset + 6).map_err(read)?, "last-fragment", offset)?;
        Ok(Some(Self {
            len,
            compressed,
            last,
        }))
    }

    /// Bytes the fragment occupies after its header, padding included.
    pub fn stride(&self) -> usize {
        let len = self.len as usize;
        len + (len & 1)
    }

    pub fn to_bytes(&self) -> [u8; FRAGMENT_HEADER_SIZE] {
        let mut out = [0u8; FRAGMENT_HEADER_SIZE];
        out[..4].copy_from_slice(&self.len.to_be_bytes());
        out[4..6].copy_from_slice(&u16::from(self.compressed).to_be_bytes());
        out[6..].copy_from_slice(&u16::from(self.last).to_be_bytes());
        out
    }
}
