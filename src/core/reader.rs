//! Big-endian accessors over an immutable artifact buffer.
//!
//! All multi-byte values on the Atari ST are Motorola 68000 big-endian.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A read that would fall outside the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("read of {len} bytes at offset {offset:#x} exceeds buffer of {size} bytes")]
pub struct OutOfBounds {
    pub offset: usize,
    pub len: usize,
    pub size: usize,
}

/// Stateless bounds-checked view over a byte buffer.
#[derive(Debug, Clone, Copy)]
pub struct ByteReader<'a> {
    data: &'a [u8],
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn bytes(&self) -> &'a [u8] {
        self.data
    }

    /// Borrow `len` bytes starting at `offset`.
    pub fn slice(&self, offset: usize, len: usize) -> Result<&'a [u8], OutOfBounds> {
        let end = offset.checked_add(len).ok_or(self.oob(offset, len))?;
        self.data.get(offset..end).ok_or(self.oob(offset, len))
    }

    /// Borrow everything from `offset` to the end of the buffer.
    pub fn tail(&self, offset: usize) -> Result<&'a [u8], OutOfBounds> {
        self.data
            .get(offset..)
            .ok_or(self.oob(offset, 0))
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, OutOfBounds> {
        self.data.get(offset).copied().ok_or(self.oob(offset, 1))
    }

    pub fn read_u16be(&self, offset: usize) -> Result<u16, OutOfBounds> {
        let b = self.slice(offset, 2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    pub fn read_i16be(&self, offset: usize) -> Result<i16, OutOfBounds> {
        self.read_u16be(offset).map(|w| w as i16)
    }

    pub fn read_u32be(&self, offset: usize) -> Result<u32, OutOfBounds> {
        let b = self.slice(offset, 4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// Read `count` consecutive big-endian words.
    pub fn read_words(&self, offset: usize, count: usize) -> Result<Vec<u16>, OutOfBounds> {
        let len = count.checked_mul(2).ok_or(self.oob(offset, usize::MAX))?;
        Ok(self
            .slice(offset, len)?
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect())
    }

    fn oob(&self, offset: usize, len: usize) -> OutOfBounds {
        OutOfBounds {
            offset,
            len,
            size: self.data.len(),
        }
    }
}
