//! GEM bit-image raster decoding.
//!
//! Scanlines are stored plane by plane. Opcodes: `00 nn` repeats an
//! `pattern_len`-byte pattern `nn` times, `00 00 FF nn` replicates the
//! following scanline `nn` times, `80 nn` copies `nn` literal bytes, and
//! any other byte is a solid run of `b & 0x7F` bytes (all ones when bit 7
//! is set).

use super::{capacity_hint, DecodeError, DecompressionResult};

/// Raster geometry taken from an IMG header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterGeometry {
    pub width: usize,
    pub height: usize,
    pub planes: usize,
    pub pattern_len: usize,
}

impl RasterGeometry {
    pub fn line_bytes(&self) -> usize {
        self.width.div_ceil(8)
    }

    /// Decoded size in bytes, if it fits in `usize`.
    pub fn target_len(&self) -> Option<usize> {
        self.line_bytes()
            .checked_mul(self.planes)?
            .checked_mul(self.height)
    }
}

struct Cursor<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn byte(&mut self) -> Result<u8, DecodeError> {
        let b = *self
            .input
            .get(self.pos)
            .ok_or(DecodeError::IncompleteSequence { offset: self.pos })?;
        self.pos += 1;
        Ok(b)
    }

    fn take(&mut self, n: usize, op_offset: usize) -> Result<&'a [u8], DecodeError> {
        let s = self
            .input
            .get(self.pos..self.pos + n)
            .ok_or(DecodeError::IncompleteSequence { offset: op_offset })?;
        self.pos += n;
        Ok(s)
    }
}

/// Decode an IMG body and prove it covers exactly the declared raster.
pub fn decode_gem_raster(input: &[u8], geometry: RasterGeometry) -> DecompressionResult {
    let Some(target) = geometry.target_len() else {
        return DecompressionResult::failure(
            DecodeError::InvalidParameter("raster geometry overflows"),
            0,
        );
    };
    if geometry.pattern_len == 0 || target == 0 {
        return DecompressionResult::failure(
            DecodeError::InvalidParameter("empty raster or zero pattern length"),
            0,
        );
    }

    let mut cur = Cursor { input, pos: 0 };
    match decode_rows(&mut cur, geometry, target) {
        Ok(out) => DecompressionResult::success(out, cur.pos),
        Err(e) => DecompressionResult::failure(e, cur.pos),
    }
}

fn decode_rows(
    cur: &mut Cursor<'_>,
    g: RasterGeometry,
    target: usize,
) -> Result<Vec<u8>, DecodeError> {
    let line_bytes = g.line_bytes();
    let row_len = line_bytes * g.planes;
    let mut out = Vec::with_capacity(capacity_hint(target));
    let mut rows = 0usize;

    while rows < g.height {
        let mut repeat = 1usize;
        if cur.input.get(cur.pos..cur.pos + 3) == Some(&[0x00, 0x00, 0xFF][..]) {
            let at = cur.pos;
            cur.pos += 3;
            repeat = usize::from(cur.byte()?);
            if repeat == 0 {
                return Err(DecodeError::Malformed { offset: at + 3, byte: 0 });
            }
        }

        let row_start = out.len();
        for _ in 0..g.planes {
            let line_end = out.len() + line_bytes;
            while out.len() < line_end {
                let op_offset = cur.pos;
                let op = cur.byte()?;
                match op {
                    0x00 => {
                        let n = usize::from(cur.byte()?);
                        if n == 0 {
                            // replication is only valid at the start of a scanline
                            return Err(DecodeError::Malformed { offset: op_offset, byte: op });
                        }
                        let pattern = cur.take(g.pattern_len, op_offset)?;
                        let len = n * g.pattern_len;
                        check_fits(out.len(), len, line_end, target)?;
                        for _ in 0..n {
                            out.extend_from_slice(pattern);
                        }
                    }
                    0x80 => {
                        let n = usize::from(cur.byte()?);
                        if n == 0 {
                            return Err(DecodeError::Malformed { offset: op_offset, byte: op });
                        }
                        let literal = cur.take(n, op_offset)?;
                        check_fits(out.len(), n, line_end, target)?;
                        out.extend_from_slice(literal);
                    }
                    _ => {
                        let n = usize::from(op & 0x7F);
                        let fill = if op & 0x80 != 0 { 0xFF } else { 0x00 };
                        check_fits(out.len(), n, line_end, target)?;
                        out.resize(out.len() + n, fill);
                    }
                }
            }
        }

        let copies = repeat.min(g.height - rows);
        for _ in 1..copies {
            out.extend_from_within(row_start..row_start + row_len);
        }
        rows += copies;
    }

    if out.len() != target {
        return Err(DecodeError::LengthMismatch {
            expected: target,
            produced: out.len(),
        });
    }
    Ok(out)
}

fn check_fits(produced: usize, add: usize, line_end: usize, target: usize) -> Result<(), DecodeError> {
    if produced + add > line_end {
        Err(DecodeError::LengthMismatch {
            expected: target,
            produced: produced + add,
        })
    } else {
        Ok(())
    }
}
