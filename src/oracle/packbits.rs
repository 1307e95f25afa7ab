//! Per-scanline PackBits, as written by DEGAS Elite.
//!
//! Control `c < 128` copies `c + 1` literal bytes; `c >= 128` repeats the
//! next byte `257 - c` times. Every scanline must close exactly on its
//! boundary; a run straddling two scanlines is rejected.

use super::{capacity_hint, DecodeError, DecompressionResult};

/// Decode `scanlines` rows of `scanline_len` bytes each.
pub fn decode_packbits_scanlines(
    input: &[u8],
    scanlines: usize,
    scanline_len: usize,
) -> DecompressionResult {
    let Some(target) = scanlines.checked_mul(scanline_len) else {
        return DecompressionResult::failure(
            DecodeError::InvalidParameter("scanline geometry overflows"),
            0,
        );
    };
    let mut out = Vec::with_capacity(capacity_hint(target));
    let mut pos = 0usize;

    for _ in 0..scanlines {
        let line_end = out.len() + scanline_len;
        while out.len() < line_end {
            let Some(&control) = input.get(pos) else {
                return DecompressionResult::failure(
                    DecodeError::LengthMismatch {
                        expected: target,
                        produced: out.len(),
                    },
                    pos,
                );
            };
            pos += 1;

            if control < 128 {
                let count = usize::from(control) + 1;
                let Some(literal) = input.get(pos..pos + count) else {
                    return DecompressionResult::failure(
                        DecodeError::IncompleteSequence { offset: pos - 1 },
                        pos,
                    );
                };
                if out.len() + count > line_end {
                    return DecompressionResult::failure(
                        DecodeError::LengthMismatch {
                            expected: target,
                            produced: out.len() + count,
                        },
                        pos,
                    );
                }
                out.extend_from_slice(literal);
                pos += count;
            } else {
                let count = 257 - usize::from(control);
                let Some(&value) = input.get(pos) else {
                    return DecompressionResult::failure(
                        DecodeError::IncompleteSequence { offset: pos - 1 },
                        pos,
                    );
                };
                if out.len() + count > line_end {
                    return DecompressionResult::failure(
                        DecodeError::LengthMismatch {
                            expected: target,
                            produced: out.len() + count,
                        },
                        pos,
                    );
                }
                out.resize(out.len() + count, value);
                pos += 1;
            }
        }
    }

    DecompressionResult::success(out, pos)
}
