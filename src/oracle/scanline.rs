//! STAD-style run decoding parameterized by three header bytes.
//!
//! After `id_byte`, the next byte selects the action: `0` ends the stream,
//! `id_byte` emits a literal `id_byte`, `pack_byte` introduces a
//! `count, value` run. Any other follower is malformed.

use super::{capacity_hint, DecodeError, DecompressionResult};

/// Decode a STAD body and prove it yields exactly `target_len` bytes.
///
/// Decoding stops at the end marker or once the target is reached;
/// bytes after that point are left unconsumed.
pub fn decode_scanline_run(
    input: &[u8],
    id_byte: u8,
    pack_byte: u8,
    special_byte: u8,
    target_len: usize,
) -> DecompressionResult {
    if id_byte == special_byte {
        return DecompressionResult::failure(
            DecodeError::InvalidParameter("id byte equals special byte"),
            0,
        );
    }

    let mut out = Vec::with_capacity(capacity_hint(target_len));
    let mut pos = 0usize;

    while out.len() < target_len && pos < input.len() {
        let byte = input[pos];
        pos += 1;

        if byte != id_byte {
            out.push(byte);
            continue;
        }

        let Some(&control) = input.get(pos) else {
            return DecompressionResult::failure(
                DecodeError::IncompleteSequence { offset: pos - 1 },
                pos,
            );
        };
        pos += 1;

        if control == 0 {
            break;
        } else if control == id_byte {
            out.push(id_byte);
        } else if control == pack_byte {
            if pos + 1 >= input.len() {
                return DecompressionResult::failure(
                    DecodeError::IncompleteSequence { offset: pos - 2 },
                    pos,
                );
            }
            let count = usize::from(input[pos]);
            let value = input[pos + 1];
            pos += 2;
            if out.len() + count > target_len {
                return DecompressionResult::failure(
                    DecodeError::LengthMismatch {
                        expected: target_len,
                        produced: out.len() + count,
                    },
                    pos,
                );
            }
            out.resize(out.len() + count, value);
        } else {
            return DecompressionResult::failure(
                DecodeError::Malformed {
                    offset: pos - 1,
                    byte: control,
                },
                pos,
            );
        }
    }

    if out.len() != target_len {
        return DecompressionResult::failure(
            DecodeError::LengthMismatch {
                expected: target_len,
                produced: out.len(),
            },
            pos,
        );
    }
    DecompressionResult::success(out, pos)
}
