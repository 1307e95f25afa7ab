//! Marker-run scheme: `MARKER, count, value` expands to `count` copies of
//! `value`; every other byte is literal.
//!
//! A literal marker byte travels as the run `MARKER, 1, MARKER`; the
//! decoder has no escape case for it.

use super::{capacity_hint, DecodeError, DecompressionResult};

/// Reserved run marker.
pub const MARKER: u8 = 0xC7;

/// Shortest run the encoder compresses; shorter runs stay literal.
const MIN_ENCODED_RUN: usize = 4;

/// Decode `input` and prove it yields exactly `target_len` bytes.
///
/// The whole input must be consumed; trailing bytes after the target is
/// reached count as a length mismatch.
pub fn decode_marker_run(input: &[u8], target_len: usize) -> DecompressionResult {
    match expand(input, Some(target_len)) {
        Ok(out) if out.len() == target_len => DecompressionResult::success(out, input.len()),
        Ok(out) => DecompressionResult::failure(
            DecodeError::LengthMismatch {
                expected: target_len,
                produced: out.len(),
            },
            input.len(),
        ),
        Err((e, consumed)) => DecompressionResult::failure(e, consumed),
    }
}

/// Expand a marker-run payload of unknown decoded length.
pub fn expand_marker_run(input: &[u8]) -> Result<Vec<u8>, DecodeError> {
    expand(input, None).map_err(|(e, _)| e)
}

fn expand(input: &[u8], limit: Option<usize>) -> Result<Vec<u8>, (DecodeError, usize)> {
    let mut out = Vec::with_capacity(capacity_hint(limit.unwrap_or(input.len())));
    let mut i = 0usize;

    while i < input.len() {
        let (run, value, width) = if input[i] == MARKER {
            if i + 2 >= input.len() {
                return Err((DecodeError::IncompleteSequence { offset: i }, i));
            }
            (usize::from(input[i + 1]), input[i + 2], 3)
        } else {
            (1, input[i], 1)
        };

        if let Some(limit) = limit {
            if out.len() + run > limit {
                return Err((
                    DecodeError::LengthMismatch {
                        expected: limit,
                        produced: out.len() + run,
                    },
                    i,
                ));
            }
        }
        out.resize(out.len() + run, value);
        i += width;
    }

    Ok(out)
}

/// Encode `data` so that `decode_marker_run(&encoded, data.len())` reproduces it.
pub fn encode_marker_run(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len());
    let mut i = 0usize;

    while i < data.len() {
        let value = data[i];
        let run = data[i..]
            .iter()
            .take(u8::MAX as usize)
            .take_while(|&&b| b == value)
            .count();

        if run >= MIN_ENCODED_RUN || value == MARKER {
            out.extend_from_slice(&[MARKER, run as u8, value]);
        } else {
            out.extend(std::iter::repeat(value).take(run));
        }
        i += run;
    }

    out
}
