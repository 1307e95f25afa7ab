//! Text gate and decoding.
//!
//! A buffer reaches the score cards only if it is mostly ASCII and nearly
//! all of its ASCII bytes are printable or line-structure control codes.

use crate::classify::config::TextConfig;
use crate::core::Rejection;
use encoding_rs::WINDOWS_1252;
use std::borrow::Cow;

/// Control bytes legacy editors leave in text: TAB, LF, FF, CR, and the
/// CP/M-style SUB end-of-file marker.
const TEXT_CONTROLS: [u8; 5] = [b'\t', b'\n', 0x0C, b'\r', 0x1A];

fn is_text_byte(b: u8) -> bool {
    (0x20..=0x7E).contains(&b) || TEXT_CONTROLS.contains(&b)
}

/// Share counts used by the gate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ByteProfile {
    pub total: usize,
    pub ascii: usize,
    pub printable: usize,
}

impl ByteProfile {
    pub fn measure(bytes: &[u8]) -> Self {
        let mut ascii = 0usize;
        let mut printable = 0usize;
        for &b in bytes {
            if b.is_ascii() {
                ascii += 1;
                if is_text_byte(b) {
                    printable += 1;
                }
            }
        }
        Self {
            total: bytes.len(),
            ascii,
            printable,
        }
    }

    pub fn ascii_ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.ascii as f64 / self.total as f64
        }
    }

    pub fn printable_ratio(&self) -> f64 {
        if self.ascii == 0 {
            0.0
        } else {
            self.printable as f64 / self.ascii as f64
        }
    }
}

/// Decide whether `bytes` is text-like enough to score.
pub fn check_text_gate(bytes: &[u8], cfg: &TextConfig) -> Result<ByteProfile, Rejection> {
    if bytes.is_empty() {
        return Err(Rejection::not_applicable("empty buffer"));
    }
    let profile = ByteProfile::measure(bytes);
    if profile.ascii_ratio() < cfg.min_ascii_ratio {
        return Err(Rejection::not_applicable(format!(
            "ASCII share {:.2} below {:.2}",
            profile.ascii_ratio(),
            cfg.min_ascii_ratio
        )));
    }
    let min_printable = 1.0 - cfg.max_binary_ratio;
    if profile.printable_ratio() < min_printable {
        return Err(Rejection::not_applicable(format!(
            "printable share {:.3} below {:.3}",
            profile.printable_ratio(),
            min_printable
        )));
    }
    Ok(profile)
}

/// Decode as Windows-1252, the Latin-1 superset legacy ST text survives in.
pub fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    WINDOWS_1252.decode_without_bom_handling(bytes).0
}

/// Split on CRLF, bare CR, and LF alike. A trailing terminator does not
/// produce an empty final line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0usize;
    let mut i = 0usize;
    while let Some(off) = memchr::memchr2(b'\r', b'\n', &bytes[i..]) {
        let at = i + off;
        lines.push(&text[start..at]);
        i = if bytes[at] == b'\r' && bytes.get(at + 1) == Some(&b'\n') {
            at + 2
        } else {
            at + 1
        };
        start = i;
    }
    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}
