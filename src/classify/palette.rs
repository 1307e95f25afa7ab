//! ST/STE palette checks.
//!
//! Palette entries are `0x0RGB` words. The classic ST uses three bits per
//! channel; the STE adds a fourth (low-order) bit.

use crate::core::ByteReader;

pub const PALETTE_ENTRIES: usize = 16;

/// Every entry satisfies the 12-bit colour mask (`word & 0xF000 == 0`).
pub fn is_ste_palette(reader: &ByteReader<'_>, offset: usize) -> bool {
    check(reader, offset, 0xF000)
}

/// Additionally every channel fits 0-7 (classic, non-extended hardware).
pub fn is_st_palette(reader: &ByteReader<'_>, offset: usize) -> bool {
    check(reader, offset, 0xF888)
}

fn check(reader: &ByteReader<'_>, offset: usize, forbidden: u16) -> bool {
    reader
        .read_words(offset, PALETTE_ENTRIES)
        .map(|words| words.iter().all(|w| w & forbidden == 0))
        .unwrap_or(false)
}

/// Short label for verdict reasons.
pub fn palette_label(reader: &ByteReader<'_>, offset: usize) -> &'static str {
    if is_st_palette(reader, offset) {
        "ST palette"
    } else {
        "STE palette"
    }
}
