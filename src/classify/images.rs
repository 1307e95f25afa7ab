//! Fixed-size uncompressed screen dumps: DEGAS, DEGAS Elite, NEOchrome.

use super::config::ClassifierConfig;
use super::palette::{is_ste_palette, palette_label};
use crate::core::format::{DEGAS_CLASSIC_SIZE, DEGAS_ELITE_SIZE, NEOCHROME_SIZE};
use crate::core::{ByteReader, ClassificationResult, FormatTag, Rejection, Validation, CONFIDENCE_PROVEN};

const DEGAS_PALETTE: usize = 2;
const NEO_PALETTE: usize = 4;
const NEO_RESERVED: std::ops::Range<usize> = 44..128;

/// Resolution word shared by every ST image header: 0 low, 1 medium, 2 high.
pub fn resolution(word: u16) -> Result<u16, Rejection> {
    match word {
        0..=2 => Ok(word),
        _ => Err(Rejection::invalid(format!("invalid resolution: {word}"))),
    }
}

fn degas(r: &ByteReader<'_>, tag: FormatTag, size: usize) -> Validation {
    if r.len() != size {
        return Err(Rejection::not_applicable("size mismatch"));
    }
    let res = resolution(r.read_u16be(0)?)?;
    if !is_ste_palette(r, DEGAS_PALETTE) {
        return Err(Rejection::invalid("invalid palette"));
    }
    let ext = tag
        .descriptor()
        .extension_for(res)
        .ok_or_else(|| Rejection::invalid("no extension for resolution"))?;
    Ok(ClassificationResult::accept(
        tag,
        ext,
        CONFIDENCE_PROVEN,
        format!(
            "Valid {} {ext} (resolution {res}, {})",
            tag.name(),
            palette_label(r, DEGAS_PALETTE)
        ),
    ))
}

/// DEGAS classic `.PI?`, exactly 32034 bytes.
pub fn validate_degas(r: &ByteReader<'_>, _cfg: &ClassifierConfig) -> Validation {
    degas(r, FormatTag::DegasClassic, DEGAS_CLASSIC_SIZE)
}

/// DEGAS Elite uncompressed: classic layout plus a 32-byte animation trailer.
pub fn validate_degas_elite(r: &ByteReader<'_>, _cfg: &ClassifierConfig) -> Validation {
    degas(r, FormatTag::DegasElite, DEGAS_ELITE_SIZE)
}

pub fn validate_neochrome(r: &ByteReader<'_>, _cfg: &ClassifierConfig) -> Validation {
    if r.len() != NEOCHROME_SIZE {
        return Err(Rejection::not_applicable("size mismatch"));
    }
    let flag = r.read_u16be(0)?;
    if flag != 0 {
        return Err(Rejection::invalid("flag != 0"));
    }
    resolution(r.read_u16be(2)?)?;

    let x = r.read_u16be(36)?;
    let y = r.read_u16be(38)?;
    if x != 0 || y != 0 {
        return Err(Rejection::invalid("non-zero offset"));
    }
    let width = r.read_u16be(40)?;
    let height = r.read_u16be(42)?;
    if width != 320 || height != 200 {
        return Err(Rejection::invalid(format!("invalid dimensions: {width}x{height}")));
    }
    if !is_ste_palette(r, NEO_PALETTE) {
        return Err(Rejection::invalid("invalid palette"));
    }

    let reserved = r.slice(NEO_RESERVED.start, NEO_RESERVED.len())?;
    let zeros = reserved.iter().filter(|&&b| b == 0).count();
    if zeros * 10 < reserved.len() * 9 {
        return Err(Rejection::invalid("reserved area not mostly zero"));
    }

    Ok(ClassificationResult::accept(
        FormatTag::Neochrome,
        FormatTag::Neochrome.default_extension(),
        CONFIDENCE_PROVEN,
        format!("Valid NEOchrome image ({})", palette_label(r, NEO_PALETTE)),
    ))
}
