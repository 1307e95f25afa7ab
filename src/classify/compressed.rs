//! Compressed screen images. Acceptance requires a decompression proof.

use super::config::ClassifierConfig;
use super::images::resolution;
use super::palette::is_ste_palette;
use crate::core::format::DEGAS_ELITE_SIZE;
use crate::core::{
    ByteReader, ClassificationResult, FormatTag, RejectKind, Rejection, Validation,
    CONFIDENCE_PROVEN, SCREEN_BYTES,
};
use crate::oracle::{decode_marker_run, decode_packbits_scanlines, decode_scanline_run};
use tracing::debug;

const PC_BODY_START: usize = 34;
const PC_TRAILER: usize = 32;
const PC_MIN_SIZE: usize = 2 + 32 + 32 + 100;
const PC_COMPRESSED_FLAG: u16 = 0x8000;
const PC_SCANLINES: usize = 200;
const PC_SCANLINE_BYTES: usize = SCREEN_BYTES / PC_SCANLINES;

pub const STAD_SIGNATURES: [&[u8; 4]; 2] = [b"pM85", b"pM86"];
const STAD_MIN_SIZE: usize = 20;
const STAD_BODY_START: usize = 7;

/// DEGAS Elite compressed `.PC?`.
pub fn validate_degas_compressed(r: &ByteReader<'_>, _cfg: &ClassifierConfig) -> Validation {
    let size = r.len();
    if !(PC_MIN_SIZE..DEGAS_ELITE_SIZE).contains(&size) {
        return Err(Rejection::not_applicable("size outside compressed DEGAS range"));
    }
    let mode = r.read_u16be(0)?;
    if mode & PC_COMPRESSED_FLAG == 0 {
        return Err(Rejection::not_applicable("compression bit not set"));
    }
    let res = resolution(mode & 0x0003)?;
    if !is_ste_palette(r, 2) {
        return Err(Rejection::invalid("invalid palette"));
    }

    let body = r.slice(PC_BODY_START, size - PC_TRAILER - PC_BODY_START)?;
    let marker = decode_marker_run(body, SCREEN_BYTES);
    let scheme = if marker.ok {
        "marker-run"
    } else {
        let packbits = decode_packbits_scanlines(body, PC_SCANLINES, PC_SCANLINE_BYTES);
        if !packbits.ok {
            debug!(marker = ?marker.error, packbits = ?packbits.error, "PC decode failed");
            return Err(Rejection::new(
                RejectKind::Decompression,
                "decompression failed",
            ));
        }
        "PackBits"
    };

    let tag = FormatTag::DegasEliteCompressed;
    let ext = tag
        .descriptor()
        .extension_for(res)
        .ok_or_else(|| Rejection::invalid("no extension for resolution"))?;
    Ok(ClassificationResult::accept(
        tag,
        ext,
        CONFIDENCE_PROVEN,
        format!("Valid DEGAS Elite {ext} with successful {scheme} decompression"),
    ))
}

/// STAD `.PAC`: signature, then `id`, `pack`, `special` parameter bytes.
pub fn validate_stad(r: &ByteReader<'_>, _cfg: &ClassifierConfig) -> Validation {
    if r.len() < STAD_MIN_SIZE {
        return Err(Rejection::not_applicable("too small for STAD"));
    }
    let signature = r.slice(0, 4)?;
    if !STAD_SIGNATURES.iter().any(|s| s.as_slice() == signature) {
        return Err(Rejection::not_applicable("no STAD signature"));
    }
    let id = r.read_u8(4)?;
    let pack = r.read_u8(5)?;
    let special = r.read_u8(6)?;
    if id == special {
        return Err(Rejection::invalid("id byte equals special byte"));
    }

    decode_scanline_run(r.tail(STAD_BODY_START)?, id, pack, special, SCREEN_BYTES).into_result()?;

    Ok(ClassificationResult::accept(
        FormatTag::StadPac,
        FormatTag::StadPac.default_extension(),
        CONFIDENCE_PROVEN,
        "Valid STAD PAC with successful decompression",
    ))
}
