//! Compiler/assembler object containers: Turbo-C (`0x4EFA`) and Devpac (`FF 65`).

use super::config::ClassifierConfig;
use crate::core::{ByteReader, ClassificationResult, FormatTag, Rejection, Validation, CONFIDENCE_PROVEN};
use tracing::trace;

pub const TURBOC_MAGIC: u16 = 0x4EFA;
pub const TURBOC_HEADER_SIZE: usize = 32;
const TURBOC_MAX_SEGMENT: u32 = 10 * 1024 * 1024;

pub const DEVPAC_SIGNATURE: [u8; 2] = [0xFF, 0x65];
const DEVPAC_MIN_SIZE: usize = 10;
const DEVPAC_MAX_NAME: usize = 64;
const DEVPAC_MAX_STEM: usize = 32;

/// Record kind that, with a zero length, closes a Devpac record stream.
pub const DEVPAC_END_RECORD: u8 = 0x13;
const DEVPAC_RECORD_HEADER: usize = 3;

pub fn validate_turboc(r: &ByteReader<'_>, _cfg: &ClassifierConfig) -> Validation {
    if r.len() < TURBOC_HEADER_SIZE || r.read_u16be(0)? != TURBOC_MAGIC {
        return Err(Rejection::not_applicable("no Turbo-C magic"));
    }

    let displacement = r.read_i16be(2)?;
    let tlen = r.read_u32be(0x04)?;
    let dlen = r.read_u32be(0x08)?;
    let blen = r.read_u32be(0x0C)?;
    let slen = r.read_u32be(0x10)?;

    if slen != 0 {
        return Err(Rejection::invalid("slen not zero"));
    }
    if [tlen, dlen, blen].iter().any(|&s| s > TURBOC_MAX_SEGMENT) {
        return Err(Rejection::invalid("segment size too large"));
    }

    let expected = FormatTag::TurboCObject
        .descriptor()
        .expected_size(r)
        .ok_or_else(|| Rejection::invalid("segment sizes overflow"))?;
    if expected != r.len() {
        return Err(Rejection::invalid(format!(
            "size mismatch: expected {expected}, got {}",
            r.len()
        )));
    }

    let entry = 4 + i64::from(displacement);
    if entry < 0 || entry > r.len() as i64 {
        return Err(Rejection::invalid(format!("entry point {entry} outside file")));
    }

    Ok(ClassificationResult::accept(
        FormatTag::TurboCObject,
        FormatTag::TurboCObject.default_extension(),
        CONFIDENCE_PROVEN,
        "Valid Turbo-C object with exact size match",
    ))
}

/// Module name stored after the Devpac signature, with its extension removed.
pub fn devpac_module_name(r: &ByteReader<'_>) -> Result<(String, usize), Rejection> {
    let window = r.len().saturating_sub(3).min(DEVPAC_MAX_NAME);
    let area = r.slice(2, window)?;
    let nul = memchr::memchr(0, area)
        .ok_or_else(|| Rejection::invalid("no filename terminator found"))?;
    let raw = &area[..nul];

    if !raw.iter().all(|&b| b.is_ascii_graphic() || b == b' ') {
        return Err(Rejection::invalid("non-printable filename"));
    }
    let name: String = raw.iter().map(|&b| char::from(b)).collect();
    let stem = match name.rsplit_once('.') {
        Some((stem, _)) => stem,
        None => name.as_str(),
    };
    if stem.is_empty() || stem.len() > DEVPAC_MAX_STEM {
        return Err(Rejection::invalid("invalid filename length"));
    }
    Ok((stem.to_string(), 2 + nul + 1))
}

/// Walk `kind, len, payload` records from `start` to the end record.
///
/// Returns the number of records before the terminator.
pub fn walk_devpac_records(r: &ByteReader<'_>, start: usize) -> Result<usize, Rejection> {
    let mut pos = start;
    let mut records = 0usize;
    loop {
        if pos + DEVPAC_RECORD_HEADER > r.len() {
            return Err(Rejection::truncated(format!(
                "record stream ends at {pos:#x} without end record"
            )));
        }
        let kind = r.read_u8(pos)?;
        let len = usize::from(r.read_u16be(pos + 1)?);
        trace!(offset = pos, kind, len, "devpac record");

        if kind == DEVPAC_END_RECORD && len == 0 {
            pos += DEVPAC_RECORD_HEADER;
            break;
        }
        let next = pos + DEVPAC_RECORD_HEADER + len;
        if next > r.len() {
            return Err(Rejection::truncated(format!(
                "record at {pos:#x} runs past end of file"
            )));
        }
        pos = next;
        records += 1;
    }

    let padding = r.tail(pos)?;
    if padding.iter().any(|&b| b != 0) {
        return Err(Rejection::invalid(format!(
            "non-zero data after end record at {pos:#x}"
        )));
    }
    Ok(records)
}

pub fn validate_devpac(r: &ByteReader<'_>, cfg: &ClassifierConfig) -> Validation {
    if r.len() < DEVPAC_MIN_SIZE || r.slice(0, 2)? != DEVPAC_SIGNATURE {
        return Err(Rejection::not_applicable("no Devpac signature"));
    }
    if r.len() > cfg.limits.max_object_size {
        return Err(Rejection::not_applicable("too large for a Devpac object"));
    }

    let (stem, records_start) = devpac_module_name(r)?;
    let records = walk_devpac_records(r, records_start)?;

    Ok(ClassificationResult::accept(
        FormatTag::DevpacObject,
        FormatTag::DevpacObject.default_extension(),
        CONFIDENCE_PROVEN,
        format!("Devpac object with embedded name: {stem} ({records} records)"),
    )
    .with_embedded_name(Some(stem)))
}
