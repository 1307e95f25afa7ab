//! GEM resource file (.RSC) validation.
//!
//! The 36-byte header ends with `rsh_rssize`, the total file size, which
//! makes this the most reliable binary format to prove.

use super::config::ClassifierConfig;
use crate::core::{ByteReader, ClassificationResult, FormatTag, Rejection, Validation, CONFIDENCE_PROVEN};

pub const RSC_HEADER_SIZE: usize = 36;

const OBJECT_SIZE: usize = 24;
const TEDINFO_SIZE: usize = 28;
const ICONBLK_SIZE: usize = 34;
const BITBLK_SIZE: usize = 14;
const TREE_INDEX_SIZE: usize = 2;
const POINTER_SIZE: usize = 4;

const MAX_OBJECTS: u16 = 10_000;
const MAX_TREES: u16 = 1_000;
const MAX_TEDINFOS: u16 = 1_000;

/// Parsed resource header. Offsets are file-relative; 0 means "absent".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RscHeader {
    pub version: u16,
    pub object: u16,
    pub tedinfo: u16,
    pub iconblk: u16,
    pub bitblk: u16,
    pub frstr: u16,
    pub string: u16,
    pub imdata: u16,
    pub frimg: u16,
    pub trindex: u16,
    pub nobs: u16,
    pub ntree: u16,
    pub nted: u16,
    pub nib: u16,
    pub nbb: u16,
    pub nstring: u16,
    pub nimages: u16,
    pub rssize: u16,
}

impl RscHeader {
    pub fn parse(r: &ByteReader<'_>) -> Result<Self, Rejection> {
        let w = r.read_words(0, RSC_HEADER_SIZE / 2)?;
        Ok(Self {
            version: w[0],
            object: w[1],
            tedinfo: w[2],
            iconblk: w[3],
            bitblk: w[4],
            frstr: w[5],
            string: w[6],
            imdata: w[7],
            frimg: w[8],
            trindex: w[9],
            nobs: w[10],
            ntree: w[11],
            nted: w[12],
            nib: w[13],
            nbb: w[14],
            nstring: w[15],
            nimages: w[16],
            rssize: w[17],
        })
    }

    /// Offsets in header order.
    pub fn offsets(&self) -> [u16; 9] {
        [
            self.object,
            self.tedinfo,
            self.iconblk,
            self.bitblk,
            self.frstr,
            self.string,
            self.imdata,
            self.frimg,
            self.trindex,
        ]
    }

    /// `(name, offset, count, entry size)` for every table with computable extent.
    fn tables(&self) -> [(&'static str, u16, u16, usize); 7] {
        [
            ("OBJECT", self.object, self.nobs, OBJECT_SIZE),
            ("TEDINFO", self.tedinfo, self.nted, TEDINFO_SIZE),
            ("ICONBLK", self.iconblk, self.nib, ICONBLK_SIZE),
            ("BITBLK", self.bitblk, self.nbb, BITBLK_SIZE),
            ("tree index", self.trindex, self.ntree, TREE_INDEX_SIZE),
            ("free string", self.frstr, self.nstring, POINTER_SIZE),
            ("free image", self.frimg, self.nimages, POINTER_SIZE),
        ]
    }
}

pub fn validate_rsc(r: &ByteReader<'_>, cfg: &ClassifierConfig) -> Validation {
    let size = r.len();
    if size < RSC_HEADER_SIZE {
        return Err(Rejection::not_applicable("shorter than resource header"));
    }
    if size > cfg.limits.max_rsc_size {
        return Err(Rejection::not_applicable("too large for a resource file"));
    }

    let h = RscHeader::parse(r)?;
    if FormatTag::GemResource.descriptor().expected_size(r) != Some(size) {
        return Err(Rejection::invalid(format!(
            "stored size {} != actual size {}",
            h.rssize, size
        )));
    }

    let mut previous = 0u16;
    for offset in h.offsets().into_iter().filter(|&o| o != 0) {
        if usize::from(offset) < RSC_HEADER_SIZE || usize::from(offset) >= size {
            return Err(Rejection::invalid(format!("offset {offset:#x} outside file body")));
        }
        if offset < previous {
            return Err(Rejection::invalid(format!(
                "offset {offset:#x} precedes {previous:#x}"
            )));
        }
        previous = offset;
    }

    for (name, offset, count, entry) in h.tables() {
        if offset == 0 || count == 0 {
            continue;
        }
        let end = usize::from(offset) + usize::from(count) * entry;
        if end > size {
            return Err(Rejection::invalid(format!("{name} table overflows file")));
        }
    }

    if h.nobs > MAX_OBJECTS || h.ntree > MAX_TREES || h.nted > MAX_TEDINFOS {
        return Err(Rejection::invalid("unreasonable table counts"));
    }

    Ok(ClassificationResult::accept(
        FormatTag::GemResource,
        FormatTag::GemResource.default_extension(),
        CONFIDENCE_PROVEN,
        format!(
            "Valid RSC header with exact size match ({} objects, {} trees)",
            h.nobs, h.ntree
        ),
    ))
}
