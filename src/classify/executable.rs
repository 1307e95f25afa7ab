//! GEMDOS program files (`0x601A`): finished executables and DRI objects.
//!
//! The header stores no total size, so the relocation stream after the
//! symbol table is the proof. Tagged symbol values (high bit set) mark a
//! linkable object, but a well-formed relocation stream with fixups wins:
//! linkers can leave tagged debug symbols in a finished program.

use super::config::ClassifierConfig;
use crate::core::{ByteReader, ClassificationResult, FormatTag, Rejection, Validation};
use tracing::debug;

pub const GEMDOS_MAGIC: u16 = 0x601A;
pub const GEMDOS_HEADER_SIZE: usize = 28;

const DRI_SYMBOL_SIZE: usize = 14;
const DRI_VALUE_OFFSET: usize = 8;
const SYMBOLS_SAMPLED: usize = 20;
const ABSFLAG_OFFSET: usize = 0x1A;

const CONF_RELOCATED: u8 = 100;
const CONF_OBJECT_BAD_RELOC: u8 = 98;
const CONF_OBJECT: u8 = 95;
const CONF_PRG_EMPTY: u8 = 95;
const CONF_PRG_NO_RELOC: u8 = 92;

/// Segment lengths from the 28-byte header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GemdosHeader {
    pub tlen: u32,
    pub dlen: u32,
    pub blen: u32,
    pub slen: u32,
    pub absflag: u16,
}

impl GemdosHeader {
    pub fn parse(r: &ByteReader<'_>) -> Result<Self, Rejection> {
        Ok(Self {
            tlen: r.read_u32be(0x02)?,
            dlen: r.read_u32be(0x06)?,
            blen: r.read_u32be(0x0A)?,
            slen: r.read_u32be(0x0E)?,
            absflag: r.read_u16be(ABSFLAG_OFFSET)?,
        })
    }

    /// Loaded image size (TEXT + DATA); fixups must land inside it.
    pub fn image_len(&self) -> u64 {
        u64::from(self.tlen) + u64::from(self.dlen)
    }

    pub fn symbols_offset(&self) -> u64 {
        GEMDOS_HEADER_SIZE as u64 + self.image_len()
    }

    pub fn relocation_offset(&self) -> u64 {
        self.symbols_offset() + u64::from(self.slen)
    }
}

/// What walking the relocation stream found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelocationStream {
    /// Terminated stream with this many fixups.
    Valid { fixups: usize },
    /// First longword zero: nothing to relocate.
    Empty,
    /// No bytes at all after the symbol table.
    Missing,
    /// A fixup offset left the image, or an odd step byte.
    Invalid,
    /// EOF before the terminating zero byte.
    Truncated,
}

/// Walk the fixup stream starting at `start`.
pub fn walk_relocations(r: &ByteReader<'_>, start: usize, image_len: u64) -> RelocationStream {
    if start >= r.len() {
        return RelocationStream::Missing;
    }
    let Ok(first) = r.read_u32be(start) else {
        return RelocationStream::Truncated;
    };
    if first == 0 {
        return RelocationStream::Empty;
    }
    if first % 2 != 0 || u64::from(first) + 4 > image_len {
        return RelocationStream::Invalid;
    }

    let mut offset = u64::from(first);
    let mut fixups = 1usize;
    for &step in r.bytes().get(start + 4..).unwrap_or_default() {
        match step {
            0 => return RelocationStream::Valid { fixups },
            1 => offset += 254,
            s if s % 2 == 0 => {
                offset += u64::from(s);
                if offset + 4 > image_len {
                    return RelocationStream::Invalid;
                }
                fixups += 1;
            }
            _ => return RelocationStream::Invalid,
        }
    }
    RelocationStream::Truncated
}

/// `(tagged, sampled)` over the first DRI symbols, if the table is DRI-shaped.
pub fn tagged_symbols(r: &ByteReader<'_>, h: &GemdosHeader) -> Option<(usize, usize)> {
    let slen = h.slen as usize;
    if slen == 0 || slen % DRI_SYMBOL_SIZE != 0 {
        return None;
    }
    let base = usize::try_from(h.symbols_offset()).ok()?;
    let sampled = (slen / DRI_SYMBOL_SIZE).min(SYMBOLS_SAMPLED);
    let mut checked = 0usize;
    let mut tagged = 0usize;
    for i in 0..sampled {
        let Ok(value) = r.read_u32be(base + i * DRI_SYMBOL_SIZE + DRI_VALUE_OFFSET) else {
            break;
        };
        checked += 1;
        if value & 0x8000_0000 != 0 {
            tagged += 1;
        }
    }
    Some((tagged, checked))
}

fn is_tagged(counts: Option<(usize, usize)>) -> bool {
    matches!(counts, Some((tagged, checked)) if tagged > 0 && tagged * 3 >= checked)
}

pub fn validate_gemdos(r: &ByteReader<'_>, cfg: &ClassifierConfig) -> Validation {
    if r.len() < GEMDOS_HEADER_SIZE || r.read_u16be(0)? != GEMDOS_MAGIC {
        return Err(Rejection::not_applicable("no GEMDOS magic"));
    }
    let h = GemdosHeader::parse(r)?;

    let limit = cfg.limits.max_segment;
    if [h.tlen, h.dlen, h.blen, h.slen].iter().any(|&s| s > limit) {
        return Err(Rejection::invalid("segment size unreasonable"));
    }
    let reloc = h.relocation_offset();
    if reloc > r.len() as u64 {
        return Err(Rejection::invalid("file too small for header values"));
    }

    let stream = walk_relocations(r, reloc as usize, h.image_len());
    let symbols = tagged_symbols(r, &h);
    let tagged = is_tagged(symbols);
    let (sym_tagged, sym_checked) = symbols.unwrap_or((0, 0));
    debug!(?stream, tagged, sym_tagged, sym_checked, "gemdos evidence");

    let object = |conf: u8, why: &str| {
        ClassificationResult::accept(
            FormatTag::GemdosObject,
            FormatTag::GemdosObject.default_extension(),
            conf,
            format!("GEMDOS object (.O): {why} ({sym_tagged}/{sym_checked} tagged symbols)"),
        )
    };
    let program = |conf: u8, why: String| {
        ClassificationResult::accept(
            FormatTag::GemdosExecutable,
            FormatTag::GemdosExecutable.default_extension(),
            conf,
            format!("GEMDOS executable: {why}"),
        )
    };

    match stream {
        RelocationStream::Valid { fixups } => {
            Ok(program(CONF_RELOCATED, format!("valid relocation stream ({fixups} fixups)")))
        }
        RelocationStream::Empty | RelocationStream::Missing if tagged => {
            Ok(object(CONF_OBJECT, "DRI symbols with tagged values"))
        }
        RelocationStream::Empty => Ok(program(CONF_PRG_EMPTY, "empty relocation stream".into())),
        RelocationStream::Missing if h.absflag != 0 => {
            Ok(program(CONF_PRG_EMPTY, "absolute, no relocation stream".into()))
        }
        RelocationStream::Missing => Ok(program(CONF_PRG_NO_RELOC, "no relocation stream".into())),
        RelocationStream::Invalid if tagged => {
            Ok(object(CONF_OBJECT_BAD_RELOC, "tagged symbols and invalid relocation"))
        }
        RelocationStream::Invalid => Err(Rejection::invalid("relocation stream out of range")),
        RelocationStream::Truncated if tagged => {
            Ok(object(CONF_OBJECT, "tagged symbols, unterminated relocation"))
        }
        RelocationStream::Truncated => Err(Rejection::truncated(
            "relocation stream ends before its terminator",
        )),
    }
}
