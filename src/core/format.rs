//! Recognized format family and the static descriptor table.

use super::reader::ByteReader;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Full-screen bitplane size shared by every ST image family.
pub const SCREEN_BYTES: usize = 32000;
/// DEGAS classic: mode word + 16 palette words + screen.
pub const DEGAS_CLASSIC_SIZE: usize = 2 + 32 + SCREEN_BYTES;
/// DEGAS Elite uncompressed: classic layout + 32-byte animation trailer.
pub const DEGAS_ELITE_SIZE: usize = DEGAS_CLASSIC_SIZE + 32;
/// NEOchrome: 128-byte header + screen.
pub const NEOCHROME_SIZE: usize = 128 + SCREEN_BYTES;

/// Priority bucket; validators are consulted strictly in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    /// Magic + exact-size containers
    Container = 1,
    /// Fixed-size image headers
    FixedImage = 2,
    /// Compressed formats requiring decompression proof
    Compressed = 3,
    /// Header-only heuristic binary formats
    Heuristic = 4,
    /// Text evidence classifier
    Text = 5,
}

impl Tier {
    pub const BINARY: [Tier; 4] = [
        Tier::Container,
        Tier::FixedImage,
        Tier::Compressed,
        Tier::Heuristic,
    ];

    pub fn number(self) -> u8 {
        self as u8
    }
}

/// Every format family the engine can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormatTag {
    GemResource,
    TurboCObject,
    DevpacObject,
    GemdosObject,
    GemdosExecutable,
    DegasClassic,
    DegasElite,
    Neochrome,
    DegasEliteCompressed,
    StadPac,
    GemImage,
    CSource,
    CHeader,
    Assembly,
    DesktopInfo,
    Makefile,
    BatchScript,
    ProjectFile,
    ResourceDefinition,
    PlainText,
}

impl FormatTag {
    pub fn descriptor(self) -> &'static FormatDescriptor {
        // The table holds exactly one entry per tag.
        DESCRIPTORS
            .iter()
            .find(|d| d.tag == self)
            .unwrap_or(&DESCRIPTORS[DESCRIPTORS.len() - 1])
    }

    pub fn tier(self) -> Tier {
        self.descriptor().tier
    }

    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    /// Default extension; sub-typed families pick from `extension_map`.
    pub fn default_extension(self) -> &'static str {
        self.descriptor().extension_map[0].1
    }

    pub fn is_text(self) -> bool {
        self.tier() == Tier::Text
    }
}

impl fmt::Display for FormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Derives the total file size a header promises, when the family stores one.
pub type ExactSizeFn = fn(&ByteReader<'_>) -> Option<usize>;

/// Static, compile-time description of a format family.
#[derive(Debug)]
pub struct FormatDescriptor {
    pub tag: FormatTag,
    pub name: &'static str,
    pub tier: Tier,
    pub exact_size: Option<ExactSizeFn>,
    /// `(sub-type code, extension)`; code is the mode/resolution value where relevant.
    pub extension_map: &'static [(u16, &'static str)],
}

impl FormatDescriptor {
    /// Extension for a sub-type code, if the family defines one.
    pub fn extension_for(&self, code: u16) -> Option<&'static str> {
        self.extension_map
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, ext)| *ext)
    }

    /// Exact size promised by the header, if the family stores one.
    pub fn expected_size(&self, reader: &ByteReader<'_>) -> Option<usize> {
        self.exact_size.and_then(|f| f(reader))
    }
}

fn rsc_size(r: &ByteReader<'_>) -> Option<usize> {
    r.read_u16be(0x22).ok().map(usize::from)
}

fn turboc_size(r: &ByteReader<'_>) -> Option<usize> {
    let mut total: usize = 32;
    for off in [0x04, 0x08, 0x0C] {
        let seg = usize::try_from(r.read_u32be(off).ok()?).ok()?;
        total = total.checked_add(seg)?;
    }
    Some(total)
}

fn degas_classic_size(_: &ByteReader<'_>) -> Option<usize> {
    Some(DEGAS_CLASSIC_SIZE)
}

fn degas_elite_size(_: &ByteReader<'_>) -> Option<usize> {
    Some(DEGAS_ELITE_SIZE)
}

fn neochrome_size(_: &ByteReader<'_>) -> Option<usize> {
    Some(NEOCHROME_SIZE)
}

const RESOLUTIONS_PI: &[(u16, &str)] = &[(0, "PI1"), (1, "PI2"), (2, "PI3")];
const RESOLUTIONS_PC: &[(u16, &str)] = &[(0, "PC1"), (1, "PC2"), (2, "PC3")];

/// Descriptor table in registration order; `PlainText` stays last.
pub static DESCRIPTORS: &[FormatDescriptor] = &[
    FormatDescriptor {
        tag: FormatTag::GemResource,
        name: "GEM resource file",
        tier: Tier::Container,
        exact_size: Some(rsc_size),
        extension_map: &[(0, "RSC")],
    },
    FormatDescriptor {
        tag: FormatTag::TurboCObject,
        name: "Turbo-C/Pure-C object",
        tier: Tier::Container,
        exact_size: Some(turboc_size),
        extension_map: &[(0, "TCO")],
    },
    FormatDescriptor {
        tag: FormatTag::DevpacObject,
        name: "Devpac object",
        tier: Tier::Container,
        exact_size: None,
        extension_map: &[(0, "O")],
    },
    FormatDescriptor {
        tag: FormatTag::GemdosObject,
        name: "GEMDOS object module",
        tier: Tier::Container,
        exact_size: None,
        extension_map: &[(0, "O")],
    },
    FormatDescriptor {
        tag: FormatTag::GemdosExecutable,
        name: "GEMDOS executable",
        tier: Tier::Container,
        exact_size: None,
        extension_map: &[(0, "PRG")],
    },
    FormatDescriptor {
        tag: FormatTag::DegasClassic,
        name: "DEGAS image",
        tier: Tier::FixedImage,
        exact_size: Some(degas_classic_size),
        extension_map: RESOLUTIONS_PI,
    },
    FormatDescriptor {
        tag: FormatTag::DegasElite,
        name: "DEGAS Elite image",
        tier: Tier::FixedImage,
        exact_size: Some(degas_elite_size),
        extension_map: RESOLUTIONS_PI,
    },
    FormatDescriptor {
        tag: FormatTag::Neochrome,
        name: "NEOchrome image",
        tier: Tier::FixedImage,
        exact_size: Some(neochrome_size),
        extension_map: &[(0, "NEO")],
    },
    FormatDescriptor {
        tag: FormatTag::DegasEliteCompressed,
        name: "DEGAS Elite compressed image",
        tier: Tier::Compressed,
        exact_size: None,
        extension_map: RESOLUTIONS_PC,
    },
    FormatDescriptor {
        tag: FormatTag::StadPac,
        name: "STAD packed image",
        tier: Tier::Compressed,
        exact_size: None,
        extension_map: &[(0, "PAC")],
    },
    FormatDescriptor {
        tag: FormatTag::GemImage,
        name: "GEM raster image",
        tier: Tier::Heuristic,
        exact_size: None,
        extension_map: &[(0, "IMG")],
    },
    FormatDescriptor {
        tag: FormatTag::CSource,
        name: "C source",
        tier: Tier::Text,
        exact_size: None,
        extension_map: &[(0, "C")],
    },
    FormatDescriptor {
        tag: FormatTag::CHeader,
        name: "C header",
        tier: Tier::Text,
        exact_size: None,
        extension_map: &[(0, "H")],
    },
    FormatDescriptor {
        tag: FormatTag::Assembly,
        name: "68000 assembly source",
        tier: Tier::Text,
        exact_size: None,
        extension_map: &[(0, "S")],
    },
    FormatDescriptor {
        tag: FormatTag::DesktopInfo,
        name: "desktop/configuration info",
        tier: Tier::Text,
        exact_size: None,
        extension_map: &[(0, "INF")],
    },
    FormatDescriptor {
        tag: FormatTag::Makefile,
        name: "makefile",
        tier: Tier::Text,
        exact_size: None,
        extension_map: &[(0, "MAK")],
    },
    FormatDescriptor {
        tag: FormatTag::BatchScript,
        name: "batch script",
        tier: Tier::Text,
        exact_size: None,
        extension_map: &[(0, "BAT")],
    },
    FormatDescriptor {
        tag: FormatTag::ProjectFile,
        name: "project manifest",
        tier: Tier::Text,
        exact_size: None,
        extension_map: &[(0, "PRJ")],
    },
    FormatDescriptor {
        tag: FormatTag::ResourceDefinition,
        name: "resource definition source",
        tier: Tier::Text,
        exact_size: None,
        extension_map: &[(0, "RSD")],
    },
    FormatDescriptor {
        tag: FormatTag::PlainText,
        name: "plain text",
        tier: Tier::Text,
        exact_size: None,
        extension_map: &[(0, "TXT")],
    },
];
