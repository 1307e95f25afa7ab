//! GEM bit-image (`.IMG`) validation.

use super::config::ClassifierConfig;
use crate::core::{ByteReader, ClassificationResult, FormatTag, Rejection, Validation};
use crate::oracle::decode_gem_raster;
use crate::oracle::gem_raster::RasterGeometry;
use tracing::debug;

const IMG_MIN_HEADER_WORDS: u16 = 8;
const IMG_MAX_DIMENSION: u16 = 4096;
/// Rasters larger than this are accepted on the header alone.
const IMG_MAX_DECODE_BYTES: usize = 16 * 1024 * 1024;

const CONF_DECODED: u8 = 100;
const CONF_HEADER_ONLY: u8 = 90;

/// The eight header words every IMG file starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImgHeader {
    pub version: u16,
    pub header_words: u16,
    pub planes: u16,
    pub pattern_len: u16,
    pub pixel_width: u16,
    pub pixel_height: u16,
    pub line_width: u16,
    pub lines: u16,
}

impl ImgHeader {
    pub fn parse(r: &ByteReader<'_>) -> Result<Self, Rejection> {
        let w = r.read_words(0, 8)?;
        Ok(Self {
            version: w[0],
            header_words: w[1],
            planes: w[2],
            pattern_len: w[3],
            pixel_width: w[4],
            pixel_height: w[5],
            line_width: w[6],
            lines: w[7],
        })
    }

    pub fn geometry(&self) -> RasterGeometry {
        RasterGeometry {
            width: usize::from(self.line_width),
            height: usize::from(self.lines),
            planes: usize::from(self.planes),
            pattern_len: usize::from(self.pattern_len),
        }
    }
}

pub fn validate_gem_img(r: &ByteReader<'_>, _cfg: &ClassifierConfig) -> Validation {
    if r.len() < 16 {
        return Err(Rejection::not_applicable("shorter than IMG header"));
    }
    let h = ImgHeader::parse(r)?;
    if h.version != 1 {
        return Err(Rejection::not_applicable(format!("version != 1: {}", h.version)));
    }
    if h.header_words < IMG_MIN_HEADER_WORDS {
        return Err(Rejection::invalid(format!(
            "header length too small: {}",
            h.header_words
        )));
    }
    if !(1..=8).contains(&h.planes) {
        return Err(Rejection::invalid(format!("invalid planes: {}", h.planes)));
    }
    if h.pixel_width == 0 || h.pixel_height == 0 {
        return Err(Rejection::invalid("zero dimensions"));
    }
    if h.pixel_width > IMG_MAX_DIMENSION || h.pixel_height > IMG_MAX_DIMENSION {
        return Err(Rejection::invalid("dimensions too large"));
    }
    if h.line_width == 0 || h.lines == 0 {
        return Err(Rejection::invalid("zero line dimensions"));
    }
    let data_offset = usize::from(h.header_words) * 2;
    if data_offset >= r.len() {
        return Err(Rejection::invalid("data offset beyond file"));
    }

    let geometry = h.geometry();
    let decodable = geometry
        .target_len()
        .is_some_and(|n| n <= IMG_MAX_DECODE_BYTES);
    if decodable {
        let decoded = decode_gem_raster(r.tail(data_offset)?, geometry);
        if decoded.ok {
            return Ok(ClassificationResult::accept(
                FormatTag::GemImage,
                FormatTag::GemImage.default_extension(),
                CONF_DECODED,
                format!(
                    "Valid GEM IMG, {}x{} raster decoded ({} planes)",
                    h.line_width, h.lines, h.planes
                ),
            ));
        }
        debug!(error = ?decoded.error, "IMG raster decode failed");
    }

    Ok(ClassificationResult::accept(
        FormatTag::GemImage,
        FormatTag::GemImage.default_extension(),
        CONF_HEADER_ONLY,
        "Valid GEM IMG header (decode not verified)",
    ))
}
