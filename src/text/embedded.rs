//! Original filenames recovered from source comment headers.
//!
//! Atari ST sources habitually name themselves in their first lines:
//! `/* GEMBIND.H Do-It-Yourself... */`, ` * SETJMP.H`, `@(#)math.h 3.1`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

const NAME: &str = r"([A-Za-z_][A-Za-z0-9_\-]*)\.([A-Za-z]{1,3})";

// version-control stamp: @(#)math.h
static RE_SCCS: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"@\(#\)\s*{NAME}")).expect("valid SCCS regex"));

// asterisk continuation: " * access.h -- modes for..."
static RE_ASTERISK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^\s*\*\s+{NAME}(?:\s*$|\s+--|\s+-{{1,2}}\s)"))
        .expect("valid asterisk-comment regex")
});

// block comment leading the line: "/*	GEMBIND.H Do-It-Yourself"
static RE_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"/\*\s+{NAME}(?:\s*$|\s+--|\s+-{{1,2}}\s|\s+\w)"))
        .expect("valid block-comment regex")
});

// filename alone on its line
static RE_STANDALONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"^\s*{NAME}\s*$")).expect("valid standalone-name regex"));

// line comment: "// FILENAME.H - description"
static RE_LINE_COMMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"//\s+{NAME}\s+[-:]")).expect("valid line-comment regex")
});

/// A bare filename is only trusted with a source-like extension.
const STANDALONE_EXTENSIONS: [&str; 6] = ["H", "C", "S", "INC", "HPP", "CPP"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddedName {
    pub stem: String,
    /// As written, without the dot.
    pub extension: String,
}

fn capture(re: &Regex, line: &str) -> Option<EmbeddedName> {
    re.captures(line).map(|c| EmbeddedName {
        stem: c[1].to_string(),
        extension: c[2].to_string(),
    })
}

/// Recognize one line; conventions are tried most-specific first.
pub fn match_line(line: &str) -> Option<EmbeddedName> {
    capture(&RE_SCCS, line)
        .or_else(|| capture(&RE_ASTERISK, line))
        .or_else(|| capture(&RE_BLOCK, line))
        .or_else(|| {
            capture(&RE_STANDALONE, line).filter(|n| {
                STANDALONE_EXTENSIONS
                    .iter()
                    .any(|e| e.eq_ignore_ascii_case(&n.extension))
            })
        })
        .or_else(|| capture(&RE_LINE_COMMENT, line))
}

/// First embedded filename within the first `max_lines` lines.
pub fn extract_embedded_name(lines: &[&str], max_lines: usize) -> Option<EmbeddedName> {
    lines.iter().take(max_lines).find_map(|l| match_line(l))
}
