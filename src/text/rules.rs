//! Evidence rules for each text candidate.
//!
//! Point values are tuning constants, not invariants. Each candidate has
//! mandatory gate signatures, graduated positive evidence, and anti-signals
//! for content that belongs to a competing candidate.

use super::card::{TextKind, TextScoreCard};
use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;
use regex::{Regex, RegexSet};
use std::collections::BTreeSet;

macro_rules! re {
    ($name:ident, $pat:expr) => {
        static $name: Lazy<Regex> =
            Lazy::new(|| Regex::new($pat).expect(concat!("valid ", stringify!($name), " regex")));
    };
}

// Each word is wrapped as `<prefix>word\b`; set hits count distinct words.
macro_rules! word_set {
    ($name:ident, $prefix:literal, [$($w:literal),+ $(,)?]) => {
        static $name: Lazy<RegexSet> = Lazy::new(|| {
            RegexSet::new([$(concat!($prefix, $w, r"\b")),+])
                .expect(concat!("valid ", stringify!($name), " set"))
        });
    };
}

re!(RE_INCLUDE, r#"#include\s+[<"]"#);
re!(RE_MAIN_DECL, r"\b(?:int|void)\s+main\s*\(");
re!(RE_MAIN_CALL, r"\bmain\s*\(");
re!(RE_DEFINE, r"(?m)^\s*#define\b");
re!(RE_IFNDEF, r"#ifndef\s+\w+");
re!(RE_DEFINE_NAME, r"#define\s+\w+");
re!(RE_PROTOTYPE, r"\b\w+\s+\w+\s*\([^)]*\)\s*;");
re!(RE_TYPEDEF_STRUCT, r"\btypedef\s+struct\b");
re!(RE_BLOCK_COMMENT, r"(?s)/\*.*?\*/");
re!(RE_WORD_COLON, r"(?m)^\w+\s*:");
re!(RE_ASM_LABEL, r"(?m)^[A-Za-z_.][\w.]*:\s");
re!(RE_HEX_IMMEDIATE, r"#\$[0-9A-Fa-f]+");
re!(RE_DATA_DIRECTIVE, r"(?i)\bDC\.[BWL]\b");
re!(RE_DRIVE_PATH, r"[A-Z]:\\");
re!(RE_MAKE_RULE, r"(?m)^[^\s:#=]+(?:\s+[^\s:]+)*\s*:\s+");
re!(RE_MAKE_CC, r"(?m)^\s*CC\s*=");
re!(RE_MAKE_CFLAGS, r"CFLAGS\s*=");
re!(RE_MAKE_LDFLAGS, r"LDFLAGS\s*=");
re!(RE_MAKE_MACRO, r"\$\(\w+\)");
re!(RE_MAKE_AUTOVAR, r"\$[@<^]");
re!(RE_BAT_ECHO, r"(?im)^\s*(?:@echo\b|echo\s+(?:off|on)\s*$)");
re!(RE_BAT_SET, r"(?im)^\s*SET\s+\w+=");
re!(RE_BAT_IF, r"(?im)^\s*if\s+(?:not\s+)?(?:exist|errorlevel)\b");
re!(RE_BAT_GOTO, r"(?im)^\s*goto\s+\w+\s*$");
re!(RE_INF_RECORD, r"^#[A-Za-z](?:[ \t]|[0-9A-Fa-f]*[ \t]*@?$)");
re!(RE_PRJ_SOURCE_REF, r"(?i)\.(?:c|h|s|o|prg|ttp|tos|rsc)\b");
re!(RE_INI_SECTION, r"(?m)^\[\w+\]");
re!(RE_BACKSLASH_PATH, r"\\[\w.]+");
re!(RE_DIGITS, r"\d+");
re!(RE_ALLCAPS, r"\b[A-Z_][A-Z0-9_]{3,}\b");

word_set!(C_KEYWORDS, r"\b", [
    "typedef", "struct", "enum", "static", "extern", "const", "volatile",
    "switch", "case", "break", "continue",
]);
const ASM_DIRECTIVES: [&str; 14] = [
    "SECTION", "TEXT", "DATA", "BSS", "DC", "DS", "DCB", "EQU", "ORG", "END", "XDEF", "XREF",
    "GLOBL", "EVEN",
];
const ASM_MNEMONICS: [&str; 46] = [
    "MOVE", "MOVEA", "MOVEM", "MOVEQ", "ADD", "ADDA", "ADDI", "ADDQ", "SUB", "SUBA", "SUBI",
    "SUBQ", "LEA", "PEA", "JSR", "JMP", "BRA", "BSR", "BEQ", "BNE", "BGT", "BLT", "BGE",
    "BLE", "RTS", "RTE", "CLR", "CMP", "CMPA", "CMPI", "TST", "AND", "OR", "EOR", "NOT",
    "NEG", "EXT", "SWAP", "TRAP", "LINK", "UNLK", "BTST", "BSET", "BCLR", "DBRA", "LSL",
];

// Opcode position only: optional `label:`, indentation, opcode with an
// optional size suffix, then nothing or one comma-separated operand list.
static RE_ASM_INSN: Lazy<Regex> = Lazy::new(|| {
    let opcodes = ASM_DIRECTIVES
        .iter()
        .chain(ASM_MNEMONICS.iter())
        .copied()
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(
        r"(?i)^(?:[A-Za-z_.][\w.]*:)?[ \t]+({opcodes})(?:\.[bwls])?(?:[ \t]+[^\s;,]+(?:[ \t]*,[ \t]*[^\s;,]+)*)?[ \t]*(?:;.*)?$"
    ))
    .expect("valid RE_ASM_INSN regex")
});
re!(RE_ASM_EQU, r"(?i)^[A-Za-z_.][\w.]*:?[ \t]+EQU[ \t]+\S");

word_set!(INF_KEYWORDS, r"(?i)\b", [
    "DESKTOP", "NEWDESK", "GEMDESK", "PATH", "FILE", "DEVICE", "PRINTER", "PORT", "WINDOW",
    "AUTO",
]);

// A batch argument names a path, a wildcard or a variable.
const BAT_ARG: &str = r"\S*[\\:.*%]\S*";

static BAT_COMMANDS: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new([
        r"(?i)^\s*@?echo\s+(?:off|on)\s*$".to_string(),
        r"(?i)^\s*@".to_string(),
        r"(?i)^\s*rem(?:\s|$)".to_string(),
        r"(?i)^\s*set\s+\w+=".to_string(),
        r"(?i)^\s*path\s*[=\s]\s*\S*[\\;:]".to_string(),
        r"(?i)^\s*goto\s+\w+\s*$".to_string(),
        r"^:\w+\s*$".to_string(),
        r"(?i)^\s*if\s+(?:not\s+)?(?:exist|errorlevel)\b".to_string(),
        format!(r"(?i)^\s*(?:copy|xcopy|move|ren|rename)\s+{BAT_ARG}\s+{BAT_ARG}\s*$"),
        format!(r"(?i)^\s*(?:del|erase|cd|chdir|md|mkdir|rd|rmdir|type)\s+{BAT_ARG}\s*$"),
    ])
    .expect("valid BAT_COMMANDS set")
});

static C_CALLS: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new([
        r"\breturn\s+",
        r"\bprintf\s*\(",
        r"\bmalloc\s*\(",
        r"\bfree\s*\(",
        r"\bsizeof\s*\(",
    ])
    .expect("valid C_CALLS set")
});
word_set!(RSD_KEYWORDS, r"(?i)\b", [
    "OBJECT", "TREE", "DIALOG", "FORM", "MENU", "TEDINFO", "ICON", "BITBLK", "CICON",
    "STRING", "ALERT",
]);

static MAKE_TARGETS: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::new(["all:", "clean:", "install:"]).expect("valid make target automaton")
});
static PRJ_FLAGS: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::new(["-I", "-D", "-L", "-l", "-O", "-g"]).expect("valid project flag automaton")
});

/// Patterns of an automaton that occur at least once.
fn distinct_hits(ac: &AhoCorasick, text: &str) -> usize {
    let mut seen = vec![false; ac.patterns_len()];
    for m in ac.find_overlapping_iter(text) {
        seen[m.pattern().as_usize()] = true;
    }
    seen.into_iter().filter(|&s| s).count()
}

/// Points for `#define` density, banded from one definition to twenty or more.
pub fn define_band(count: usize) -> i32 {
    match count {
        0 => 0,
        1 => 1,
        2..=4 => 2,
        5..=9 => 4,
        10..=14 => 5,
        15..=19 => 6,
        _ => 8,
    }
}

/// Facts shared by several candidates, computed once per buffer.
pub struct TextFeatures<'a> {
    pub text: &'a str,
    pub lines: &'a [&'a str],
    pub size: usize,
    pub open_braces: usize,
    pub close_braces: usize,
    pub defines: usize,
    pub has_include: bool,
    pub has_block_comment: bool,
    pub semicolon_comment_lines: usize,
    pub word_colon_lines: usize,
    pub has_data_directive: bool,
    /// Upper-cased opcodes of lines in instruction shape.
    pub asm_opcodes: Vec<String>,
}

impl<'a> TextFeatures<'a> {
    pub fn new(text: &'a str, lines: &'a [&'a str], size: usize) -> Self {
        Self {
            text,
            lines,
            size,
            open_braces: memchr::memchr_iter(b'{', text.as_bytes()).count(),
            close_braces: memchr::memchr_iter(b'}', text.as_bytes()).count(),
            defines: RE_DEFINE.find_iter(text).count(),
            has_include: text.contains("#include"),
            has_block_comment: RE_BLOCK_COMMENT.is_match(text),
            semicolon_comment_lines: lines
                .iter()
                .filter(|l| l.trim_start().starts_with(';'))
                .count(),
            word_colon_lines: RE_WORD_COLON.find_iter(text).count(),
            has_data_directive: RE_DATA_DIRECTIVE.is_match(text),
            asm_opcodes: lines
                .iter()
                .filter_map(|l| RE_ASM_INSN.captures(l))
                .map(|c| c[1].to_ascii_uppercase())
                .collect(),
        }
    }

    /// `count` exceeds `percent` of all lines.
    fn line_share_over(&self, count: usize, percent: usize) -> bool {
        count * 100 > self.lines.len() * percent
    }

    fn has_tab_recipe(&self) -> bool {
        self.lines
            .iter()
            .any(|l| l.starts_with('\t') && !l.trim().is_empty())
    }
}

pub fn score_c_source(f: &TextFeatures<'_>) -> TextScoreCard {
    let mut card = TextScoreCard::new(TextKind::CSource);
    let include = RE_INCLUDE.is_match(f.text);
    let main = RE_MAIN_DECL.is_match(f.text);
    let balanced =
        f.open_braces > 0 && f.close_braces > 0 && f.open_braces.abs_diff(f.close_braces) <= 2;

    card.open_gate(include || main || balanced);
    card.add_if(include, "include", 4);
    card.add_if(main, "entry point", 3);
    card.add("library calls", 2 * C_CALLS.matches(f.text).iter().count() as i32);
    card.add_if(balanced, "balanced braces", 3);
    card.add("keywords", C_KEYWORDS.matches(f.text).iter().count().min(4) as i32);
    card.add_if(f.has_block_comment, "block comment", 1);
    card.add_if(f.text.contains("//"), "line comment", 1);
    card.add_if(f.defines > 0, "define", 2);

    card.add_if(
        f.line_share_over(f.semicolon_comment_lines, 10),
        "semicolon comments",
        -3,
    );
    card.add_if(f.word_colon_lines > 3, "rule lines", -3);
    card.add_if(f.size < 80, "tiny file", -2);
    card.add_if(f.defines >= 10 && f.open_braces <= 1, "defines without bodies", -4);
    card.finish()
}

pub fn score_c_header(f: &TextFeatures<'_>) -> TextScoreCard {
    let mut card = TextScoreCard::new(TextKind::CHeader);
    let guard = RE_IFNDEF.is_match(f.text)
        && RE_DEFINE_NAME.is_match(f.text)
        && f.text.contains("#endif");
    let prototypes = RE_PROTOTYPE.find_iter(f.text).count();
    let typedef_struct = RE_TYPEDEF_STRUCT.is_match(f.text);
    let has_extern = f.text.contains("extern");

    card.open_gate(f.defines > 0 || guard || prototypes >= 2 || typedef_struct || has_extern);
    card.add("define density", define_band(f.defines));
    card.add_if(guard, "include guard", 3);
    card.add_if(prototypes >= 2, "prototypes", 3);
    card.add_if(typedef_struct, "typedef struct", 2);
    card.add_if(has_extern, "extern", 2);
    card.add_if(f.has_include, "include", 2);
    card.add_if(f.open_braces <= 2, "few bodies", 2);
    card.add_if(f.has_block_comment, "block comment", 1);

    card.add_if(RE_MAIN_CALL.is_match(f.text), "entry point", -5);
    card.add_if(f.open_braces > 5, "function bodies", -3);
    card.finish()
}

pub fn score_assembly(f: &TextFeatures<'_>) -> TextScoreCard {
    let mut card = TextScoreCard::new(TextKind::Assembly);
    let distinct: BTreeSet<&str> = f.asm_opcodes.iter().map(String::as_str).collect();
    let (directive_ops, mnemonic_ops): (Vec<&str>, Vec<&str>) =
        distinct.into_iter().partition(|op| ASM_DIRECTIVES.contains(op));
    let equates = f.lines.iter().any(|l| RE_ASM_EQU.is_match(l));
    let directives = directive_ops.len() + usize::from(equates);
    let mnemonics = mnemonic_ops.len();
    let insn_lines = f.asm_opcodes.len();
    let labels = RE_ASM_LABEL.find_iter(f.text).count();

    card.open_gate(insn_lines >= 3 || (labels >= 3 && insn_lines >= 1));
    card.add("directives", 3 * directives as i32);
    card.add_if(
        f.line_share_over(f.semicolon_comment_lines, 10),
        "semicolon comments",
        3,
    );
    card.add_if(labels >= 3, "labels", 3);
    card.add("mnemonics", 2 * mnemonics.min(5) as i32);
    card.add_if(f.size < 200 && mnemonics >= 2, "code snippet", 4);
    card.add_if(RE_HEX_IMMEDIATE.is_match(f.text), "hex immediate", 2);

    card.add_if(RE_INCLUDE.is_match(f.text), "include", -8);
    card.add_if(f.open_braces > 5 || f.close_braces > 5, "braces", -6);
    card.add_if(f.has_block_comment, "block comment", -4);
    let define_penalty = match f.defines {
        0..=1 => 0,
        2..=4 => -5,
        _ => -8,
    };
    card.add("defines", define_penalty);
    card.finish()
}

pub fn score_desktop_info(f: &TextFeatures<'_>) -> TextScoreCard {
    let mut card = TextScoreCard::new(TextKind::DesktopInfo);
    let kv_lines = f
        .lines
        .iter()
        .filter(|l| l.contains('=') && !l.trim_start().starts_with('#'))
        .count();
    let records = f.lines.iter().filter(|l| RE_INF_RECORD.is_match(l)).count();
    let terminated = f
        .lines
        .iter()
        .filter(|l| l.starts_with('#') && l.trim_end().ends_with('@'))
        .count();
    let drive_paths = RE_DRIVE_PATH.find_iter(f.text).count();
    let keywords = INF_KEYWORDS.matches(f.text).iter().count();
    let kv_share = kv_lines * 10 >= f.lines.len() && kv_lines > 0;
    let record_share = records >= 3 && records * 2 >= f.lines.len();

    card.open_gate((kv_share && (keywords >= 1 || drive_paths >= 2)) || record_share);
    card.add_if(kv_share, "key=value lines", 3);
    card.add_if(record_share, "desktop records", 5);
    card.add_if(record_share && terminated >= 2, "@-terminated fields", 2);
    card.add_if(drive_paths >= 2, "drive paths", 3);
    card.add("keywords", keywords.min(5) as i32);

    card.add_if(f.open_braces > 2 || f.has_include, "code syntax", -4);
    card.add_if(f.has_data_directive, "data directive", -4);
    card.add_if(f.defines > 0, "preprocessor", -3);
    card.finish()
}

pub fn score_makefile(f: &TextFeatures<'_>) -> TextScoreCard {
    let mut card = TextScoreCard::new(TextKind::Makefile);
    let rules = RE_MAKE_RULE.is_match(f.text);
    let recipe = f.has_tab_recipe();
    let macro_use = RE_MAKE_MACRO.is_match(f.text);
    let autovar = RE_MAKE_AUTOVAR.is_match(f.text);

    card.open_gate(rules && (recipe || macro_use || autovar));
    card.add_if(rules, "rule line", 4);
    card.add_if(recipe, "tab recipe", 4);
    card.add_if(RE_MAKE_CC.is_match(f.text), "CC", 2);
    card.add_if(RE_MAKE_CFLAGS.is_match(f.text), "CFLAGS", 2);
    card.add_if(RE_MAKE_LDFLAGS.is_match(f.text), "LDFLAGS", 2);
    card.add_if(macro_use, "macro", 2);
    card.add_if(autovar, "automatic variable", 2);
    card.add("common targets", 2 * distinct_hits(&MAKE_TARGETS, f.text) as i32);

    card.add_if(f.open_braces > 10, "braces", -5);
    card.finish()
}

pub fn score_batch(f: &TextFeatures<'_>) -> TextScoreCard {
    let mut card = TextScoreCard::new(TextKind::BatchScript);
    let commands = f
        .lines
        .iter()
        .filter(|l| BAT_COMMANDS.is_match(l))
        .count();
    let echo = RE_BAT_ECHO.is_match(f.text);

    card.open_gate(commands >= 2 || echo);
    card.add_if(commands >= 2, "commands", 4);
    card.add_if(commands >= 5, "command script", 2);
    card.add_if(echo, "echo", 2);
    card.add_if(RE_BAT_SET.is_match(f.text), "set", 2);
    card.add_if(RE_BAT_IF.is_match(f.text), "if", 2);
    card.add_if(RE_BAT_GOTO.is_match(f.text), "goto", 2);

    card.add_if(
        f.word_colon_lines > 0 && f.text.contains('\t'),
        "makefile shape",
        -4,
    );
    card.finish()
}

pub fn score_project(f: &TextFeatures<'_>) -> TextScoreCard {
    let mut card = TextScoreCard::new(TextKind::ProjectFile);
    let refs = RE_PRJ_SOURCE_REF.find_iter(f.text).count();

    card.open_gate(refs >= 5);
    card.add_if(refs >= 5, "source references", 3);
    card.add_if(refs >= 10, "module list", 2);
    card.add_if(distinct_hits(&PRJ_FLAGS, f.text) >= 2, "tool flags", 2);
    card.add_if(RE_INI_SECTION.is_match(f.text), "section header", 2);
    card.add_if(RE_BACKSLASH_PATH.is_match(f.text), "backslash path", 1);

    card.add_if(f.open_braces > 10, "braces", -4);
    card.add_if(
        f.word_colon_lines > 0 && f.text.contains('\t'),
        "makefile shape",
        -3,
    );
    card.finish()
}

pub fn score_resource_definition(f: &TextFeatures<'_>) -> TextScoreCard {
    let mut card = TextScoreCard::new(TextKind::ResourceDefinition);
    let keywords = RSD_KEYWORDS.matches(f.text).iter().count();
    let numeric_lines = f
        .lines
        .iter()
        .filter(|l| l.contains(',') && RE_DIGITS.is_match(l))
        .count();

    card.open_gate(keywords >= 2);
    card.add_if(keywords >= 2, "resource keywords", 3);
    card.add_if(f.line_share_over(numeric_lines, 20), "numeric tables", 2);
    card.add_if(RE_ALLCAPS.find_iter(f.text).count() > 10, "caps identifiers", 2);

    card.add_if(f.has_include && f.open_braces > 5, "C code", -4);
    card.add_if(f.has_data_directive, "data directive", -4);
    card.finish()
}

/// Score every candidate.
pub fn score_all(f: &TextFeatures<'_>) -> Vec<TextScoreCard> {
    TextKind::ALL
        .iter()
        .map(|kind| match kind {
            TextKind::CSource => score_c_source(f),
            TextKind::CHeader => score_c_header(f),
            TextKind::Assembly => score_assembly(f),
            TextKind::DesktopInfo => score_desktop_info(f),
            TextKind::Makefile => score_makefile(f),
            TextKind::BatchScript => score_batch(f),
            TextKind::ProjectFile => score_project(f),
            TextKind::ResourceDefinition => score_resource_definition(f),
        })
        .collect()
}
