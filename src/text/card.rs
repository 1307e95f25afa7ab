//! Per-candidate score cards and their resolution.

use crate::classify::config::TextConfig;
use crate::core::FormatTag;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// A text type that can win on evidence. Generic text is the fallback, not a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TextKind {
    Makefile,
    Assembly,
    CHeader,
    CSource,
    DesktopInfo,
    ProjectFile,
    ResourceDefinition,
    BatchScript,
}

impl TextKind {
    pub const ALL: [TextKind; 8] = [
        TextKind::CSource,
        TextKind::CHeader,
        TextKind::Assembly,
        TextKind::DesktopInfo,
        TextKind::Makefile,
        TextKind::BatchScript,
        TextKind::ProjectFile,
        TextKind::ResourceDefinition,
    ];

    pub fn format(self) -> FormatTag {
        match self {
            TextKind::CSource => FormatTag::CSource,
            TextKind::CHeader => FormatTag::CHeader,
            TextKind::Assembly => FormatTag::Assembly,
            TextKind::DesktopInfo => FormatTag::DesktopInfo,
            TextKind::Makefile => FormatTag::Makefile,
            TextKind::BatchScript => FormatTag::BatchScript,
            TextKind::ProjectFile => FormatTag::ProjectFile,
            TextKind::ResourceDefinition => FormatTag::ResourceDefinition,
        }
    }

    pub fn extension(self) -> &'static str {
        self.format().default_extension()
    }

    /// Signature priority; lower ranks sort first among equal scores.
    pub fn priority(self) -> u8 {
        match self {
            TextKind::Makefile => 0,
            TextKind::Assembly => 1,
            TextKind::CHeader => 2,
            TextKind::CSource => 3,
            TextKind::DesktopInfo | TextKind::ProjectFile | TextKind::ResourceDefinition => 4,
            TextKind::BatchScript => 5,
        }
    }

    /// Candidate named by a filename extension, for the embedded-name nudge.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_uppercase().as_str() {
            "H" => Some(TextKind::CHeader),
            "C" => Some(TextKind::CSource),
            "S" => Some(TextKind::Assembly),
            _ => None,
        }
    }
}

/// Accumulated evidence for one candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextScoreCard {
    pub kind: TextKind,
    pub score: i32,
    pub evidence: Vec<(&'static str, i32)>,
    /// At least one structural signature of this kind is present.
    pub gate_met: bool,
}

impl TextScoreCard {
    pub fn new(kind: TextKind) -> Self {
        Self {
            kind,
            score: 0,
            evidence: Vec::new(),
            gate_met: false,
        }
    }

    pub fn add(&mut self, rule: &'static str, delta: i32) {
        if delta != 0 {
            self.score += delta;
            self.evidence.push((rule, delta));
        }
    }

    pub fn add_if(&mut self, cond: bool, rule: &'static str, delta: i32) {
        if cond {
            self.add(rule, delta);
        }
    }

    pub fn open_gate(&mut self, cond: bool) {
        self.gate_met |= cond;
    }

    /// Negative totals carry no information beyond zero.
    pub fn finish(mut self) -> Self {
        self.score = self.score.max(0);
        self
    }
}

/// Why resolution did or did not pick a winner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Winner(TextKind),
    /// Best score below `strong_min`.
    Weak,
    /// Best candidate has no structural signature.
    Ungated,
    /// Best and runner-up closer than `margin`.
    Ambiguous,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub outcome: Outcome,
    pub best: (TextKind, i32),
    pub runner_up: (TextKind, i32),
}

/// Sort cards by score, then signature priority.
pub fn rank(cards: &mut [TextScoreCard]) {
    cards.sort_by_key(|c| (Reverse(c.score), c.kind.priority(), c.kind));
}

/// Pick the winner under the strong-minimum and margin rules.
///
/// `cards` must hold at least two entries; they are re-ranked in place.
pub fn resolve(cards: &mut [TextScoreCard], cfg: &TextConfig) -> Resolution {
    rank(cards);
    let best = &cards[0];
    let second = &cards[1];
    let outcome = if best.score < cfg.strong_min {
        Outcome::Weak
    } else if !best.gate_met {
        Outcome::Ungated
    } else if best.score - second.score < cfg.margin {
        Outcome::Ambiguous
    } else {
        Outcome::Winner(best.kind)
    };
    Resolution {
        outcome,
        best: (best.kind, best.score),
        runner_up: (second.kind, second.score),
    }
}

/// Confidence for a winning score.
pub fn winner_confidence(score: i32, cfg: &TextConfig) -> u8 {
    let bonus = (score - cfg.strong_min).clamp(0, 9);
    90 + bonus as u8
}
