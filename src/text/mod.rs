//! Text evidence classifier.
//!
//! Runs only after every structural validator declined. Scores each text
//! candidate independently and accepts the best one only when it clears
//! `strong_min` and leads the runner-up by `margin`; otherwise the buffer
//! is generic text.

pub mod card;
pub mod embedded;
pub mod gate;
pub mod rules;

use crate::classify::config::TextConfig;
use crate::core::{ClassificationResult, FormatTag, RejectKind, Rejection, CONFIDENCE_FLOOR};
use tracing::debug;

pub use card::{Outcome, Resolution, TextKind, TextScoreCard};
pub use embedded::{extract_embedded_name, EmbeddedName};
pub use gate::{check_text_gate, decode_text, split_lines};

/// Full evidence behind a text decision.
#[derive(Debug, Clone)]
pub struct TextAnalysis {
    /// Ranked, best first.
    pub cards: Vec<TextScoreCard>,
    pub resolution: Resolution,
    pub embedded: Option<EmbeddedName>,
    /// Candidate that received the embedded-name nudge, if any.
    pub nudged: Option<TextKind>,
}

impl TextAnalysis {
    pub fn into_result(self, cfg: &TextConfig) -> ClassificationResult {
        let stem = self.embedded.as_ref().map(|n| n.stem.clone());
        let (best_kind, best_score) = self.resolution.best;
        let (second_kind, second_score) = self.resolution.runner_up;

        let result = match self.resolution.outcome {
            Outcome::Winner(kind) => {
                let mut reason = format!(
                    "{} score {best_score} (next {} {second_score})",
                    kind.extension(),
                    second_kind.extension()
                );
                if let (Some(k), Some(n)) = (self.nudged, &self.embedded) {
                    if k == kind {
                        reason.push_str(&format!(", embedded name {}.{}", n.stem, n.extension));
                    }
                }
                ClassificationResult::accept(
                    kind.format(),
                    kind.extension(),
                    card::winner_confidence(best_score, cfg),
                    reason,
                )
            }
            outcome => {
                let why = match outcome {
                    Outcome::Ambiguous => format!(
                        "ambiguous between {} ({best_score}) and {} ({second_score})",
                        best_kind.extension(),
                        second_kind.extension()
                    ),
                    Outcome::Ungated => format!(
                        "{} lacks a structural signature",
                        best_kind.extension()
                    ),
                    _ => format!("no strong type match (best {} {best_score})", best_kind.extension()),
                };
                ClassificationResult::accept(
                    FormatTag::PlainText,
                    FormatTag::PlainText.default_extension(),
                    CONFIDENCE_FLOOR,
                    format!("Generic text: {why}"),
                )
            }
        };
        result.with_embedded_name(stem)
    }
}

/// Score a text-like buffer. Fails only when the text gate rejects it.
pub fn analyze_text(bytes: &[u8], cfg: &TextConfig) -> Result<TextAnalysis, Rejection> {
    check_text_gate(bytes, cfg)?;
    let text = decode_text(bytes);
    let lines = split_lines(&text);
    let features = rules::TextFeatures::new(&text, &lines, bytes.len());

    let mut cards = rules::score_all(&features);
    let embedded = extract_embedded_name(&lines, cfg.header_scan_lines);
    let mut resolution = card::resolve(&mut cards, cfg);
    let mut nudged = None;

    if resolution.outcome == Outcome::Ambiguous {
        let hinted = embedded
            .as_ref()
            .and_then(|n| TextKind::from_extension(&n.extension));
        if let Some(kind) = hinted {
            if let Some(c) = cards.iter_mut().take(2).find(|c| c.kind == kind) {
                c.add("embedded name", cfg.embedded_name_nudge);
                nudged = Some(kind);
                resolution = card::resolve(&mut cards, cfg);
            }
        }
    }

    if let Outcome::Ambiguous = resolution.outcome {
        debug!(
            kind = %RejectKind::Ambiguous,
            best = ?resolution.best,
            runner_up = ?resolution.runner_up,
            "text candidates too close"
        );
    }

    Ok(TextAnalysis {
        cards,
        resolution,
        embedded,
        nudged,
    })
}

/// Classify a buffer as one of the text types, or generic text.
pub fn classify_text(bytes: &[u8], cfg: &TextConfig) -> Result<ClassificationResult, Rejection> {
    Ok(analyze_text(bytes, cfg)?.into_result(cfg))
}
