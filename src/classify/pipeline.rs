//! Tiered classification pipeline.

use super::config::ClassifierConfig;
use super::VALIDATORS;
use crate::core::{ByteReader, ClassificationResult};
use crate::text;
use tracing::{debug, trace_span};

/// A configured classification engine. Holds no per-call state, so one
/// instance can serve any number of threads.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    config: ClassifierConfig,
}

impl Classifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classify one buffer. Always returns exactly one verdict.
    pub fn classify(&self, bytes: &[u8]) -> ClassificationResult {
        let span = trace_span!("classify", size = bytes.len());
        let _enter = span.enter();

        let reader = ByteReader::new(bytes);
        for v in VALIDATORS {
            match (v.check)(&reader, &self.config) {
                Ok(result) => {
                    debug!(
                        validator = v.name,
                        tier = v.tier.number(),
                        format = ?result.format,
                        confidence = result.confidence,
                        "accepted"
                    );
                    return result;
                }
                Err(rejection) => {
                    debug!(
                        validator = v.name,
                        kind = %rejection.kind,
                        detail = %rejection.detail,
                        "rejected"
                    );
                }
            }
        }

        match text::classify_text(bytes, &self.config.text) {
            Ok(result) => {
                debug!(
                    validator = "text",
                    format = ?result.format,
                    confidence = result.confidence,
                    "accepted"
                );
                result
            }
            Err(rejection) => {
                debug!(
                    validator = "text",
                    kind = %rejection.kind,
                    detail = %rejection.detail,
                    "rejected"
                );
                ClassificationResult::unknown(format!(
                    "No structural match; not text ({})",
                    rejection.detail
                ))
            }
        }
    }
}

/// Classify with the default configuration.
pub fn classify(bytes: &[u8]) -> ClassificationResult {
    Classifier::default().classify(bytes)
}
