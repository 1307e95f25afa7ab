//! Integration tests for the classification pipeline.

mod adversarial;
mod determinism_json;
mod formats;
mod priority;
mod rename;
