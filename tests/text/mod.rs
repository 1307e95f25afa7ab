//! Integration tests for text classification.

mod scenarios;
