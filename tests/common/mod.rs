//! Common test utilities for integration tests
//!
//! Shared fixtures for the engine and runner tests.

use std::sync::Arc;

use spellbreaker::adapters::completion::ScriptedCompletion;
use spellbreaker::adapters::lexicon::FrequencyLexicon;
use spellbreaker::{ExtractionEngine, ExtractionSettings};

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
/// Call this at the beginning of tests that need logging.
#[allow(dead_code)]
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// A small word list with frequencies per million.
pub fn lexicon() -> Arc<FrequencyLexicon> {
    Arc::new(FrequencyLexicon::from_words([
        ("CARPET", 40.0),
        ("SECRET", 80.0),
        ("CHEER", 50.0),
        ("CHEF", 30.0),
        ("THUNDER", 20.0),
        ("THUNDERSTORM", 4.0),
        ("ORCHID", 6.0),
    ]))
}

#[allow(dead_code)]
pub fn engine(completion: Arc<ScriptedCompletion>) -> ExtractionEngine {
    ExtractionEngine::new(completion, lexicon(), ExtractionSettings::default())
}
