//! CLI command implementations.

pub mod config;
pub mod extract;
pub mod init;
pub mod play;
pub mod strategies;

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

use crate::adapters::completion::{OllamaCompletion, OllamaConfig};
use crate::adapters::lexicon::FrequencyLexicon;
use crate::domain::models::{Config, LexiconConfig};
use crate::domain::ports::LexicalOracle;
use crate::infrastructure::config::ConfigLoader;
use crate::services::{ExtractionEngine, ExtractionSettings};

/// Load the explicit config file if one was given, else the project config.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
}

/// The configured lexicon, or an empty one when no path is set.
pub fn build_lexicon(config: &LexiconConfig) -> Result<Arc<dyn LexicalOracle>> {
    let lexicon = match &config.path {
        Some(path) => FrequencyLexicon::from_path(path)
            .with_context(|| format!("Failed to load lexicon from {path}"))?,
        None => {
            warn!("no lexicon configured; spelling repair and word validation are disabled");
            FrequencyLexicon::new()
        }
    };
    Ok(Arc::new(lexicon))
}

pub fn extraction_settings(config: &Config) -> ExtractionSettings {
    ExtractionSettings {
        high_difficulty_level: config.engine.high_difficulty_level,
        common_threshold: config.lexicon.common_threshold,
        long_word_len: config.lexicon.long_word_len,
    }
}

/// Extraction engine wired to Ollama and the configured lexicon.
pub fn build_engine(config: &Config) -> Result<ExtractionEngine> {
    let completion = OllamaCompletion::new(OllamaConfig::from(&config.completion))
        .context("Failed to create the completion client")?;
    let lexicon = build_lexicon(&config.lexicon)?;
    Ok(ExtractionEngine::new(
        Arc::new(completion),
        lexicon,
        extraction_settings(config),
    ))
}
