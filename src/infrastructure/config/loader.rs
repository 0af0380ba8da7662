use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Project configuration directory, created by `spellbreaker init`.
pub const CONFIG_DIR: &str = ".spellbreaker";

/// Environment variable prefix for overrides (`__` separates sections).
pub const ENV_PREFIX: &str = "SPELLBREAKER_";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid failure_threshold: {0}. Must be at least 1")]
    InvalidFailureThreshold(u32),

    #[error("Invalid high_difficulty_level: {0}. Must be at least 1")]
    InvalidHighDifficultyLevel(u32),

    #[error("Invalid max_attempts_per_level: {0}. Must be at least 1")]
    InvalidMaxAttempts(u32),

    #[error("Invalid max_levels: {0}. Must be at least 1")]
    InvalidMaxLevels(u32),

    #[error("Invalid candidates_per_turn: {0}. Must be at least 1")]
    InvalidCandidatesPerTurn(usize),

    #[error("Fallback question cannot be empty")]
    EmptyFallbackQuestion,

    #[error("Completion base_url cannot be empty")]
    EmptyBaseUrl,

    #[error("Completion model cannot be empty")]
    EmptyModel,

    #[error("Invalid completion timeout: {0}. Must be positive")]
    InvalidTimeout(u64),

    #[error("Invalid common_threshold: {0}. Cannot be negative")]
    InvalidCommonThreshold(f64),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidRotation(String),

    #[error("Memory path cannot be empty when memory is enabled")]
    EmptyMemoryPath,
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .spellbreaker/config.yaml (project config, created by init)
    /// 3. .spellbreaker/local.yaml (project local overrides, optional)
    /// 4. Environment variables (SPELLBREAKER_* prefix, highest priority)
    pub fn load() -> Result<Config> {
        let config: Config = Self::figment()
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    fn figment() -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(format!("{CONFIG_DIR}/config.yaml")))
            .merge(Yaml::file(format!("{CONFIG_DIR}/local.yaml")))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let path = path.as_ref();
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path))
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let engine = &config.engine;
        if engine.failure_threshold == 0 {
            return Err(ConfigError::InvalidFailureThreshold(engine.failure_threshold));
        }
        if engine.high_difficulty_level == 0 {
            return Err(ConfigError::InvalidHighDifficultyLevel(
                engine.high_difficulty_level,
            ));
        }
        if engine.max_attempts_per_level == 0 {
            return Err(ConfigError::InvalidMaxAttempts(engine.max_attempts_per_level));
        }
        if engine.max_levels == 0 {
            return Err(ConfigError::InvalidMaxLevels(engine.max_levels));
        }
        if engine.candidates_per_turn == 0 {
            return Err(ConfigError::InvalidCandidatesPerTurn(
                engine.candidates_per_turn,
            ));
        }
        if engine.fallback_question.trim().is_empty() {
            return Err(ConfigError::EmptyFallbackQuestion);
        }

        let completion = &config.completion;
        if completion.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        if completion.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel);
        }
        if completion.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(completion.timeout_secs));
        }

        if config.lexicon.common_threshold < 0.0 {
            return Err(ConfigError::InvalidCommonThreshold(
                config.lexicon.common_threshold,
            ));
        }

        if config.memory.enabled && config.memory.path.trim().is_empty() {
            return Err(ConfigError::EmptyMemoryPath);
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidRotation(config.logging.rotation.clone()));
        }

        Ok(())
    }
}
