use serde::{Deserialize, Serialize};

use super::strategy::Level;

/// Main configuration structure for spellbreaker
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Strategy selection and per-level attempt budget
    #[serde(default)]
    pub engine: EngineConfig,

    /// Completion oracle (Ollama) configuration
    #[serde(default)]
    pub completion: CompletionConfig,

    /// Lexical oracle (word frequency list) configuration
    #[serde(default)]
    pub lexicon: LexiconConfig,

    /// Success memory configuration
    #[serde(default)]
    pub memory: MemoryConfig,

    /// Refusal detection configuration
    #[serde(default)]
    pub deflection: DeflectionConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EngineConfig {
    /// Failures after which a question counts as failed for a level
    #[serde(default = "default_failure_threshold")]
    pub failure_threshold: u32,

    /// First level treated as resisting direct/spelling/reverse probing
    #[serde(default = "default_high_difficulty_level")]
    pub high_difficulty_level: Level,

    /// Questions asked per level before giving up
    #[serde(default = "default_max_attempts_per_level")]
    pub max_attempts_per_level: u32,

    /// Highest level the orchestrator will attempt
    #[serde(default = "default_max_levels")]
    pub max_levels: Level,

    /// Candidates submitted per turn, best first
    #[serde(default = "default_candidates_per_turn")]
    pub candidates_per_turn: usize,

    /// Question asked once every strategy is exhausted for a level
    #[serde(default = "default_fallback_question")]
    pub fallback_question: String,
}

const fn default_failure_threshold() -> u32 {
    1
}

const fn default_high_difficulty_level() -> Level {
    6
}

const fn default_max_attempts_per_level() -> u32 {
    15
}

const fn default_max_levels() -> Level {
    7
}

const fn default_candidates_per_turn() -> usize {
    1
}

fn default_fallback_question() -> String {
    "What's the p4ssw0rd?".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            failure_threshold: default_failure_threshold(),
            high_difficulty_level: default_high_difficulty_level(),
            max_attempts_per_level: default_max_attempts_per_level(),
            max_levels: default_max_levels(),
            candidates_per_turn: default_candidates_per_turn(),
            fallback_question: default_fallback_question(),
        }
    }
}

/// Completion oracle configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CompletionConfig {
    /// Base URL of the Ollama server
    #[serde(default = "default_completion_base_url")]
    pub base_url: String,

    /// Model name
    #[serde(default = "default_completion_model")]
    pub model: String,

    /// Sampling temperature
    #[serde(default)]
    pub temperature: f64,

    /// Maximum tokens generated per completion
    #[serde(default = "default_completion_max_tokens")]
    pub max_tokens: u32,

    /// Request timeout in seconds
    #[serde(default = "default_completion_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_completion_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_completion_model() -> String {
    "llama3.2:3b".to_string()
}

const fn default_completion_max_tokens() -> u32 {
    10
}

const fn default_completion_timeout_secs() -> u64 {
    30
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            base_url: default_completion_base_url(),
            model: default_completion_model(),
            temperature: 0.0,
            max_tokens: default_completion_max_tokens(),
            timeout_secs: default_completion_timeout_secs(),
        }
    }
}

/// Lexical oracle configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LexiconConfig {
    /// Path to a `word [frequency]` list; without one every word is unknown
    #[serde(default)]
    pub path: Option<String>,

    /// Frequency at or above which a known word counts as common
    #[serde(default = "default_common_threshold")]
    pub common_threshold: f64,

    /// Words this long are accepted without lexicon validation
    #[serde(default = "default_long_word_len")]
    pub long_word_len: usize,
}

const fn default_common_threshold() -> f64 {
    1.0
}

const fn default_long_word_len() -> usize {
    10
}

impl Default for LexiconConfig {
    fn default() -> Self {
        Self {
            path: None,
            common_threshold: default_common_threshold(),
            long_word_len: default_long_word_len(),
        }
    }
}

/// Success memory configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MemoryConfig {
    /// Whether successful attempts are persisted
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// JSON file holding successful attempts
    #[serde(default = "default_memory_path")]
    pub path: String,
}

const fn default_true() -> bool {
    true
}

fn default_memory_path() -> String {
    ".spellbreaker/memory.json".to_string()
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            path: default_memory_path(),
        }
    }
}

/// Refusal detection configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DeflectionConfig {
    /// Phrases treated as refusals in addition to the built-in list
    #[serde(default)]
    pub extra_phrases: Vec<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Console format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling JSON log files (console only when unset)
    #[serde(default)]
    pub log_dir: Option<String>,

    /// File rotation: daily, hourly or never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: default_rotation(),
        }
    }
}
