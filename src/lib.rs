//! Spellbreaker - adaptive question strategies for text oracles
//!
//! Spellbreaker recovers a secret word from an oracle that answers free-text
//! questions but is instructed not to reveal the word. It probes with
//! indirect question styles, extracts candidate words from the replies, and
//! submits the best guess.
//!
//! # Architecture
//!
//! The crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): models, errors, and the oracle ports
//! - **Service Layer** (`services`): strategy selection, extraction, clue accumulation
//! - **Application Layer** (`application`): the per-level question loop
//! - **Adapters** (`adapters`): console and scripted channels, Ollama completions,
//!   word lists, success memory
//! - **Infrastructure Layer** (`infrastructure`): configuration, logging, project setup
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```ignore
//! use spellbreaker::{ExtractionEngine, StrategyCategory};
//!
//! let candidates = engine
//!     .extract(&mut clues, "TERCES", StrategyCategory::Reverse, question, 2)
//!     .await;
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use application::{AttemptOutcome, LevelReport, LevelRunner, RunnerSettings, SessionReport};
pub use domain::errors::{DomainError, DomainResult, OracleError, OracleResult};
pub use domain::models::{
    Candidate, ClueBoard, Config, FailureLedger, Level, SessionContext, StrategyCategory,
    StrategyRegistry, SuccessRecord,
};
pub use domain::ports::{CompletionOracle, LexicalOracle, OracleChannel, SuccessMemory};
pub use services::{
    ClueAccumulator, DeflectionDetector, ExtractionEngine, ExtractionSettings, ProbeQuestion,
    SelectionPolicy, StrategySelector,
};
