pub mod candidate;
pub mod clue;
pub mod config;
pub mod ledger;
pub mod session;
pub mod strategy;
pub mod success;

pub use candidate::{ranked_candidates, Candidate, MAX_CANDIDATE_LEN, MIN_CANDIDATE_LEN};
pub use clue::{ClueBoard, ClueEntry, ClueFragment, ClueType};
pub use config::{
    CompletionConfig, Config, DeflectionConfig, EngineConfig, LexiconConfig, LoggingConfig,
    MemoryConfig,
};
pub use ledger::FailureLedger;
pub use session::SessionContext;
pub use strategy::{Level, Strategy, StrategyCategory, StrategyRegistry};
pub use success::SuccessRecord;
