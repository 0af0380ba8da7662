//! Session-scoped engine state.

use std::collections::BTreeMap;
use uuid::Uuid;

use super::clue::ClueBoard;
use super::ledger::FailureLedger;
use super::strategy::{Level, StrategyCategory, StrategyRegistry};

/// Everything the engine mutates during one session.
///
/// Created once per session and passed by `&mut` into the selector and the
/// extraction engine. A fresh session starts empty; nothing is reset in
/// place. State is partitioned by level, so concurrent probing of different
/// levels would only need one writer per level entry.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub id: Uuid,
    pub registry: StrategyRegistry,
    pub ledger: FailureLedger,
    pub clues: ClueBoard,
    /// Winning category per solved level.
    pub wins: BTreeMap<Level, StrategyCategory>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            registry: StrategyRegistry::new(),
            ledger: FailureLedger::new(),
            clues: ClueBoard::new(),
            wins: BTreeMap::new(),
        }
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}
