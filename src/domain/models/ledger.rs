//! Per-level failure bookkeeping.

use std::collections::{BTreeSet, HashMap};

use super::strategy::{Level, StrategyCategory};

/// Failure counters per (level, question) and exhaustion sets per category.
///
/// Entries are created lazily and never shrink within a session. Counters
/// only go up, and a category marked exhausted for a level stays exhausted.
#[derive(Debug, Clone, Default)]
pub struct FailureLedger {
    question_failures: HashMap<Level, HashMap<String, u32>>,
    exhausted: HashMap<StrategyCategory, BTreeSet<Level>>,
}

impl FailureLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure the level has a (possibly empty) entry.
    pub fn touch(&mut self, level: Level) {
        self.question_failures.entry(level).or_default();
    }

    /// Increment the failure counter for a question and return the new count.
    pub fn record_failure(&mut self, level: Level, question: &str) -> u32 {
        let count = self
            .question_failures
            .entry(level)
            .or_default()
            .entry(question.to_string())
            .or_insert(0);
        *count = count.saturating_add(1);
        *count
    }

    pub fn failures(&self, level: Level, question: &str) -> u32 {
        self.question_failures
            .get(&level)
            .and_then(|questions| questions.get(question))
            .copied()
            .unwrap_or(0)
    }

    /// Whether the question has reached the failure threshold on this level.
    pub fn has_failed(&self, level: Level, question: &str, threshold: u32) -> bool {
        self.failures(level, question) >= threshold
    }

    /// Mark a category exhausted for a level. Returns `true` if it was not
    /// already marked.
    pub fn mark_exhausted(&mut self, category: StrategyCategory, level: Level) -> bool {
        self.exhausted.entry(category).or_default().insert(level)
    }

    pub fn is_exhausted(&self, category: StrategyCategory, level: Level) -> bool {
        self.exhausted
            .get(&category)
            .is_some_and(|levels| levels.contains(&level))
    }

    /// Levels on which the category has been exhausted, ascending.
    pub fn exhausted_levels(&self, category: StrategyCategory) -> Vec<Level> {
        self.exhausted
            .get(&category)
            .map(|levels| levels.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Levels that have a ledger entry, ascending.
    pub fn tracked_levels(&self) -> Vec<Level> {
        let mut levels: Vec<_> = self.question_failures.keys().copied().collect();
        levels.sort_unstable();
        levels
    }
}
