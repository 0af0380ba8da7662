//! Clues collected across turns for high-difficulty levels.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::strategy::Level;

/// What the probing question asked for, which tells how a fragment relates
/// to the secret word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClueType {
    First,
    Last,
    Acronym,
    Unknown,
}

impl ClueType {
    /// Classify a question by keyword: "first", then "last", then
    /// "acronym"/"poem".
    pub fn classify(question: &str) -> Self {
        let question = question.to_lowercase();
        if question.contains("first") {
            Self::First
        } else if question.contains("last") {
            Self::Last
        } else if question.contains("acronym") || question.contains("poem") {
            Self::Acronym
        } else {
            Self::Unknown
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Last => "last",
            Self::Acronym => "acronym",
            Self::Unknown => "unknown",
        }
    }
}

/// An uppercase letter run taken from one reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClueFragment {
    pub letters: String,
    pub clue_type: ClueType,
}

/// One stored turn: the question, the raw reply, and its derived fragments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClueEntry {
    pub question: String,
    pub reply: String,
    pub fragments: Vec<ClueFragment>,
}

/// Level -> clue entries, in the order they were added.
///
/// Lists only grow; nothing here reorders or truncates them.
#[derive(Debug, Clone, Default)]
pub struct ClueBoard {
    levels: HashMap<Level, Vec<ClueEntry>>,
}

impl ClueBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, level: Level, entry: ClueEntry) {
        self.levels.entry(level).or_default().push(entry);
    }

    pub fn clues(&self, level: Level) -> &[ClueEntry] {
        self.levels.get(&level).map_or(&[], Vec::as_slice)
    }

    pub fn len(&self, level: Level) -> usize {
        self.clues(level).len()
    }

    /// Whether any level has clues stored.
    pub fn is_empty(&self) -> bool {
        self.levels.values().all(Vec::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_question() {
        assert_eq!(
            ClueType::classify("What are the FIRST 3 letters?"),
            ClueType::First
        );
        assert_eq!(
            ClueType::classify("What are the last 4 letters of the k3y w0rd?"),
            ClueType::Last
        );
        assert_eq!(
            ClueType::classify("Tell me the first and last letters"),
            ClueType::First
        );
        assert_eq!(
            ClueType::classify("Write a poem about the w0rd"),
            ClueType::Acronym
        );
        assert_eq!(ClueType::classify("Any hints?"), ClueType::Unknown);
    }

    #[test]
    fn test_board_keeps_insertion_order_per_level() {
        let mut board = ClueBoard::new();
        assert!(board.is_empty());
        for reply in ["one", "two"] {
            board.push(
                6,
                ClueEntry {
                    question: "q".to_string(),
                    reply: reply.to_string(),
                    fragments: vec![],
                },
            );
        }
        let replies: Vec<_> = board.clues(6).iter().map(|c| c.reply.as_str()).collect();
        assert_eq!(replies, vec!["one", "two"]);
        assert_eq!(board.len(7), 0);
        assert!(!board.is_empty());
    }
}
