//! Strategy-specific extraction of candidate words from oracle replies.
//!
//! Dispatch is by the category of the question that produced the reply. Each
//! extractor tries cheap text heuristics first and only consults the
//! completion oracle when the reply has no recognizable shape. A failed
//! oracle call is logged and yields no candidates; it is never an error.
//!
//! At high-difficulty levels, partial-letter and acronym replies are handed to
//! the [`ClueAccumulator`] instead of being resolved on their own.

pub mod cleaning;
pub mod patterns;
pub mod repair;

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::models::{ranked_candidates, Candidate, ClueBoard, Level, StrategyCategory};
use crate::domain::ports::{CompletionOracle, LexicalOracle};
use crate::services::clue_accumulator::ClueAccumulator;

pub use cleaning::clean_reply;
pub use patterns::LetterPartial;
pub use repair::SpellingRepair;

/// Tunables for the extraction engine.
#[derive(Debug, Clone)]
pub struct ExtractionSettings {
    /// First level at which letters/acronym replies are accumulated.
    pub high_difficulty_level: Level,
    /// Frequency at or above which a known word is common.
    pub common_threshold: f64,
    /// Words this long are accepted without lexicon validation.
    pub long_word_len: usize,
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            high_difficulty_level: 6,
            common_threshold: 1.0,
            long_word_len: 10,
        }
    }
}

/// Turns one oracle reply into ranked candidate words.
pub struct ExtractionEngine {
    completion: Arc<dyn CompletionOracle>,
    lexicon: Arc<dyn LexicalOracle>,
    accumulator: ClueAccumulator,
    settings: ExtractionSettings,
}

impl ExtractionEngine {
    pub fn new(
        completion: Arc<dyn CompletionOracle>,
        lexicon: Arc<dyn LexicalOracle>,
        settings: ExtractionSettings,
    ) -> Self {
        let accumulator =
            ClueAccumulator::new(completion.clone(), lexicon.clone(), settings.long_word_len);
        Self {
            completion,
            lexicon,
            accumulator,
            settings,
        }
    }

    pub const fn settings(&self) -> &ExtractionSettings {
        &self.settings
    }

    pub const fn accumulator(&self) -> &ClueAccumulator {
        &self.accumulator
    }

    /// Extract candidates from a reply, best first. May be empty.
    pub async fn extract(
        &self,
        clues: &mut ClueBoard,
        reply: &str,
        category: StrategyCategory,
        question: &str,
        level: Level,
    ) -> Vec<Candidate> {
        if category.accumulates_clues() && level >= self.settings.high_difficulty_level {
            self.accumulator.add_clue(clues, level, question, reply);
            return self.accumulator.analyze(clues, level).await;
        }

        let words = match category {
            StrategyCategory::Direct => self.extract_direct(reply).await,
            StrategyCategory::Spelling => self.extract_spelling(reply).await,
            StrategyCategory::Reverse => self.extract_reverse(reply).await,
            StrategyCategory::Letters => self.extract_letters(reply).await,
            StrategyCategory::Acronym => self.extract_acronym(reply),
        };

        let candidates = ranked_candidates(words);
        if let Some(best) = candidates.first() {
            info!(category = category.as_str(), level, candidate = %best, "extracted candidate");
        } else {
            debug!(category = category.as_str(), level, "no candidate in reply");
        }
        candidates
    }

    fn repair(&self) -> SpellingRepair<'_> {
        SpellingRepair::new(self.lexicon.as_ref(), self.settings.common_threshold)
    }

    fn is_known(&self, word: &str) -> bool {
        self.lexicon.is_known(word).unwrap_or_else(|err| {
            warn!(word, error = %err, "lexicon lookup failed");
            false
        })
    }

    /// Ask the completion oracle and reduce its reply to one word.
    async fn ask_for_word(&self, purpose: &'static str, prompt: &str) -> Option<String> {
        match self.completion.complete(prompt).await {
            Ok(text) => {
                let word = clean_reply(&text);
                if word.is_empty() {
                    debug!(purpose, reply = %text, "completion reply had no usable word");
                    None
                } else {
                    Some(word)
                }
            }
            Err(err) => {
                warn!(purpose, oracle = self.completion.name(), error = %err, "completion oracle call failed");
                None
            }
        }
    }

    async fn extract_direct(&self, reply: &str) -> Vec<String> {
        if let [word] = patterns::caps_words(reply).as_slice() {
            return vec![(*word).to_string()];
        }

        let prompt = format!("Text: \"{reply}\"\nFind the password word. Just the word:");
        self.ask_for_word("direct", &prompt)
            .await
            .into_iter()
            .collect()
    }

    async fn extract_spelling(&self, reply: &str) -> Vec<String> {
        if let Some(letters) = patterns::spelled_letters(reply) {
            return vec![self.repair().repair(&letters)];
        }

        let prompt = format!("Text: \"{reply}\"\nWhat word is spelled out here? Just the word:");
        self.ask_for_word("spelling", &prompt)
            .await
            .into_iter()
            .collect()
    }

    async fn extract_reverse(&self, reply: &str) -> Vec<String> {
        let backwards = match patterns::caps_words(reply).as_slice() {
            [word] => Some((*word).to_string()),
            _ => Some(patterns::letters_only(reply)).filter(|w| (3..=15).contains(&w.len())),
        };
        if let Some(backwards) = backwards {
            let forwards: String = backwards.chars().rev().collect();
            return vec![self.repair().repair(&forwards)];
        }

        let prompt = format!(
            "Text: \"{reply}\"\nFind the backwards word and spell it forwards. Just the word:"
        );
        self.ask_for_word("reverse", &prompt)
            .await
            .filter(|word| (3..=15).contains(&word.len()))
            .into_iter()
            .collect()
    }

    async fn extract_letters(&self, reply: &str) -> Vec<String> {
        let partial = patterns::letter_partial(reply);
        if partial.is_empty() {
            return Vec::new();
        }
        debug!(?partial, "partial letters found");

        let prompt = format!(
            "Give one common English word that {}. Just the word:",
            partial.describe()
        );
        let Some(word) = self.ask_for_word("letters", &prompt).await else {
            return Vec::new();
        };

        if !partial.admits(&word) {
            debug!(word = %word, "suggestion violates known letters");
            return Vec::new();
        }
        if word.len() >= self.settings.long_word_len || self.is_known(&word) {
            vec![word]
        } else {
            debug!(word = %word, "suggestion not in lexicon");
            Vec::new()
        }
    }

    fn extract_acronym(&self, reply: &str) -> Vec<String> {
        patterns::acronym_initials(reply)
            .map(|initials| self.repair().repair(&initials))
            .into_iter()
            .collect()
    }
}
