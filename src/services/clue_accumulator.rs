//! Cross-turn clue accumulation for high-difficulty levels.
//!
//! At high levels a single reply never carries enough of the word. Replies to
//! partial-letter and acronym questions are stored per level, and candidates
//! are only produced once at least two clues can be combined.
//!
//! Analysis runs in three steps:
//! 1. **Direct pairing**: every `first` fragment joined to every `last`
//!    fragment (plain and with a one-letter overlap), kept if the lexicon
//!    knows the result.
//! 2. **Completion**: all fragments go into one prompt and the suggestion is
//!    parsed for known (or very long) words.
//! 3. **Literal fallback**: if the completion call fails, the fragments
//!    themselves are offered as candidates.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::models::{
    ranked_candidates, Candidate, ClueBoard, ClueEntry, ClueFragment, ClueType, Level,
};
use crate::domain::ports::{CompletionOracle, LexicalOracle};
use crate::services::extraction::patterns::{clue_fragments, suggestion_words};

/// Clues needed before analysis is attempted.
pub const MIN_CLUES_FOR_ANALYSIS: usize = 2;

/// Candidates returned per analysis.
pub const MAX_CLUE_CANDIDATES: usize = 3;

/// Word-like tokens read from one completion suggestion.
const MAX_SUGGESTIONS: usize = 5;

/// Length bounds for fragments offered literally when the oracle fails.
const FALLBACK_FRAGMENT_LEN: std::ops::RangeInclusive<usize> = 4..=10;

/// Stores clues and turns them into candidates.
pub struct ClueAccumulator {
    completion: Arc<dyn CompletionOracle>,
    lexicon: Arc<dyn LexicalOracle>,
    long_word_len: usize,
}

impl ClueAccumulator {
    pub fn new(
        completion: Arc<dyn CompletionOracle>,
        lexicon: Arc<dyn LexicalOracle>,
        long_word_len: usize,
    ) -> Self {
        Self {
            completion,
            lexicon,
            long_word_len,
        }
    }

    /// Store a reply for the level along with its tagged fragments.
    pub fn add_clue(&self, board: &mut ClueBoard, level: Level, question: &str, reply: &str) {
        let clue_type = ClueType::classify(question);
        let fragments: Vec<ClueFragment> = clue_fragments(reply)
            .into_iter()
            .map(|letters| ClueFragment { letters, clue_type })
            .collect();

        info!(
            level,
            clue_type = clue_type.as_str(),
            fragments = fragments.len(),
            reply = %preview(reply),
            "stored clue"
        );

        board.push(
            level,
            ClueEntry {
                question: question.to_string(),
                reply: reply.to_string(),
                fragments,
            },
        );
    }

    /// Combine the level's clues into up to three ranked candidates.
    ///
    /// Returns an empty list while fewer than two clues are stored. Does not
    /// modify the board, so repeated calls see the same input.
    pub async fn analyze(&self, board: &ClueBoard, level: Level) -> Vec<Candidate> {
        let clues = board.clues(level);
        if clues.len() < MIN_CLUES_FOR_ANALYSIS {
            debug!(level, clues = clues.len(), "not enough clues yet");
            return Vec::new();
        }

        let fragments = unique_fragments(clues);
        if fragments.is_empty() {
            return Vec::new();
        }

        let paired = self.direct_pairs(&fragments);
        if !paired.is_empty() {
            return paired;
        }

        let prompt = build_prompt(&fragments);
        match self.completion.complete(&prompt).await {
            Ok(suggestion) => {
                let words = suggestion_words(&suggestion, MAX_SUGGESTIONS)
                    .into_iter()
                    .filter(|word| word.len() >= self.long_word_len || self.is_known(word));
                let candidates: Vec<Candidate> = ranked_candidates(words)
                    .into_iter()
                    .take(MAX_CLUE_CANDIDATES)
                    .collect();
                for candidate in &candidates {
                    info!(level, candidate = %candidate, "candidate from clues");
                }
                candidates
            }
            Err(err) => {
                warn!(
                    level,
                    oracle = self.completion.name(),
                    error = %err,
                    "clue analysis completion failed, using fragments"
                );
                literal_fallback(&fragments)
            }
        }
    }

    fn is_known(&self, word: &str) -> bool {
        self.lexicon.is_known(word).unwrap_or_else(|err| {
            warn!(word, error = %err, "lexicon lookup failed");
            false
        })
    }

    /// Step 1: join first and last fragments, most recently found first.
    fn direct_pairs(&self, fragments: &[ClueFragment]) -> Vec<Candidate> {
        let firsts = fragments.iter().filter(|f| f.clue_type == ClueType::First);
        let lasts: Vec<&ClueFragment> = fragments
            .iter()
            .filter(|f| f.clue_type == ClueType::Last)
            .collect();

        let mut found = Vec::new();
        for first in firsts {
            for last in &lasts {
                let joined = format!("{}{}", first.letters, last.letters);
                if self.is_known(&joined) {
                    debug!(word = %joined, "direct combination found");
                    found.push(joined);
                }

                if first.letters.chars().last() == last.letters.chars().next() {
                    let overlapped = format!("{}{}", first.letters, &last.letters[1..]);
                    if self.is_known(&overlapped) {
                        debug!(word = %overlapped, "overlap combination found");
                        found.push(overlapped);
                    }
                }
            }
        }

        ranked_candidates(found.into_iter().rev())
            .into_iter()
            .take(MAX_CLUE_CANDIDATES)
            .collect()
    }
}

/// All fragments of the level in clue order, minus those that are strict
/// substrings of another fragment.
fn unique_fragments(clues: &[ClueEntry]) -> Vec<ClueFragment> {
    let all: Vec<&ClueFragment> = clues.iter().flat_map(|c| c.fragments.iter()).collect();
    all.iter()
        .filter(|fragment| {
            !all.iter().any(|other| {
                other.letters != fragment.letters && other.letters.contains(&fragment.letters)
            })
        })
        .map(|fragment| (*fragment).clone())
        .collect()
}

fn build_prompt(fragments: &[ClueFragment]) -> String {
    let letters: Vec<&str> = fragments.iter().map(|f| f.letters.as_str()).collect();
    let first = fragments.iter().find(|f| f.clue_type == ClueType::First);
    let last = fragments.iter().find(|f| f.clue_type == ClueType::Last);

    let mut prompt = format!("Letters found: {}\n", letters.join(", "));
    if let (Some(first), Some(last)) = (first, last) {
        prompt.push_str(&format!(
            "Try combining them directly: {} + {}\n",
            first.letters, last.letters
        ));
    }
    prompt.push_str("What common English word uses these letters? Just the word:");
    prompt
}

/// Step 3: offer 4-10 letter fragments as literal guesses.
fn literal_fallback(fragments: &[ClueFragment]) -> Vec<Candidate> {
    if fragments.len() < MIN_CLUES_FOR_ANALYSIS {
        return Vec::new();
    }
    ranked_candidates(
        fragments
            .iter()
            .map(|f| f.letters.as_str())
            .filter(|letters| FALLBACK_FRAGMENT_LEN.contains(&letters.len())),
    )
    .into_iter()
    .take(MAX_CLUE_CANDIDATES)
    .collect()
}

fn preview(text: &str) -> String {
    text.chars().take(50).collect()
}
