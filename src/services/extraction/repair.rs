//! Single-edit spelling repair against the lexical oracle.
//!
//! Oracle replies often spell a near miss: a dropped or swapped letter.
//! Repair looks one insertion or substitution away for a common word.

use std::cmp::Ordering;
use tracing::{debug, warn};

use crate::domain::ports::LexicalOracle;

/// Words at least this long are not repaired.
pub const REPAIR_MAX_LEN: usize = 10;

const ALPHABET: std::ops::RangeInclusive<u8> = b'A'..=b'Z';

/// Spelling repair bound to a lexicon and a "common word" threshold.
pub struct SpellingRepair<'a> {
    lexicon: &'a dyn LexicalOracle,
    common_threshold: f64,
}

impl<'a> SpellingRepair<'a> {
    pub fn new(lexicon: &'a dyn LexicalOracle, common_threshold: f64) -> Self {
        Self {
            lexicon,
            common_threshold,
        }
    }

    /// Frequency of the word if it is known and common. Lexicon failures
    /// count as "not common".
    fn common_frequency(&self, word: &str) -> Option<f64> {
        let known = match self.lexicon.is_known(word) {
            Ok(known) => known,
            Err(err) => {
                warn!(word, error = %err, "lexicon lookup failed");
                return None;
            }
        };
        if !known {
            return None;
        }
        match self.lexicon.frequency(word) {
            Ok(freq) if freq >= self.common_threshold => Some(freq),
            Ok(_) => None,
            Err(err) => {
                warn!(word, error = %err, "lexicon frequency lookup failed");
                None
            }
        }
    }

    /// Return the word itself if it is common, else the most frequent common
    /// word one insertion or substitution away (longer wins ties), else the
    /// original uppercase word.
    pub fn repair(&self, word: &str) -> String {
        let word = word.to_ascii_uppercase();
        if self.common_frequency(&word).is_some() || word.len() >= REPAIR_MAX_LEN {
            return word;
        }

        let mut best: Option<(f64, String)> = None;
        for edit in single_edits(&word) {
            let Some(freq) = self.common_frequency(&edit) else {
                continue;
            };
            let better = match &best {
                None => true,
                Some((best_freq, best_word)) => match freq.partial_cmp(best_freq) {
                    Some(Ordering::Greater) => true,
                    Some(Ordering::Equal) => edit.len() > best_word.len(),
                    _ => false,
                },
            };
            if better {
                best = Some((freq, edit));
            }
        }

        match best {
            Some((freq, repaired)) => {
                debug!(original = %word, repaired = %repaired, freq, "spelling repaired");
                repaired
            }
            None => word,
        }
    }
}

/// Every single-letter insertion, then every single-letter substitution.
/// Substitutions keep the length, so no edit is shorter than the input.
fn single_edits(word: &str) -> Vec<String> {
    let bytes = word.as_bytes();
    let mut edits = Vec::with_capacity(26 * (2 * bytes.len() + 1));

    for i in 0..=bytes.len() {
        for letter in ALPHABET {
            let mut edit = Vec::with_capacity(bytes.len() + 1);
            edit.extend_from_slice(&bytes[..i]);
            edit.push(letter);
            edit.extend_from_slice(&bytes[i..]);
            edits.push(String::from_utf8_lossy(&edit).into_owned());
        }
    }

    for i in 0..bytes.len() {
        for letter in ALPHABET.filter(|&l| l != bytes[i]) {
            let mut edit = bytes.to_vec();
            edit[i] = letter;
            edits.push(String::from_utf8_lossy(&edit).into_owned());
        }
    }

    edits
}
