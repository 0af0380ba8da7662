//! Candidate secret words.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

/// Shortest accepted candidate.
pub const MIN_CANDIDATE_LEN: usize = 3;

/// Longest accepted candidate.
pub const MAX_CANDIDATE_LEN: usize = 20;

/// An uppercase ASCII word of 3-20 letters produced by extraction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Candidate(String);

impl Candidate {
    /// Normalize to uppercase and validate the shape. Anything that is not
    /// 3-20 ASCII letters yields `None`.
    pub fn new(word: impl AsRef<str>) -> Option<Self> {
        let word = word.as_ref().trim();
        let valid = (MIN_CANDIDATE_LEN..=MAX_CANDIDATE_LEN).contains(&word.len())
            && word.chars().all(|c| c.is_ascii_alphabetic());
        valid.then(|| Self(word.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Deref for Candidate {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<&str> for Candidate {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl PartialEq<str> for Candidate {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

/// Build candidates from raw words, dropping invalid shapes and repeats while
/// keeping the first occurrence's rank.
pub fn ranked_candidates<I, S>(words: I) -> Vec<Candidate>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut ranked: Vec<Candidate> = Vec::new();
    for candidate in words.into_iter().filter_map(Candidate::new) {
        if !ranked.contains(&candidate) {
            ranked.push(candidate);
        }
    }
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_normalizes_case() {
        let candidate = Candidate::new("Thunder").expect("valid word");
        assert_eq!(candidate, "THUNDER");
        assert_eq!(candidate.len(), 7);
    }

    #[test]
    fn test_candidate_rejects_bad_shapes() {
        assert!(Candidate::new("AB").is_none());
        assert!(Candidate::new("ABCDEFGHIJKLMNOPQRSTU").is_none());
        assert!(Candidate::new("p4ssw0rd").is_none());
        assert!(Candidate::new("two words").is_none());
        assert!(Candidate::new("ABCDEFGHIJKLMNOPQRST").is_some());
    }

    #[test]
    fn test_ranked_candidates_dedupes_in_order() {
        let ranked = ranked_candidates(["secret", "X", "CARPET", "Secret"]);
        assert_eq!(ranked, vec!["SECRET", "CARPET"]);
    }
}
