//! Word-frequency list lexicon.
//!
//! File format: one `word [frequency]` entry per line. Blank lines and lines
//! starting with `#` are skipped; a missing frequency counts as 1.0. Words are
//! stored uppercase, so lookups are case-insensitive.

use std::collections::HashMap;
use std::path::Path;
use tracing::info;

use crate::domain::errors::{DomainError, DomainResult, OracleResult};
use crate::domain::ports::LexicalOracle;

const DEFAULT_FREQUENCY: f64 = 1.0;

/// In-memory dictionary with relative frequencies.
#[derive(Debug, Clone, Default)]
pub struct FrequencyLexicon {
    words: HashMap<String, f64>,
}

impl FrequencyLexicon {
    /// An empty lexicon: every word is unknown.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_words<'a>(words: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        Self {
            words: words
                .into_iter()
                .map(|(word, freq)| (word.to_ascii_uppercase(), freq))
                .collect(),
        }
    }

    /// Parse a frequency list. Duplicate words keep the higher frequency.
    pub fn parse(content: &str) -> DomainResult<Self> {
        let mut words = HashMap::new();
        for (index, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut parts = line.split_whitespace();
            let Some(word) = parts.next() else {
                continue;
            };
            if !word.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(DomainError::Lexicon(format!(
                    "line {}: not a word: {word}",
                    index + 1
                )));
            }

            let freq = match parts.next() {
                Some(raw) => raw.parse::<f64>().map_err(|e| {
                    DomainError::Lexicon(format!("line {}: bad frequency {raw:?}: {e}", index + 1))
                })?,
                None => DEFAULT_FREQUENCY,
            };

            let entry = words.entry(word.to_ascii_uppercase()).or_insert(freq);
            if freq > *entry {
                *entry = freq;
            }
        }
        Ok(Self { words })
    }

    pub fn from_path(path: impl AsRef<Path>) -> DomainResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| DomainError::Lexicon(format!("{}: {e}", path.display())))?;
        let lexicon = Self::parse(&content)?;
        info!(path = %path.display(), words = lexicon.len(), "lexicon loaded");
        Ok(lexicon)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl LexicalOracle for FrequencyLexicon {
    fn is_known(&self, word: &str) -> OracleResult<bool> {
        Ok(self.words.contains_key(&word.to_ascii_uppercase()))
    }

    fn frequency(&self, word: &str) -> OracleResult<f64> {
        Ok(self
            .words
            .get(&word.to_ascii_uppercase())
            .copied()
            .unwrap_or(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_with_comments_and_defaults() {
        let lexicon = FrequencyLexicon::parse(
            "# common words\ncarpet 40.5\n\nSECRET\n  thunder   12\ncarpet 2\n",
        )
        .unwrap();

        assert_eq!(lexicon.len(), 3);
        assert_eq!(lexicon.frequency("Carpet"), Ok(40.5));
        assert_eq!(lexicon.frequency("secret"), Ok(1.0));
        assert_eq!(lexicon.is_known("THUNDER"), Ok(true));
        assert_eq!(lexicon.is_known("lantern"), Ok(false));
        assert_eq!(lexicon.frequency("lantern"), Ok(0.0));
    }

    #[test]
    fn test_parse_rejects_bad_lines() {
        assert!(matches!(
            FrequencyLexicon::parse("carpet lots"),
            Err(DomainError::Lexicon(_))
        ));
        assert!(matches!(
            FrequencyLexicon::parse("c4rpet 1.0"),
            Err(DomainError::Lexicon(_))
        ));
    }

    #[test]
    fn test_from_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "orchid 6\nlantern 5").unwrap();

        let lexicon = FrequencyLexicon::from_path(file.path()).unwrap();
        assert_eq!(lexicon.len(), 2);
        assert_eq!(lexicon.is_known("Orchid"), Ok(true));
    }

    #[test]
    fn test_missing_file() {
        let err = FrequencyLexicon::from_path("/nonexistent/words.txt").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/words.txt"));
    }
}
