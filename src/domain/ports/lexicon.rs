//! Lexical oracle port - dictionary membership and frequency.

use crate::domain::errors::OracleResult;

/// Word validation against a frequency-ranked dictionary.
///
/// Lookups are local and cheap, so this port is synchronous. Words are
/// matched case-insensitively.
pub trait LexicalOracle: Send + Sync {
    /// Whether the word is in the dictionary.
    fn is_known(&self, word: &str) -> OracleResult<bool>;

    /// Relative frequency of the word; 0.0 for unknown words.
    fn frequency(&self, word: &str) -> OracleResult<f64>;
}
