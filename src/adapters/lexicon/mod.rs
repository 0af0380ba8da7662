//! Lexical oracle adapters.

pub mod frequency_list;

pub use frequency_list::FrequencyLexicon;
