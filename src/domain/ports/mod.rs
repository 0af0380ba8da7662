//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines the interfaces that oracle adapters must implement:
//! - OracleChannel: asks questions of the secret holder and submits guesses
//! - CompletionOracle: short free-text completions for a prompt
//! - LexicalOracle: dictionary membership and word frequency
//! - SuccessMemory: persistence of solved levels
//!
//! Every method returns a typed result so callers pattern-match on failure
//! instead of relying on fall-through.

pub mod channel;
pub mod completion;
pub mod lexicon;
pub mod success_memory;

pub use channel::OracleChannel;
pub use completion::CompletionOracle;
pub use lexicon::LexicalOracle;
pub use success_memory::SuccessMemory;
