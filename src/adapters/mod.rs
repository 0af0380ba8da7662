//! Infrastructure adapters for the oracle ports.

pub mod channel;
pub mod completion;
pub mod lexicon;
pub mod memory;
