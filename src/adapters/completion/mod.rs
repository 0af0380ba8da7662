//! Completion oracle adapters.

pub mod ollama;
pub mod scripted;

pub use ollama::{OllamaCompletion, OllamaConfig};
pub use scripted::ScriptedCompletion;
