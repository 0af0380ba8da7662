//! Completion oracle port - interface for short LLM completions.

use async_trait::async_trait;

use crate::domain::errors::OracleResult;

/// Short free-text completion for a prompt.
///
/// Implementations are expected to be near-deterministic (temperature close
/// to zero) but callers must tolerate variation between calls.
#[async_trait]
pub trait CompletionOracle: Send + Sync {
    /// Get the completion backend name.
    fn name(&self) -> &'static str;

    /// Complete the prompt with a few tokens of text.
    async fn complete(&self, prompt: &str) -> OracleResult<String>;
}
