//! Scripted completion oracle for tests and offline runs.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::errors::{OracleError, OracleResult};
use crate::domain::ports::CompletionOracle;

/// Canned completion outcome.
#[derive(Debug, Clone)]
enum Script {
    Reply(String),
    Fail(OracleError),
}

/// Completion oracle that answers from a script and records every prompt.
///
/// Rules are checked in insertion order; the first rule whose needle occurs
/// in the prompt decides the outcome. Otherwise the default outcome applies.
pub struct ScriptedCompletion {
    default: Script,
    rules: Vec<(String, Script)>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedCompletion {
    /// Always reply with the given text.
    pub fn replying(text: impl Into<String>) -> Self {
        Self::with_default(Script::Reply(text.into()))
    }

    /// Always fail with the given error.
    pub fn failing(err: OracleError) -> Self {
        Self::with_default(Script::Fail(err))
    }

    fn with_default(default: Script) -> Self {
        Self {
            default,
            rules: Vec::new(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Reply with `text` to prompts containing `needle`.
    pub fn with_rule(mut self, needle: impl Into<String>, text: impl Into<String>) -> Self {
        self.rules.push((needle.into(), Script::Reply(text.into())));
        self
    }

    /// Fail with `err` on prompts containing `needle`.
    pub fn with_failure_rule(mut self, needle: impl Into<String>, err: OracleError) -> Self {
        self.rules.push((needle.into(), Script::Fail(err)));
        self
    }

    pub async fn call_count(&self) -> usize {
        self.prompts.lock().await.len()
    }

    /// Every prompt received, in order.
    pub async fn prompts(&self) -> Vec<String> {
        self.prompts.lock().await.clone()
    }
}

#[async_trait]
impl CompletionOracle for ScriptedCompletion {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn complete(&self, prompt: &str) -> OracleResult<String> {
        self.prompts.lock().await.push(prompt.to_string());

        let script = self
            .rules
            .iter()
            .find(|(needle, _)| prompt.contains(needle.as_str()))
            .map_or(&self.default, |(_, script)| script);

        match script {
            Script::Reply(text) => Ok(text.clone()),
            Script::Fail(err) => Err(err.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_rules_take_precedence() {
        let oracle = ScriptedCompletion::replying("DEFAULT")
            .with_rule("backwards", "SECRET")
            .with_failure_rule("spelled", OracleError::Timeout(1));

        assert_eq!(oracle.complete("spell it backwards").await, Ok("SECRET".to_string()));
        assert_eq!(oracle.complete("anything").await, Ok("DEFAULT".to_string()));
        assert_eq!(
            oracle.complete("What word is spelled out here?").await,
            Err(OracleError::Timeout(1))
        );
        assert_eq!(oracle.call_count().await, 3);
        assert_eq!(oracle.prompts().await[1], "anything");
    }
}
