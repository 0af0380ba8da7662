//! Oracle channel port - the game that holds the secret word.

use async_trait::async_trait;

use crate::domain::errors::OracleResult;
use crate::domain::models::Level;

/// Transport to the secret-holding oracle.
///
/// The engine never inspects transport details; it only sees the reply text
/// and whether a submitted word advanced the level.
#[async_trait]
pub trait OracleChannel: Send + Sync {
    /// Ask a question and return the oracle's free-text reply.
    async fn ask(&self, question: &str) -> OracleResult<String>;

    /// Submit a guessed word. Returns `true` if the level advanced.
    async fn submit(&self, word: &str) -> OracleResult<bool>;

    /// The level the oracle is currently on.
    async fn current_level(&self) -> OracleResult<Level>;
}
