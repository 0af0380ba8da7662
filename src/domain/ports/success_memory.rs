//! Success memory port - persistence of solved levels.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Level, SuccessRecord};

/// Store of successful attempts across sessions.
///
/// The engine never depends on what is stored here; failures to load or save
/// are logged by the caller and never abort a session.
#[async_trait]
pub trait SuccessMemory: Send + Sync {
    /// Append a successful attempt.
    async fn record(&self, record: SuccessRecord) -> DomainResult<()>;

    /// All stored attempts, oldest first.
    async fn records(&self) -> DomainResult<Vec<SuccessRecord>>;

    /// Stored attempts for one level, oldest first.
    async fn records_for_level(&self, level: Level) -> DomainResult<Vec<SuccessRecord>> {
        Ok(self
            .records()
            .await?
            .into_iter()
            .filter(|record| record.level == level)
            .collect())
    }
}
