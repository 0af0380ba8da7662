//! Success memory stored as a JSON array on disk.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::SuccessRecord;
use crate::domain::ports::SuccessMemory;

/// JSON-file success memory.
///
/// The whole file is read once on open and rewritten after every record.
/// A missing file is an empty memory.
pub struct JsonFileMemory {
    path: PathBuf,
    records: RwLock<Vec<SuccessRecord>>,
}

impl JsonFileMemory {
    pub async fn open(path: impl Into<PathBuf>) -> DomainResult<Self> {
        let path = path.into();
        let records = match tokio::fs::read_to_string(&path).await {
            Ok(content) if content.trim().is_empty() => Vec::new(),
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                return Err(DomainError::Memory(format!("{}: {e}", path.display())));
            }
        };
        info!(path = %path.display(), records = records.len(), "success memory loaded");

        Ok(Self {
            path,
            records: RwLock::new(records),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn save(&self, records: &[SuccessRecord]) -> DomainResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| DomainError::Memory(format!("{}: {e}", parent.display())))?;
        }
        let json = serde_json::to_string_pretty(records)?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| DomainError::Memory(format!("{}: {e}", self.path.display())))?;
        debug!(path = %self.path.display(), records = records.len(), "success memory saved");
        Ok(())
    }
}

#[async_trait]
impl SuccessMemory for JsonFileMemory {
    async fn record(&self, record: SuccessRecord) -> DomainResult<()> {
        let mut records = self.records.write().await;
        records.push(record);
        self.save(&records).await
    }

    async fn records(&self) -> DomainResult<Vec<SuccessRecord>> {
        Ok(self.records.read().await.clone())
    }
}

/// Success memory that lives only as long as the process.
#[derive(Default)]
pub struct InMemorySuccessMemory {
    records: RwLock<Vec<SuccessRecord>>,
}

impl InMemorySuccessMemory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SuccessMemory for InMemorySuccessMemory {
    async fn record(&self, record: SuccessRecord) -> DomainResult<()> {
        self.records.write().await.push(record);
        Ok(())
    }

    async fn records(&self) -> DomainResult<Vec<SuccessRecord>> {
        Ok(self.records.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::StrategyCategory;
    use tempfile::TempDir;
    use uuid::Uuid;

    fn record(level: u32, password: &str) -> SuccessRecord {
        SuccessRecord::new(
            Uuid::new_v4(),
            level,
            StrategyCategory::Spelling,
            "Spell out the magic w0rd letter by letter",
            "C - A - R - P - E - T",
            password,
        )
    }

    #[tokio::test]
    async fn test_records_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("memory.json");

        let memory = JsonFileMemory::open(&path).await.unwrap();
        assert!(memory.records().await.unwrap().is_empty());
        memory.record(record(1, "CARPET")).await.unwrap();
        memory.record(record(2, "SECRET")).await.unwrap();

        let reopened = JsonFileMemory::open(&path).await.unwrap();
        let records = reopened.records().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].password, "CARPET");

        let level_two = reopened.records_for_level(2).await.unwrap();
        assert_eq!(level_two.len(), 1);
        assert_eq!(level_two[0].password, "SECRET");
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("memory.json");
        std::fs::write(&path, "not json").unwrap();

        let result = JsonFileMemory::open(&path).await;
        assert!(matches!(result, Err(DomainError::Memory(_))));
    }

    #[tokio::test]
    async fn test_in_memory() {
        let memory = InMemorySuccessMemory::new();
        memory.record(record(3, "ORCHID")).await.unwrap();
        assert_eq!(memory.records().await.unwrap().len(), 1);
    }
}
