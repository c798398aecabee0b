//! In-memory upload status store

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use vellum_api_types::{StatusKey, UploadStatusRecord};
use vellum_interfaces::{Repository, StatusRepository, StorageError};

/// Async upload status records keyed by status key.
#[derive(Debug, Default)]
pub struct InMemoryStatusRepository {
    records: RwLock<HashMap<String, UploadStatusRecord>>,
}

impl InMemoryStatusRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository for InMemoryStatusRepository {
    async fn health_check(&self) -> Result<(), StorageError> {
        Ok(())
    }
}

#[async_trait]
impl StatusRepository for InMemoryStatusRepository {
    async fn put(&self, record: UploadStatusRecord) -> Result<(), StorageError> {
        self.records
            .write()
            .await
            .insert(record.key.as_str().to_string(), record);
        Ok(())
    }

    async fn get(&self, key: &StatusKey) -> Result<Option<UploadStatusRecord>, StorageError> {
        Ok(self.records.read().await.get(key.as_str()).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vellum_api_types::UploadResult;

    #[tokio::test]
    async fn later_puts_overwrite_earlier_state() {
        let repo = InMemoryStatusRepository::new();
        let key = StatusKey::generate();

        repo.put(UploadStatusRecord::queued(key.clone(), "Alice", "Wiki.png"))
            .await
            .unwrap();
        assert_eq!(repo.get(&key).await.unwrap().unwrap().result, UploadResult::Queued);

        let mut record = repo.get(&key).await.unwrap().unwrap();
        record.result = UploadResult::Success;
        repo.put(record).await.unwrap();
        assert_eq!(repo.get(&key).await.unwrap().unwrap().result, UploadResult::Success);
    }

    #[tokio::test]
    async fn unknown_key_reads_as_none() {
        let repo = InMemoryStatusRepository::new();
        assert!(repo.get(&StatusKey::generate()).await.unwrap().is_none());
    }
}
