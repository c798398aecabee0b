//! In-memory upload stash

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

use vellum_api_types::{StashKey, StashedUpload};
use vellum_interfaces::{Repository, StashRepository, StorageError};

/// Stashed uploads keyed by session key.
#[derive(Debug, Default)]
pub struct InMemoryStashRepository {
    entries: RwLock<HashMap<String, StashedUpload>>,
}

impl InMemoryStashRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository for InMemoryStashRepository {
    async fn health_check(&self) -> Result<(), StorageError> {
        Ok(())
    }
}

#[async_trait]
impl StashRepository for InMemoryStashRepository {
    async fn put(&self, entry: StashedUpload) -> Result<(), StorageError> {
        debug!(key = %entry.key, file = %entry.filename, "stashing upload");
        self.entries.write().await.insert(entry.key.as_str().to_string(), entry);
        Ok(())
    }

    async fn get(&self, key: &StashKey) -> Result<Option<StashedUpload>, StorageError> {
        Ok(self.entries.read().await.get(key.as_str()).cloned())
    }

    async fn take(&self, key: &StashKey) -> Result<Option<StashedUpload>, StorageError> {
        Ok(self.entries.write().await.remove(key.as_str()))
    }
}
