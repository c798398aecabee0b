//! In-memory file repository with a deletion archive

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

use vellum_api_types::UnifiedFile;
use vellum_interfaces::{FileRepository, Repository, StorageError};

/// What remains of a deleted file; consulted for re-upload warnings.
#[derive(Debug, Clone)]
struct ArchiveEntry {
    name: String,
    digest: String,
    #[allow(dead_code)]
    deleted_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct FileTables {
    records: HashMap<String, UnifiedFile>,
    blobs: HashMap<String, Vec<u8>>,
    archive: Vec<ArchiveEntry>,
}

/// File records, their content blobs, and the deletion archive.
#[derive(Debug, Default)]
pub struct InMemoryFileRepository {
    tables: RwLock<FileTables>,
}

impl InMemoryFileRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository for InMemoryFileRepository {
    async fn health_check(&self) -> Result<(), StorageError> {
        Ok(())
    }
}

#[async_trait]
impl FileRepository for InMemoryFileRepository {
    async fn register(&self, file: UnifiedFile, content: Vec<u8>) -> Result<UnifiedFile, StorageError> {
        let mut tables = self.tables.write().await;
        debug!(file = %file.name, size = file.size, "registering file");
        tables.blobs.insert(file.name.clone(), content);
        tables.records.insert(file.name.clone(), file.clone());
        Ok(file)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<UnifiedFile>, StorageError> {
        Ok(self.tables.read().await.records.get(name).cloned())
    }

    async fn get_content(&self, name: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.tables.read().await.blobs.get(name).cloned())
    }

    async fn find_by_digest(&self, digest: &str) -> Result<Option<UnifiedFile>, StorageError> {
        Ok(self
            .tables
            .read()
            .await
            .records
            .values()
            .find(|f| f.digest == digest)
            .cloned())
    }

    async fn exists(&self, name: &str) -> Result<bool, StorageError> {
        Ok(self.tables.read().await.records.contains_key(name))
    }

    async fn delete(&self, name: &str) -> Result<UnifiedFile, StorageError> {
        let mut tables = self.tables.write().await;
        let record = tables
            .records
            .remove(name)
            .ok_or_else(|| StorageError::not_found("file", name))?;
        tables.blobs.remove(name);
        tables.archive.push(ArchiveEntry {
            name: record.name.clone(),
            digest: record.digest.clone(),
            deleted_at: Utc::now(),
        });
        debug!(file = %record.name, "deleted file and archived its identity");
        Ok(record)
    }

    async fn archived_name(&self, name: &str) -> Result<bool, StorageError> {
        Ok(self.tables.read().await.archive.iter().any(|e| e.name == name))
    }

    async fn archived_digest(&self, digest: &str) -> Result<bool, StorageError> {
        Ok(self.tables.read().await.archive.iter().any(|e| e.digest == digest))
    }

    async fn count(&self) -> Result<u64, StorageError> {
        Ok(self.tables.read().await.records.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, digest: &str) -> UnifiedFile {
        UnifiedFile {
            name: name.to_string(),
            digest: digest.to_string(),
            size: 4,
            mime: Some("image/png".to_string()),
            source_url: None,
            uploaded_by: "Uploader".to_string(),
            uploaded_at: Utc::now(),
            description_page: format!("File:{}", name),
        }
    }

    #[tokio::test]
    async fn register_then_exists_and_content() {
        let repo = InMemoryFileRepository::new();
        repo.register(file("Wiki.png", "abc"), vec![1, 2, 3, 4]).await.unwrap();

        assert!(repo.exists("Wiki.png").await.unwrap());
        assert_eq!(repo.get_content("Wiki.png").await.unwrap().unwrap(), vec![1, 2, 3, 4]);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn delete_removes_and_archives() {
        let repo = InMemoryFileRepository::new();
        repo.register(file("Wiki.png", "abc"), vec![1]).await.unwrap();
        repo.delete("Wiki.png").await.unwrap();

        assert!(!repo.exists("Wiki.png").await.unwrap());
        assert!(repo.get_content("Wiki.png").await.unwrap().is_none());
        assert!(repo.archived_name("Wiki.png").await.unwrap());
        assert!(repo.archived_digest("abc").await.unwrap());
    }

    #[tokio::test]
    async fn delete_of_missing_file_is_not_found() {
        let repo = InMemoryFileRepository::new();
        let err = repo.delete("Nope.png").await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound { .. }));
    }

    #[tokio::test]
    async fn find_by_digest_sees_live_files_only() {
        let repo = InMemoryFileRepository::new();
        repo.register(file("Wiki.png", "abc"), vec![1]).await.unwrap();

        assert!(repo.find_by_digest("abc").await.unwrap().is_some());
        repo.delete("Wiki.png").await.unwrap();
        assert!(repo.find_by_digest("abc").await.unwrap().is_none());
    }
}
