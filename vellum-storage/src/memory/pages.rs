//! In-memory page repository

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

use vellum_api_types::UnifiedPage;
use vellum_interfaces::{PageRepository, Repository, StorageError};

/// Pages as revisioned text records keyed by full title.
#[derive(Debug, Default)]
pub struct InMemoryPageRepository {
    pages: RwLock<HashMap<String, UnifiedPage>>,
}

impl InMemoryPageRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository for InMemoryPageRepository {
    async fn health_check(&self) -> Result<(), StorageError> {
        Ok(())
    }
}

#[async_trait]
impl PageRepository for InMemoryPageRepository {
    async fn create(&self, title: &str, content: &str) -> Result<UnifiedPage, StorageError> {
        let mut pages = self.pages.write().await;
        if pages.contains_key(title) {
            return Err(StorageError::Constraint {
                message: format!("Page already exists: {}", title),
            });
        }
        let now = Utc::now();
        let page = UnifiedPage {
            title: title.to_string(),
            content: content.to_string(),
            revision: 1,
            created_at: now,
            updated_at: now,
        };
        debug!(page = %title, "created page");
        pages.insert(title.to_string(), page.clone());
        Ok(page)
    }

    async fn append(&self, title: &str, content: &str) -> Result<UnifiedPage, StorageError> {
        let mut pages = self.pages.write().await;
        match pages.get_mut(title) {
            Some(page) => {
                page.content.push('\n');
                page.content.push_str(content);
                page.revision += 1;
                page.updated_at = Utc::now();
                Ok(page.clone())
            }
            None => {
                let now = Utc::now();
                let page = UnifiedPage {
                    title: title.to_string(),
                    content: content.to_string(),
                    revision: 1,
                    created_at: now,
                    updated_at: now,
                };
                debug!(page = %title, "created page via append");
                pages.insert(title.to_string(), page.clone());
                Ok(page)
            }
        }
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<UnifiedPage>, StorageError> {
        Ok(self.pages.read().await.get(title).cloned())
    }

    async fn exists(&self, title: &str) -> Result<bool, StorageError> {
        Ok(self.pages.read().await.contains_key(title))
    }

    async fn delete(&self, title: &str) -> Result<(), StorageError> {
        self.pages
            .write()
            .await
            .remove(title)
            .map(|_| ())
            .ok_or_else(|| StorageError::not_found("page", title))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_starts_at_revision_one() {
        let repo = InMemoryPageRepository::new();
        let page = repo.create("File:Wiki.png", "description").await.unwrap();
        assert_eq!(page.revision, 1);
        assert!(repo.exists("File:Wiki.png").await.unwrap());
    }

    #[tokio::test]
    async fn create_over_existing_page_fails() {
        let repo = InMemoryPageRepository::new();
        repo.create("Main", "a").await.unwrap();
        assert!(matches!(
            repo.create("Main", "b").await.unwrap_err(),
            StorageError::Constraint { .. }
        ));
    }

    #[tokio::test]
    async fn append_bumps_revision_and_grows_content() {
        let repo = InMemoryPageRepository::new();
        repo.create("User talk:Alice", "== First ==").await.unwrap();
        let before = repo.find_by_title("User talk:Alice").await.unwrap().unwrap();

        let after = repo.append("User talk:Alice", "== Second ==").await.unwrap();
        assert_eq!(after.revision, 2);
        assert!(after.content.len() > before.content.len());
        assert!(after.content.contains("== Second =="));
    }

    #[tokio::test]
    async fn append_creates_missing_page() {
        let repo = InMemoryPageRepository::new();
        let page = repo.append("User talk:Bob", "== Notice ==").await.unwrap();
        assert_eq!(page.revision, 1);
    }

    #[tokio::test]
    async fn delete_removes_page() {
        let repo = InMemoryPageRepository::new();
        repo.create("Main", "x").await.unwrap();
        repo.delete("Main").await.unwrap();
        assert!(!repo.exists("Main").await.unwrap());
        assert!(repo.delete("Main").await.is_err());
    }
}
