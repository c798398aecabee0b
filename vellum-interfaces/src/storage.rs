//! Storage repository interfaces
//!
//! These traits define the contracts the upload flows need from persistent
//! state. They enable dependency injection and testing through interface
//! segregation; any backend that satisfies them can sit underneath the
//! service unchanged.

use async_trait::async_trait;
use vellum_api_types::{
    StashKey, StashedUpload, StatusKey, UnifiedFile, UnifiedPage, UnifiedUser, UploadStatusRecord,
};

/// Common storage error type
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Entity not found: {entity} with key {key}")]
    NotFound { entity: String, key: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Constraint violation: {message}")]
    Constraint { message: String },

    #[error("Internal storage error: {message}")]
    Internal { message: String },
}

impl StorageError {
    pub fn not_found(entity: impl Into<String>, key: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            key: key.into(),
        }
    }
}

/// Base repository trait with health check capability
#[async_trait]
pub trait Repository: Send + Sync {
    /// Check if the repository is healthy and can serve requests
    async fn health_check(&self) -> Result<(), StorageError>;
}

/// Registered files, plus the deletion archive consulted for re-upload
/// warnings.
#[async_trait]
pub trait FileRepository: Repository {
    /// Register a file and its content, replacing any record under the
    /// same name.
    async fn register(&self, file: UnifiedFile, content: Vec<u8>) -> Result<UnifiedFile, StorageError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<UnifiedFile>, StorageError>;

    /// Stored content of a registered file.
    async fn get_content(&self, name: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Find a live file with the given content digest.
    async fn find_by_digest(&self, digest: &str) -> Result<Option<UnifiedFile>, StorageError>;

    async fn exists(&self, name: &str) -> Result<bool, StorageError>;

    /// Remove the file and record an archive entry for it. Returns the
    /// removed record.
    async fn delete(&self, name: &str) -> Result<UnifiedFile, StorageError>;

    /// Whether a file of this name was deleted before.
    async fn archived_name(&self, name: &str) -> Result<bool, StorageError>;

    /// Whether content with this digest was deleted before.
    async fn archived_digest(&self, digest: &str) -> Result<bool, StorageError>;

    async fn count(&self) -> Result<u64, StorageError>;
}

/// Wiki pages as revisioned text records.
#[async_trait]
pub trait PageRepository: Repository {
    /// Create a page at revision 1. Fails on an existing title.
    async fn create(&self, title: &str, content: &str) -> Result<UnifiedPage, StorageError>;

    /// Append a section to an existing page, bumping its revision, or
    /// create the page when absent.
    async fn append(&self, title: &str, content: &str) -> Result<UnifiedPage, StorageError>;

    async fn find_by_title(&self, title: &str) -> Result<Option<UnifiedPage>, StorageError>;

    async fn exists(&self, title: &str) -> Result<bool, StorageError>;

    async fn delete(&self, title: &str) -> Result<(), StorageError>;
}

/// Registered users and their group memberships.
#[async_trait]
pub trait UserRepository: Repository {
    /// Create a user with a fresh edit token.
    async fn create_user(&self, name: &str, groups: &[String]) -> Result<UnifiedUser, StorageError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<UnifiedUser>, StorageError>;

    async fn add_group(&self, name: &str, group: &str) -> Result<(), StorageError>;

    async fn remove_group(&self, name: &str, group: &str) -> Result<(), StorageError>;
}

/// Stashed uploads parked on warnings, addressed by session key.
#[async_trait]
pub trait StashRepository: Repository {
    async fn put(&self, entry: StashedUpload) -> Result<(), StorageError>;

    async fn get(&self, key: &StashKey) -> Result<Option<StashedUpload>, StorageError>;

    /// Remove and return the entry; resuming consumes it.
    async fn take(&self, key: &StashKey) -> Result<Option<StashedUpload>, StorageError>;
}

/// Status records for asynchronous uploads, addressed by status key.
#[async_trait]
pub trait StatusRepository: Repository {
    async fn put(&self, record: UploadStatusRecord) -> Result<(), StorageError>;

    async fn get(&self, key: &StatusKey) -> Result<Option<UploadStatusRecord>, StorageError>;
}

/// Factory trait for creating repository instances
#[async_trait]
pub trait RepositoryFactory: Send + Sync {
    fn file_repository(&self) -> &dyn FileRepository;

    fn page_repository(&self) -> &dyn PageRepository;

    fn user_repository(&self) -> &dyn UserRepository;

    fn stash_repository(&self) -> &dyn StashRepository;

    fn status_repository(&self) -> &dyn StatusRepository;

    /// Check health of all repositories
    async fn health_check(&self) -> Result<(), StorageError>;
}
