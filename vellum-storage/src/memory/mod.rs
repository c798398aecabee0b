//! In-memory repository implementations

mod files;
mod pages;
mod stash;
mod status;
mod users;

pub use files::InMemoryFileRepository;
pub use pages::InMemoryPageRepository;
pub use stash::InMemoryStashRepository;
pub use status::InMemoryStatusRepository;
pub use users::InMemoryUserRepository;

use async_trait::async_trait;
use vellum_interfaces::{
    FileRepository, PageRepository, Repository, RepositoryFactory, StashRepository, StatusRepository,
    StorageError, UserRepository,
};

/// Repository factory backed entirely by process memory.
#[derive(Default)]
pub struct InMemoryRepositoryFactory {
    files: InMemoryFileRepository,
    pages: InMemoryPageRepository,
    users: InMemoryUserRepository,
    stash: InMemoryStashRepository,
    status: InMemoryStatusRepository,
}

impl InMemoryRepositoryFactory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RepositoryFactory for InMemoryRepositoryFactory {
    fn file_repository(&self) -> &dyn FileRepository {
        &self.files
    }

    fn page_repository(&self) -> &dyn PageRepository {
        &self.pages
    }

    fn user_repository(&self) -> &dyn UserRepository {
        &self.users
    }

    fn stash_repository(&self) -> &dyn StashRepository {
        &self.stash
    }

    fn status_repository(&self) -> &dyn StatusRepository {
        &self.status
    }

    async fn health_check(&self) -> Result<(), StorageError> {
        self.files.health_check().await?;
        self.pages.health_check().await?;
        self.users.health_check().await?;
        self.stash.health_check().await?;
        self.status.health_check().await?;
        Ok(())
    }
}
