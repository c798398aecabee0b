//! In-memory user repository

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use vellum_api_types::UnifiedUser;
use vellum_interfaces::{Repository, StorageError, UserRepository};

/// Users and their group memberships keyed by name.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, UnifiedUser>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository for InMemoryUserRepository {
    async fn health_check(&self) -> Result<(), StorageError> {
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create_user(&self, name: &str, groups: &[String]) -> Result<UnifiedUser, StorageError> {
        let mut users = self.users.write().await;
        if users.contains_key(name) {
            return Err(StorageError::Constraint {
                message: format!("User already exists: {}", name),
            });
        }
        let user = UnifiedUser {
            name: name.to_string(),
            groups: groups.to_vec(),
            edit_token: Uuid::new_v4().simple().to_string(),
            registered_at: Utc::now(),
        };
        debug!(user = %name, ?groups, "created user");
        users.insert(name.to_string(), user.clone());
        Ok(user)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<UnifiedUser>, StorageError> {
        Ok(self.users.read().await.get(name).cloned())
    }

    async fn add_group(&self, name: &str, group: &str) -> Result<(), StorageError> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(name)
            .ok_or_else(|| StorageError::not_found("user", name))?;
        if !user.groups.iter().any(|g| g == group) {
            user.groups.push(group.to_string());
        }
        Ok(())
    }

    async fn remove_group(&self, name: &str, group: &str) -> Result<(), StorageError> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(name)
            .ok_or_else(|| StorageError::not_found("user", name))?;
        user.groups.retain(|g| g != group);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn users_get_a_fresh_edit_token() {
        let repo = InMemoryUserRepository::new();
        let alice = repo.create_user("Alice", &["user".to_string()]).await.unwrap();
        let bob = repo.create_user("Bob", &[]).await.unwrap();

        assert!(!alice.edit_token.is_empty());
        assert_ne!(alice.edit_token, bob.edit_token);
    }

    #[tokio::test]
    async fn group_membership_can_be_toggled() {
        let repo = InMemoryUserRepository::new();
        repo.create_user("Alice", &["user".to_string()]).await.unwrap();

        repo.add_group("Alice", "sysop").await.unwrap();
        // adding twice keeps a single entry
        repo.add_group("Alice", "sysop").await.unwrap();
        let user = repo.find_by_name("Alice").await.unwrap().unwrap();
        assert_eq!(user.groups, vec!["user", "sysop"]);

        repo.remove_group("Alice", "sysop").await.unwrap();
        let user = repo.find_by_name("Alice").await.unwrap().unwrap();
        assert_eq!(user.groups, vec!["user"]);
    }

    #[tokio::test]
    async fn duplicate_user_is_a_constraint_violation() {
        let repo = InMemoryUserRepository::new();
        repo.create_user("Alice", &[]).await.unwrap();
        assert!(matches!(
            repo.create_user("Alice", &[]).await.unwrap_err(),
            StorageError::Constraint { .. }
        ));
    }

    #[tokio::test]
    async fn group_change_on_unknown_user_fails() {
        let repo = InMemoryUserRepository::new();
        assert!(repo.add_group("Ghost", "user").await.is_err());
    }
}
