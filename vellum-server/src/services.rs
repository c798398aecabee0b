//! Configuration-driven service wiring

use std::sync::Arc;
use tracing::{info, warn};

use vellum_config::{HttpConfig, VellumConfig, WikiConfig};
use vellum_core::{SitePolicy, UploadPipeline};
use vellum_http::{FetchConfig, FetchManager, UrlFetcher};
use vellum_interfaces::{JobQueue, RepositoryFactory, StorageError, UserRepository};
use vellum_rest_api::{create_rest_app, AppConfig, UploadsContext};
use vellum_storage::{InMemoryJobQueue, InMemoryRepositoryFactory};

use crate::job_processor::{ProcessorConfig, UploadJobProcessor};

/// Everything a running Vellum server is made of.
pub struct ServerServices {
    pub config: VellumConfig,
    pub repositories: Arc<dyn RepositoryFactory>,
    pub queue: Arc<dyn JobQueue>,
    pub policy: Arc<SitePolicy>,
    pub processor: Arc<UploadJobProcessor>,
    context: UploadsContext,
}

impl ServerServices {
    /// Wire the full service from configuration with the real fetch client.
    pub fn from_config(config: VellumConfig) -> Self {
        let fetcher = Arc::new(FetchManager::with_config(fetch_config(&config.http)));
        Self::with_fetcher(config, fetcher)
    }

    /// Wire the service with an injected fetcher. Test harnesses use this
    /// to hand in an offline `FetchManager`.
    pub fn with_fetcher(config: VellumConfig, fetcher: Arc<dyn UrlFetcher>) -> Self {
        let repositories: Arc<dyn RepositoryFactory> = Arc::new(InMemoryRepositoryFactory::new());
        let queue: Arc<dyn JobQueue> = Arc::new(InMemoryJobQueue::new());
        let policy = Arc::new(site_policy(&config.wiki));

        let context = UploadsContext::new(
            repositories.clone(),
            queue.clone(),
            fetcher.clone(),
            policy.clone(),
            config.http.allowed_schemes.clone(),
        );

        let pipeline = UploadPipeline::new(repositories.clone(), fetcher);
        let processor = Arc::new(UploadJobProcessor::new(
            queue.clone(),
            pipeline,
            ProcessorConfig::default(),
        ));

        Self {
            config,
            repositories,
            queue,
            policy,
            processor,
            context,
        }
    }

    /// Create the users the configuration seeds. Existing users are left
    /// untouched so restarts are idempotent once a durable backend is used.
    pub async fn bootstrap(&self) -> Result<(), StorageError> {
        let users = self.repositories.user_repository();
        for seed in &self.config.wiki.bootstrap_users {
            match users.create_user(&seed.name, &seed.groups).await {
                Ok(user) => info!(user = %user.name, groups = ?user.groups, "bootstrapped user"),
                Err(StorageError::Constraint { .. }) => {
                    warn!(user = %seed.name, "bootstrap user already exists")
                }
                Err(other) => return Err(other),
            }
        }
        Ok(())
    }

    /// The REST router for this service instance.
    pub fn router(&self) -> axum::Router {
        let app_config = AppConfig {
            enable_cors: self.config.server.cors.enabled,
            ..AppConfig::default()
        };
        create_rest_app(self.context.clone(), app_config)
    }

    pub fn context(&self) -> &UploadsContext {
        &self.context
    }
}

fn site_policy(wiki: &WikiConfig) -> SitePolicy {
    SitePolicy {
        uploads_enabled: wiki.enable_uploads,
        copy_uploads_enabled: wiki.allow_copy_uploads,
        async_uploads_enabled: wiki.allow_async_copy_uploads,
        group_permissions: wiki.group_permissions.clone(),
    }
}

fn fetch_config(http: &HttpConfig) -> FetchConfig {
    FetchConfig {
        timeout: http.timeout,
        max_redirects: http.max_redirects,
        user_agent: http.user_agent.clone(),
        max_size: http.max_size,
        allowed_schemes: http.allowed_schemes.clone(),
        verify_ssl: http.verify_ssl,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vellum_config::domains::wiki::BootstrapUser;

    #[tokio::test]
    async fn bootstrap_creates_configured_users() {
        let mut config = VellumConfig::default();
        config.wiki.bootstrap_users.push(BootstrapUser {
            name: "Admin".to_string(),
            groups: vec!["user".to_string(), "sysop".to_string()],
        });

        let services = ServerServices::from_config(config);
        services.bootstrap().await.unwrap();

        let user = services
            .repositories
            .user_repository()
            .find_by_name("Admin")
            .await
            .unwrap()
            .unwrap();
        assert!(user.in_group("sysop"));

        // a second bootstrap run is harmless
        services.bootstrap().await.unwrap();
    }

    #[test]
    fn policy_reflects_wiki_switches() {
        let mut config = VellumConfig::default();
        config.wiki.allow_async_copy_uploads = false;

        let services = ServerServices::from_config(config);
        assert!(services.policy.uploads_enabled);
        assert!(!services.policy.async_uploads_enabled);
    }
}
