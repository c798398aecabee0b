//! Context types for dependency injection in REST API handlers
//!
//! One context carries everything the upload endpoints need; grouping the
//! dependencies here keeps handlers signature-stable and easy to exercise
//! with in-memory implementations.

use std::sync::Arc;

use vellum_core::{SitePolicy, UploadPipeline};
use vellum_http::UrlFetcher;
use vellum_interfaces::{JobQueue, RepositoryFactory};

/// Context for the upload endpoints and their supporting routes.
#[derive(Clone)]
pub struct UploadsContext {
    /// Repository factory for storage operations
    pub repositories: Arc<dyn RepositoryFactory>,
    /// Queue deferred uploads are pushed onto
    pub queue: Arc<dyn JobQueue>,
    /// Shared verify/stash/register pipeline
    pub pipeline: UploadPipeline,
    /// Site switches and group permissions
    pub policy: Arc<SitePolicy>,
    /// URL schemes accepted for copy uploads
    pub allowed_schemes: Arc<Vec<String>>,
}

impl UploadsContext {
    pub fn new(
        repositories: Arc<dyn RepositoryFactory>,
        queue: Arc<dyn JobQueue>,
        fetcher: Arc<dyn UrlFetcher>,
        policy: Arc<SitePolicy>,
        allowed_schemes: Vec<String>,
    ) -> Self {
        let pipeline = UploadPipeline::new(repositories.clone(), fetcher);
        Self {
            repositories,
            queue,
            pipeline,
            policy,
            allowed_schemes: Arc::new(allowed_schemes),
        }
    }

    pub fn scheme_allowed(&self, scheme: &str) -> bool {
        self.allowed_schemes.iter().any(|s| s.eq_ignore_ascii_case(scheme))
    }
}
