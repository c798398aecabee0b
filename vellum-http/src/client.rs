//! URL fetch client implementation

use crate::config::FetchConfig;
use crate::errors::FetchError;
use reqwest::Client;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Content retrieved from a remote URL.
#[derive(Debug, Clone)]
pub struct FetchedFile {
    pub content: Vec<u8>,
    pub content_type: Option<String>,
    /// URL the content was actually served from, after redirects.
    pub final_url: String,
}

/// Fetcher trait the upload pipeline downloads through
#[async_trait::async_trait]
pub trait UrlFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedFile, FetchError>;
}

/// Fetch manager with offline mock support
///
/// In online mode this is a thin reqwest wrapper enforcing the configured
/// scheme allow-list, timeout and size cap. In offline mode every fetch is
/// answered from the registered mock map, which keeps integration tests
/// deterministic and network-free.
#[derive(Debug, Clone)]
pub struct FetchManager {
    offline: bool,
    mocks: HashMap<String, (Vec<u8>, Option<String>)>,
    config: FetchConfig,
}

impl Default for FetchManager {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchManager {
    /// Create a new FetchManager in online mode with default configuration
    pub fn new() -> Self {
        Self::with_config(FetchConfig::default())
    }

    /// Create a new FetchManager with specific configuration
    pub fn with_config(config: FetchConfig) -> Self {
        debug!("Creating FetchManager with timeout: {}s", config.timeout.as_secs());
        Self {
            offline: false,
            mocks: HashMap::new(),
            config,
        }
    }

    /// Set offline mode
    pub fn set_offline(&mut self) {
        self.offline = true;
        debug!("FetchManager set to offline mode");
    }

    /// Register a mock response for a URL
    pub fn add_mock(&mut self, url: &str, content: Vec<u8>, content_type: Option<&str>) {
        self.mocks
            .insert(url.to_string(), (content, content_type.map(str::to_string)));
        debug!("Added fetch mock for {}", url);
    }

    /// Clear all mocks
    pub fn clear_mocks(&mut self) {
        self.mocks.clear();
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    fn check_url(&self, url: &str) -> Result<url::Url, FetchError> {
        let parsed = url::Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{}: {}", url, e)))?;
        if !self.config.scheme_allowed(parsed.scheme()) {
            return Err(FetchError::SchemeNotAllowed(parsed.scheme().to_string()));
        }
        Ok(parsed)
    }
}

#[async_trait::async_trait]
impl UrlFetcher for FetchManager {
    async fn fetch(&self, url: &str) -> Result<FetchedFile, FetchError> {
        self.check_url(url)?;

        if self.offline {
            debug!("Offline mode enabled, checking for mock response");
            return match self.mocks.get(url) {
                Some((content, content_type)) => Ok(FetchedFile {
                    content: content.clone(),
                    content_type: content_type.clone(),
                    final_url: url.to_string(),
                }),
                None => {
                    warn!("No mock registered for {}", url);
                    Err(FetchError::NoMock(url.to_string()))
                }
            };
        }

        info!("Fetching {}", url);
        let client = Client::builder()
            .timeout(self.config.timeout)
            .user_agent(&self.config.user_agent)
            .danger_accept_invalid_certs(!self.config.verify_ssl)
            .redirect(reqwest::redirect::Policy::limited(self.config.max_redirects as usize))
            .build()?;

        let response = client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!("Fetch of {} failed with status {}", url, status);
            return Err(FetchError::Status(status.as_u16()));
        }

        if let Some(len) = response.content_length() {
            if len > self.config.max_size {
                return Err(FetchError::TooLarge {
                    size: len,
                    limit: self.config.max_size,
                });
            }
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let final_url = response.url().to_string();

        let body = response.bytes().await?;
        if body.len() as u64 > self.config.max_size {
            return Err(FetchError::TooLarge {
                size: body.len() as u64,
                limit: self.config.max_size,
            });
        }

        debug!("Fetched {} bytes from {}", body.len(), final_url);
        Ok(FetchedFile {
            content: body.to_vec(),
            content_type,
            final_url,
        })
    }
}
