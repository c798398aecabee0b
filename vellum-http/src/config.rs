//! Fetch client configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for outbound copy-upload fetches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Request timeout
    pub timeout: Duration,

    /// Maximum number of redirects to follow
    pub max_redirects: u32,

    /// User agent string
    pub user_agent: String,

    /// Largest response body accepted, in bytes
    pub max_size: u64,

    /// URL schemes uploads may be copied from
    pub allowed_schemes: Vec<String>,

    /// Whether to verify SSL certificates
    pub verify_ssl: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_redirects: 5,
            user_agent: "Vellum/0.3".to_string(),
            max_size: 100 * 1024 * 1024,
            allowed_schemes: vec!["http".to_string(), "https".to_string()],
            verify_ssl: true,
        }
    }
}

impl FetchConfig {
    pub fn scheme_allowed(&self, scheme: &str) -> bool {
        self.allowed_schemes.iter().any(|s| s.eq_ignore_ascii_case(scheme))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_allows_http_and_https_only() {
        let config = FetchConfig::default();
        assert!(config.scheme_allowed("http"));
        assert!(config.scheme_allowed("HTTPS"));
        assert!(!config.scheme_allowed("ftp"));
        assert!(!config.scheme_allowed("file"));
    }
}
