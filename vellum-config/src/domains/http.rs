//! Outbound fetch client configuration

use crate::error::ConfigResult;
use crate::validation::{validate_positive, validate_required_string, validate_schemes, Validatable};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the client that downloads copy-upload sources
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Request timeout
    #[serde(with = "crate::domains::utils::serde_duration", default = "default_timeout")]
    pub timeout: Duration,

    /// Maximum number of redirects to follow
    #[serde(default = "default_max_redirects")]
    pub max_redirects: u32,

    /// User agent string
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Largest response body accepted, in bytes
    #[serde(default = "default_max_size")]
    pub max_size: u64,

    /// URL schemes uploads may be copied from
    #[serde(default = "default_allowed_schemes")]
    pub allowed_schemes: Vec<String>,

    /// Whether to verify SSL certificates
    #[serde(default = "crate::domains::utils::default_true")]
    pub verify_ssl: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            max_redirects: default_max_redirects(),
            user_agent: default_user_agent(),
            max_size: default_max_size(),
            allowed_schemes: default_allowed_schemes(),
            verify_ssl: true,
        }
    }
}

impl Validatable for HttpConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_positive(self.timeout.as_secs(), "timeout", self.domain_name())?;
        validate_required_string(&self.user_agent, "user_agent", self.domain_name())?;
        validate_positive(self.max_size, "max_size", self.domain_name())?;
        validate_schemes(&self.allowed_schemes, "allowed_schemes", self.domain_name())?;
        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "http"
    }
}

// Default value functions
fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_max_redirects() -> u32 {
    5
}

fn default_user_agent() -> String {
    "Vellum/0.3".to_string()
}

fn default_max_size() -> u64 {
    100 * 1024 * 1024
}

fn default_allowed_schemes() -> Vec<String> {
    vec!["http".to_string(), "https".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_config_defaults() {
        let config = HttpConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.max_redirects, 5);
        assert_eq!(config.allowed_schemes, vec!["http", "https"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_http_config_validation() {
        let mut config = HttpConfig::default();
        config.timeout = Duration::from_secs(0);
        assert!(config.validate().is_err());

        config = HttpConfig::default();
        config.user_agent = String::new();
        assert!(config.validate().is_err());

        config = HttpConfig::default();
        config.allowed_schemes.clear();
        assert!(config.validate().is_err());
    }
}
