//! Domain-specific configuration modules

pub mod http;
pub mod logging;
pub mod server;
pub mod utils;
pub mod wiki;

use crate::error::ConfigResult;
use crate::validation::Validatable;
use serde::{Deserialize, Serialize};

/// Top-level service configuration, one field per domain.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VellumConfig {
    pub server: server::ServerConfig,
    pub http: http::HttpConfig,
    pub wiki: wiki::WikiConfig,
    pub logging: logging::LoggingConfig,
}

impl Validatable for VellumConfig {
    fn validate(&self) -> ConfigResult<()> {
        self.server.validate()?;
        self.http.validate()?;
        self.wiki.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "vellum"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(VellumConfig::default().validate().is_ok());
    }
}
