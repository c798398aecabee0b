//! Configuration loading: YAML files plus `VELLUM_*` environment overrides

use crate::domains::VellumConfig;
use crate::error::{ConfigError, ConfigResult};
use crate::validation::Validatable;
use std::path::Path;
use tracing::debug;

/// Loads and validates service configuration.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load from an optional YAML file, apply environment overrides,
    /// validate, and return the result.
    pub fn load(path: Option<&Path>) -> ConfigResult<VellumConfig> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => VellumConfig::default(),
        };
        Self::apply_env_overrides(&mut config)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a YAML configuration file.
    pub fn from_file(path: &Path) -> ConfigResult<VellumConfig> {
        debug!("Loading configuration from {}", path.display());
        let raw = std::fs::read_to_string(path)?;
        let config = serde_yaml::from_str(&raw)?;
        Ok(config)
    }

    /// Apply `VELLUM_*` environment variables on top of the loaded values.
    fn apply_env_overrides(config: &mut VellumConfig) -> ConfigResult<()> {
        if let Ok(addr) = std::env::var("VELLUM_BIND_ADDRESS") {
            config.server.bind_address = addr;
        }
        if let Ok(port) = std::env::var("VELLUM_PORT") {
            config.server.port = port
                .parse()
                .map_err(|_| ConfigError::EnvError(format!("VELLUM_PORT is not a port number: {}", port)))?;
        }
        if let Ok(level) = std::env::var("VELLUM_LOG_LEVEL") {
            config.logging.level = serde_yaml::from_str(&level)
                .map_err(|_| ConfigError::EnvError(format!("VELLUM_LOG_LEVEL is not a log level: {}", level)))?;
        }
        for (var, target) in [
            ("VELLUM_ENABLE_UPLOADS", &mut config.wiki.enable_uploads),
            ("VELLUM_ALLOW_COPY_UPLOADS", &mut config.wiki.allow_copy_uploads),
            ("VELLUM_ALLOW_ASYNC_COPY_UPLOADS", &mut config.wiki.allow_async_copy_uploads),
        ] {
            if let Ok(value) = std::env::var(var) {
                *target = parse_bool(var, &value)?;
            }
        }
        Ok(())
    }
}

fn parse_bool(var: &str, value: &str) -> ConfigResult<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::EnvError(format!("{} is not a boolean: {}", var, other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_without_file_gives_defaults() {
        let config = ConfigLoader::load(None).unwrap();
        assert_eq!(config.server.port, 8380);
        assert!(config.wiki.enable_uploads);
    }

    #[test]
    fn load_from_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "server:\n  port: 9000\nwiki:\n  allow_async_copy_uploads: false"
        )
        .unwrap();

        let config = ConfigLoader::from_file(file.path()).unwrap();
        assert_eq!(config.server.port, 9000);
        assert!(!config.wiki.allow_async_copy_uploads);
        // untouched domains keep their defaults
        assert_eq!(config.server.bind_address, "127.0.0.1");
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "server: [not-a-map").unwrap();
        assert!(ConfigLoader::from_file(file.path()).is_err());
    }

    #[test]
    fn bool_parsing() {
        assert!(parse_bool("X", "true").unwrap());
        assert!(!parse_bool("X", "0").unwrap());
        assert!(parse_bool("X", "maybe").is_err());
    }
}
