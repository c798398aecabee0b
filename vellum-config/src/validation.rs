//! Configuration validation traits and utilities

use crate::error::{ConfigError, ConfigResult};

/// Trait for validatable configuration
pub trait Validatable {
    /// Validate the configuration
    fn validate(&self) -> ConfigResult<()>;

    /// Get the domain name for error reporting
    fn domain_name(&self) -> &'static str;

    /// Helper to create a domain-specific validation error
    fn validation_error(&self, message: impl Into<String>) -> ConfigError {
        ConfigError::DomainError {
            domain: self.domain_name().to_string(),
            message: message.into(),
        }
    }
}

/// Validate a required string field
pub fn validate_required_string(value: &str, field_name: &str, domain: &str) -> ConfigResult<()> {
    if value.is_empty() {
        return Err(ConfigError::DomainError {
            domain: domain.to_string(),
            message: format!("{} cannot be empty", field_name),
        });
    }
    Ok(())
}

/// Validate a positive number
pub fn validate_positive<T>(value: T, field_name: &str, domain: &str) -> ConfigResult<()>
where
    T: PartialOrd + Default + std::fmt::Display,
{
    if value <= T::default() {
        return Err(ConfigError::DomainError {
            domain: domain.to_string(),
            message: format!("{} must be greater than 0, got {}", field_name, value),
        });
    }
    Ok(())
}

/// Validate that a scheme list only contains plausible URL schemes
pub fn validate_schemes(schemes: &[String], field_name: &str, domain: &str) -> ConfigResult<()> {
    if schemes.is_empty() {
        return Err(ConfigError::DomainError {
            domain: domain.to_string(),
            message: format!("{} cannot be empty", field_name),
        });
    }
    for scheme in schemes {
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-') {
            return Err(ConfigError::DomainError {
                domain: domain.to_string(),
                message: format!("{} contains invalid scheme '{}'", field_name, scheme),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_fails_validation() {
        assert!(validate_required_string("", "name", "test").is_err());
        assert!(validate_required_string("x", "name", "test").is_ok());
    }

    #[test]
    fn zero_is_not_positive() {
        assert!(validate_positive(0u64, "count", "test").is_err());
        assert!(validate_positive(1u64, "count", "test").is_ok());
    }

    #[test]
    fn scheme_list_validation() {
        let ok = vec!["http".to_string(), "https".to_string()];
        assert!(validate_schemes(&ok, "schemes", "test").is_ok());

        let bad = vec!["ht tp".to_string()];
        assert!(validate_schemes(&bad, "schemes", "test").is_err());
        assert!(validate_schemes(&[], "schemes", "test").is_err());
    }
}
