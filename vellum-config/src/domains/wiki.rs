//! Wiki behavior configuration: upload switches, permissions, seed users

use crate::error::ConfigResult;
use crate::validation::{validate_required_string, Validatable};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Wiki-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WikiConfig {
    /// Master switch for any upload
    #[serde(default = "crate::domains::utils::default_true")]
    pub enable_uploads: bool,

    /// Whether uploads may copy from a URL
    #[serde(default = "crate::domains::utils::default_true")]
    pub allow_copy_uploads: bool,

    /// Whether copy uploads may be deferred to the job queue
    #[serde(default = "crate::domains::utils::default_true")]
    pub allow_async_copy_uploads: bool,

    /// Group name to granted rights
    #[serde(default = "default_group_permissions")]
    pub group_permissions: HashMap<String, Vec<String>>,

    /// Users created at startup
    #[serde(default)]
    pub bootstrap_users: Vec<BootstrapUser>,
}

/// A user seeded into storage when the service starts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapUser {
    pub name: String,
    #[serde(default)]
    pub groups: Vec<String>,
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            enable_uploads: true,
            allow_copy_uploads: true,
            allow_async_copy_uploads: true,
            group_permissions: default_group_permissions(),
            bootstrap_users: Vec::new(),
        }
    }
}

impl Validatable for WikiConfig {
    fn validate(&self) -> ConfigResult<()> {
        for group in self.group_permissions.keys() {
            validate_required_string(group, "group_permissions key", self.domain_name())?;
        }
        for user in &self.bootstrap_users {
            validate_required_string(&user.name, "bootstrap_users name", self.domain_name())?;
        }
        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "wiki"
    }
}

fn default_group_permissions() -> HashMap<String, Vec<String>> {
    let mut map = HashMap::new();
    map.insert("*".to_string(), vec!["read".to_string()]);
    map.insert(
        "user".to_string(),
        vec![
            "read".to_string(),
            "edit".to_string(),
            "createtalk".to_string(),
            "upload".to_string(),
        ],
    );
    map.insert(
        "sysop".to_string(),
        vec![
            "read".to_string(),
            "edit".to_string(),
            "createtalk".to_string(),
            "upload".to_string(),
            "upload_by_url".to_string(),
            "delete".to_string(),
        ],
    );
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wiki_config_defaults() {
        let config = WikiConfig::default();
        assert!(config.enable_uploads);
        assert!(config.allow_copy_uploads);
        assert!(config.allow_async_copy_uploads);
        assert!(config.group_permissions.contains_key("sysop"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_group_name_rejected() {
        let mut config = WikiConfig::default();
        config.group_permissions.insert(String::new(), vec![]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_yaml_round_trip() {
        let yaml = r#"
enable_uploads: true
allow_copy_uploads: false
bootstrap_users:
  - name: Admin
    groups: [user, sysop]
"#;
        let config: WikiConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(!config.allow_copy_uploads);
        assert_eq!(config.bootstrap_users.len(), 1);
        assert_eq!(config.bootstrap_users[0].groups, vec!["user", "sysop"]);
    }
}
