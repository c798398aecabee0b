use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque key addressing a stashed (fetched but unregistered) upload.
///
/// Handed to clients as `sessionkey` when an upload stops on warnings, and
/// presented back to resume it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StashKey(pub String);

impl StashKey {
    /// Generate a fresh key, keeping the target file's extension visible
    /// so operators can recognize stash entries in logs.
    pub fn generate(filename: &str) -> Self {
        let stem = Uuid::new_v4().simple().to_string();
        match filename.rsplit_once('.') {
            Some((_, ext)) if !ext.is_empty() => Self(format!("{}.{}", &stem[..13], ext)),
            _ => Self(stem[..13].to_string()),
        }
    }

    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StashKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for StashKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for StashKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Opaque key for polling the status of an asynchronous upload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatusKey(pub String);

impl StatusKey {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StatusKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for StatusKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for StatusKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
