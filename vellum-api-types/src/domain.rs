use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::enums::UploadResult;
use crate::keys::{StashKey, StatusKey};

/// Warning name -> human-readable detail, ordered for stable serialization.
pub type WarningMap = BTreeMap<String, String>;

/// Unified representation of a registered file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedFile {
    /// Normalized filename without the `File:` prefix.
    pub name: String,
    /// Hex-encoded SHA-256 of the content.
    pub digest: String,
    pub size: u64,
    pub mime: Option<String>,
    /// Where the content was copied from, when uploaded by URL.
    pub source_url: Option<String>,
    pub uploaded_by: String,
    pub uploaded_at: DateTime<Utc>,
    /// Full title of the description page created alongside the file.
    pub description_page: String,
}

/// Unified representation of a wiki page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedPage {
    /// Full, namespace-qualified title (e.g. `User talk:Alice`).
    pub title: String,
    pub content: String,
    /// Monotonically increasing; starts at 1 on creation.
    pub revision: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Unified representation of a registered user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedUser {
    pub name: String,
    pub groups: Vec<String>,
    /// Per-user edit token required by state-changing API calls.
    #[serde(default, skip_serializing)]
    pub edit_token: String,
    pub registered_at: DateTime<Utc>,
}

impl UnifiedUser {
    pub fn in_group(&self, group: &str) -> bool {
        self.groups.iter().any(|g| g == group)
    }
}

/// A queued upload-from-URL work item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedUploadJob {
    pub id: Uuid,
    pub filename: String,
    pub url: String,
    pub requested_by: String,
    pub ignore_warnings: bool,
    pub leave_message: bool,
    /// Status record this job reports its outcome to.
    pub status_key: StatusKey,
    pub queued_at: DateTime<Utc>,
}

/// Content fetched (or received) but not yet registered, parked under a
/// session key until the client resolves its warnings.
#[derive(Debug, Clone)]
pub struct StashedUpload {
    pub key: StashKey,
    /// Target filename the upload was aimed at.
    pub filename: String,
    pub content: Vec<u8>,
    pub digest: String,
    pub mime: Option<String>,
    pub source_url: Option<String>,
    pub owner: String,
    pub warnings: WarningMap,
    pub stashed_at: DateTime<Utc>,
}

/// Pollable status of an asynchronous upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadStatusRecord {
    pub key: StatusKey,
    pub owner: String,
    pub result: UploadResult,
    pub filename: Option<String>,
    pub session_key: Option<StashKey>,
    pub warnings: Option<WarningMap>,
    pub error: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl UploadStatusRecord {
    /// Fresh `Queued` record for a newly accepted async upload.
    pub fn queued(key: StatusKey, owner: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            key,
            owner: owner.into(),
            result: UploadResult::Queued,
            filename: Some(filename.into()),
            session_key: None,
            warnings: None,
            error: None,
            updated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_token_never_serialized() {
        let user = UnifiedUser {
            name: "Alice".to_string(),
            groups: vec!["user".to_string()],
            edit_token: "secret".to_string(),
            registered_at: Utc::now(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret"));
        assert!(json.contains("Alice"));
    }

    #[test]
    fn queued_status_has_no_session_key() {
        let status = UploadStatusRecord::queued(StatusKey::generate(), "Alice", "Wiki.png");
        assert_eq!(status.result, UploadResult::Queued);
        assert!(status.session_key.is_none());
        assert_eq!(status.filename.as_deref(), Some("Wiki.png"));
    }
}
