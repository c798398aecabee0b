//! Upload action models

use serde::{Deserialize, Serialize};
use vellum_api_types::{StashKey, StatusKey, UploadResult, UploadStatusRecord, WarningMap};

/// Parameters of the upload action.
///
/// Everything is optional at the serde level; the handler enforces the
/// parameter contract so that each violation reports its fixed message.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UploadRequest {
    pub token: Option<String>,
    pub filename: Option<String>,
    /// Source URL for copy uploads.
    pub url: Option<String>,
    /// Base64-encoded content for direct uploads.
    pub file: Option<String>,
    /// Resume a stashed upload.
    pub sessionkey: Option<String>,
    /// Poll a deferred upload.
    pub statuskey: Option<String>,
    pub asyncdownload: bool,
    pub ignorewarnings: bool,
    pub leavemessage: bool,
}

/// Successful upload action response: `{"upload": {...}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub upload: UploadBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadBody {
    pub result: UploadResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sessionkey: Option<StashKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statuskey: Option<StatusKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warnings: Option<WarningMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UploadBody {
    pub fn queued(statuskey: StatusKey) -> Self {
        Self {
            result: UploadResult::Queued,
            filename: None,
            sessionkey: None,
            statuskey: Some(statuskey),
            warnings: None,
            error: None,
        }
    }

    pub fn success(filename: String) -> Self {
        Self {
            result: UploadResult::Success,
            filename: Some(filename),
            sessionkey: None,
            statuskey: None,
            warnings: None,
            error: None,
        }
    }

    pub fn warning(sessionkey: StashKey, warnings: WarningMap) -> Self {
        Self {
            result: UploadResult::Warning,
            filename: None,
            sessionkey: Some(sessionkey),
            statuskey: None,
            warnings: Some(warnings),
            error: None,
        }
    }

    /// Shape a stored status record for the poll response.
    pub fn from_status(record: UploadStatusRecord) -> Self {
        Self {
            result: record.result,
            filename: record.filename,
            sessionkey: record.session_key,
            statuskey: Some(record.key),
            warnings: record.warnings,
            error: record.error,
        }
    }
}

impl From<UploadBody> for UploadResponse {
    fn from(upload: UploadBody) -> Self {
        Self { upload }
    }
}
