//! File endpoint models

use serde::{Deserialize, Serialize};

/// Response to a file deletion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteFileResponse {
    pub deleted: String,
    /// Description page removed together with the file, when one existed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_page: Option<String>,
}
