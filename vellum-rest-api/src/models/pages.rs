//! Page endpoint models

use serde::{Deserialize, Serialize};

/// Response to a page deletion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletePageResponse {
    pub deleted: String,
}
