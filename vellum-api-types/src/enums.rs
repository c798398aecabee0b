use serde::{Deserialize, Serialize};

/// Terminal and intermediate outcomes of an upload request.
///
/// Serialized exactly as the variant name (`"Queued"`, `"Warning"`,
/// `"Success"`, `"Failed"`) -- these strings are part of the API contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UploadResult {
    /// Accepted and enqueued; not yet executed.
    Queued,
    /// Popped from the queue and currently executing.
    Running,
    /// Stopped on warnings; resumable via the returned session key.
    Warning,
    Success,
    Failed,
}

impl UploadResult {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, UploadResult::Queued | UploadResult::Running)
    }
}

impl std::fmt::Display for UploadResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            UploadResult::Queued => "Queued",
            UploadResult::Running => "Running",
            UploadResult::Warning => "Warning",
            UploadResult::Success => "Success",
            UploadResult::Failed => "Failed",
        };
        write!(f, "{}", s)
    }
}
