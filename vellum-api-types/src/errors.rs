//! Wire-level API error envelope

use serde::{Deserialize, Serialize};

/// Error payload returned by every failing API call as
/// `{"error": {"code": ..., "message": ..., "status": ...}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn not_found(entity: &str, message: impl Into<String>) -> Self {
        Self {
            code: format!("{}_NOT_FOUND", entity.to_uppercase()),
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new("UNAUTHORIZED", message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new("FORBIDDEN", message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new("CONFLICT", message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new("SERVICE_UNAVAILABLE", message)
    }

    /// HTTP status the code conventionally maps to; 500 when unknown.
    pub fn http_status_code(&self) -> u16 {
        match self.code.as_str() {
            "BAD_REQUEST" | "VALIDATION_ERROR" => 400,
            "UNAUTHORIZED" => 401,
            "FORBIDDEN" => 403,
            c if c.ends_with("_NOT_FOUND") => 404,
            "CONFLICT" => 409,
            "TIMEOUT" => 408,
            "SERVICE_UNAVAILABLE" => 503,
            _ => 500,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
