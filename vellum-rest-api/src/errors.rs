//! REST API error types and conversions
//!
//! The upload action reports its failures with fixed codes and messages
//! that clients (and the integration suite) match verbatim; the
//! constructors below are the single source of those strings.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use vellum_core::UploadError;
use vellum_interfaces::{QueueError, StorageError};

/// REST API specific error type
#[derive(Error, Debug)]
pub enum RestError {
    /// An API-contract error with a fixed code and message.
    #[error("{message}")]
    Api {
        code: &'static str,
        message: String,
        status: StatusCode,
    },

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("Storage error")]
    Storage(#[from] StorageError),

    #[error("Queue error")]
    Queue(#[from] QueueError),
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;

impl RestError {
    fn api(code: &'static str, message: impl Into<String>, status: StatusCode) -> Self {
        RestError::Api {
            code,
            message: message.into(),
            status,
        }
    }

    pub fn missing_token() -> Self {
        Self::api("notoken", "The token parameter must be set", StatusCode::BAD_REQUEST)
    }

    pub fn invalid_token() -> Self {
        Self::api("badtoken", "Invalid token", StatusCode::UNAUTHORIZED)
    }

    pub fn missing_source() -> Self {
        Self::api(
            "missingparam",
            "One of the parameters sessionkey, file, url, statuskey is required",
            StatusCode::BAD_REQUEST,
        )
    }

    pub fn missing_filename() -> Self {
        Self::api("missingparam", "The filename parameter must be set", StatusCode::BAD_REQUEST)
    }

    pub fn permission_denied() -> Self {
        Self::api("permissiondenied", "Permission denied", StatusCode::FORBIDDEN)
    }

    pub fn unknown_user() -> Self {
        Self::api("baduser", "Unrecognized or missing user", StatusCode::UNAUTHORIZED)
    }

    pub fn uploads_disabled() -> Self {
        Self::api("uploaddisabled", "Uploads are disabled", StatusCode::FORBIDDEN)
    }

    pub fn copy_uploads_disabled() -> Self {
        Self::api("copyuploaddisabled", "Copy uploads are disabled", StatusCode::FORBIDDEN)
    }

    pub fn async_uploads_disabled() -> Self {
        Self::api(
            "asynccopyuploaddisabled",
            "Asynchronous copy uploads disabled",
            StatusCode::FORBIDDEN,
        )
    }

    pub fn leavemessage_without_ignorewarnings() -> Self {
        Self::api(
            "missing-ignorewarnings",
            "Using leavemessage without ignorewarnings is not supported",
            StatusCode::BAD_REQUEST,
        )
    }

    pub fn invalid_session_key() -> Self {
        Self::api("invalid-session-key", "Not a valid session key", StatusCode::BAD_REQUEST)
    }

    pub fn missing_status_result() -> Self {
        Self::api("missingresult", "No result in status data", StatusCode::NOT_FOUND)
    }

    pub fn bad_upload_url() -> Self {
        Self::api("bad-url", "Invalid or disallowed URL scheme", StatusCode::BAD_REQUEST)
    }

    pub fn bad_file_encoding() -> Self {
        Self::api(
            "file-badencoding",
            "The file parameter is not valid base64",
            StatusCode::BAD_REQUEST,
        )
    }
}

impl From<UploadError> for RestError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::Storage(e) => RestError::Storage(e),
            UploadError::UnknownStashKey => RestError::invalid_session_key(),
            UploadError::Title(e) => RestError::api("illegal-filename", e.to_string(), StatusCode::BAD_REQUEST),
            UploadError::EmptyContent => {
                RestError::api("empty-file", "The file you submitted was empty", StatusCode::BAD_REQUEST)
            }
            UploadError::Fetch(e) => RestError::api("fetch-error", e.to_string(), StatusCode::BAD_GATEWAY),
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            RestError::Api { code, message, status } => (status, code.to_string(), message),
            RestError::NotFound(message) => (StatusCode::NOT_FOUND, "NOT_FOUND".to_string(), message),
            RestError::BadRequest(message) => (StatusCode::BAD_REQUEST, "BAD_REQUEST".to_string(), message),
            RestError::InternalError(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR".to_string(), message)
            }
            RestError::Storage(err) => match err {
                StorageError::NotFound { ref entity, .. } => {
                    (StatusCode::NOT_FOUND, format!("{}_NOT_FOUND", entity.to_uppercase()), err.to_string())
                }
                other => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR".to_string(), other.to_string()),
            },
            RestError::Queue(err) => (StatusCode::INTERNAL_SERVER_ERROR, "QUEUE_ERROR".to_string(), err.to_string()),
        };

        let body = json!({
            "error": {
                "code": code,
                "message": message,
                "status": status.as_u16()
            }
        });
        (status, Json(body)).into_response()
    }
}
