//! Request and response models for the REST API

pub mod common;
pub mod files;
pub mod pages;
pub mod upload;

pub use common::{HealthResponse, TokenResponse};
pub use files::DeleteFileResponse;
pub use pages::DeletePageResponse;
pub use upload::{UploadBody, UploadRequest, UploadResponse};
