//! Unified API types for the Vellum REST API
//!
//! This crate provides consistent type definitions shared by the REST
//! handlers, the storage layer and the job processor, so that every
//! component speaks the same domain vocabulary.

pub mod domain;
pub mod enums;
pub mod errors;
pub mod keys;

// Re-export main types for convenience
pub use domain::{
    StashedUpload, UnifiedFile, UnifiedPage, UnifiedUploadJob, UnifiedUser, UploadStatusRecord, WarningMap,
};
pub use enums::UploadResult;
pub use errors::ApiError;
pub use keys::{StashKey, StatusKey};
