//! The upload pipeline
//!
//! One implementation of the verify / warn / stash / register sequence,
//! shared by the synchronous API path, stash resumption and the deferred
//! job processor.

mod pipeline;
mod verify;

pub use pipeline::{UploadError, UploadOutcome, UploadPipeline};
pub use verify::{check_warnings, content_digest};
