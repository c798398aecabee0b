//! Core domain model for the Vellum service
//!
//! Holds everything the REST layer and the job processor share that is not
//! storage or transport: title normalization, the site permission policy,
//! talk-page notification rendering, and the upload pipeline that turns
//! fetched content into registered files.

pub mod message;
pub mod policy;
pub mod title;
pub mod upload;

pub use policy::SitePolicy;
pub use title::{Namespace, Title, TitleError};
pub use upload::{content_digest, UploadError, UploadOutcome, UploadPipeline};
