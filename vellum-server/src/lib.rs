//! Vellum server: configuration-driven wiring and job processing
//!
//! Assembles storage, the fetch client, the site policy and the REST router
//! from a [`vellum_config::VellumConfig`], and runs the processor that
//! drains the upload job queue.

pub mod job_processor;
pub mod services;

pub use job_processor::{ProcessError, ProcessorConfig, UploadJobProcessor};
pub use services::ServerServices;
