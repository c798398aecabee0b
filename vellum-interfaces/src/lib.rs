//! # Vellum Interfaces
//!
//! Core interfaces and traits for the Vellum modular architecture.
//!
//! This crate provides the seams that let the REST handlers, the upload
//! pipeline and the job processor share one vocabulary of storage and
//! queueing operations without depending on a concrete backend.
//!
//! ## Main Interfaces
//!
//! - [`RepositoryFactory`] - access to every repository behind one handle
//! - [`JobQueue`] - the FIFO queue deferred uploads travel through

pub mod queue;
pub mod storage;

// Re-export commonly used types
pub use queue::{JobQueue, QueueError};
pub use storage::{
    FileRepository, PageRepository, Repository, RepositoryFactory, StashRepository, StatusRepository, StorageError,
    UserRepository,
};
