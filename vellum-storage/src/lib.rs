//! Storage backends for the Vellum service
//!
//! The wiki state this service owns is process-local, so the repository
//! traits from `vellum-interfaces` are implemented over tokio-guarded maps.
//! The seams stay in place: a database-backed factory can replace
//! [`InMemoryRepositoryFactory`] without touching the layers above.

pub mod memory;
pub mod queue;

pub use memory::InMemoryRepositoryFactory;
pub use queue::InMemoryJobQueue;
