//! REST API for the Vellum upload service
//!
//! Exposes the upload action and its supporting endpoints (auth tokens,
//! files, pages, queued jobs, health) over axum, with dependency injection
//! through [`context::UploadsContext`].

pub mod app;
pub mod context;
pub mod errors;
pub mod handlers;
pub mod models;

pub use app::{create_rest_app, AppConfig};
pub use context::UploadsContext;
pub use errors::{RestError, RestResult};
