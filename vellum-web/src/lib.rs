//! Reusable web utilities for the Vellum API
//!
//! Error-to-response conversion, the standard response envelope, and the
//! middleware layers every Vellum router mounts.

pub mod errors;
pub mod middleware;
pub mod response;

pub use errors::{WebError, WebResult};
pub use middleware::{cors_layer, request_id_middleware, RequestId, REQUEST_ID_HEADER};
pub use response::{ApiResponse, ResponseMeta};
