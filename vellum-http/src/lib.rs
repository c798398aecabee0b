//! Outbound URL fetching for copy uploads
//!
//! Provides the [`UrlFetcher`] trait the upload pipeline downloads through,
//! its reqwest-backed [`FetchManager`] implementation, and an offline mode
//! with registered byte mocks so tests never touch the network.

pub mod client;
pub mod config;
pub mod errors;

pub use client::{FetchManager, FetchedFile, UrlFetcher};
pub use config::FetchConfig;
pub use errors::FetchError;
