//! Remote HTTP client for `gotaxon-server`'s query endpoints.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::ApiClient;
