// src/core/mod.rs
//! HTTP access to the career analysis backend

pub mod api;
pub mod service_client;

pub use api::{ApiError, CareerApi};
pub use service_client::ServiceClient;
