//! HTTP transport shared by the backend gateways

pub mod client;

pub use client::{HttpClient, HttpClientBuilder};
