//! # AccountDesk Infrastructure
//!
//! Infrastructure implementations of the core account ports.
//!
//! This crate contains:
//! - HTTP gateways for the hosted backend (identity, storage, profile table)
//! - The retrying HTTP client they share
//! - File-backed and in-memory key-value stores
//! - Configuration loading
//!
//! ## Architecture
//! - Implements traits defined in `accountdesk-core`
//! - Contains all "impure" code (network and file I/O)

pub mod backend;
pub mod config;
pub mod errors;
pub mod http;
pub mod store;

// Re-export commonly used items
pub use backend::{
    BackendClient, HttpAuthGateway, HttpObjectStoreGateway, HttpRecordStoreGateway, SessionSlot,
};
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use store::{FileKeyValueStore, MemoryKeyValueStore};
