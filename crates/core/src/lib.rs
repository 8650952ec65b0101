//! # AccountDesk Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port/adapter interfaces (traits) for the hosted backend and the device
//! - The account service that sequences sign-up, upload, insert and update
//!
//! ## Architecture Principles
//! - Only depends on `accountdesk-domain`
//! - No HTTP or filesystem code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod account;

// Re-export specific items to avoid ambiguity
pub use account::ports::{
    AuthGateway, KeyValueStore, Notifier, ObjectStoreGateway, RecordStoreGateway,
};
pub use account::{AccountError, AccountService, LocalFormCache, UpsertOutcome};
