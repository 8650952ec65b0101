//! Account orchestration: sign-up, profile update and sign-in

pub mod errors;
pub mod form_cache;
pub mod ports;
pub mod service;

pub use errors::AccountError;
pub use form_cache::LocalFormCache;
pub use ports::{AuthGateway, KeyValueStore, Notifier, ObjectStoreGateway, RecordStoreGateway};
pub use service::{AccountService, UpsertOutcome};
