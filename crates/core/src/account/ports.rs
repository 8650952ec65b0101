//! Port interfaces for account management
//!
//! These traits define the boundaries between the account orchestration and
//! the hosted backend (identity, object storage, profile table) plus the
//! device-local capabilities it needs (key-value storage, notifications).

use accountdesk_domain::{
    AccountRef, AuthError, DataError, Notice, PhotoFile, ProfileRow, Result, RowRef, Session,
    StoreError,
};
use async_trait::async_trait;

/// Hosted identity service
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Create an account for `email`.
    async fn sign_up(&self, email: &str, password: &str) -> std::result::Result<AccountRef, AuthError>;

    /// Sign in with email and password and keep the resulting session.
    async fn sign_in(&self, email: &str, password: &str) -> std::result::Result<Session, AuthError>;

    /// Change the password of the signed-in user. Requires an active session.
    async fn update_password(&self, new_password: &str) -> std::result::Result<(), AuthError>;

    /// Current session, if any.
    async fn current_session(&self) -> Option<Session>;

    /// Forget the current session.
    async fn sign_out(&self) -> std::result::Result<(), AuthError>;
}

/// Object storage for uploaded photos
#[async_trait]
pub trait ObjectStoreGateway: Send + Sync {
    /// Upload `photo` under a collision-free name derived from its suggested
    /// name and return the stored object identifier (relative to the
    /// bucket).
    async fn upload(&self, photo: &PhotoFile) -> std::result::Result<String, StoreError>;
}

/// Profile table, one row per email
#[async_trait]
pub trait RecordStoreGateway: Send + Sync {
    async fn insert(&self, profile: &ProfileRow) -> std::result::Result<RowRef, DataError>;

    async fn update_by_email(
        &self,
        email: &str,
        profile: &ProfileRow,
    ) -> std::result::Result<RowRef, DataError>;

    /// `Ok(None)` when no row exists for `email`.
    async fn select_by_email(&self, email: &str)
        -> std::result::Result<Option<ProfileRow>, DataError>;
}

/// Device-local string key-value storage
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;
}

/// Sink for user-visible notifications
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}
