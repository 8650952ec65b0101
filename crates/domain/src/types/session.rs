//! Authenticated session types
//!
//! Sessions are owned by the auth gateway. The rest of the system only looks
//! at whether one exists and which email it belongs to.

use std::fmt;

use serde::{Deserialize, Serialize};

/// User identity attached to a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Proof of authentication issued by the identity service
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Unix timestamp (seconds) after which the access token is stale
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: SessionUser,
}

impl Session {
    /// Authenticated email, empty when the identity service did not return one.
    pub fn email(&self) -> &str {
        self.user.email.as_deref().unwrap_or_default()
    }

    pub fn is_expired_at(&self, now_unix: i64) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now_unix)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .field("user", &self.user)
            .finish_non_exhaustive()
    }
}

/// Result of creating an account with the identity service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRef {
    pub user_id: String,
    pub email: Option<String>,
    /// Present when the service signs the user in immediately; absent while
    /// email confirmation is pending.
    pub session: Option<Session>,
}
