//! Persisted auth session slot

use std::sync::Arc;

use accountdesk_core::KeyValueStore;
use accountdesk_domain::constants::AUTH_SESSION_KEY;
use accountdesk_domain::{AccountDeskError, Result, Session};
use tracing::warn;

/// The single stored session, shared by every gateway that needs a bearer
/// token.
#[derive(Clone)]
pub struct SessionSlot {
    store: Arc<dyn KeyValueStore>,
}

impl SessionSlot {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Stored session, or `None` when the slot is empty or unreadable.
    pub fn load(&self) -> Option<Session> {
        let raw = match self.store.get(AUTH_SESSION_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!(error = %err, "failed to read stored session");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(err) => {
                warn!(error = %err, "ignoring unreadable stored session");
                None
            }
        }
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        let raw = serde_json::to_string(session)
            .map_err(|e| AccountDeskError::Serialization(format!("session: {e}")))?;
        self.store.set(AUTH_SESSION_KEY, &raw)
    }

    pub fn clear(&self) -> Result<()> {
        self.store.remove(AUTH_SESSION_KEY)
    }

    pub(crate) fn access_token(&self) -> Option<String> {
        self.load().map(|session| session.access_token)
    }
}
