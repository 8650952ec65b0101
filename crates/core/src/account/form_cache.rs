//! Device-local cache of the last known profile

use std::sync::Arc;

use accountdesk_domain::constants::FORM_CACHE_KEY;
use accountdesk_domain::{AccountDeskError, CachedForm, Result};

use super::ports::KeyValueStore;

/// Reads and overwrites the cached form under the well-known key.
///
/// Last writer wins. An empty or unparseable entry reads as absent.
#[derive(Clone)]
pub struct LocalFormCache {
    store: Arc<dyn KeyValueStore>,
}

impl LocalFormCache {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn load(&self) -> Result<Option<CachedForm>> {
        let Some(raw) = self.store.get(FORM_CACHE_KEY)? else {
            return Ok(None);
        };
        if raw.trim().is_empty() {
            return Ok(None);
        }

        match serde_json::from_str(&raw) {
            Ok(form) => Ok(Some(form)),
            Err(err) => {
                tracing::warn!(error = %err, "ignoring unreadable cached form");
                Ok(None)
            }
        }
    }

    /// Overwrite the cached form wholesale.
    pub fn save(&self, form: &CachedForm) -> Result<()> {
        let raw = serde_json::to_string(form)
            .map_err(|e| AccountDeskError::Serialization(format!("cached form: {e}")))?;
        self.store.set(FORM_CACHE_KEY, &raw)
    }

    pub fn clear(&self) -> Result<()> {
        self.store.remove(FORM_CACHE_KEY)
    }
}
