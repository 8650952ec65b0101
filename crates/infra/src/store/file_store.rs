//! JSON-file backed key-value store
//!
//! The whole map lives in one JSON object on disk. Every write rewrites the
//! file through a sibling temp file and a rename, so a crash never leaves a
//! half-written map behind.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use accountdesk_core::KeyValueStore;
use accountdesk_domain::{AccountDeskError, Result};
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::errors::InfraError;

pub struct FileKeyValueStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileKeyValueStore {
    /// Open the store at `path`, creating nothing until the first write.
    ///
    /// A missing file starts empty. A file that is not a JSON string map is
    /// treated as empty as well and overwritten on the next write.
    ///
    /// # Errors
    /// `AccountDeskError::LocalStore` if the file exists but cannot be read.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                warn!(path = %path.display(), error = %err, "discarding unreadable store file");
                BTreeMap::new()
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(InfraError::from(err).into()),
        };

        debug!(path = %path.display(), entries = entries.len(), "opened key-value store");
        Ok(Self { path, entries: Mutex::new(entries) })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let raw = serde_json::to_string_pretty(entries).map_err(InfraError::from)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(InfraError::from)?;
        }

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, raw).map_err(InfraError::from)?;
        fs::rename(&tmp, &self.path).map_err(|err| {
            AccountDeskError::LocalStore(format!(
                "failed to replace {}: {err}",
                self.path.display()
            ))
        })
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock();
        let mut updated = entries.clone();
        updated.insert(key.to_string(), value.to_string());
        self.persist(&updated)?;
        *entries = updated;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.lock();
        if !entries.contains_key(key) {
            return Ok(());
        }
        let mut updated = entries.clone();
        updated.remove(key);
        self.persist(&updated)?;
        *entries = updated;
        Ok(())
    }
}
