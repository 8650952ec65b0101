//! Application context - dependency injection container

use std::sync::Arc;

use accountdesk_core::{AccountService, KeyValueStore, LocalFormCache, Notifier};
use accountdesk_domain::{Config, Result};
use accountdesk_infra::{
    config, BackendClient, FileKeyValueStore, HttpAuthGateway, HttpObjectStoreGateway,
    HttpRecordStoreGateway,
};
use tracing::info;

use crate::notifier::TracingNotifier;

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub accounts: Arc<AccountService>,
    pub notifier: Arc<dyn Notifier>,
}

impl AppContext {
    /// Load configuration and wire the production stack: file-backed device
    /// storage, HTTP gateways and the log-line notifier.
    ///
    /// # Errors
    /// Configuration or storage failures.
    pub fn new() -> Result<Self> {
        let config = config::load()?;
        let store = Arc::new(FileKeyValueStore::open(&config.cache.path)?);
        Self::with_parts(config, store, Arc::new(TracingNotifier))
    }

    /// Wire the context from explicit parts. Tests use this with an
    /// in-memory store and a recording notifier.
    pub fn with_parts(
        config: Config,
        store: Arc<dyn KeyValueStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self> {
        let client = BackendClient::from_config(&config, store.clone())?;

        let accounts = AccountService::new(
            Arc::new(HttpAuthGateway::new(client.clone())),
            Arc::new(HttpObjectStoreGateway::new(client.clone(), &config.backend.bucket)),
            Arc::new(HttpRecordStoreGateway::new(client, &config.backend.profile_table)),
            LocalFormCache::new(store),
            notifier.clone(),
            config.backend.photo_url_base(),
        );

        info!(
            backend = %config.backend.url,
            bucket = %config.backend.bucket,
            table = %config.backend.profile_table,
            "application context ready"
        );

        Ok(Self { config, accounts: Arc::new(accounts), notifier })
    }
}
