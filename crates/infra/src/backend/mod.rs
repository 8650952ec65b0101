//! HTTP gateways for the hosted backend
//!
//! The backend exposes three REST surfaces under one base URL: identity
//! (`/auth/v1`), object storage (`/storage/v1`) and the row-oriented table
//! API (`/rest/v1`). Every request carries the public `apikey` header and a
//! bearer token: the current session's access token when one is stored,
//! otherwise the public key itself.

pub mod auth;
pub mod errors;
pub mod records;
pub mod session;
pub mod storage;

use std::sync::Arc;

use accountdesk_core::KeyValueStore;
use accountdesk_domain::{AccountDeskError, BackendConfig, Config};
use reqwest::{Method, RequestBuilder, Response};

pub use auth::HttpAuthGateway;
pub use records::HttpRecordStoreGateway;
pub use session::SessionSlot;
pub use storage::HttpObjectStoreGateway;

use crate::http::HttpClient;

/// Shared request plumbing for the backend gateways.
#[derive(Clone)]
pub struct BackendClient {
    http: HttpClient,
    base_url: String,
    anon_key: String,
    sessions: SessionSlot,
}

impl BackendClient {
    pub fn new(backend: &BackendConfig, http: HttpClient, sessions: SessionSlot) -> Self {
        Self {
            http,
            base_url: backend.url.trim_end_matches('/').to_string(),
            anon_key: backend.anon_key.clone(),
            sessions,
        }
    }

    /// Build the HTTP client from `config.http` and keep sessions in `store`.
    ///
    /// # Errors
    /// `AccountDeskError::Config` when the base URL is empty, or the HTTP
    /// client cannot be constructed.
    pub fn from_config(config: &Config, store: Arc<dyn KeyValueStore>) -> Result<Self, AccountDeskError> {
        if config.backend.url.trim().is_empty() {
            return Err(AccountDeskError::Config("backend.url must not be empty".into()));
        }
        let http = HttpClient::from_config(&config.http)?;
        Ok(Self::new(&config.backend, http, SessionSlot::new(store)))
    }

    pub fn sessions(&self) -> &SessionSlot {
        &self.sessions
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Request with `apikey` and bearer headers set.
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let token = self.sessions.access_token().unwrap_or_else(|| self.anon_key.clone());
        self.request_with_token(method, path, &token)
    }

    pub(crate) fn request_with_token(&self, method: Method, path: &str, token: &str) -> RequestBuilder {
        self.http
            .request(method, self.endpoint(path))
            .header("apikey", &self.anon_key)
            .bearer_auth(token)
    }

    /// Request authenticated with the public key only.
    pub(crate) fn anonymous_request(&self, method: Method, path: &str) -> RequestBuilder {
        self.request_with_token(method, path, &self.anon_key)
    }

    pub(crate) async fn send(&self, builder: RequestBuilder) -> Result<Response, AccountDeskError> {
        self.http.send(builder).await
    }
}
