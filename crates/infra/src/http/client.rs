//! Retrying HTTP client used by every backend gateway
//!
//! Gateway calls default to a single attempt; retries are opt-in through
//! `http.max_attempts`. Only idempotent-safe failures are retried: 5xx
//! responses and connection-level errors.

use std::time::Duration;

use accountdesk_domain::constants::{DEFAULT_HTTP_MAX_ATTEMPTS, DEFAULT_HTTP_TIMEOUT_SECS};
use accountdesk_domain::{AccountDeskError, HttpConfig};
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use tracing::{debug, warn};

use crate::errors::InfraError;

/// HTTP client with timeout and bounded retry.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    max_attempts: usize,
    base_backoff: Duration,
}

impl HttpClient {
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Build a client from the `http` configuration section.
    pub fn from_config(config: &HttpConfig) -> Result<Self, AccountDeskError> {
        Self::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .max_attempts(config.max_attempts)
            .build()
    }

    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Send `builder`, retrying server errors and connection failures until
    /// the attempt budget is spent.
    ///
    /// Non-2xx responses are returned as `Ok`; status interpretation belongs
    /// to the caller.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, AccountDeskError> {
        let attempts = self.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            let request = builder
                .try_clone()
                .ok_or_else(|| {
                    AccountDeskError::Internal("streaming request bodies cannot be retried".into())
                })?
                .build()
                .map_err(|err| AccountDeskError::from(InfraError::from(err)))?;

            let method = request.method().clone();
            let url = redact_query(request.url());
            debug!(attempt, %method, %url, "sending HTTP request");

            let last_attempt = attempt >= attempts;
            match self.client.execute(request).await {
                Ok(response) => {
                    let status = response.status();
                    debug!(attempt, %method, %url, %status, "received HTTP response");

                    if status.is_server_error() && !last_attempt {
                        warn!(attempt, %method, %url, %status, "server error, retrying");
                    } else {
                        return Ok(response);
                    }
                }
                Err(err) => {
                    if last_attempt || !is_transient(&err) {
                        debug!(attempt, %method, %url, error = %err, "HTTP request failed");
                        return Err(InfraError::from(err).into());
                    }
                    warn!(attempt, %method, %url, error = %err, "HTTP request failed, retrying");
                }
            }

            tokio::time::sleep(self.backoff_delay(attempt)).await;
            attempt += 1;
        }
    }

    /// Exponential backoff: base, 2x base, 4x base, ... capped at 256x.
    fn backoff_delay(&self, failed_attempt: usize) -> Duration {
        let shift = failed_attempt.saturating_sub(1).min(8) as u32;
        self.base_backoff.saturating_mul(1u32 << shift)
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    max_attempts: usize,
    base_backoff: Duration,
    user_agent: Option<String>,
    default_headers: Option<reqwest::header::HeaderMap>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            max_attempts: DEFAULT_HTTP_MAX_ATTEMPTS,
            base_backoff: Duration::from_millis(200),
            user_agent: Some(concat!("accountdesk/", env!("CARGO_PKG_VERSION")).to_string()),
            default_headers: None,
        }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Total number of attempts (initial try + retries). Clamped to at least 1.
    pub fn max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    pub fn base_backoff(mut self, backoff: Duration) -> Self {
        self.base_backoff = backoff;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn default_headers(mut self, headers: reqwest::header::HeaderMap) -> Self {
        self.default_headers = Some(headers);
        self
    }

    pub fn build(self) -> Result<HttpClient, AccountDeskError> {
        let mut builder = ReqwestClient::builder().timeout(self.timeout).no_proxy();

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        if let Some(headers) = self.default_headers {
            builder = builder.default_headers(headers);
        }

        let client = builder.build().map_err(|err| AccountDeskError::from(InfraError::from(err)))?;

        Ok(HttpClient {
            client,
            max_attempts: self.max_attempts.max(1),
            base_backoff: self.base_backoff,
        })
    }
}

fn is_transient(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect() || err.is_request()
}

/// URL without its query string. Filters such as `email=eq.` carry personal
/// data and stay out of the logs.
fn redact_query(url: &reqwest::Url) -> String {
    let mut redacted = url.clone();
    redacted.set_query(None);
    redacted.to_string()
}
