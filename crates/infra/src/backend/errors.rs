//! Status classification for backend responses
//!
//! 401/403 are authentication rejections, 429 is rate limiting (only the
//! auth surface distinguishes it), 5xx are server rejections and everything
//! else non-2xx is a client rejection. All of them keep the status code and
//! the backend's own message.

use accountdesk_domain::{AccountDeskError, AuthError, DataError, StoreError};
use reqwest::{Response, StatusCode};
use serde::Deserialize;

/// A non-2xx response reduced to its status and best human-readable message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Rejection {
    pub status: StatusCode,
    pub message: String,
}

/// Error envelopes used by the three surfaces: `msg` (auth), `message`
/// (table and storage), `error_description` / `error` (token endpoint).
#[derive(Debug, Default, Deserialize)]
struct ErrorEnvelope {
    msg: Option<String>,
    message: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
}

impl Rejection {
    pub(crate) async fn from_response(response: Response) -> Self {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Self { status, message: extract_message(status, &body) }
    }

    pub(crate) fn into_auth_error(self) -> AuthError {
        if self.status == StatusCode::TOO_MANY_REQUESTS {
            AuthError::RateLimited(self.message)
        } else {
            AuthError::Rejected { status: self.status.as_u16(), message: self.message }
        }
    }

    pub(crate) fn into_store_error(self) -> StoreError {
        StoreError::Rejected { status: self.status.as_u16(), message: self.message }
    }

    pub(crate) fn into_data_error(self) -> DataError {
        DataError::Rejected { status: self.status.as_u16(), message: self.message }
    }
}

fn extract_message(status: StatusCode, body: &str) -> String {
    let envelope = serde_json::from_str::<ErrorEnvelope>(body).unwrap_or_default();
    envelope
        .msg
        .or(envelope.message)
        .or(envelope.error_description)
        .or(envelope.error)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| {
            let body = body.trim();
            if body.is_empty() {
                status.canonical_reason().unwrap_or("unknown status").to_string()
            } else {
                body.chars().take(200).collect()
            }
        })
}

pub(crate) fn auth_transport(err: AccountDeskError) -> AuthError {
    AuthError::Transport(err.to_string())
}

pub(crate) fn store_transport(err: AccountDeskError) -> StoreError {
    StoreError::Transport(err.to_string())
}

pub(crate) fn data_transport(err: AccountDeskError) -> DataError {
    DataError::Transport(err.to_string())
}
