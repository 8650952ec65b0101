//! Error types used throughout the application
//!
//! `AccountDeskError` covers local concerns (configuration, transport setup,
//! serialization, device storage). The gateway taxonomy (`AuthError`,
//! `StoreError`, `DataError`) and `ValidationRejection` describe the failures
//! the account orchestration reacts to.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for AccountDesk
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum AccountDeskError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Local storage error: {0}")]
    LocalStore(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for AccountDesk operations
pub type Result<T> = std::result::Result<T, AccountDeskError>;

/// Failures reported by the hosted identity service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// HTTP 429. Logged only, never shown to the user.
    #[error("rate limited: {0}")]
    RateLimited(String),

    #[error("auth service rejected request with status {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("auth transport failure: {0}")]
    Transport(String),

    #[error("no active session")]
    SessionRequired,
}

impl AuthError {
    /// Whether this failure is the rate-limited sub-case.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited(_))
    }

    /// HTTP status carried by the failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RateLimited(_) => Some(429),
            Self::Rejected { status, .. } => Some(*status),
            Self::Transport(_) | Self::SessionRequired => None,
        }
    }
}

/// Failures reported by the object storage service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("storage rejected upload with status {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("storage transport failure: {0}")]
    Transport(String),

    #[error("unexpected storage response: {0}")]
    Decode(String),
}

/// Failures reported by the row-oriented table API.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    #[error("no profile row for {0}")]
    NotFound(String),

    #[error("record store rejected request with status {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("record store transport failure: {0}")]
    Transport(String),

    #[error("unexpected record store response: {0}")]
    Decode(String),
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field: field.into(), message: message.into() }
    }
}

/// Local checks that stop an operation before any remote call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationRejection {
    #[error("the email of an existing account cannot be changed")]
    EmailChangeNotAllowed,

    #[error("a photo is required to create an account")]
    PhotoRequired,

    #[error("invalid form fields: {}", describe_fields(.0))]
    InvalidFields(Vec<FieldError>),
}

fn describe_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|err| format!("{} ({})", err.field, err.message))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limited_reports_status_429() {
        let err = AuthError::RateLimited("slow down".into());
        assert!(err.is_rate_limited());
        assert_eq!(err.status(), Some(429));
    }

    #[test]
    fn rejected_auth_error_is_not_rate_limited() {
        let err = AuthError::Rejected { status: 400, message: "weak password".into() };
        assert!(!err.is_rate_limited());
        assert_eq!(err.status(), Some(400));
        assert_eq!(AuthError::SessionRequired.status(), None);
    }

    #[test]
    fn invalid_fields_lists_every_field() {
        let err = ValidationRejection::InvalidFields(vec![
            FieldError::new("username", "Username is required"),
            FieldError::new("phone", "Enter a valid phone number"),
        ]);
        let text = err.to_string();
        assert!(text.contains("username (Username is required)"));
        assert!(text.contains("phone (Enter a valid phone number)"));
    }

    #[test]
    fn domain_error_serializes_with_type_tag() {
        let json = serde_json::to_value(AccountDeskError::Config("missing url".into()))
            .expect("serialize");
        assert_eq!(json["type"], "Config");
        assert_eq!(json["message"], "missing url");
    }
}
