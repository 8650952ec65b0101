//! Conversions from external infrastructure errors into domain errors.

use std::io::Error as IoError;

use accountdesk_domain::AccountDeskError;
use reqwest::Error as HttpError;
use serde_json::Error as JsonError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub AccountDeskError);

impl From<InfraError> for AccountDeskError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<AccountDeskError> for InfraError {
    fn from(value: AccountDeskError) -> Self {
        InfraError(value)
    }
}

trait IntoAccountDeskError {
    fn into_domain(self) -> AccountDeskError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → AccountDeskError */
/* -------------------------------------------------------------------------- */

impl IntoAccountDeskError for HttpError {
    fn into_domain(self) -> AccountDeskError {
        if self.is_timeout() {
            return AccountDeskError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return AccountDeskError::Network(format!("HTTP connection failure: {self}"));
        }

        if self.is_builder() {
            return AccountDeskError::Config(format!("invalid HTTP request: {self}"));
        }

        if self.is_decode() {
            return AccountDeskError::Serialization(format!("HTTP body decode failed: {self}"));
        }

        if let Some(status) = self.status() {
            return AccountDeskError::Network(format!(
                "HTTP {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("unknown status")
            ));
        }

        AccountDeskError::Network(format!("HTTP request failed: {self}"))
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_domain())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → AccountDeskError */
/* -------------------------------------------------------------------------- */

impl IntoAccountDeskError for JsonError {
    fn into_domain(self) -> AccountDeskError {
        AccountDeskError::Serialization(format!(
            "invalid JSON at line {} column {}: {}",
            self.line(),
            self.column(),
            self
        ))
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(value.into_domain())
    }
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → AccountDeskError */
/* -------------------------------------------------------------------------- */

impl IntoAccountDeskError for IoError {
    fn into_domain(self) -> AccountDeskError {
        use std::io::ErrorKind;

        match self.kind() {
            ErrorKind::PermissionDenied => {
                AccountDeskError::LocalStore(format!("permission denied: {self}"))
            }
            ErrorKind::NotFound => AccountDeskError::LocalStore(format!("file not found: {self}")),
            _ => AccountDeskError::LocalStore(self.to_string()),
        }
    }
}

impl From<IoError> for InfraError {
    fn from(value: IoError) -> Self {
        InfraError(value.into_domain())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
