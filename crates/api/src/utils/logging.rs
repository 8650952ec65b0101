use std::time::Duration;

use accountdesk_core::AccountError;
use accountdesk_domain::{AuthError, ValidationRejection};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber.
///
/// The filter comes from `RUST_LOG` and defaults to `info`. Calling this more
/// than once is harmless; later calls leave the first subscriber in place.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_target(false).try_init();
}

/// Log the outcome of a command execution with structured fields.
///
/// `command` is a stable identifier such as `"account::submit_form"`; never
/// pass user data through it.
#[inline]
pub fn log_command_execution(command: &str, elapsed: Duration, outcome: Result<(), &'static str>) {
    let duration_ms = elapsed.as_millis() as u64;

    match outcome {
        Ok(()) => info!(command, duration_ms, "command_execution_success"),
        Err(error_type) => warn!(command, duration_ms, error_type, "command_execution_failure"),
    }
}

/// Convert an `AccountError` into a stable label suitable for logging.
#[inline]
pub fn error_label(error: &AccountError) -> &'static str {
    match error {
        AccountError::PasswordUpdate(AuthError::RateLimited(_))
        | AccountError::SignIn(AuthError::RateLimited(_)) => "rate_limited",
        AccountError::PasswordUpdate(_) => "password_update",
        AccountError::SignIn(_) => "sign_in",
        AccountError::SignOut(_) => "sign_out",
        AccountError::Upload(_) => "upload",
        AccountError::Insert(_) => "insert",
        AccountError::Update(_) => "update",
        AccountError::Lookup(_) => "lookup",
        AccountError::Rejected(ValidationRejection::EmailChangeNotAllowed) => "email_change",
        AccountError::Rejected(ValidationRejection::PhotoRequired) => "photo_required",
        AccountError::Rejected(ValidationRejection::InvalidFields(_)) => "invalid_fields",
    }
}
