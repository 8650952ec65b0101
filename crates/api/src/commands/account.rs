//! Account commands: submit the sign-up form, sign in, sign out and read the
//! cached form used for pre-filling.
//!
//! Every command logs its execution time and outcome and flattens errors to
//! strings at the boundary.

use std::time::Instant;

use accountdesk_core::UpsertOutcome;
use accountdesk_domain::constants::messages;
use accountdesk_domain::{CachedForm, FormInput, Notice};
use tracing::{info, warn};

use crate::context::AppContext;
use crate::utils::logging::{error_label, log_command_execution};

/// Validate the form and create or update the account.
///
/// Whether this creates or updates is decided by the session held at the
/// moment of submission. Field violations are reported with a single
/// notification and never reach the backend.
pub async fn submit_form(ctx: &AppContext, input: FormInput) -> Result<UpsertOutcome, String> {
    let command_name = "account::submit_form";
    let start = Instant::now();

    let has_cached_form = ctx.accounts.cached_form().is_some();
    if let Err(rejection) = input.validate(has_cached_form) {
        warn!(command = command_name, error = %rejection, "form rejected");
        ctx.notifier.notify(Notice::error(messages::INVALID_FORM));
        log_command_execution(command_name, start.elapsed(), Err("invalid_fields"));
        return Err(rejection.to_string());
    }

    let session = ctx.accounts.current_session().await;
    info!(command = command_name, update = session.is_some(), "Executing submit_form");

    let result = ctx.accounts.upsert_account(input, session.as_ref()).await;

    log_command_execution(command_name, start.elapsed(), result.as_ref().map(|_| ()).map_err(error_label));
    result.map_err(|e| e.to_string())
}

pub async fn sign_in(ctx: &AppContext, email: &str, password: &str) -> Result<CachedForm, String> {
    let command_name = "account::sign_in";
    let start = Instant::now();

    let result = ctx.accounts.sign_in(email, password).await;

    log_command_execution(command_name, start.elapsed(), result.as_ref().map(|_| ()).map_err(error_label));
    result.map_err(|e| e.to_string())
}

pub async fn sign_out(ctx: &AppContext) -> Result<(), String> {
    let command_name = "account::sign_out";
    let start = Instant::now();

    let result = ctx.accounts.sign_out().await;

    log_command_execution(command_name, start.elapsed(), result.as_ref().map(|_| ()).map_err(error_label));
    result.map_err(|e| e.to_string())
}

/// Cached form for pre-filling, or `None` when nothing is cached.
pub fn show_form(ctx: &AppContext) -> Option<CachedForm> {
    let start = Instant::now();
    let form = ctx.accounts.cached_form();
    log_command_execution("account::show_form", start.elapsed(), Ok(()));
    form
}
