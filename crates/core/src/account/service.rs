//! Account service - sign-up/update orchestration and sign-in
//!
//! `upsert_account` picks one of two branches from the session handed in by
//! the caller:
//!
//! - **update** (session present): email must match the session, then either
//!   a password change or a profile row update, never both
//! - **create** (no session): sign-up, photo upload, row insert
//!
//! Remote calls are strictly sequenced. Every invocation ends in exactly one
//! terminal notification (unless the failure is a silent rate limit) and the
//! form cache is only written after the final remote step succeeds.

use std::sync::Arc;

use accountdesk_domain::constants::messages;
use accountdesk_domain::{CachedForm, DataError, FormInput, Notice, Session, ValidationRejection};
use tracing::{debug, error, info, warn};

use super::errors::AccountError;
use super::form_cache::LocalFormCache;
use super::ports::{AuthGateway, Notifier, ObjectStoreGateway, RecordStoreGateway};

/// Successful end state of an upsert
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// New account and profile row; cache holds the new projection.
    Created(CachedForm),
    /// Existing row updated; cache holds the new projection.
    ProfileUpdated(CachedForm),
    /// Only the password changed. Profile row and cache untouched.
    PasswordUpdated,
}

impl UpsertOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Created(_) => messages::REGISTRATION_SUCCEEDED,
            Self::ProfileUpdated(_) => messages::PROFILE_UPDATED,
            Self::PasswordUpdated => messages::PASSWORD_UPDATED,
        }
    }
}

/// Account orchestration service
pub struct AccountService {
    auth: Arc<dyn AuthGateway>,
    objects: Arc<dyn ObjectStoreGateway>,
    records: Arc<dyn RecordStoreGateway>,
    cache: LocalFormCache,
    notifier: Arc<dyn Notifier>,
    photo_url_base: String,
}

impl AccountService {
    /// Create a new account service
    ///
    /// `photo_url_base` is the storage base URL joined with the public image
    /// path; object identifiers are appended to it verbatim.
    pub fn new(
        auth: Arc<dyn AuthGateway>,
        objects: Arc<dyn ObjectStoreGateway>,
        records: Arc<dyn RecordStoreGateway>,
        cache: LocalFormCache,
        notifier: Arc<dyn Notifier>,
        photo_url_base: impl Into<String>,
    ) -> Self {
        Self { auth, objects, records, cache, notifier, photo_url_base: photo_url_base.into() }
    }

    /// Session currently held by the auth gateway. Callers query this right
    /// before `upsert_account` and pass the result in.
    pub async fn current_session(&self) -> Option<Session> {
        self.auth.current_session().await
    }

    /// Create or update the account described by `input`.
    pub async fn upsert_account(
        &self,
        input: FormInput,
        existing_session: Option<&Session>,
    ) -> Result<UpsertOutcome, AccountError> {
        let result = match existing_session {
            Some(session) => self.update_existing(&input, session).await,
            None => self.create_new(&input).await,
        };

        match &result {
            Ok(outcome) => {
                info!(email = %input.email, outcome = outcome_label(outcome), "account upsert finished");
                self.notifier.notify(Notice::success(outcome.message()));
            }
            Err(err) => self.report_failure("account upsert", err),
        }

        result
    }

    /// Sign in and refresh the cached form from the stored profile row.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<CachedForm, AccountError> {
        let result = self.sign_in_and_load(email, password).await;

        match &result {
            Ok(_) => {
                info!(email, "sign-in finished");
                self.notifier.notify(Notice::success(messages::SIGN_IN_SUCCEEDED));
            }
            Err(err) => self.report_failure("sign-in", err),
        }

        result
    }

    /// Drop the session and the cached form.
    ///
    /// A failed logout keeps both, so the user can retry.
    pub async fn sign_out(&self) -> Result<(), AccountError> {
        let result = self.auth.sign_out().await.map_err(AccountError::SignOut);

        match &result {
            Ok(()) => {
                if let Err(err) = self.cache.clear() {
                    warn!(error = %err, "failed to clear cached form on sign-out");
                }
                info!("sign-out finished");
                self.notifier.notify(Notice::success(messages::SIGNED_OUT));
            }
            Err(err) => self.report_failure("sign-out", err),
        }

        result
    }

    /// Cached form used to pre-fill the form, if any.
    pub fn cached_form(&self) -> Option<CachedForm> {
        match self.cache.load() {
            Ok(form) => form,
            Err(err) => {
                warn!(error = %err, "failed to read cached form");
                None
            }
        }
    }

    /// Email immutability is checked before anything else, so a submission
    /// with a mismatched email is rejected even when it only changes the
    /// password.
    async fn update_existing(
        &self,
        input: &FormInput,
        session: &Session,
    ) -> Result<UpsertOutcome, AccountError> {
        if session.email() != input.email {
            warn!(session_email = %session.email(), requested_email = %input.email, "refusing to change account email");
            return Err(ValidationRejection::EmailChangeNotAllowed.into());
        }

        if !input.password.is_empty() {
            self.auth
                .update_password(&input.password)
                .await
                .map_err(AccountError::PasswordUpdate)?;
            info!(email = %input.email, "password updated");
            return Ok(UpsertOutcome::PasswordUpdated);
        }

        let mut row = input.to_profile_row(None)?;
        self.records.update_by_email(&input.email, &row).await.map_err(AccountError::Update)?;
        debug!(email = %input.email, "profile row updated");

        row.photo_url = self
            .cached_form()
            .filter(|cached| cached.email == input.email)
            .and_then(|cached| cached.photo_url);
        let cached = CachedForm::from_row(&row);
        self.store_cached_form(&cached);

        Ok(UpsertOutcome::ProfileUpdated(cached))
    }

    async fn create_new(&self, input: &FormInput) -> Result<UpsertOutcome, AccountError> {
        let photo = input.photo.as_ref().ok_or(ValidationRejection::PhotoRequired)?;
        let mut row = input.to_profile_row(None)?;

        // A failed sign-up is reported but the remaining steps still run.
        match self.auth.sign_up(&input.email, &input.password).await {
            Ok(account) => {
                debug!(email = %input.email, user_id = %account.user_id, confirmed = account.session.is_some(), "account created");
            }
            Err(err) if err.is_rate_limited() => {
                warn!(error = %err, "sign-up rate limited; continuing");
            }
            Err(err) => {
                error!(error = %err, "sign-up failed; continuing");
                self.notifier.notify(Notice::error(messages::GENERIC_SERVER_ERROR));
            }
        }

        let object_id = self.objects.upload(photo).await.map_err(AccountError::Upload)?;
        row.photo_url = Some(format!("{}{}", self.photo_url_base, object_id));
        debug!(object_id = %object_id, "photo uploaded");

        self.records.insert(&row).await.map_err(AccountError::Insert)?;
        debug!(email = %input.email, "profile row inserted");

        let cached = CachedForm::from_row(&row);
        self.store_cached_form(&cached);

        Ok(UpsertOutcome::Created(cached))
    }

    async fn sign_in_and_load(&self, email: &str, password: &str) -> Result<CachedForm, AccountError> {
        self.auth.sign_in(email, password).await.map_err(AccountError::SignIn)?;

        let row = self
            .records
            .select_by_email(email)
            .await
            .map_err(AccountError::Lookup)?
            .ok_or_else(|| AccountError::Lookup(DataError::NotFound(email.to_string())))?;

        let cached = CachedForm::from_row(&row);
        self.store_cached_form(&cached);
        Ok(cached)
    }

    fn store_cached_form(&self, form: &CachedForm) {
        // The remote write already succeeded; a local cache failure only
        // costs the pre-fill.
        if let Err(err) = self.cache.save(form) {
            error!(error = %err, "failed to write cached form");
        }
    }

    fn report_failure(&self, operation: &str, err: &AccountError) {
        match err.user_message() {
            Some(message) => {
                error!(operation, error = %err, "operation failed");
                self.notifier.notify(Notice::error(message));
            }
            None => warn!(operation, error = %err, "operation rate limited"),
        }
    }
}

fn outcome_label(outcome: &UpsertOutcome) -> &'static str {
    match outcome {
        UpsertOutcome::Created(_) => "created",
        UpsertOutcome::ProfileUpdated(_) => "profile_updated",
        UpsertOutcome::PasswordUpdated => "password_updated",
    }
}
