//! Recording fakes for the account ports
//!
//! Every gateway call is appended to a shared `CallLog` so tests can assert
//! the exact order of remote calls made by one orchestration.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use accountdesk_core::{
    AccountService, AuthGateway, KeyValueStore, LocalFormCache, Notifier, ObjectStoreGateway,
    RecordStoreGateway,
};
use accountdesk_domain::constants::FORM_CACHE_KEY;
use accountdesk_domain::{
    AccountRef, AuthError, DataError, FormInput, Gender, Notice, PhotoFile, ProfileRow,
    Result as DomainResult, RowRef, Session, SessionUser, StoreError,
};
use async_trait::async_trait;
use parking_lot::Mutex;

pub const PHOTO_URL_BASE: &str = "https://demo.example.co/storage/v1/object/public/Files/";

/// One remote call observed by a fake gateway.
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayCall {
    SignUp { email: String },
    SignIn { email: String },
    UpdatePassword,
    SignOut,
    Upload { name: String },
    Insert(ProfileRow),
    UpdateByEmail { email: String, row: ProfileRow },
    SelectByEmail { email: String },
}

#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<GatewayCall>>>);

impl CallLog {
    pub fn push(&self, call: GatewayCall) {
        self.0.lock().push(call);
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.0.lock().clone()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.calls()
            .iter()
            .map(|call| match call {
                GatewayCall::SignUp { .. } => "sign_up",
                GatewayCall::SignIn { .. } => "sign_in",
                GatewayCall::UpdatePassword => "update_password",
                GatewayCall::SignOut => "sign_out",
                GatewayCall::Upload { .. } => "upload",
                GatewayCall::Insert(_) => "insert",
                GatewayCall::UpdateByEmail { .. } => "update_by_email",
                GatewayCall::SelectByEmail { .. } => "select_by_email",
            })
            .collect()
    }
}

/// Identity service fake. Failures are injected per operation.
#[derive(Default)]
pub struct FakeAuth {
    log: CallLog,
    pub sign_up_error: Mutex<Option<AuthError>>,
    pub sign_in_error: Mutex<Option<AuthError>>,
    pub update_password_error: Mutex<Option<AuthError>>,
    pub sign_out_error: Mutex<Option<AuthError>>,
    pub session: Mutex<Option<Session>>,
}

#[async_trait]
impl AuthGateway for FakeAuth {
    async fn sign_up(&self, email: &str, _password: &str) -> Result<AccountRef, AuthError> {
        self.log.push(GatewayCall::SignUp { email: email.to_string() });
        if let Some(err) = self.sign_up_error.lock().clone() {
            return Err(err);
        }
        Ok(AccountRef { user_id: "user-1".into(), email: Some(email.to_string()), session: None })
    }

    async fn sign_in(&self, email: &str, _password: &str) -> Result<Session, AuthError> {
        self.log.push(GatewayCall::SignIn { email: email.to_string() });
        if let Some(err) = self.sign_in_error.lock().clone() {
            return Err(err);
        }
        let session = session_for(email);
        *self.session.lock() = Some(session.clone());
        Ok(session)
    }

    async fn update_password(&self, _new_password: &str) -> Result<(), AuthError> {
        self.log.push(GatewayCall::UpdatePassword);
        match self.update_password_error.lock().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn current_session(&self) -> Option<Session> {
        self.session.lock().clone()
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.log.push(GatewayCall::SignOut);
        if let Some(err) = self.sign_out_error.lock().clone() {
            return Err(err);
        }
        *self.session.lock() = None;
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeObjectStore {
    log: CallLog,
    pub error: Mutex<Option<StoreError>>,
}

#[async_trait]
impl ObjectStoreGateway for FakeObjectStore {
    async fn upload(&self, photo: &PhotoFile) -> Result<String, StoreError> {
        self.log.push(GatewayCall::Upload { name: photo.name.clone() });
        if let Some(err) = self.error.lock().clone() {
            return Err(err);
        }
        Ok(format!("{}1716000000000", photo.name))
    }
}

/// Table fake keyed by email, enforcing one row per email like the remote.
#[derive(Default)]
pub struct FakeRecordStore {
    log: CallLog,
    pub rows: Mutex<HashMap<String, ProfileRow>>,
    pub insert_error: Mutex<Option<DataError>>,
    pub update_error: Mutex<Option<DataError>>,
    pub select_error: Mutex<Option<DataError>>,
}

#[async_trait]
impl RecordStoreGateway for FakeRecordStore {
    async fn insert(&self, profile: &ProfileRow) -> Result<RowRef, DataError> {
        self.log.push(GatewayCall::Insert(profile.clone()));
        if let Some(err) = self.insert_error.lock().clone() {
            return Err(err);
        }
        let mut rows = self.rows.lock();
        if rows.contains_key(&profile.email) {
            return Err(DataError::Rejected {
                status: 409,
                message: "duplicate key value violates unique constraint".into(),
            });
        }
        let id = rows.len() as i64 + 1;
        rows.insert(profile.email.clone(), ProfileRow { id: Some(id), ..profile.clone() });
        Ok(RowRef { id: Some(id) })
    }

    async fn update_by_email(&self, email: &str, profile: &ProfileRow) -> Result<RowRef, DataError> {
        self.log.push(GatewayCall::UpdateByEmail { email: email.to_string(), row: profile.clone() });
        if let Some(err) = self.update_error.lock().clone() {
            return Err(err);
        }
        let mut rows = self.rows.lock();
        let existing = rows.get_mut(email).ok_or_else(|| DataError::NotFound(email.to_string()))?;
        let photo_url = profile.photo_url.clone().or_else(|| existing.photo_url.clone());
        *existing = ProfileRow { id: existing.id, photo_url, ..profile.clone() };
        Ok(RowRef { id: existing.id })
    }

    async fn select_by_email(&self, email: &str) -> Result<Option<ProfileRow>, DataError> {
        self.log.push(GatewayCall::SelectByEmail { email: email.to_string() });
        if let Some(err) = self.select_error.lock().clone() {
            return Err(err);
        }
        Ok(self.rows.lock().get(email).cloned())
    }
}

/// In-memory stand-in for device storage.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> DomainResult<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> DomainResult<()> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> DomainResult<()> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().push(notice);
    }
}

/// All fakes plus the service under test, sharing one call log.
pub struct Harness {
    pub log: CallLog,
    pub auth: Arc<FakeAuth>,
    pub objects: Arc<FakeObjectStore>,
    pub records: Arc<FakeRecordStore>,
    pub store: Arc<MemoryStore>,
    pub notifier: Arc<RecordingNotifier>,
    pub service: AccountService,
}

impl Harness {
    pub fn new() -> Self {
        let log = CallLog::default();
        let auth = Arc::new(FakeAuth { log: log.clone(), ..Default::default() });
        let objects = Arc::new(FakeObjectStore { log: log.clone(), ..Default::default() });
        let records = Arc::new(FakeRecordStore { log: log.clone(), ..Default::default() });
        let store = Arc::new(MemoryStore::default());
        let notifier = Arc::new(RecordingNotifier::default());

        let service = AccountService::new(
            auth.clone(),
            objects.clone(),
            records.clone(),
            LocalFormCache::new(store.clone()),
            notifier.clone(),
            PHOTO_URL_BASE,
        );

        Self { log, auth, objects, records, store, notifier, service }
    }

    /// Raw JSON stored under the form cache key.
    pub fn cached_json(&self) -> Option<serde_json::Value> {
        self.store.raw(FORM_CACHE_KEY).and_then(|raw| serde_json::from_str(&raw).ok())
    }

    /// Seed a stored profile row without recording a call.
    pub fn seed_row(&self, row: ProfileRow) {
        self.records.rows.lock().insert(row.email.clone(), row);
    }
}

pub fn session_for(email: &str) -> Session {
    Session {
        access_token: "access-token".into(),
        refresh_token: None,
        expires_at: None,
        user: SessionUser { id: "user-1".into(), email: Some(email.to_string()) },
    }
}

pub fn sample_input() -> FormInput {
    FormInput {
        username: "bob".into(),
        email: "a@b.com".into(),
        address: "221B Baker Street".into(),
        phone: "+441234567890".into(),
        password: "longenough1".into(),
        gender: Gender::Male,
        date_of_birth: "2000-01-31".into(),
        year_of_study: "2021".into(),
        expertise_tags: "go,rust".into(),
        accepted_terms: true,
        photo: Some(PhotoFile::new("me.png", "image/png", vec![0x89, 0x50, 0x4e, 0x47])),
    }
}

pub fn stored_row(email: &str) -> ProfileRow {
    let mut row = sample_input().to_profile_row(Some(format!("{PHOTO_URL_BASE}old.png"))).unwrap();
    row.email = email.to_string();
    row.id = Some(7);
    row
}
