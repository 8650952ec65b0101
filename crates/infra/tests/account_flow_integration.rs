//! End-to-end account flows: core service wired to the HTTP gateways against
//! a mock backend, with the file-backed store as device storage.

use std::sync::Arc;

use accountdesk_core::{AccountService, LocalFormCache, Notifier, UpsertOutcome};
use accountdesk_domain::constants::messages;
use accountdesk_domain::{BackendConfig, Config, FormInput, Gender, Notice, PhotoFile};
use accountdesk_infra::{
    BackendClient, FileKeyValueStore, HttpAuthGateway, HttpObjectStoreGateway,
    HttpRecordStoreGateway,
};
use parking_lot::Mutex;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
struct CollectingNotifier(Mutex<Vec<Notice>>);

impl Notifier for CollectingNotifier {
    fn notify(&self, notice: Notice) {
        self.0.lock().push(notice);
    }
}

struct App {
    service: AccountService,
    notices: Arc<CollectingNotifier>,
    cache_path: std::path::PathBuf,
    _dir: TempDir,
}

fn app(server: &MockServer) -> App {
    let dir = TempDir::new().unwrap();
    let cache_path = dir.path().join("cache.json");
    let config = Config {
        backend: BackendConfig {
            url: server.uri(),
            anon_key: "anon-key".into(),
            image_path_prefix: "/storage/v1/object/public/Files/".into(),
            bucket: "Files".into(),
            profile_table: "Users".into(),
        },
        http: Default::default(),
        cache: Default::default(),
    };

    let store = Arc::new(FileKeyValueStore::open(&cache_path).unwrap());
    let client = BackendClient::from_config(&config, store.clone()).unwrap();
    let notices = Arc::new(CollectingNotifier::default());

    let service = AccountService::new(
        Arc::new(HttpAuthGateway::new(client.clone())),
        Arc::new(HttpObjectStoreGateway::new(client.clone(), &config.backend.bucket)),
        Arc::new(HttpRecordStoreGateway::new(client, &config.backend.profile_table)),
        LocalFormCache::new(store),
        notices.clone(),
        config.backend.photo_url_base(),
    );

    App { service, notices, cache_path, _dir: dir }
}

fn form() -> FormInput {
    FormInput {
        username: "bob".into(),
        email: "a@b.com".into(),
        address: "221B Baker Street".into(),
        phone: "+441234567890".into(),
        password: "longenough1".into(),
        gender: Gender::Female,
        date_of_birth: "2000-01-31".into(),
        year_of_study: "2021".into(),
        expertise_tags: "go,rust".into(),
        accepted_terms: true,
        photo: Some(PhotoFile::new("me.png", "image/png", vec![7, 7, 7])),
    }
}

fn session_body() -> serde_json::Value {
    json!({
        "access_token": "token-1",
        "token_type": "bearer",
        "expires_in": 3600,
        "refresh_token": "refresh-1",
        "user": { "id": "user-1", "email": "a@b.com" }
    })
}

#[tokio::test]
async fn register_then_update_profile() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/signup"))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_body()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path_regex(r"^/storage/v1/object/Files/me\.png\d+$"))
        .and(header("authorization", "Bearer token-1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "Key": "Files/me.png1716000000000" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/Users"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([{ "id": 1 }])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/rest/v1/Users"))
        .and(query_param("email", "eq.a@b.com"))
        .and(header("authorization", "Bearer token-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": 1 }])))
        .expect(1)
        .mount(&server)
        .await;

    let app = app(&server);
    assert!(app.service.current_session().await.is_none());

    let created = app.service.upsert_account(form(), None).await.unwrap();
    let UpsertOutcome::Created(cached) = created else {
        panic!("expected Created outcome");
    };
    let expected_photo =
        format!("{}/storage/v1/object/public/Files/me.png1716000000000", server.uri());
    assert_eq!(cached.photo_url.as_deref(), Some(expected_photo.as_str()));

    let session = app.service.current_session().await.expect("session after sign-up");
    let update = FormInput {
        username: "bobby".into(),
        password: String::new(),
        photo: None,
        ..form()
    };
    let updated = app.service.upsert_account(update, Some(&session)).await.unwrap();
    assert!(matches!(updated, UpsertOutcome::ProfileUpdated(_)));

    let stored: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&app.cache_path).unwrap()).unwrap();
    let form_entry: serde_json::Value =
        serde_json::from_str(stored["adimis-schema-form-FORMDATA"].as_str().unwrap()).unwrap();
    assert_eq!(form_entry["username"], "bobby");
    assert_eq!(form_entry["password"], "");
    assert_eq!(form_entry["expertise"], "go,rust");
    assert_eq!(form_entry["file"], expected_photo);

    let shown: Vec<String> = app.notices.0.lock().iter().map(|n| n.message.clone()).collect();
    assert_eq!(shown, vec![messages::REGISTRATION_SUCCEEDED, messages::PROFILE_UPDATED]);
}

#[tokio::test]
async fn rate_limited_password_change_stays_silent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_body()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/Users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "username": "bob",
            "email": "a@b.com",
            "address": "221B Baker Street",
            "phone": "+441234567890",
            "gender": "female",
            "date": "2000-01-31",
            "year": 2021,
            "expertise": ["go", "rust"],
            "terms": true
        }])))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/auth/v1/user"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({ "msg": "rate limit" })))
        .expect(1)
        .mount(&server)
        .await;

    let app = app(&server);
    let cached = app.service.sign_in("a@b.com", "longenough1").await.unwrap();
    assert_eq!(cached.expertise_tags, "go,rust");
    assert_eq!(cached.gender, Gender::Female);

    let session = app.service.current_session().await.unwrap();
    let change = FormInput { password: "newpass123".into(), photo: None, ..form() };
    assert!(app.service.upsert_account(change, Some(&session)).await.is_err());

    let shown: Vec<String> = app.notices.0.lock().iter().map(|n| n.message.clone()).collect();
    assert_eq!(shown, vec![messages::SIGN_IN_SUCCEEDED]);
}
