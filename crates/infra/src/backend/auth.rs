//! Identity gateway over the `/auth/v1` surface

use accountdesk_core::AuthGateway;
use accountdesk_domain::{AccountRef, AuthError, Session, SessionUser};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Method, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::errors::{auth_transport, Rejection};
use super::session::SessionSlot;
use super::BackendClient;

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct PasswordChange<'a> {
    password: &'a str,
}

#[derive(Serialize)]
struct RefreshGrant<'a> {
    refresh_token: &'a str,
}

#[derive(Debug, Deserialize)]
struct UserPayload {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

impl From<UserPayload> for SessionUser {
    fn from(user: UserPayload) -> Self {
        SessionUser { id: user.id, email: user.email }
    }
}

#[derive(Debug, Deserialize)]
struct SessionPayload {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    expires_at: Option<i64>,
    user: UserPayload,
}

impl SessionPayload {
    fn into_session(self, now_unix: i64) -> Session {
        let expires_at = self.expires_at.or_else(|| self.expires_in.map(|secs| now_unix + secs));
        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
            user: self.user.into(),
        }
    }
}

/// Sign-up answers with a session when the account is usable right away,
/// or with the bare user while email confirmation is pending.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpPayload {
    Session(SessionPayload),
    User(UserPayload),
}

/// `AuthGateway` backed by the hosted identity service.
///
/// Sessions obtained by sign-up or sign-in are written to the shared
/// [`SessionSlot`], which is where the other gateways take their bearer
/// token from.
pub struct HttpAuthGateway {
    client: BackendClient,
}

impl HttpAuthGateway {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    fn sessions(&self) -> &SessionSlot {
        self.client.sessions()
    }

    fn remember(&self, session: &Session) {
        if let Err(err) = self.sessions().save(session) {
            warn!(error = %err, "failed to persist session");
        }
    }

    fn forget(&self) {
        if let Err(err) = self.sessions().clear() {
            warn!(error = %err, "failed to clear stored session");
        }
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Session, AuthError> {
        let request = self
            .client
            .anonymous_request(Method::POST, "/auth/v1/token")
            .query(&[("grant_type", "refresh_token")])
            .json(&RefreshGrant { refresh_token });
        let response = self.client.send(request).await.map_err(auth_transport)?;
        let payload: SessionPayload = read_success(response).await?;
        Ok(payload.into_session(Utc::now().timestamp()))
    }
}

#[async_trait]
impl AuthGateway for HttpAuthGateway {
    async fn sign_up(&self, email: &str, password: &str) -> Result<AccountRef, AuthError> {
        let request = self
            .client
            .anonymous_request(Method::POST, "/auth/v1/signup")
            .json(&Credentials { email, password });
        let response = self.client.send(request).await.map_err(auth_transport)?;

        match read_success(response).await? {
            SignUpPayload::Session(payload) => {
                let session = payload.into_session(Utc::now().timestamp());
                self.remember(&session);
                info!(user_id = %session.user.id, "account created and signed in");
                Ok(AccountRef {
                    user_id: session.user.id.clone(),
                    email: session.user.email.clone(),
                    session: Some(session),
                })
            }
            SignUpPayload::User(user) => {
                info!(user_id = %user.id, "account created, confirmation pending");
                Ok(AccountRef { user_id: user.id, email: user.email, session: None })
            }
        }
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let request = self
            .client
            .anonymous_request(Method::POST, "/auth/v1/token")
            .query(&[("grant_type", "password")])
            .json(&Credentials { email, password });
        let response = self.client.send(request).await.map_err(auth_transport)?;

        let payload: SessionPayload = read_success(response).await?;
        let session = payload.into_session(Utc::now().timestamp());
        self.remember(&session);
        info!(user_id = %session.user.id, "signed in");
        Ok(session)
    }

    async fn update_password(&self, new_password: &str) -> Result<(), AuthError> {
        let session = self.current_session().await.ok_or(AuthError::SessionRequired)?;

        let request = self
            .client
            .request_with_token(Method::PUT, "/auth/v1/user", &session.access_token)
            .json(&PasswordChange { password: new_password });
        let response = self.client.send(request).await.map_err(auth_transport)?;

        if !response.status().is_success() {
            return Err(Rejection::from_response(response).await.into_auth_error());
        }
        info!(user_id = %session.user.id, "password changed");
        Ok(())
    }

    async fn current_session(&self) -> Option<Session> {
        let session = self.sessions().load()?;
        if !session.is_expired_at(Utc::now().timestamp()) {
            return Some(session);
        }

        let Some(refresh_token) = session.refresh_token.as_deref() else {
            debug!("stored session expired without refresh token");
            self.forget();
            return None;
        };

        match self.refresh(refresh_token).await {
            Ok(refreshed) => {
                debug!(user_id = %refreshed.user.id, "session refreshed");
                self.remember(&refreshed);
                Some(refreshed)
            }
            Err(err) => {
                warn!(error = %err, "session refresh failed; signing out locally");
                self.forget();
                None
            }
        }
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let Some(session) = self.sessions().load() else {
            return Ok(());
        };

        let request =
            self.client.request_with_token(Method::POST, "/auth/v1/logout", &session.access_token);
        let response = self.client.send(request).await.map_err(auth_transport)?;

        let status = response.status();
        // An already invalid token means the server side is signed out too.
        let gone = matches!(
            status,
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND
        );
        if !status.is_success() && !gone {
            return Err(Rejection::from_response(response).await.into_auth_error());
        }

        self.forget();
        info!(user_id = %session.user.id, "signed out");
        Ok(())
    }
}

async fn read_success<T>(response: Response) -> Result<T, AuthError>
where
    T: for<'de> Deserialize<'de>,
{
    if !response.status().is_success() {
        return Err(Rejection::from_response(response).await.into_auth_error());
    }
    response
        .json()
        .await
        .map_err(|err| AuthError::Transport(format!("unexpected auth response: {err}")))
}
