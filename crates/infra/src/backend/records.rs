//! Profile rows over the `/rest/v1` table API
//!
//! Rows are addressed by email through `email=eq.<email>` filters. Writes ask
//! for `return=representation` so the affected rows come back in the body;
//! an update that returns no rows matched nothing.

use accountdesk_core::RecordStoreGateway;
use accountdesk_domain::{DataError, ProfileRow, RowRef};
use async_trait::async_trait;
use reqwest::{Method, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::errors::{data_transport, Rejection};
use super::BackendClient;

const RETURN_REPRESENTATION: (&str, &str) = ("Prefer", "return=representation");

pub struct HttpRecordStoreGateway {
    client: BackendClient,
    table_path: String,
}

impl HttpRecordStoreGateway {
    pub fn new(client: BackendClient, table: &str) -> Self {
        Self { client, table_path: format!("/rest/v1/{}", urlencoding::encode(table)) }
    }
}

fn email_filter(email: &str) -> (&'static str, String) {
    ("email", format!("eq.{email}"))
}

#[async_trait]
impl RecordStoreGateway for HttpRecordStoreGateway {
    async fn insert(&self, profile: &ProfileRow) -> Result<RowRef, DataError> {
        let request = self
            .client
            .request(Method::POST, &self.table_path)
            .header(RETURN_REPRESENTATION.0, RETURN_REPRESENTATION.1)
            .json(&[profile]);
        let response = self.client.send(request).await.map_err(data_transport)?;

        let rows: Vec<RowRef> = read_rows(response).await?;
        debug!(table = %self.table_path, rows = rows.len(), "profile row inserted");
        Ok(rows.into_iter().next().unwrap_or_default())
    }

    async fn update_by_email(&self, email: &str, profile: &ProfileRow) -> Result<RowRef, DataError> {
        let request = self
            .client
            .request(Method::PATCH, &self.table_path)
            .query(&[email_filter(email)])
            .header(RETURN_REPRESENTATION.0, RETURN_REPRESENTATION.1)
            .json(profile);
        let response = self.client.send(request).await.map_err(data_transport)?;

        let rows: Vec<RowRef> = read_rows(response).await?;
        debug!(table = %self.table_path, rows = rows.len(), "profile row updated");
        rows.into_iter().next().ok_or_else(|| DataError::NotFound(email.to_string()))
    }

    async fn select_by_email(&self, email: &str) -> Result<Option<ProfileRow>, DataError> {
        let (column, filter) = email_filter(email);
        let request = self
            .client
            .request(Method::GET, &self.table_path)
            .query(&[(column, filter.as_str()), ("select", "*")]);
        let response = self.client.send(request).await.map_err(data_transport)?;

        let rows: Vec<ProfileRow> = read_rows(response).await?;
        Ok(rows.into_iter().next())
    }
}

async fn read_rows<T: DeserializeOwned>(response: Response) -> Result<Vec<T>, DataError> {
    if !response.status().is_success() {
        return Err(Rejection::from_response(response).await.into_data_error());
    }
    response.json().await.map_err(|err| DataError::Decode(format!("table response: {err}")))
}
