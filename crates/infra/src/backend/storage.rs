//! Photo uploads over the `/storage/v1` surface

use accountdesk_core::ObjectStoreGateway;
use accountdesk_domain::constants::PHOTO_CACHE_CONTROL_SECS;
use accountdesk_domain::{PhotoFile, StoreError};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE};
use reqwest::Method;
use serde::Deserialize;
use tracing::debug;

use super::errors::{store_transport, Rejection};
use super::BackendClient;

#[derive(Debug, Deserialize)]
struct UploadReceipt {
    /// `<bucket>/<object name>`
    #[serde(rename = "Key")]
    key: String,
}

pub struct HttpObjectStoreGateway {
    client: BackendClient,
    bucket: String,
}

impl HttpObjectStoreGateway {
    pub fn new(client: BackendClient, bucket: impl Into<String>) -> Self {
        Self { client, bucket: bucket.into() }
    }
}

#[async_trait]
impl ObjectStoreGateway for HttpObjectStoreGateway {
    async fn upload(&self, photo: &PhotoFile) -> Result<String, StoreError> {
        let object_name = object_name(&photo.name, Utc::now().timestamp_millis());
        let path = format!(
            "/storage/v1/object/{}/{}",
            urlencoding::encode(&self.bucket),
            urlencoding::encode(&object_name)
        );

        let request = self
            .client
            .request(Method::POST, &path)
            .header(CONTENT_TYPE, &photo.content_type)
            .header(CACHE_CONTROL, format!("max-age={PHOTO_CACHE_CONTROL_SECS}"))
            .header("x-upsert", "false")
            .body(photo.bytes.clone());
        let response = self.client.send(request).await.map_err(store_transport)?;

        if !response.status().is_success() {
            return Err(Rejection::from_response(response).await.into_store_error());
        }

        let receipt: UploadReceipt = response
            .json()
            .await
            .map_err(|err| StoreError::Decode(format!("upload receipt: {err}")))?;

        let prefix = format!("{}/", self.bucket);
        let object_id = receipt.key.strip_prefix(&prefix).unwrap_or(&receipt.key).to_string();
        debug!(bucket = %self.bucket, object_id = %object_id, bytes = photo.bytes.len(), "photo stored");
        Ok(object_id)
    }
}

/// Suggested name with path separators removed, suffixed with the upload
/// time in epoch milliseconds.
fn object_name(suggested: &str, now_millis: i64) -> String {
    format!("{}{}", suggested.replace('/', ""), now_millis)
}
