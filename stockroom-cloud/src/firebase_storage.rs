//! Firebase Storage blob store implementation.
//!
//! Uses the Firebase Storage v0 REST API. Download URLs carry the object's
//! download token, the same URL shape the Firebase client SDKs hand out.

use crate::blob::{BlobHandle, BlobStore};
use crate::error::{CloudError, CloudResult};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Firebase Storage specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FirebaseStorageConfig {
    /// Storage bucket (e.g. `my-app.appspot.com`).
    pub bucket: String,
    /// Base URL for the storage API (e.g. `https://firebasestorage.googleapis.com`).
    pub api_base_url: String,
    /// Per-request timeout (seconds).
    pub timeout_secs: u64,
}

impl Default for FirebaseStorageConfig {
    fn default() -> Self {
        Self {
            bucket: String::new(),
            api_base_url: "https://firebasestorage.googleapis.com".to_string(),
            timeout_secs: 60,
        }
    }
}

/// Object metadata returned by upload and metadata requests.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ObjectMetadata {
    name: String,
    size: Option<String>,
    /// Comma-separated list; the first token is used.
    download_tokens: Option<String>,
}

impl ObjectMetadata {
    fn first_token(&self) -> Option<String> {
        self.download_tokens
            .as_deref()
            .and_then(|t| t.split(',').next())
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
    }

    fn into_handle(self) -> BlobHandle {
        let download_token = self.first_token();
        BlobHandle {
            size: self.size.and_then(|s| s.parse().ok()).unwrap_or(0),
            path: self.name,
            download_token,
        }
    }
}

/// Firebase Storage client.
pub struct FirebaseBlobStore {
    config: FirebaseStorageConfig,
    client: Client,
    auth_token: Arc<RwLock<Option<String>>>,
}

impl FirebaseBlobStore {
    /// Creates a new Firebase Storage client.
    pub fn new(config: FirebaseStorageConfig) -> CloudResult<Self> {
        if config.bucket.is_empty() {
            return Err(CloudError::Config("bucket must be set".to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            config,
            client,
            auth_token: Arc::new(RwLock::new(None)),
        })
    }

    /// Sets the bearer token sent with every request.
    pub async fn set_auth_token(&self, token: impl Into<String>) {
        *self.auth_token.write().await = Some(token.into());
    }

    fn objects_url(&self) -> String {
        format!("{}/v0/b/{}/o", self.config.api_base_url, self.config.bucket)
    }

    fn object_url(&self, path: &str) -> String {
        format!("{}/{}", self.objects_url(), urlencoding::encode(path))
    }

    async fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.auth_token.read().await.as_ref() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn fetch_metadata(&self, path: &str) -> CloudResult<ObjectMetadata> {
        let request = self.client.get(self.object_url(path));
        let response = self.authorize(request).await.send().await?;

        if response.status().as_u16() == 404 {
            return Err(CloudError::NotFound(path.to_string()));
        }
        if !response.status().is_success() {
            let status = response.status();
            let error = response.text().await.unwrap_or_default();
            return Err(CloudError::Api(format!(
                "metadata for {path} failed ({status}): {error}"
            )));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl BlobStore for FirebaseBlobStore {
    fn provider_name(&self) -> &'static str {
        "Firebase Storage"
    }

    async fn upload(
        &self,
        path: &str,
        bytes: &[u8],
        content_type: Option<&str>,
    ) -> CloudResult<BlobHandle> {
        debug!("Uploading blob: {} ({} bytes)", path, bytes.len());

        let request = self
            .client
            .post(self.objects_url())
            .query(&[("uploadType", "media"), ("name", path)])
            .header(
                "Content-Type",
                content_type.unwrap_or("application/octet-stream"),
            )
            .body(bytes.to_vec());

        let response = self.authorize(request).await.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error = response.text().await.unwrap_or_default();
            return Err(CloudError::Api(format!(
                "upload {path} failed ({status}): {error}"
            )));
        }

        let metadata: ObjectMetadata = response.json().await?;
        info!("Uploaded blob: {}", metadata.name);
        Ok(metadata.into_handle())
    }

    async fn resolve_url(&self, handle: &BlobHandle) -> CloudResult<String> {
        let token = match &handle.download_token {
            Some(token) => token.clone(),
            None => self
                .fetch_metadata(&handle.path)
                .await?
                .first_token()
                .ok_or_else(|| {
                    CloudError::Api(format!("{} has no download token", handle.path))
                })?,
        };

        Ok(format!(
            "{}?alt=media&token={}",
            self.object_url(&handle.path),
            urlencoding::encode(&token)
        ))
    }
}
