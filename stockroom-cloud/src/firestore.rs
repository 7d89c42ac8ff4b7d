//! Firestore document collection implementation.
//!
//! Uses the Firestore v1 REST API. Field values travel as Firestore typed
//! values (`stringValue`, `integerValue`); any other value kind found in a
//! listed document is dropped, so it reads as a missing field.

use crate::collection::DocumentCollection;
use crate::error::{CloudError, CloudResult};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Duration;
use stockroom_types::{Document, FieldValue, Fields};
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Firestore specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FirestoreConfig {
    /// Google Cloud project id.
    pub project_id: String,
    /// Database id within the project.
    pub database_id: String,
    /// Base URL for the Firestore API (e.g. `https://firestore.googleapis.com`).
    pub api_base_url: String,
    /// Web API key, sent as the `key` query parameter when set.
    pub api_key: Option<String>,
    /// Documents requested per list page.
    pub page_size: u32,
    /// Per-request timeout (seconds).
    pub timeout_secs: u64,
}

impl Default for FirestoreConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            database_id: "(default)".to_string(),
            api_base_url: "https://firestore.googleapis.com".to_string(),
            api_key: None,
            page_size: 300,
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListDocumentsResponse {
    #[serde(default)]
    documents: Vec<RawDocument>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawDocument {
    /// Full resource name; the document id is its last segment.
    #[serde(default)]
    name: String,
    #[serde(default)]
    fields: Map<String, Value>,
}

/// A Firestore collection client.
pub struct FirestoreCollection {
    config: FirestoreConfig,
    collection: String,
    client: Client,
    auth_token: Arc<RwLock<Option<String>>>,
}

impl FirestoreCollection {
    /// Creates a client bound to `collection`.
    pub fn new(config: FirestoreConfig, collection: impl Into<String>) -> CloudResult<Self> {
        let collection = collection.into();
        if config.project_id.is_empty() {
            return Err(CloudError::Config("project_id must be set".to_string()));
        }
        if collection.is_empty() || collection.contains('/') {
            return Err(CloudError::Config(format!(
                "invalid collection name: {collection:?}"
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            config,
            collection,
            client,
            auth_token: Arc::new(RwLock::new(None)),
        })
    }

    /// Sets the bearer token sent with every request.
    pub async fn set_auth_token(&self, token: impl Into<String>) {
        *self.auth_token.write().await = Some(token.into());
    }

    /// Stops sending a bearer token.
    pub async fn clear_auth_token(&self) {
        *self.auth_token.write().await = None;
    }

    fn collection_url(&self) -> String {
        format!(
            "{}/v1/projects/{}/databases/{}/documents/{}",
            self.config.api_base_url,
            self.config.project_id,
            self.config.database_id,
            self.collection
        )
    }

    fn document_url(&self, id: &str) -> String {
        format!("{}/{}", self.collection_url(), urlencoding::encode(id))
    }

    async fn authorize(&self, mut request: RequestBuilder) -> RequestBuilder {
        if let Some(key) = &self.config.api_key {
            request = request.query(&[("key", key.as_str())]);
        }
        if let Some(token) = self.auth_token.read().await.as_ref() {
            request = request.bearer_auth(token);
        }
        request
    }
}

fn decode_value(value: &Value) -> Option<FieldValue> {
    if let Some(s) = value.get("stringValue").and_then(Value::as_str) {
        return Some(FieldValue::String(s.to_string()));
    }
    // int64 values are sent as JSON strings
    match value.get("integerValue")? {
        Value::String(s) => s.parse().ok().map(FieldValue::Integer),
        Value::Number(n) => n.as_i64().map(FieldValue::Integer),
        _ => None,
    }
}

fn encode_value(value: &FieldValue) -> Value {
    match value {
        FieldValue::String(s) => serde_json::json!({ "stringValue": s }),
        FieldValue::Integer(n) => serde_json::json!({ "integerValue": n.to_string() }),
    }
}

fn decode_document(raw: RawDocument) -> Document {
    let id = raw.name.rsplit('/').next().unwrap_or_default().to_string();
    let fields = raw
        .fields
        .iter()
        .filter_map(|(name, value)| decode_value(value).map(|v| (name.clone(), v)))
        .collect();
    Document::new(id, fields)
}

fn encode_fields(fields: &Fields) -> Value {
    let encoded: Map<String, Value> = fields
        .iter()
        .map(|(name, value)| (name.clone(), encode_value(value)))
        .collect();
    serde_json::json!({ "fields": encoded })
}

#[async_trait]
impl DocumentCollection for FirestoreCollection {
    fn provider_name(&self) -> &'static str {
        "Firestore"
    }

    fn collection_name(&self) -> &str {
        &self.collection
    }

    async fn list(&self) -> CloudResult<Vec<Document>> {
        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self
                .client
                .get(self.collection_url())
                .query(&[("pageSize", self.config.page_size)]);

            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }

            let response = self.authorize(request).await.send().await?;

            if !response.status().is_success() {
                let status = response.status();
                let error = response.text().await.unwrap_or_default();
                return Err(CloudError::Api(format!(
                    "list {} failed ({status}): {error}",
                    self.collection
                )));
            }

            let page: ListDocumentsResponse = response.json().await?;
            documents.extend(page.documents.into_iter().map(decode_document));

            page_token = page.next_page_token.filter(|t| !t.is_empty());
            if page_token.is_none() {
                break;
            }
        }

        debug!(
            "Listed {} documents from {}",
            documents.len(),
            self.collection
        );
        Ok(documents)
    }

    async fn put(&self, id: &str, fields: &Fields) -> CloudResult<()> {
        debug!("Writing document {}/{}", self.collection, id);

        let request = self
            .client
            .patch(self.document_url(id))
            .json(&encode_fields(fields));

        let response = self.authorize(request).await.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error = response.text().await.unwrap_or_default();
            return Err(CloudError::Api(format!(
                "write {}/{id} failed ({status}): {error}",
                self.collection
            )));
        }

        info!("Wrote document {}/{}", self.collection, id);
        Ok(())
    }

    async fn delete(&self, id: &str) -> CloudResult<()> {
        debug!("Deleting document {}/{}", self.collection, id);

        let request = self.client.delete(self.document_url(id));
        let response = self.authorize(request).await.send().await?;

        if !response.status().is_success() && response.status().as_u16() != 404 {
            let status = response.status();
            let error = response.text().await.unwrap_or_default();
            return Err(CloudError::Api(format!(
                "delete {}/{id} failed ({status}): {error}",
                self.collection
            )));
        }

        info!("Deleted document {}/{}", self.collection, id);
        Ok(())
    }
}
