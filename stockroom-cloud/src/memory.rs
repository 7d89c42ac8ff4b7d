//! In-memory backends.
//!
//! Behave like the remote services (overwrite on put, idempotent delete,
//! overwrite on upload) and can be switched offline to simulate an
//! unreachable backend.

use crate::blob::{BlobHandle, BlobStore};
use crate::collection::DocumentCollection;
use crate::error::{CloudError, CloudResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use stockroom_types::{Document, Fields};
use tokio::sync::RwLock;
use tracing::debug;

/// An in-memory document collection. Lists in insertion order.
pub struct MemoryCollection {
    name: String,
    documents: RwLock<Vec<Document>>,
    offline: AtomicBool,
    list_calls: AtomicUsize,
}

impl MemoryCollection {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_documents(name, Vec::new())
    }

    /// Creates a collection pre-populated with `documents`.
    pub fn with_documents(name: impl Into<String>, documents: Vec<Document>) -> Self {
        Self {
            name: name.into(),
            documents: RwLock::new(documents),
            offline: AtomicBool::new(false),
            list_calls: AtomicUsize::new(0),
        }
    }

    /// Makes every subsequent call fail with [`CloudError::Unavailable`].
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of `list` calls served so far.
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Returns the stored document `id`, bypassing the offline switch.
    pub async fn get(&self, id: &str) -> Option<Document> {
        self.documents
            .read()
            .await
            .iter()
            .find(|d| d.id == id)
            .cloned()
    }

    /// Number of stored documents, bypassing the offline switch.
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn check_online(&self) -> CloudResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(CloudError::Unavailable(format!(
                "collection {} is offline",
                self.name
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentCollection for MemoryCollection {
    fn provider_name(&self) -> &'static str {
        "Memory"
    }

    fn collection_name(&self) -> &str {
        &self.name
    }

    async fn list(&self) -> CloudResult<Vec<Document>> {
        self.check_online()?;
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.documents.read().await.clone())
    }

    async fn put(&self, id: &str, fields: &Fields) -> CloudResult<()> {
        self.check_online()?;
        let mut documents = self.documents.write().await;
        match documents.iter_mut().find(|d| d.id == id) {
            Some(existing) => existing.fields = fields.clone(),
            None => documents.push(Document::new(id, fields.clone())),
        }
        debug!("Stored document {}/{}", self.name, id);
        Ok(())
    }

    async fn delete(&self, id: &str) -> CloudResult<()> {
        self.check_online()?;
        self.documents.write().await.retain(|d| d.id != id);
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct StoredBlob {
    bytes: Vec<u8>,
    content_type: Option<String>,
}

/// An in-memory blob store. URLs are `{url_prefix}/{path}`.
pub struct MemoryBlobStore {
    url_prefix: String,
    blobs: RwLock<HashMap<String, StoredBlob>>,
    offline: AtomicBool,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::with_url_prefix("memory://blobs")
    }

    pub fn with_url_prefix(url_prefix: impl Into<String>) -> Self {
        Self {
            url_prefix: url_prefix.into(),
            blobs: RwLock::new(HashMap::new()),
            offline: AtomicBool::new(false),
        }
    }

    /// Makes every subsequent call fail with [`CloudError::Unavailable`].
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Returns the stored bytes at `path`.
    pub async fn get(&self, path: &str) -> Option<Vec<u8>> {
        self.blobs.read().await.get(path).map(|b| b.bytes.clone())
    }

    /// Returns the content type recorded for `path`.
    pub async fn content_type(&self, path: &str) -> Option<String> {
        self.blobs
            .read()
            .await
            .get(path)
            .and_then(|b| b.content_type.clone())
    }

    /// Number of stored objects.
    pub async fn len(&self) -> usize {
        self.blobs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn check_online(&self) -> CloudResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(CloudError::Unavailable("blob store is offline".to_string()));
        }
        Ok(())
    }
}

impl Default for MemoryBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    fn provider_name(&self) -> &'static str {
        "Memory"
    }

    async fn upload(
        &self,
        path: &str,
        bytes: &[u8],
        content_type: Option<&str>,
    ) -> CloudResult<BlobHandle> {
        self.check_online()?;
        self.blobs.write().await.insert(
            path.to_string(),
            StoredBlob {
                bytes: bytes.to_vec(),
                content_type: content_type.map(str::to_string),
            },
        );
        Ok(BlobHandle::new(path, bytes.len() as u64))
    }

    async fn resolve_url(&self, handle: &BlobHandle) -> CloudResult<String> {
        self.check_online()?;
        if !self.blobs.read().await.contains_key(&handle.path) {
            return Err(CloudError::NotFound(handle.path.clone()));
        }
        Ok(format!("{}/{}", self.url_prefix, handle.path))
    }
}
