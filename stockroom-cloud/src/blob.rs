//! Remote blob store abstraction.

use crate::error::CloudResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Reference to an uploaded object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobHandle {
    /// Object path inside the store (e.g. `images/hammer.png`).
    pub path: String,
    /// Size in bytes, as reported by the store.
    pub size: u64,
    /// Token granting public download access, when the store issued one.
    pub download_token: Option<String>,
}

impl BlobHandle {
    pub fn new(path: impl Into<String>, size: u64) -> Self {
        Self {
            path: path.into(),
            size,
            download_token: None,
        }
    }
}

/// A remote store of named binary objects.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Returns the name of the backend provider.
    fn provider_name(&self) -> &'static str;

    /// Uploads `bytes` at `path`. An existing object at the same path is
    /// overwritten.
    async fn upload(
        &self,
        path: &str,
        bytes: &[u8],
        content_type: Option<&str>,
    ) -> CloudResult<BlobHandle>;

    /// Resolves a fetchable URL for an uploaded object.
    async fn resolve_url(&self, handle: &BlobHandle) -> CloudResult<String>;
}
