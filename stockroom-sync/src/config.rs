//! Sync engine configuration.

use serde::{Deserialize, Serialize};

/// How the local snapshot reacts to a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MutationStrategy {
    /// Read-after-write: the snapshot only changes when the reload that
    /// follows the remote call lands.
    #[default]
    Reload,
    /// Patch the snapshot before the remote call, roll back if it fails,
    /// then reload as usual.
    Optimistic,
}

/// Configuration for the sync engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Name of the remote document collection.
    pub collection: String,
    /// Blob folder item images are uploaded into.
    pub image_folder: String,
    /// Snapshot update strategy for add/remove.
    pub strategy: MutationStrategy,
    /// Run drafts through [`validate_draft`](crate::validate_draft) before
    /// writing them.
    pub validate_drafts: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            collection: "inventory".to_string(),
            image_folder: "images".to_string(),
            strategy: MutationStrategy::Reload,
            validate_drafts: false,
        }
    }
}

impl SyncConfig {
    /// Blob path an image named `file_name` is stored under.
    pub fn image_path(&self, file_name: &str) -> String {
        let folder = self.image_folder.trim_end_matches('/');
        if folder.is_empty() {
            file_name.to_string()
        } else {
            format!("{folder}/{file_name}")
        }
    }
}
