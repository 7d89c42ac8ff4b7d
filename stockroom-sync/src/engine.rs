//! Inventory sync engine.
//!
//! Keeps an in-memory snapshot of the remote collection. Every mutation is a
//! remote write followed by a full reload; the snapshot is replaced wholesale,
//! never merged.
//!
//! Overlapping refreshes are ordered by ticket: each refresh draws a ticket
//! before listing, and its result is applied only if no refresh with a
//! higher ticket has been applied already.

use crate::config::{MutationStrategy, SyncConfig};
use crate::error::{RemoteOperation, SyncError, SyncResult};
use crate::validation::validate_draft;
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use stockroom_cloud::{
    BlobStore, DocumentCollection, FirebaseBlobStore, FirebaseStorageConfig, FirestoreCollection,
    FirestoreConfig,
};
use stockroom_types::{Document, ImageFile, InventoryItem, ItemDraft, ItemId};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
struct Snapshot {
    items: Vec<InventoryItem>,
    /// Ticket of the refresh that produced `items`; 0 before the first one.
    ticket: u64,
}

/// The sync engine.
pub struct InventorySync {
    config: SyncConfig,
    collection: Arc<dyn DocumentCollection>,
    blobs: Arc<dyn BlobStore>,
    snapshot: RwLock<Snapshot>,
    last_ticket: AtomicU64,
}

impl InventorySync {
    /// Creates an engine over the given backend clients.
    pub fn new(
        collection: Arc<dyn DocumentCollection>,
        blobs: Arc<dyn BlobStore>,
        config: SyncConfig,
    ) -> Self {
        Self {
            config,
            collection,
            blobs,
            snapshot: RwLock::new(Snapshot::default()),
            last_ticket: AtomicU64::new(0),
        }
    }

    /// Creates an engine backed by Firestore and Firebase Storage.
    pub fn firebase(
        config: SyncConfig,
        firestore: FirestoreConfig,
        storage: FirebaseStorageConfig,
    ) -> SyncResult<Self> {
        let collection = FirestoreCollection::new(firestore, config.collection.clone())
            .map_err(SyncError::Setup)?;
        let blobs = FirebaseBlobStore::new(storage).map_err(SyncError::Setup)?;
        Ok(Self::new(Arc::new(collection), Arc::new(blobs), config))
    }

    /// Returns the configuration.
    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Returns the mutation strategy.
    pub fn strategy(&self) -> MutationStrategy {
        self.config.strategy
    }

    /// Returns a copy of the current snapshot.
    pub async fn snapshot(&self) -> Vec<InventoryItem> {
        self.snapshot.read().await.items.clone()
    }

    /// Ticket of the refresh whose result is currently applied.
    pub async fn applied_ticket(&self) -> u64 {
        self.snapshot.read().await.ticket
    }

    // ── Refresh ──────────────────────────────────────────────────

    /// Reloads the whole collection and replaces the snapshot.
    ///
    /// Returns the snapshot in place once this call is done. If a newer
    /// refresh finished first, this call's result is dropped and the newer
    /// snapshot is returned.
    pub async fn refresh(&self) -> SyncResult<Vec<InventoryItem>> {
        let ticket = self.last_ticket.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(
            "Refreshing {} (ticket {})",
            self.collection.collection_name(),
            ticket
        );

        let documents = self
            .collection
            .list()
            .await
            .map_err(SyncError::remote(RemoteOperation::List))?;
        let items = documents_to_items(documents);

        let mut snapshot = self.snapshot.write().await;
        if ticket > snapshot.ticket {
            info!("Applied snapshot of {} items (ticket {})", items.len(), ticket);
            snapshot.items = items;
            snapshot.ticket = ticket;
        } else {
            debug!(
                "Discarding stale refresh (ticket {}, applied {})",
                ticket, snapshot.ticket
            );
        }

        Ok(snapshot.items.clone())
    }

    // ── Mutations ────────────────────────────────────────────────

    /// Creates an item from `draft`, then reloads.
    ///
    /// The image, if any, is uploaded first; a failed upload aborts before
    /// anything is written. A failed reload is returned as an error even
    /// though the item was stored; callers that need to tell the two apart
    /// use [`create_item`](Self::create_item) and [`refresh`](Self::refresh).
    pub async fn add_item(&self, draft: ItemDraft) -> SyncResult<ItemId> {
        let item = self.create_item(draft).await?;
        self.refresh().await?;
        Ok(item.id)
    }

    /// Uploads the image and writes the item, without reloading.
    ///
    /// Returns the stored item. Under [`MutationStrategy::Optimistic`] it is
    /// already in the snapshot.
    pub async fn create_item(&self, draft: ItemDraft) -> SyncResult<InventoryItem> {
        if self.config.validate_drafts {
            validate_draft(&draft).map_err(SyncError::InvalidDraft)?;
        }

        let image_url = match &draft.image {
            Some(file) => self.upload_image(file).await?,
            None => String::new(),
        };

        let item = InventoryItem::from_draft(ItemId::new(), &draft, image_url);
        let optimistic = self.strategy() == MutationStrategy::Optimistic;

        if optimistic {
            self.snapshot.write().await.items.push(item.clone());
        }

        if let Err(e) = self.collection.put(item.id.as_str(), &item.to_fields()).await {
            if optimistic {
                self.snapshot.write().await.items.retain(|i| i.id != item.id);
            }
            warn!("Failed to write item {}: {}", item.id, e);
            return Err(SyncError::remote(RemoteOperation::Put)(e));
        }

        info!("Added item {} ({:?})", item.id, item.name);
        Ok(item)
    }

    /// Deletes the item `id`, then reloads. Removing an id that does not
    /// exist is not an error.
    pub async fn remove_item(&self, id: &ItemId) -> SyncResult<()> {
        let removed = if self.strategy() == MutationStrategy::Optimistic {
            let mut snapshot = self.snapshot.write().await;
            let pos = snapshot.items.iter().position(|i| &i.id == id);
            pos.map(|pos| (pos, snapshot.items.remove(pos)))
        } else {
            None
        };

        if let Err(e) = self.collection.delete(id.as_str()).await {
            if let Some((pos, item)) = removed {
                let mut snapshot = self.snapshot.write().await;
                if !snapshot.items.iter().any(|i| i.id == item.id) {
                    let pos = pos.min(snapshot.items.len());
                    snapshot.items.insert(pos, item);
                }
            }
            warn!("Failed to delete item {}: {}", id, e);
            return Err(SyncError::remote(RemoteOperation::Delete)(e));
        }

        info!("Removed item {}", id);
        self.refresh().await?;
        Ok(())
    }

    async fn upload_image(&self, file: &ImageFile) -> SyncResult<String> {
        let path = self.config.image_path(&file.file_name);
        debug!("Uploading image {} ({} bytes)", path, file.bytes.len());

        let handle = self
            .blobs
            .upload(&path, &file.bytes, file.content_type.as_deref())
            .await
            .map_err(SyncError::remote(RemoteOperation::Upload))?;

        self.blobs
            .resolve_url(&handle)
            .await
            .map_err(SyncError::remote(RemoteOperation::ResolveUrl))
    }
}

/// Maps listed documents to items, dropping documents without a usable id
/// and repeated ids.
fn documents_to_items(documents: Vec<Document>) -> Vec<InventoryItem> {
    let mut seen = HashSet::new();
    documents
        .iter()
        .filter_map(|doc| match InventoryItem::from_document(doc) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!("Skipping document {:?}: {}", doc.id, e);
                None
            }
        })
        .filter(|item| {
            let fresh = seen.insert(item.id.clone());
            if !fresh {
                warn!("Skipping duplicate document {}", item.id);
            }
            fresh
        })
        .collect()
}
