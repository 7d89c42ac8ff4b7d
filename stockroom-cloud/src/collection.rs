//! Remote document collection abstraction.

use crate::error::CloudResult;
use async_trait::async_trait;
use stockroom_types::{Document, Fields};

/// A remote store of independently addressable records.
///
/// Each implementation is bound to one named collection.
#[async_trait]
pub trait DocumentCollection: Send + Sync {
    /// Returns the name of the backend provider.
    fn provider_name(&self) -> &'static str;

    /// Returns the collection this client reads and writes.
    fn collection_name(&self) -> &str;

    /// Lists every document in the collection, in backend order.
    async fn list(&self) -> CloudResult<Vec<Document>>;

    /// Creates the document `id`, or replaces all of its fields.
    async fn put(&self, id: &str, fields: &Fields) -> CloudResult<()>;

    /// Deletes the document `id`. Deleting a missing document succeeds.
    async fn delete(&self, id: &str) -> CloudResult<()>;
}
