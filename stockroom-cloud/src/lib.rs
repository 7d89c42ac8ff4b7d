//! Backend clients for Stockroom.
//!
//! Two collaborators sit behind traits so the sync engine never knows which
//! backend it talks to:
//! - [`DocumentCollection`]: list, create/overwrite and delete records
//! - [`BlobStore`]: upload named binary objects and resolve fetchable URLs
//!
//! Implementations:
//! - Firestore documents REST API ([`FirestoreCollection`])
//! - Firebase Storage REST API ([`FirebaseBlobStore`])
//! - In-memory stores for tests and local use ([`MemoryCollection`],
//!   [`MemoryBlobStore`])

pub mod blob;
pub mod collection;
mod error;
pub mod firebase_storage;
pub mod firestore;
pub mod memory;

pub use blob::{BlobHandle, BlobStore};
pub use collection::DocumentCollection;
pub use error::{CloudError, CloudResult};
pub use firebase_storage::{FirebaseBlobStore, FirebaseStorageConfig};
pub use firestore::{FirestoreCollection, FirestoreConfig};
pub use memory::{MemoryBlobStore, MemoryCollection};
