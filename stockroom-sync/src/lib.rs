//! Inventory sync engine for Stockroom.
//!
//! # Architecture
//!
//! All durable state lives in a remote document collection and a remote
//! blob store (see `stockroom-cloud`). This crate keeps a client-side
//! snapshot of the collection consistent across mutations and projects it
//! for display.
//!
//! ## Components
//!
//! - **Engine**: refresh / add / remove against the backend clients
//! - **Filter**: case-insensitive name search over the snapshot
//! - **Validation**: optional checks on drafts before they are written
//! - **View**: explicit screen state with a pure transition function
//! - **App**: controller that runs engine calls and records their outcome
//!
//! ## Mutation flow
//!
//! 1. **Upload**: the draft's image, if any, is stored and its URL resolved
//! 2. **Write**: the item is created (or the document deleted)
//! 3. **Reload**: the whole collection is listed and replaces the snapshot
//!
//! Any failed step aborts the rest of the flow and is returned to the caller.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use stockroom_cloud::{MemoryBlobStore, MemoryCollection};
//! use stockroom_sync::{InventorySync, SyncConfig};
//!
//! let engine = InventorySync::new(
//!     Arc::new(MemoryCollection::new("inventory")),
//!     Arc::new(MemoryBlobStore::new()),
//!     SyncConfig::default(),
//! );
//! assert_eq!(engine.config().image_folder, "images");
//! ```

mod app;
mod config;
mod engine;
mod error;
pub mod filter;
pub mod validation;
pub mod view;

pub use app::InventoryApp;
pub use config::{MutationStrategy, SyncConfig};
pub use engine::InventorySync;
pub use error::{RemoteOperation, SyncError, SyncResult};
pub use filter::{filter_items, matches_query};
pub use validation::{ValidationIssue, validate_draft};
pub use view::{Action, AppState, CategoryOption, ItemCard, ItemForm, Status, update};
