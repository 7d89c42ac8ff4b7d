//! Core type definitions for Stockroom.
//!
//! This crate defines the data model shared by the backend clients and the
//! sync engine:
//! - Item identifiers (opaque strings, freshly allocated from UUID v7)
//! - Inventory items, categories and the drafts the add form produces
//! - The document shape exchanged with the remote collection
//!
//! Nothing here performs I/O.

mod document;
mod ids;
mod item;

pub use document::{Document, FieldValue, Fields};
pub use ids::ItemId;
pub use item::{Category, INITIAL_QUANTITY, ImageFile, InventoryItem, ItemDraft};

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("item id must not be empty")]
    EmptyId,

    #[error("unknown category: {0:?}")]
    UnknownCategory(String),
}
