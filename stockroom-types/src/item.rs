//! Inventory items and the drafts the add form produces.

use crate::{Document, Error, FieldValue, Fields, ItemId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Quantity written on every newly created item.
pub const INITIAL_QUANTITY: i64 = 1;

const FIELD_NAME: &str = "name";
const FIELD_IMAGE: &str = "image";
const FIELD_COUNT: &str = "count";
const FIELD_CATEGORY: &str = "category";
const FIELD_QUANTITY: &str = "quantity";

/// The fixed set of item categories offered by the add form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Electronics,
    Clothing,
    Groceries,
}

impl Category {
    /// Every category, in selector order.
    pub const ALL: [Category; 3] = [
        Category::Electronics,
        Category::Clothing,
        Category::Groceries,
    ];

    /// The stored value.
    pub const fn as_str(self) -> &'static str {
        match self {
            Category::Electronics => "electronics",
            Category::Clothing => "clothing",
            Category::Groceries => "groceries",
        }
    }

    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Clothing => "Clothing",
            Category::Groceries => "Groceries",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| Error::UnknownCategory(s.to_string()))
    }
}

impl From<Category> for String {
    fn from(c: Category) -> Self {
        c.as_str().to_string()
    }
}

/// An image picked in the add form, not yet uploaded.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageFile {
    /// File name; also the key the blob is stored under.
    pub file_name: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
    /// MIME type, when the picker reported one.
    pub content_type: Option<String>,
}

impl ImageFile {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
            content_type: None,
        }
    }

    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

impl fmt::Debug for ImageFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageFile")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .field("content_type", &self.content_type)
            .finish()
    }
}

/// User input for a new item.
///
/// Values are taken verbatim. Nothing here checks that `count` is numeric or
/// that `category` is one of [`Category::ALL`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemDraft {
    pub name: String,
    pub count: String,
    pub category: String,
    pub image: Option<ImageFile>,
}

impl ItemDraft {
    pub fn new(
        name: impl Into<String>,
        count: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            count: count.into(),
            category: category.into(),
            image: None,
        }
    }

    #[must_use]
    pub fn with_image(mut self, image: ImageFile) -> Self {
        self.image = Some(image);
        self
    }
}

/// A tracked inventory item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: ItemId,
    /// Display name; the search key.
    #[serde(default)]
    pub name: String,
    /// Download URL of the item image, or empty.
    #[serde(default)]
    pub image: String,
    /// Quantity exactly as entered.
    #[serde(default)]
    pub count: String,
    /// Raw category value; see [`InventoryItem::category_kind`].
    #[serde(default)]
    pub category: String,
    #[serde(default = "initial_quantity")]
    pub quantity: i64,
}

fn initial_quantity() -> i64 {
    INITIAL_QUANTITY
}

impl InventoryItem {
    /// Builds the item written for `draft` under `id`.
    pub fn from_draft(id: ItemId, draft: &ItemDraft, image_url: impl Into<String>) -> Self {
        Self {
            id,
            name: draft.name.clone(),
            image: image_url.into(),
            count: draft.count.clone(),
            category: draft.category.clone(),
            quantity: INITIAL_QUANTITY,
        }
    }

    /// Maps a listed document to an item.
    ///
    /// Missing or non-string fields read as empty strings. Fails only when the
    /// document id is empty.
    pub fn from_document(doc: &Document) -> Result<Self, Error> {
        Ok(Self {
            id: ItemId::parse(&doc.id)?,
            name: doc.string_field(FIELD_NAME).to_string(),
            image: doc.string_field(FIELD_IMAGE).to_string(),
            count: doc.string_field(FIELD_COUNT).to_string(),
            category: doc.string_field(FIELD_CATEGORY).to_string(),
            quantity: doc.integer_field(FIELD_QUANTITY).unwrap_or(INITIAL_QUANTITY),
        })
    }

    /// The field map written to the remote collection. The id is the
    /// document key and is not repeated inside the fields.
    pub fn to_fields(&self) -> Fields {
        let mut fields = Fields::new();
        fields.insert(FIELD_NAME.into(), FieldValue::from(self.name.as_str()));
        fields.insert(FIELD_IMAGE.into(), FieldValue::from(self.image.as_str()));
        fields.insert(FIELD_COUNT.into(), FieldValue::from(self.count.as_str()));
        fields.insert(FIELD_CATEGORY.into(), FieldValue::from(self.category.as_str()));
        fields.insert(FIELD_QUANTITY.into(), FieldValue::Integer(self.quantity));
        fields
    }

    /// Converts the item into a document keyed by its id.
    pub fn to_document(&self) -> Document {
        Document::new(self.id.as_str(), self.to_fields())
    }

    /// Parses the stored category, if it is a known one.
    pub fn category_kind(&self) -> Option<Category> {
        self.category.parse().ok()
    }

    /// Whether the item has a non-empty name.
    pub fn has_name(&self) -> bool {
        !self.name.is_empty()
    }
}

impl TryFrom<&Document> for InventoryItem {
    type Error = Error;

    fn try_from(doc: &Document) -> Result<Self, Self::Error> {
        Self::from_document(doc)
    }
}
