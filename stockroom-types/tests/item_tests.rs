use pretty_assertions::assert_eq;
use stockroom_types::{
    Category, Document, Error, FieldValue, Fields, INITIAL_QUANTITY, ImageFile, InventoryItem,
    ItemDraft, ItemId,
};

fn hammer_doc() -> Document {
    let mut fields = Fields::new();
    fields.insert("name".into(), "Hammer".into());
    fields.insert("image".into(), "https://cdn.example/hammer.png".into());
    fields.insert("count".into(), "3".into());
    fields.insert("category".into(), "electronics".into());
    fields.insert("quantity".into(), FieldValue::Integer(1));
    Document::new("1", fields)
}

// ── Category ────────────────────────────────────────────────────

#[test]
fn category_values_and_labels() {
    assert_eq!(Category::Electronics.as_str(), "electronics");
    assert_eq!(Category::Clothing.as_str(), "clothing");
    assert_eq!(Category::Groceries.as_str(), "groceries");
    assert_eq!(Category::Groceries.label(), "Groceries");
}

#[test]
fn category_parse() {
    assert_eq!("clothing".parse::<Category>().unwrap(), Category::Clothing);
    assert!("Clothing".parse::<Category>().is_err());
    assert!("".parse::<Category>().is_err());
}

#[test]
fn category_parse_error_names_value() {
    let err = "Tools".parse::<Category>().unwrap_err();
    assert!(matches!(&err, Error::UnknownCategory(raw) if raw == "Tools"));
    assert_eq!(err.to_string(), "unknown category: \"Tools\"");
    assert_eq!(Error::EmptyId.to_string(), "item id must not be empty");
}

#[test]
fn category_serde_lowercase() {
    let json = serde_json::to_string(&Category::Electronics).unwrap();
    assert_eq!(json, "\"electronics\"");
}

// ── Document mapping ────────────────────────────────────────────

#[test]
fn from_document_reads_all_fields() {
    let item = InventoryItem::from_document(&hammer_doc()).unwrap();
    assert_eq!(item.id.as_str(), "1");
    assert_eq!(item.name, "Hammer");
    assert_eq!(item.image, "https://cdn.example/hammer.png");
    assert_eq!(item.count, "3");
    assert_eq!(item.category_kind(), Some(Category::Electronics));
    assert_eq!(item.quantity, 1);
}

#[test]
fn from_document_missing_fields_are_empty() {
    let item = InventoryItem::from_document(&Document::new("x", Fields::new())).unwrap();
    assert_eq!(item.name, "");
    assert_eq!(item.image, "");
    assert_eq!(item.count, "");
    assert_eq!(item.category, "");
    assert_eq!(item.quantity, INITIAL_QUANTITY);
    assert!(!item.has_name());
}

#[test]
fn from_document_non_string_name_reads_empty() {
    let mut fields = Fields::new();
    fields.insert("name".into(), FieldValue::Integer(7));
    let item = InventoryItem::from_document(&Document::new("x", fields)).unwrap();
    assert_eq!(item.name, "");
}

#[test]
fn from_document_empty_id_rejected() {
    let mut doc = hammer_doc();
    doc.id = String::new();
    assert!(InventoryItem::try_from(&doc).is_err());
}

#[test]
fn unknown_category_kept_raw() {
    let mut doc = hammer_doc();
    doc.fields.insert("category".into(), "tools".into());
    let item = InventoryItem::from_document(&doc).unwrap();
    assert_eq!(item.category, "tools");
    assert_eq!(item.category_kind(), None);
}

#[test]
fn to_document_round_trips() {
    let item = InventoryItem::from_document(&hammer_doc()).unwrap();
    assert_eq!(item.to_document(), hammer_doc());
}

// ── Drafts ──────────────────────────────────────────────────────

#[test]
fn from_draft_sets_quantity_and_image() {
    let draft = ItemDraft::new("Nail", "10", Category::Groceries);
    let id = ItemId::new();
    let item = InventoryItem::from_draft(id.clone(), &draft, "");

    assert_eq!(item.id, id);
    assert_eq!(item.name, "Nail");
    assert_eq!(item.count, "10");
    assert_eq!(item.category, "groceries");
    assert_eq!(item.image, "");
    assert_eq!(item.quantity, INITIAL_QUANTITY);
}

#[test]
fn draft_accepts_arbitrary_values() {
    let draft = ItemDraft::new("", "lots", "");
    let item = InventoryItem::from_draft(ItemId::new(), &draft, "");
    assert_eq!(item.count, "lots");
    assert_eq!(item.category, "");
}

#[test]
fn image_file_debug_hides_bytes() {
    let file = ImageFile::new("a.png", vec![0u8; 4096]).with_content_type("image/png");
    let debug = format!("{file:?}");
    assert!(debug.contains("a.png"));
    assert!(debug.contains("4096"));
    assert!(debug.contains("image/png"));
}
