//! Client-side search over the last refreshed snapshot.

use stockroom_types::InventoryItem;

/// Whether `item` is shown for `query`.
///
/// Matching is a case-folded substring test on the name. An empty query
/// matches everything; a non-empty one never matches a nameless item.
pub fn matches_query(item: &InventoryItem, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    item.has_name() && item.name.to_lowercase().contains(&query.to_lowercase())
}

/// Returns the items shown for `query`, in snapshot order.
pub fn filter_items(items: &[InventoryItem], query: &str) -> Vec<InventoryItem> {
    items
        .iter()
        .filter(|item| matches_query(item, query))
        .cloned()
        .collect()
}
