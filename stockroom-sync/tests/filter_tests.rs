//! Search filter behavior.

use proptest::prelude::*;
use stockroom_sync::{filter_items, matches_query};
use stockroom_types::{InventoryItem, ItemId};

fn item(id: &str, name: &str) -> InventoryItem {
    InventoryItem {
        id: ItemId::parse(id).unwrap(),
        name: name.to_string(),
        image: String::new(),
        count: "1".to_string(),
        category: "electronics".to_string(),
        quantity: 1,
    }
}

fn ids(items: &[InventoryItem]) -> Vec<&str> {
    items.iter().map(|i| i.id.as_str()).collect()
}

#[test]
fn hammer_scenario() {
    let snapshot = vec![InventoryItem {
        count: "3".to_string(),
        ..item("1", "Hammer")
    }];

    assert_eq!(ids(&filter_items(&snapshot, "ham")), vec!["1"]);
    assert!(filter_items(&snapshot, "nail").is_empty());
}

#[test]
fn empty_query_is_identity() {
    let snapshot = vec![item("1", "Hammer"), item("2", ""), item("3", "Nail")];
    assert_eq!(filter_items(&snapshot, ""), snapshot);
}

#[test]
fn nameless_items_excluded_from_non_empty_queries() {
    let snapshot = vec![item("1", ""), item("2", "Saw")];
    assert_eq!(ids(&filter_items(&snapshot, "a")), vec!["2"]);
    assert!(!matches_query(&snapshot[0], " "));
}

#[test]
fn matches_anywhere_in_name() {
    let snapshot = vec![item("1", "Claw Hammer"), item("2", "Hammock")];
    assert_eq!(ids(&filter_items(&snapshot, "MM")), vec!["1", "2"]);
    assert_eq!(ids(&filter_items(&snapshot, "claw h")), vec!["1"]);
}

#[test]
fn keeps_snapshot_order() {
    let snapshot = vec![item("b", "Nail B"), item("a", "Nail A")];
    assert_eq!(ids(&filter_items(&snapshot, "nail")), vec!["b", "a"]);
}

#[test]
fn folds_non_ascii_case() {
    let snapshot = vec![item("1", "Ölkanne")];
    assert_eq!(ids(&filter_items(&snapshot, "öl")), vec!["1"]);
}

fn name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z ]{0,12}").unwrap()
}

fn snapshot_strategy() -> impl Strategy<Value = Vec<InventoryItem>> {
    prop::collection::vec(name_strategy(), 0..20).prop_map(|names| {
        names
            .into_iter()
            .enumerate()
            .map(|(i, name)| item(&format!("id-{i}"), &name))
            .collect()
    })
}

proptest! {
    /// Upper- and lower-cased queries select the same items.
    #[test]
    fn case_insensitive(items in snapshot_strategy(), query in "[a-zA-Z]{1,4}") {
        prop_assert_eq!(
            filter_items(&items, &query.to_uppercase()),
            filter_items(&items, &query.to_lowercase())
        );
    }

    /// Every result of a non-empty query has a name containing it.
    #[test]
    fn results_contain_query(items in snapshot_strategy(), query in "[a-z]{1,3}") {
        for found in filter_items(&items, &query) {
            prop_assert!(!found.name.is_empty());
            prop_assert!(found.name.to_lowercase().contains(&query));
        }
    }

    /// Filtering never invents items and never reorders them.
    #[test]
    fn result_is_subsequence(items in snapshot_strategy(), query in "[a-z]{0,3}") {
        let found = filter_items(&items, &query);
        let mut rest = items.iter();
        for f in &found {
            prop_assert!(rest.any(|i| i == f));
        }
    }
}
