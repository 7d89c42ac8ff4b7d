//! Optional draft validation.
//!
//! The engine stores drafts verbatim by default. When
//! [`SyncConfig::validate_drafts`](crate::SyncConfig::validate_drafts) is set,
//! drafts are checked here before any remote call is made.

use stockroom_types::{Category, ItemDraft};
use thiserror::Error;

/// A single problem found in a draft.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationIssue {
    #[error("name is empty")]
    EmptyName,

    #[error("count {0:?} is not a non-negative whole number")]
    InvalidCount(String),

    #[error("category {0:?} is not one of electronics, clothing, groceries")]
    UnknownCategory(String),
}

/// Checks `draft`, returning every issue found.
pub fn validate_draft(draft: &ItemDraft) -> Result<(), Vec<ValidationIssue>> {
    let mut issues = Vec::new();

    if draft.name.trim().is_empty() {
        issues.push(ValidationIssue::EmptyName);
    }
    if draft.count.parse::<u64>().is_err() {
        issues.push(ValidationIssue::InvalidCount(draft.count.clone()));
    }
    if draft.category.parse::<Category>().is_err() {
        issues.push(ValidationIssue::UnknownCategory(draft.category.clone()));
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}
