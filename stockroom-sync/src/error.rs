//! Error types for the sync layer.

use crate::validation::ValidationIssue;
use std::fmt;
use stockroom_cloud::CloudError;
use thiserror::Error;

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// The remote call a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteOperation {
    List,
    Put,
    Delete,
    Upload,
    ResolveUrl,
}

impl fmt::Display for RemoteOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RemoteOperation::List => "list",
            RemoteOperation::Put => "put",
            RemoteOperation::Delete => "delete",
            RemoteOperation::Upload => "upload",
            RemoteOperation::ResolveUrl => "resolve_url",
        })
    }
}

/// Errors that can occur in sync operations.
#[derive(Debug, Error)]
pub enum SyncError {
    /// A backend call failed. The flow that issued it was aborted.
    #[error("remote unavailable during {operation}: {source}")]
    RemoteUnavailable {
        operation: RemoteOperation,
        source: CloudError,
    },

    /// The draft was rejected by the optional validation layer.
    #[error("invalid draft: {}", join_issues(.0))]
    InvalidDraft(Vec<ValidationIssue>),

    /// A backend client could not be constructed.
    #[error("backend setup failed: {0}")]
    Setup(#[source] CloudError),
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl SyncError {
    /// Wraps a backend error raised by `operation`.
    pub(crate) fn remote(operation: RemoteOperation) -> impl FnOnce(CloudError) -> SyncError {
        move |source| SyncError::RemoteUnavailable { operation, source }
    }

    /// Returns true for backend failures.
    pub fn is_remote_unavailable(&self) -> bool {
        matches!(self, SyncError::RemoteUnavailable { .. })
    }

    /// The failed remote operation, for backend failures.
    pub fn operation(&self) -> Option<RemoteOperation> {
        match self {
            SyncError::RemoteUnavailable { operation, .. } => Some(*operation),
            _ => None,
        }
    }
}
