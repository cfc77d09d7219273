//! Error types for the bulk-action pipeline.

use thiserror::Error;

/// Errors raised by a [`CollectionSource`](crate::CollectionSource) while
/// resolving the full filtered ID list.
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    /// The resolve request failed in transport.
    #[error("resolve request failed: {0}")]
    Request(String),

    /// The resolve request timed out.
    #[error("resolve request timed out")]
    Timeout,

    /// The backend rejected the resolve request.
    #[error("backend rejected resolve request: HTTP {status}")]
    Status {
        /// The HTTP status code.
        status: u16,
    },
}

/// Errors that abort a bulk invocation as a whole.
///
/// Per-item action failures are *not* errors at this level; they are
/// captured into [`BulkReport::failed`](crate::BulkReport) and never abort
/// sibling actions.
#[derive(Debug, Error)]
pub enum BulkError {
    /// The confirmation prompt was declined; nothing was resolved or
    /// executed.
    #[error("bulk action was not confirmed")]
    Declined,

    /// Resolving the full target list failed; no per-item action was
    /// issued and the selection is unchanged.
    #[error("failed to resolve selection targets: {0}")]
    Resolve(#[from] SourceError),

    /// The invocation was cancelled (view torn down) before completion.
    #[error("bulk action was cancelled")]
    Cancelled,

    /// A newer invocation or a filter reset retired this one; its
    /// resolution, if any, was discarded.
    #[error("bulk action was superseded")]
    Superseded,
}

/// A specialized Result type for bulk operations.
pub type Result<T> = std::result::Result<T, BulkError>;
