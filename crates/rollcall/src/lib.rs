//! Selection-set and bulk-action toolkit for paginated item views.
//!
//! Rollcall manages exactly one bounded concept (which items of a
//! known-size, filterable collection are currently selected) and one
//! workflow: resolve the selection to a concrete ID list, run an action
//! against each target, and aggregate the outcome with partial-failure
//! tolerance.
//!
//! # Core Types
//!
//! - [`SelectionSet`]: the selection state machine; O(1) mutation
//!   regardless of collection size
//! - [`BulkCoordinator`]: resolves a selection into concrete targets and
//!   executes a per-item action with bounded concurrency
//! - [`CollectionSource`]: the view-owned provider of page IDs, total
//!   count, and full-ID resolution for a filtered collection
//! - [`IdentityResolver`]: maps heterogeneous backend records to stable
//!   selection IDs via an ordered field priority
//! - [`ConfirmPrompt`]: the injected confirmation collaborator for
//!   destructive actions
//!
//! # Selection Example
//!
//! ```
//! use rollcall::{SelectionScope, SelectionSet};
//!
//! let mut selection = SelectionSet::new();
//!
//! // Row checkboxes toggle individual items.
//! selection.toggle_one("doc-3".into(), true);
//! assert_eq!(selection.selected_count(), 1);
//!
//! // "Select all 10,000 matching rows" never loads 10,000 IDs.
//! selection.select_all_across_pages(10_000);
//! selection.toggle_one("doc-3".into(), false);
//! assert_eq!(selection.selected_count(), 9_999);
//! assert_eq!(selection.scope(), SelectionScope::All);
//! ```
//!
//! # Architecture Overview
//!
//! ```text
//! ┌──────────────┐ toggle events ┌──────────────┐ targets ┌─────────────────┐
//! │     View     │──────────────>│ SelectionSet │────────>│ BulkCoordinator │
//! │ (checkboxes) │<──────────────│              │         │                 │
//! └──────────────┘ SelectionChange└─────────────┘         └─────────────────┘
//!        │                                                    │         │
//!        │ current page / total / resolve_all_ids             │         │
//!        └────────────────> CollectionSource <────────────────┘         │
//!                                                              BulkReport
//! ```
//!
//! The view owns one `SelectionSet` per list; the coordinator reads it
//! together with the view's `CollectionSource` to resolve a concrete
//! target list, then drives the per-item action and returns a
//! [`BulkReport`] for a single aggregate notification.

pub mod bulk;
pub mod confirm;
pub mod error;
pub mod identity;
pub mod selection;
pub mod source;

pub use bulk::{BulkCoordinator, BulkExecution, BulkFailure, BulkReport, PostActionPolicy};
pub use confirm::{AlwaysConfirm, ConfirmPrompt, ConfirmRequest, NeverConfirm};
pub use error::{BulkError, Result, SourceError};
pub use identity::{IdExtractor, Identified, IdentityResolver, ItemId};
pub use selection::{FilterPolicy, HeaderState, SelectionChange, SelectionScope, SelectionSet};
pub use source::CollectionSource;

// Re-export the core primitives that appear in this crate's public API.
pub use rollcall_core::{cancel_pair, CancelHandle, CancelToken, ConnectionId, Signal};

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Selection state machine target.
    pub const SELECTION: &str = "rollcall::selection";
    /// Bulk coordinator target.
    pub const BULK: &str = "rollcall::bulk";
}
