//! Bulk-action execution over a selection.
//!
//! This module turns a [`SelectionSet`](crate::SelectionSet) plus a
//! per-item action into an executed, aggregated result:
//!
//! - [`BulkCoordinator`] resolves the selection to a concrete target list
//!   (asking the view's [`CollectionSource`](crate::CollectionSource)
//!   only for `All`-scope selections) and drives the action with bounded
//!   concurrency and settle-all semantics.
//! - [`BulkReport`] aggregates the per-item outcomes; a failure is data,
//!   never an abort.
//! - [`PostActionPolicy`] decides what happens to the selection after the
//!   report comes back.
//!
//! # Example
//!
//! ```ignore
//! use rollcall::{AlwaysConfirm, BulkCoordinator, ConfirmRequest, PostActionPolicy};
//!
//! let coordinator = BulkCoordinator::new();
//!
//! let report = coordinator
//!     .action(&selection, &source, |id| client.delete_document(id))
//!     .confirm_with(
//!         &dialogs,
//!         ConfirmRequest::destructive("Delete documents", "Delete 12 documents?"),
//!     )
//!     .cancel_token(token)
//!     .run()
//!     .await?;
//!
//! notifications.show(report.summary());
//! PostActionPolicy::ClearSelection.apply(&mut selection, &report);
//! ```

mod coordinator;
mod report;

pub use coordinator::{BulkCoordinator, BulkExecution, PostActionPolicy, DEFAULT_CONCURRENCY_LIMIT};
pub use report::{BulkFailure, BulkReport};
