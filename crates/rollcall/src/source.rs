//! The collection-source contract.
//!
//! A [`CollectionSource`] is owned by the view, not by this crate: only
//! the view holding the active search/filter criteria knows what "all
//! matching items" currently means. The core consumes exactly three
//! operations from it.

use crate::error::SourceError;
use crate::identity::ItemId;

/// View-owned provider of page IDs, total count, and full-ID resolution
/// for one filtered collection.
///
/// Implementations typically wrap the view's list adapter: the current
/// page and total count come from the last page fetch, and
/// [`resolve_all_ids`](Self::resolve_all_ids) asks the backend for every
/// ID matching the active filter.
///
/// # Cancellation
///
/// `resolve_all_ids` may be slow and its result large. The coordinator
/// races it against a [`CancelToken`](rollcall_core::CancelToken) and
/// drops the future when the owning view goes away, so implementations
/// must tolerate being dropped at any await point.
pub trait CollectionSource {
    /// The IDs of the currently visible page, in display order.
    fn current_page_ids(&self) -> Vec<ItemId>;

    /// The cardinality of the full filtered collection.
    fn total_count(&self) -> usize;

    /// Resolves every ID matching the view's current filter.
    fn resolve_all_ids(
        &self,
    ) -> impl Future<Output = std::result::Result<Vec<ItemId>, SourceError>>;
}
