//! Selection state machine for paginated item views.
//!
//! This module provides [`SelectionSet`], which manages selection state
//! for list views whose collections are server-paginated and arbitrarily
//! large. Membership is tracked by inclusion (`Page`/`Custom` scopes) or
//! by exclusion (`All` scope), so "select all N matching rows" is O(1)
//! and never materializes N IDs client-side.
//!
//! # Example
//!
//! ```
//! use rollcall::{SelectionScope, SelectionSet};
//!
//! let mut selection = SelectionSet::new();
//!
//! // Listen for changes
//! selection.selection_changed.connect(|change| {
//!     println!("{} selected ({:?})", change.selected_count, change.scope);
//! });
//!
//! // Header checkbox selects exactly the visible page
//! let page: Vec<rollcall::ItemId> = (1..=10).map(|n| format!("row-{n}").into()).collect();
//! selection.toggle_page(&page, true);
//! assert_eq!(selection.scope(), SelectionScope::Page);
//!
//! // "Select all 25 across pages", then carve one out
//! selection.select_all_across_pages(25);
//! selection.toggle_one("row-5".into(), false);
//! assert_eq!(selection.selected_count(), 24);
//! ```

use std::collections::HashSet;

use rollcall_core::Signal;

use crate::identity::ItemId;

/// Which selection mode is active.
///
/// `Page` and `Custom` track membership by inclusion; `All` tracks it by
/// exclusion. `None` is the only empty state: a mutation that would leave
/// zero items selected resets the set rather than leaving a degenerate
/// empty `Custom` or fully-excluded `All` behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SelectionScope {
    /// Nothing is selected.
    #[default]
    None,
    /// Exactly the current page is selected.
    Page,
    /// An arbitrary inclusion set is selected.
    Custom,
    /// Everything matching the filter is selected, minus explicit
    /// exclusions.
    All,
}

/// Tri-state for the header (select-all-on-page) checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderState {
    /// No visible item is selected.
    Unchecked,
    /// Every visible item is selected.
    Checked,
    /// Some, but not all, visible items are selected.
    Indeterminate,
}

/// What happens to an active selection when the view's search/filter
/// criteria change underneath it.
///
/// The collection a `Custom` or `All` selection was built against shifts
/// when the filter changes; which reading is correct depends on the view,
/// so the behavior is a policy rather than a fixed rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterPolicy {
    /// Discard the selection entirely (the conservative default).
    #[default]
    Reset,
    /// Keep the membership and adopt the new total count.
    Preserve,
}

/// Payload of [`SelectionSet::selection_changed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionChange {
    /// The scope after the mutation.
    pub scope: SelectionScope,
    /// The selected count after the mutation.
    pub selected_count: usize,
}

/// Manages selection state for one paginated list view.
///
/// The set is single-owner: each list view instantiates one on mount,
/// mutates it through the toggle operations, and drops it on unmount. It
/// is never shared between views or persisted.
///
/// # Invariants
///
/// After every operation:
///
/// - `None` scope holds no IDs at all.
/// - `Page`/`Custom` scopes use `selected` only; `All` uses `excluded`
///   only.
/// - Under `All` scope, `selected_count()` saturates within
///   `0..=total_count()` however many exclusions arrive.
/// - A count of zero is never observable under any scope other than
///   `None`.
///
/// # Signals
///
/// - `selection_changed`: emitted after every mutation that changes
///   observable state, with the new scope and count.
pub struct SelectionSet {
    /// Current selection scope.
    scope: SelectionScope,

    /// Included IDs (`Page`/`Custom` scopes).
    selected: HashSet<ItemId>,

    /// Excluded IDs (`All` scope).
    excluded: HashSet<ItemId>,

    /// Cardinality of the full filtered collection, supplied by the view.
    total_count: usize,

    /// What a filter change does to the active selection.
    filter_policy: FilterPolicy,

    /// Emitted when the selection changes.
    pub selection_changed: Signal<SelectionChange>,
}

impl Default for SelectionSet {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionSet {
    /// Creates an empty selection (`None` scope).
    pub fn new() -> Self {
        Self {
            scope: SelectionScope::None,
            selected: HashSet::new(),
            excluded: HashSet::new(),
            total_count: 0,
            filter_policy: FilterPolicy::default(),
            selection_changed: Signal::new(),
        }
    }

    /// Creates an empty selection with an explicit filter policy.
    pub fn with_filter_policy(filter_policy: FilterPolicy) -> Self {
        Self {
            filter_policy,
            ..Self::new()
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// The active selection scope.
    pub fn scope(&self) -> SelectionScope {
        self.scope
    }

    /// The cardinality of the full filtered collection, as last supplied
    /// by the view.
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// Checks whether an item is selected.
    ///
    /// Under `All` scope an item is selected unless excluded; otherwise it
    /// is selected only if included.
    pub fn is_selected(&self, id: &ItemId) -> bool {
        match self.scope {
            SelectionScope::All => !self.excluded.contains(id),
            SelectionScope::Page | SelectionScope::Custom => self.selected.contains(id),
            SelectionScope::None => false,
        }
    }

    /// The number of selected items across the whole collection.
    pub fn selected_count(&self) -> usize {
        match self.scope {
            SelectionScope::All => self.total_count.saturating_sub(self.excluded.len()),
            SelectionScope::Page | SelectionScope::Custom => self.selected.len(),
            SelectionScope::None => 0,
        }
    }

    /// Returns `true` if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.scope == SelectionScope::None
    }

    /// The concrete included IDs (`Page`/`Custom` scopes; empty under
    /// `None` and `All`).
    pub fn selected_ids(&self) -> impl Iterator<Item = &ItemId> {
        self.selected.iter()
    }

    /// The excluded IDs (`All` scope; empty otherwise).
    pub fn excluded_ids(&self) -> impl Iterator<Item = &ItemId> {
        self.excluded.iter()
    }

    /// Derives the header checkbox state for the currently visible page.
    ///
    /// `Checked` iff every visible ID is selected, `Indeterminate` iff
    /// some but not all are, `Unchecked` otherwise (including an empty
    /// page).
    pub fn header_state(&self, visible: &[ItemId]) -> HeaderState {
        if visible.is_empty() {
            return HeaderState::Unchecked;
        }
        let selected = visible.iter().filter(|id| self.is_selected(id)).count();
        if selected == 0 {
            HeaderState::Unchecked
        } else if selected == visible.len() {
            HeaderState::Checked
        } else {
            HeaderState::Indeterminate
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Toggles a single item (row checkbox).
    ///
    /// Under `All` scope, unchecking excludes the item and checking
    /// removes the exclusion. Otherwise checking includes the item
    /// (promoting a `None` selection to `Custom`) and unchecking removes
    /// it.
    pub fn toggle_one(&mut self, id: ItemId, checked: bool) {
        let changed = match self.scope {
            SelectionScope::All => {
                if checked {
                    self.excluded.remove(&id)
                } else {
                    self.excluded.insert(id)
                }
            }
            _ => {
                if checked {
                    let inserted = self.selected.insert(id);
                    if inserted && self.scope == SelectionScope::None {
                        self.scope = SelectionScope::Custom;
                    }
                    inserted
                } else {
                    self.selected.remove(&id)
                }
            }
        };

        if changed {
            self.after_mutation();
        }
    }

    /// Toggles the whole visible page (header checkbox).
    ///
    /// Checking **replaces** the selection with exactly the given page
    /// (any prior heterogeneous selection is discarded, not unioned) and
    /// sets the scope to `Page`. Unchecking under `All` adds the page to
    /// the exclusions; under the inclusion scopes it removes the page
    /// from the selection, demoting a partial remainder to `Custom`.
    pub fn toggle_page(&mut self, page_ids: &[ItemId], checked: bool) {
        if checked {
            self.selected = page_ids.iter().cloned().collect();
            self.excluded.clear();
            self.scope = SelectionScope::Page;
            self.after_mutation();
            return;
        }

        let changed = match self.scope {
            SelectionScope::All => {
                let before = self.excluded.len();
                self.excluded.extend(page_ids.iter().cloned());
                self.excluded.len() != before
            }
            _ => {
                let before = self.selected.len();
                for id in page_ids {
                    self.selected.remove(id);
                }
                if self.selected.len() == before {
                    false
                } else {
                    if !self.selected.is_empty() {
                        self.scope = SelectionScope::Custom;
                    }
                    true
                }
            }
        };

        if changed {
            self.after_mutation();
        }
    }

    /// Selects every item matching the current filter ("select all N
    /// across pages").
    ///
    /// O(1) regardless of collection size: only the scope and the count
    /// are stored, never the IDs.
    pub fn select_all_across_pages(&mut self, total_count: usize) {
        self.scope = SelectionScope::All;
        self.selected.clear();
        self.excluded.clear();
        self.total_count = total_count;
        self.after_mutation();
    }

    /// Replaces the selection with exactly the given IDs (`Custom` scope).
    ///
    /// Used by post-action policies that narrow the selection to a failed
    /// subset for retry.
    pub fn select_exactly<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = ItemId>,
    {
        self.selected = ids.into_iter().collect();
        self.excluded.clear();
        self.scope = SelectionScope::Custom;
        self.after_mutation();
    }

    /// Clears the selection back to the empty (`None`) state.
    pub fn clear(&mut self) {
        if self.scope == SelectionScope::None {
            return;
        }
        self.scope = SelectionScope::None;
        self.selected.clear();
        self.excluded.clear();
        self.emit_changed();
    }

    /// Updates the filtered-collection cardinality after a page fetch.
    ///
    /// Under `All` scope the count feeds `selected_count()` directly;
    /// shrinking it to (or below) the exclusion count empties the
    /// selection and resets it.
    pub fn set_total_count(&mut self, total_count: usize) {
        if self.total_count == total_count {
            return;
        }
        self.total_count = total_count;
        if self.scope == SelectionScope::All {
            self.after_mutation();
        }
    }

    /// Notifies the set that the view's search/filter criteria changed.
    ///
    /// Applies the configured [`FilterPolicy`]: `Reset` discards the
    /// selection, `Preserve` keeps membership and adopts the new total.
    pub fn filter_changed(&mut self, new_total: usize) {
        match self.filter_policy {
            FilterPolicy::Reset => {
                self.total_count = new_total;
                self.clear();
            }
            FilterPolicy::Preserve => {
                self.total_count = new_total;
                self.after_mutation();
            }
        }
    }

    // =========================================================================
    // Internal Helpers
    // =========================================================================

    /// Applies the empty-state invariant and notifies listeners.
    ///
    /// A selection whose count reached zero collapses to `None` with both
    /// ID sets cleared; no empty `Custom` or everything-excluded `All`
    /// state is ever observable.
    fn after_mutation(&mut self) {
        if self.scope != SelectionScope::None && self.selected_count() == 0 {
            self.scope = SelectionScope::None;
            self.selected.clear();
            self.excluded.clear();
        }
        self.emit_changed();
    }

    fn emit_changed(&self) {
        let change = SelectionChange {
            scope: self.scope,
            selected_count: self.selected_count(),
        };
        tracing::trace!(
            target: "rollcall::selection",
            scope = ?change.scope,
            selected = change.selected_count,
            "selection changed"
        );
        self.selection_changed.emit(change);
    }
}

impl std::fmt::Debug for SelectionSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionSet")
            .field("scope", &self.scope)
            .field("selected_count", &self.selected_count())
            .field("total_count", &self.total_count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(range: std::ops::RangeInclusive<u32>) -> Vec<ItemId> {
        range.map(|n| ItemId::from(n.to_string())).collect()
    }

    fn id(n: u32) -> ItemId {
        ItemId::from(n.to_string())
    }

    #[test]
    fn test_new_selection_is_empty() {
        let selection = SelectionSet::new();
        assert_eq!(selection.scope(), SelectionScope::None);
        assert_eq!(selection.selected_count(), 0);
        assert!(selection.is_empty());
        assert!(!selection.is_selected(&id(1)));
    }

    #[test]
    fn test_toggle_one_promotes_none_to_custom() {
        let mut selection = SelectionSet::new();
        selection.toggle_one(id(3), true);

        assert_eq!(selection.scope(), SelectionScope::Custom);
        assert_eq!(selection.selected_count(), 1);
        assert!(selection.is_selected(&id(3)));
    }

    #[test]
    fn test_toggle_round_trip_restores_prior_state() {
        let mut selection = SelectionSet::new();
        selection.toggle_one(id(1), true);
        selection.toggle_one(id(2), true);

        selection.toggle_one(id(7), true);
        selection.toggle_one(id(7), false);

        assert_eq!(selection.scope(), SelectionScope::Custom);
        assert_eq!(selection.selected_count(), 2);
        assert!(selection.is_selected(&id(1)));
        assert!(selection.is_selected(&id(2)));
        assert!(!selection.is_selected(&id(7)));
    }

    #[test]
    fn test_deselecting_last_item_resets_to_none() {
        let mut selection = SelectionSet::new();
        selection.toggle_one(id(5), true);
        selection.toggle_one(id(5), false);

        assert_eq!(selection.scope(), SelectionScope::None);
        assert_eq!(selection.selected_count(), 0);
    }

    #[test]
    fn test_select_all_then_exclude_one() {
        // Scenario: totalCount = 25, page = ids 1..10.
        let mut selection = SelectionSet::new();
        selection.select_all_across_pages(25);
        assert_eq!(selection.selected_count(), 25);

        selection.toggle_one(id(5), false);
        assert_eq!(selection.selected_count(), 24);
        assert!(!selection.is_selected(&id(5)));
        assert!(selection.is_selected(&id(6)));
        assert_eq!(selection.scope(), SelectionScope::All);
    }

    #[test]
    fn test_reselecting_excluded_item_under_all() {
        let mut selection = SelectionSet::new();
        selection.select_all_across_pages(10);
        selection.toggle_one(id(4), false);
        selection.toggle_one(id(4), true);

        assert_eq!(selection.selected_count(), 10);
        assert!(selection.is_selected(&id(4)));
    }

    #[test]
    fn test_toggle_page_replaces_prior_custom_selection() {
        // Scenario: scope = Custom, selected = {2,4,6}; selecting the page
        // replaces, never unions.
        let mut selection = SelectionSet::new();
        selection.toggle_one(id(2), true);
        selection.toggle_one(id(4), true);
        selection.toggle_one(id(6), true);

        let page = ids(1..=10);
        selection.toggle_page(&page, true);

        assert_eq!(selection.scope(), SelectionScope::Page);
        assert_eq!(selection.selected_count(), 10);
        for n in 1..=10 {
            assert!(selection.is_selected(&id(n)));
        }
    }

    #[test]
    fn test_deselecting_full_page_resets_to_none() {
        // Scenario: scope = Page, selected = {1..10}.
        let mut selection = SelectionSet::new();
        let page = ids(1..=10);
        selection.toggle_page(&page, true);
        selection.toggle_page(&page, false);

        assert_eq!(selection.scope(), SelectionScope::None);
        assert_eq!(selection.selected_count(), 0);
    }

    #[test]
    fn test_partial_page_deselect_demotes_to_custom() {
        let mut selection = SelectionSet::new();
        selection.toggle_page(&ids(1..=10), true);
        selection.toggle_page(&ids(1..=4), false);

        assert_eq!(selection.scope(), SelectionScope::Custom);
        assert_eq!(selection.selected_count(), 6);
        assert!(!selection.is_selected(&id(2)));
        assert!(selection.is_selected(&id(9)));
    }

    #[test]
    fn test_page_deselect_under_all_excludes_page() {
        let mut selection = SelectionSet::new();
        selection.select_all_across_pages(25);
        selection.toggle_page(&ids(1..=10), false);

        assert_eq!(selection.scope(), SelectionScope::All);
        assert_eq!(selection.selected_count(), 15);
        assert!(!selection.is_selected(&id(3)));
        assert!(selection.is_selected(&id(11)));
    }

    #[test]
    fn test_page_deselect_covering_entire_remainder_resets() {
        // Deselecting a page under All may drive the count to zero when
        // the page covers the whole remaining population; the set must
        // reset rather than sit in a fully-excluded All state.
        let mut selection = SelectionSet::new();
        selection.select_all_across_pages(10);
        selection.toggle_page(&ids(1..=10), false);

        assert_eq!(selection.scope(), SelectionScope::None);
        assert_eq!(selection.selected_count(), 0);
        assert_eq!(selection.excluded_ids().count(), 0);
    }

    #[test]
    fn test_count_never_exceeds_total() {
        let mut selection = SelectionSet::new();
        selection.select_all_across_pages(5);
        for n in 1..=8 {
            selection.toggle_one(id(n), false);
            assert!(selection.selected_count() <= 5);
        }
        // More exclusions than items left: invariant forces the reset.
        assert_eq!(selection.scope(), SelectionScope::None);
    }

    #[test]
    fn test_clear_always_yields_none() {
        let mut selection = SelectionSet::new();
        selection.select_all_across_pages(100);
        selection.clear();

        assert_eq!(selection.scope(), SelectionScope::None);
        assert_eq!(selection.selected_count(), 0);
    }

    #[test]
    fn test_select_all_with_empty_collection_stays_empty() {
        let mut selection = SelectionSet::new();
        selection.select_all_across_pages(0);

        assert_eq!(selection.scope(), SelectionScope::None);
        assert_eq!(selection.selected_count(), 0);
    }

    #[test]
    fn test_header_state_tristate() {
        let mut selection = SelectionSet::new();
        let page = ids(1..=4);

        assert_eq!(selection.header_state(&page), HeaderState::Unchecked);

        selection.toggle_one(id(1), true);
        assert_eq!(selection.header_state(&page), HeaderState::Indeterminate);

        selection.toggle_page(&page, true);
        assert_eq!(selection.header_state(&page), HeaderState::Checked);

        // An empty page is never checked.
        assert_eq!(selection.header_state(&[]), HeaderState::Unchecked);
    }

    #[test]
    fn test_header_state_under_all_scope() {
        let mut selection = SelectionSet::new();
        selection.select_all_across_pages(25);
        let page = ids(1..=10);

        assert_eq!(selection.header_state(&page), HeaderState::Checked);

        selection.toggle_one(id(5), false);
        assert_eq!(selection.header_state(&page), HeaderState::Indeterminate);
    }

    #[test]
    fn test_shrinking_total_under_all_saturates_and_resets() {
        let mut selection = SelectionSet::new();
        selection.select_all_across_pages(10);
        selection.toggle_one(id(1), false);
        selection.toggle_one(id(2), false);

        selection.set_total_count(2);
        assert_eq!(selection.scope(), SelectionScope::None);
        assert_eq!(selection.selected_count(), 0);
    }

    #[test]
    fn test_filter_change_reset_policy() {
        let mut selection = SelectionSet::new();
        selection.toggle_one(id(1), true);
        selection.filter_changed(40);

        assert_eq!(selection.scope(), SelectionScope::None);
        assert_eq!(selection.total_count(), 40);
    }

    #[test]
    fn test_filter_change_preserve_policy() {
        let mut selection = SelectionSet::with_filter_policy(FilterPolicy::Preserve);
        selection.select_all_across_pages(25);
        selection.toggle_one(id(3), false);

        selection.filter_changed(40);

        assert_eq!(selection.scope(), SelectionScope::All);
        assert_eq!(selection.selected_count(), 39);
    }

    #[test]
    fn test_select_exactly_replaces_with_custom() {
        let mut selection = SelectionSet::new();
        selection.select_all_across_pages(25);

        selection.select_exactly(vec![id(7), id(9)]);

        assert_eq!(selection.scope(), SelectionScope::Custom);
        assert_eq!(selection.selected_count(), 2);
        assert!(selection.is_selected(&id(7)));
        assert!(!selection.is_selected(&id(1)));
    }

    #[test]
    fn test_selection_changed_signal_fires_on_mutation() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let mut selection = SelectionSet::new();
        let notified = Arc::new(AtomicUsize::new(0));
        let notified_clone = notified.clone();
        selection.selection_changed.connect(move |change| {
            notified_clone.store(change.selected_count, Ordering::SeqCst);
        });

        selection.toggle_one(id(1), true);
        selection.toggle_one(id(2), true);
        assert_eq!(notified.load(Ordering::SeqCst), 2);

        selection.clear();
        assert_eq!(notified.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_redundant_toggle_is_a_no_op() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let mut selection = SelectionSet::new();
        selection.toggle_one(id(1), true);

        let emissions = Arc::new(AtomicUsize::new(0));
        let emissions_clone = emissions.clone();
        selection.selection_changed.connect(move |_| {
            emissions_clone.fetch_add(1, Ordering::SeqCst);
        });

        // Checking an already-checked row changes nothing.
        selection.toggle_one(id(1), true);
        assert_eq!(emissions.load(Ordering::SeqCst), 0);

        // Unchecking a row that was never selected changes nothing.
        selection.toggle_one(id(9), false);
        assert_eq!(emissions.load(Ordering::SeqCst), 0);
    }
}
