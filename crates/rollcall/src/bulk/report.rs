//! Aggregated outcome of one bulk invocation.

use crate::identity::ItemId;

/// One target that failed, with the reason it failed.
///
/// Reasons come from the action's error via `Display`; they are captured
/// verbatim and never discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BulkFailure {
    /// The target that failed.
    pub id: ItemId,
    /// Why it failed.
    pub reason: String,
}

/// Aggregated result of one bulk invocation.
///
/// Every resolved target lands in exactly one of the two lists. The
/// report backs a single aggregate user notification (via
/// [`summary`](Self::summary)), not one notification per item. It is
/// produced once per invocation and not persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BulkReport {
    /// Targets whose action completed successfully.
    pub succeeded: Vec<ItemId>,
    /// Targets whose action failed, with reasons.
    pub failed: Vec<BulkFailure>,
}

impl BulkReport {
    /// Total number of targets the action ran against.
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    /// Returns `true` if no target was executed at all.
    pub fn is_empty(&self) -> bool {
        self.succeeded.is_empty() && self.failed.is_empty()
    }

    /// Returns `true` if no target failed.
    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// The IDs of the failed targets, for retry-style selection narrowing.
    pub fn failed_ids(&self) -> impl Iterator<Item = &ItemId> {
        self.failed.iter().map(|failure| &failure.id)
    }

    /// One-line aggregate summary for the user notification.
    pub fn summary(&self) -> String {
        if self.failed.is_empty() {
            format!("{} succeeded", self.succeeded.len())
        } else {
            format!(
                "{} succeeded, {} failed",
                self.succeeded.len(),
                self.failed.len()
            )
        }
    }

    pub(crate) fn record_success(&mut self, id: ItemId) {
        self.succeeded.push(id);
    }

    pub(crate) fn record_failure(&mut self, id: ItemId, reason: String) {
        self.failed.push(BulkFailure { id, reason });
    }
}
