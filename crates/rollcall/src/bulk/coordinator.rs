//! Resolution and execution of bulk actions.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use futures_util::stream::{self, StreamExt};
use rollcall_core::CancelToken;

use crate::confirm::{ConfirmPrompt, ConfirmRequest};
use crate::error::{BulkError, Result};
use crate::identity::ItemId;
use crate::selection::{SelectionScope, SelectionSet};
use crate::source::CollectionSource;

use super::report::BulkReport;

/// Default cap on concurrently in-flight per-item actions.
///
/// Per-item actions are remote calls; issuing them with unbounded fan-out
/// would overwhelm the collaborator's transport on large selections. The
/// cap is a required design parameter of every execution, overridable via
/// [`BulkCoordinator::with_concurrency_limit`].
pub const DEFAULT_CONCURRENCY_LIMIT: usize = 8;

/// Turns a [`SelectionSet`] and a per-item action into an executed,
/// aggregated [`BulkReport`].
///
/// The coordinator owns no selection state and mutates none: target
/// resolution reads the selection, execution talks only to the action,
/// and what happens to the selection afterwards is the caller's decision
/// (see [`PostActionPolicy`]).
///
/// One coordinator lives per list view, next to the view's
/// `SelectionSet`. Tearing the view down or resetting its filter should
/// call [`invalidate`](Self::invalidate) so that any in-flight invocation
/// retires instead of acting on targets resolved under criteria that no
/// longer exist.
///
/// # Example
///
/// ```ignore
/// let report = coordinator
///     .action(&selection, &source, |id| client.delete_document(id))
///     .confirm_with(&dialogs, ConfirmRequest::destructive("Delete", "Delete 12 items?"))
///     .cancel_token(token)
///     .run()
///     .await?;
/// ```
#[derive(Debug)]
pub struct BulkCoordinator {
    /// Cap on concurrently in-flight per-item actions.
    concurrency_limit: usize,

    /// Bumped by [`invalidate`](Self::invalidate); executions snapshot it
    /// at entry and retire when it moves.
    epoch: AtomicU64,
}

impl Default for BulkCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl BulkCoordinator {
    /// Creates a coordinator with the default concurrency cap.
    pub fn new() -> Self {
        Self::with_concurrency_limit(DEFAULT_CONCURRENCY_LIMIT)
    }

    /// Creates a coordinator with an explicit concurrency cap (minimum 1).
    pub fn with_concurrency_limit(limit: usize) -> Self {
        Self {
            concurrency_limit: limit.max(1),
            epoch: AtomicU64::new(0),
        }
    }

    /// The cap on concurrently in-flight per-item actions.
    pub fn concurrency_limit(&self) -> usize {
        self.concurrency_limit
    }

    /// Retires every in-flight execution started before this call.
    ///
    /// Call when the owning view is torn down or its filter resets: a
    /// resolution obtained under the old criteria must never feed an
    /// action, even if it settles afterwards.
    pub fn invalidate(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
    }

    /// Starts building an execution of `action` over the current
    /// selection.
    ///
    /// The returned [`BulkExecution`] optionally takes a confirmation
    /// prompt and a cancel token before being driven with
    /// [`run`](BulkExecution::run).
    pub fn action<'a, S, A>(
        &'a self,
        selection: &'a SelectionSet,
        source: &'a S,
        action: A,
    ) -> BulkExecution<'a, S, A> {
        BulkExecution {
            coordinator: self,
            selection,
            source,
            action,
            confirm: None,
            token: CancelToken::never(),
        }
    }

    fn current_epoch(&self) -> u64 {
        self.epoch.load(Ordering::SeqCst)
    }
}

/// One prepared bulk invocation, built by [`BulkCoordinator::action`].
pub struct BulkExecution<'a, S, A> {
    coordinator: &'a BulkCoordinator,
    selection: &'a SelectionSet,
    source: &'a S,
    action: A,
    confirm: Option<(&'a dyn ConfirmPrompt, ConfirmRequest)>,
    token: CancelToken,
}

impl<'a, S, A> BulkExecution<'a, S, A> {
    /// Requires the prompt to accept `request` before anything is
    /// resolved or executed. Destructive actions must set this.
    pub fn confirm_with(mut self, prompt: &'a dyn ConfirmPrompt, request: ConfirmRequest) -> Self {
        self.confirm = Some((prompt, request));
        self
    }

    /// Attaches a cancel token; the owning view keeps the matching
    /// handle and cancels on teardown.
    pub fn cancel_token(mut self, token: CancelToken) -> Self {
        self.token = token;
        self
    }

    /// Resolves the selection to concrete targets and runs the action
    /// against each of them.
    ///
    /// Targets are executed independently with settle-all semantics: one
    /// target's failure never aborts or blocks its siblings, and every
    /// outcome is captured into the report. At most
    /// [`concurrency_limit`](BulkCoordinator::concurrency_limit) actions
    /// are in flight at any moment, with no completion-order guarantee.
    ///
    /// # Errors
    ///
    /// - [`BulkError::Declined`]: the confirmation prompt was refused;
    ///   nothing was resolved or executed.
    /// - [`BulkError::Resolve`]: the source failed to resolve an
    ///   `All`-scope selection; no per-item action was issued.
    /// - [`BulkError::Cancelled`]: the token fired; a cancellation during
    ///   resolution discards the resolution, one during execution stops
    ///   issuing further actions.
    /// - [`BulkError::Superseded`]: [`BulkCoordinator::invalidate`] was
    ///   called after this execution started.
    pub async fn run<F, E>(self) -> Result<BulkReport>
    where
        S: CollectionSource,
        A: Fn(ItemId) -> F,
        F: Future<Output = std::result::Result<(), E>>,
        E: fmt::Display,
    {
        let BulkExecution {
            coordinator,
            selection,
            source,
            action,
            confirm,
            mut token,
        } = self;

        let epoch = coordinator.current_epoch();

        // Empty selection: nothing to confirm, resolve, or execute.
        if selection.scope() == SelectionScope::None {
            return Ok(BulkReport::default());
        }

        if let Some((prompt, request)) = confirm {
            if !prompt.confirm(&request).await {
                tracing::debug!(target: "rollcall::bulk", "bulk action declined");
                return Err(BulkError::Declined);
            }
        }

        let targets: Vec<ItemId> = match selection.scope() {
            SelectionScope::None => Vec::new(),
            // Bounded and already concrete; no round-trip needed.
            SelectionScope::Page | SelectionScope::Custom => {
                selection.selected_ids().cloned().collect()
            }
            // Only the view's source knows what "all" currently means.
            SelectionScope::All => {
                let resolved = tokio::select! {
                    biased;
                    _ = token.cancelled() => {
                        tracing::debug!(target: "rollcall::bulk", "resolution cancelled, result discarded");
                        return Err(BulkError::Cancelled);
                    }
                    resolved = source.resolve_all_ids() => resolved?,
                };
                resolved
                    .into_iter()
                    .filter(|id| selection.is_selected(id))
                    .collect()
            }
        };

        // The world may have moved while we were confirming or resolving.
        if token.is_cancelled() {
            return Err(BulkError::Cancelled);
        }
        if coordinator.current_epoch() != epoch {
            tracing::debug!(target: "rollcall::bulk", "stale resolution discarded");
            return Err(BulkError::Superseded);
        }

        tracing::debug!(
            target: "rollcall::bulk",
            targets = targets.len(),
            concurrency = coordinator.concurrency_limit,
            "executing bulk action"
        );

        let mut report = BulkReport::default();
        {
            let mut outcomes = stream::iter(targets.into_iter().map(|id| {
                let pending = action(id.clone());
                async move {
                    match pending.await {
                        Ok(()) => (id, None),
                        Err(err) => (id, Some(err.to_string())),
                    }
                }
            }))
            .buffer_unordered(coordinator.concurrency_limit);

            loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => {
                        tracing::debug!(target: "rollcall::bulk", "bulk action cancelled mid-flight");
                        return Err(BulkError::Cancelled);
                    }
                    outcome = outcomes.next() => match outcome {
                        Some((id, None)) => report.record_success(id),
                        Some((id, Some(reason))) => report.record_failure(id, reason),
                        None => break,
                    },
                }
            }
        }

        tracing::info!(
            target: "rollcall::bulk",
            succeeded = report.succeeded.len(),
            failed = report.failed.len(),
            "bulk action completed"
        );
        Ok(report)
    }
}

/// What the caller does with the selection once the report is in.
///
/// The coordinator never touches the selection itself; the view applies
/// one of these after showing the aggregate notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostActionPolicy {
    /// Discard the whole selection, failures included.
    #[default]
    ClearSelection,
    /// Leave the selection untouched.
    RetainSelection,
    /// Narrow the selection to the failed targets so the user can retry
    /// just those; clears when everything succeeded.
    RetainFailures,
}

impl PostActionPolicy {
    /// Applies this policy to the selection the report was produced from.
    pub fn apply(self, selection: &mut SelectionSet, report: &BulkReport) {
        match self {
            Self::ClearSelection => selection.clear(),
            Self::RetainSelection => {}
            Self::RetainFailures => {
                if report.is_complete_success() {
                    selection.clear();
                } else {
                    selection.select_exactly(report.failed_ids().cloned());
                }
            }
        }
    }
}
