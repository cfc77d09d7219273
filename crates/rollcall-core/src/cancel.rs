//! Cooperative cancellation for in-flight asynchronous work.
//!
//! A [`CancelHandle`] / [`CancelToken`] pair lets the owner of an async
//! operation abort it from the outside: the handle stays with the owner
//! (typically the view that started a bulk action), the token travels into
//! the async task, which selects on [`CancelToken::cancelled`] at its
//! suspension points.
//!
//! Dropping the handle cancels the token. A view that is torn down while a
//! resolution is in flight therefore aborts it without any explicit call.
//!
//! # Example
//!
//! ```
//! use rollcall_core::cancel::cancel_pair;
//!
//! # async fn slow_work() {}
//! # async fn demo() {
//! let (handle, mut token) = cancel_pair();
//!
//! tokio::select! {
//!     _ = slow_work() => println!("finished"),
//!     _ = token.cancelled() => println!("aborted"),
//! }
//! # }
//! ```

use tokio::sync::watch;

/// Create a connected handle/token pair.
pub fn cancel_pair() -> (CancelHandle, CancelToken) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle { tx }, CancelToken { rx, keep_open: None })
}

/// The owner's side of a cancellation pair.
///
/// Calling [`cancel`](Self::cancel), or simply dropping the handle,
/// resolves every outstanding [`CancelToken::cancelled`] future.
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    /// Request cancellation of all associated tokens.
    ///
    /// Idempotent; later calls have no effect.
    pub fn cancel(&self) {
        let _ = self.tx.send(true);
    }

    /// Whether cancellation has already been requested.
    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }
}

/// The task's side of a cancellation pair.
///
/// Tokens are cheap to clone; every clone observes the same handle.
#[derive(Clone, Debug)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
    /// Keeps the channel open for tokens created without a handle.
    keep_open: Option<std::sync::Arc<watch::Sender<bool>>>,
}

impl CancelToken {
    /// Whether cancellation has been requested or the handle was dropped.
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow() || self.rx.has_changed().is_err()
    }

    /// Resolves once cancellation is requested or the handle is dropped.
    ///
    /// Intended for use in `tokio::select!` arms alongside the work being
    /// guarded.
    pub async fn cancelled(&mut self) {
        if *self.rx.borrow() {
            return;
        }
        loop {
            match self.rx.changed().await {
                Ok(()) => {
                    if *self.rx.borrow() {
                        return;
                    }
                }
                // Handle dropped: the owning scope is gone, treat as cancelled.
                Err(_) => return,
            }
        }
    }

    /// A token that is never cancelled, for callers without an owner scope.
    pub fn never() -> Self {
        let (tx, rx) = watch::channel(false);
        Self {
            rx,
            keep_open: Some(std::sync::Arc::new(tx)),
        }
    }
}

static_assertions::assert_impl_all!(CancelToken: Send, Sync, Clone);

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_cancel_resolves_token() {
        let (handle, mut token) = cancel_pair();
        assert!(!token.is_cancelled());

        handle.cancel();

        token.cancelled().await;
        assert!(token.is_cancelled());
    }

    #[tokio::test]
    async fn test_drop_handle_cancels() {
        let (handle, mut token) = cancel_pair();
        drop(handle);

        token.cancelled().await;
        assert!(token.is_cancelled());
    }

    #[tokio::test]
    async fn test_select_prefers_cancellation() {
        let (handle, mut token) = cancel_pair();
        handle.cancel();

        let outcome = tokio::select! {
            biased;
            _ = token.cancelled() => "cancelled",
            _ = tokio::time::sleep(Duration::from_secs(60)) => "slept",
        };
        assert_eq!(outcome, "cancelled");
    }

    #[tokio::test]
    async fn test_never_token_stays_pending() {
        let token = CancelToken::never();
        assert!(!token.is_cancelled());
    }

    #[tokio::test]
    async fn test_clone_observes_same_handle() {
        let (handle, token) = cancel_pair();
        let mut cloned = token.clone();

        handle.cancel();
        cloned.cancelled().await;
        assert!(token.is_cancelled());
    }
}
