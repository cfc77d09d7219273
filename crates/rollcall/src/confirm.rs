//! The injected confirmation collaborator.
//!
//! Destructive bulk actions must be confirmed before any target is
//! resolved or touched. The prompt is an explicit dependency passed to
//! the coordinator, never an ambient global, so views, tests, and
//! headless callers each decide how (and whether) to ask.

use futures_util::future::BoxFuture;

/// Describes the confirmation dialog for one bulk invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmRequest {
    /// Dialog title.
    pub title: String,
    /// Dialog body, typically naming the action and the selected count.
    pub message: String,
    /// Label of the confirming control.
    pub confirm_label: String,
    /// Whether the action is destructive (delete-like).
    pub destructive: bool,
}

impl ConfirmRequest {
    /// Creates a non-destructive confirmation request.
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            confirm_label: "Confirm".to_string(),
            destructive: false,
        }
    }

    /// Creates a destructive confirmation request.
    pub fn destructive(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            destructive: true,
            ..Self::new(title, message)
        }
    }

    /// Overrides the confirming control's label.
    pub fn with_confirm_label(mut self, label: impl Into<String>) -> Self {
        self.confirm_label = label.into();
        self
    }
}

/// Asynchronous confirmation prompt.
///
/// `true` means the user accepted; `false` aborts the invocation as a
/// whole before anything is resolved or executed.
pub trait ConfirmPrompt: Send + Sync {
    /// Presents the request and resolves with the user's choice.
    fn confirm<'a>(&'a self, request: &'a ConfirmRequest) -> BoxFuture<'a, bool>;
}

/// A prompt that accepts everything. Useful for non-interactive callers
/// and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl ConfirmPrompt for AlwaysConfirm {
    fn confirm<'a>(&'a self, _request: &'a ConfirmRequest) -> BoxFuture<'a, bool> {
        Box::pin(std::future::ready(true))
    }
}

/// A prompt that declines everything. Useful for tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverConfirm;

impl ConfirmPrompt for NeverConfirm {
    fn confirm<'a>(&'a self, _request: &'a ConfirmRequest) -> BoxFuture<'a, bool> {
        Box::pin(std::future::ready(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destructive_request() {
        let request = ConfirmRequest::destructive("Delete documents", "Delete 12 documents?")
            .with_confirm_label("Delete");

        assert!(request.destructive);
        assert_eq!(request.confirm_label, "Delete");
    }

    #[tokio::test]
    async fn test_canned_prompts() {
        let request = ConfirmRequest::new("Export", "Export 3 items?");
        assert!(AlwaysConfirm.confirm(&request).await);
        assert!(!NeverConfirm.confirm(&request).await);
    }
}
