//! Global Error Banner
//!
//! Holds the one user-visible error message. Each message gets a generation
//! number; a scheduled dismissal only hides the banner if it still shows the
//! message it was scheduled for.

use std::collections::VecDeque;
use std::time::Duration;

/// Default time a message stays on screen
pub const DEFAULT_DISMISS_AFTER: Duration = Duration::from_millis(5000);

/// Most messages held while no banner exists yet
pub const MAX_PENDING_ERRORS: usize = 16;

/// Identifies one shown message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DismissToken(u64);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorBanner {
    message: Option<String>,
    generation: u64,
}

impl ErrorBanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_visible(&self) -> bool {
        self.message.is_some()
    }

    pub fn show(&mut self, message: impl Into<String>) -> DismissToken {
        self.generation += 1;
        self.message = Some(message.into());
        DismissToken(self.generation)
    }

    /// Hide the banner if `token` belongs to the message currently shown.
    /// Returns whether anything changed.
    pub fn dismiss(&mut self, token: DismissToken) -> bool {
        if token.0 == self.generation && self.message.is_some() {
            self.message = None;
            true
        } else {
            false
        }
    }
}

/// Messages reported before a banner is mounted. Bounded: the oldest are
/// dropped first. Once closed, nothing is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingErrors {
    messages: VecDeque<String>,
    dropped: usize,
    closed: bool,
}

impl PendingErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold `message` until [`take`](Self::take). Returns false if it was
    /// discarded because the queue is closed.
    pub fn push(&mut self, message: impl Into<String>) -> bool {
        if self.closed {
            return false;
        }
        if self.messages.len() == MAX_PENDING_ERRORS {
            self.messages.pop_front();
            self.dropped += 1;
        }
        self.messages.push_back(message.into());
        true
    }

    pub fn take(&mut self) -> Vec<String> {
        self.dropped = 0;
        self.messages.drain(..).collect()
    }

    /// Discard everything held and every later message
    pub fn close(&mut self) {
        self.messages.clear();
        self.closed = true;
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Messages lost to the bound since the last take
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_then_dismiss() {
        let mut banner = ErrorBanner::new();
        let token = banner.show("permission denied");
        assert_eq!(banner.message(), Some("permission denied"));
        assert!(banner.dismiss(token));
        assert!(!banner.is_visible());
        assert!(!banner.dismiss(token));
    }

    #[test]
    fn test_stale_dismiss_keeps_newer_message() {
        let mut banner = ErrorBanner::new();
        let first = banner.show("first");
        let second = banner.show("second");
        assert!(!banner.dismiss(first));
        assert_eq!(banner.message(), Some("second"));
        assert!(banner.dismiss(second));
    }

    #[test]
    fn test_pending_errors_keep_newest() {
        let mut pending = PendingErrors::new();
        for n in 0..MAX_PENDING_ERRORS + 3 {
            assert!(pending.push(format!("error {n}")));
        }
        assert_eq!(pending.len(), MAX_PENDING_ERRORS);
        assert_eq!(pending.dropped(), 3);

        let taken = pending.take();
        assert_eq!(taken.first().map(String::as_str), Some("error 3"));
        assert_eq!(taken.last(), Some(&format!("error {}", MAX_PENDING_ERRORS + 2)));
        assert!(pending.is_empty());
        assert_eq!(pending.dropped(), 0);
    }

    #[test]
    fn test_closed_queue_discards() {
        let mut pending = PendingErrors::new();
        pending.push("before startup failed");
        pending.close();
        assert!(pending.is_empty());
        assert!(!pending.push("after"));
        assert!(pending.take().is_empty());
    }
}
