//! Remote Service Seams
//!
//! Abstract interfaces for the hosted document store, the auth provider and
//! timers. Implementations: Firebase (browser crate) and in-memory
//! ([`crate::memory`]).
//!
//! Everything runs on one thread, so futures and callbacks are `?Send`.

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{DomainResult, ItemFields, ItemId, UserInfo};
use crate::sync::ChangeBatch;

/// Receives every change batch from a collection subscription
pub type ChangeCallback = Box<dyn Fn(ChangeBatch)>;

/// Receives the current user (or `None`) on every auth change
pub type AuthCallback = Box<dyn Fn(Option<UserInfo>)>;

/// Dispose handle for a remote listener.
///
/// The listener is detached when the handle is dropped or
/// [`Subscription::unsubscribe`] is called.
#[must_use = "dropping a Subscription detaches the listener"]
pub struct Subscription {
    dispose: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(dispose: impl FnOnce() + 'static) -> Self {
        Self {
            dispose: Some(Box::new(dispose)),
        }
    }

    /// A handle with nothing to detach
    pub fn noop() -> Self {
        Self { dispose: None }
    }

    pub fn unsubscribe(mut self) {
        self.dispose_now();
    }

    fn dispose_now(&mut self) {
        if let Some(dispose) = self.dispose.take() {
            dispose();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.dispose_now();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.dispose.is_some())
            .finish()
    }
}

/// Remote item collection
#[async_trait(?Send)]
pub trait ItemStore {
    /// Create a document; the store assigns its ID
    async fn insert(&self, fields: &ItemFields) -> DomainResult<ItemId>;

    /// Partial update: only the present fields are written
    async fn set_fields(&self, id: &ItemId, fields: &ItemFields) -> DomainResult<()>;

    async fn delete(&self, id: &ItemId) -> DomainResult<()>;

    /// Listen for change batches. The first batch carries the current
    /// snapshot as `added` events.
    fn subscribe(&self, on_change: ChangeCallback) -> Subscription;
}

/// Remote authentication
#[async_trait(?Send)]
pub trait AuthProvider {
    /// Listen for auth changes. The current state is delivered first.
    fn on_auth_change(&self, callback: AuthCallback) -> Subscription;

    /// Run the provider's interactive (popup) sign-in flow
    async fn sign_in_interactive(&self) -> DomainResult<UserInfo>;

    /// Request sign-out; the new state arrives through `on_auth_change`
    async fn sign_out(&self) -> DomainResult<()>;
}

/// Deferred callbacks (banner auto-dismiss)
pub trait Timer {
    fn after(&self, delay: Duration, callback: Box<dyn FnOnce()>);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_subscription_disposes_once() {
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        let sub = Subscription::new(move || c.set(c.get() + 1));
        sub.unsubscribe();
        assert_eq!(count.get(), 1);

        let c = Rc::clone(&count);
        drop(Subscription::new(move || c.set(c.get() + 1)));
        assert_eq!(count.get(), 2);
    }
}
