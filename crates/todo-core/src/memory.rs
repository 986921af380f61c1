//! In-Memory Backend
//!
//! Single-threaded stand-ins for the document store, auth provider and timer.
//! They follow the hosted service's observable behavior: the first
//! subscription batch is the current snapshot, updating a missing document
//! fails, deleting one does not. Every write is recorded so callers can
//! assert on exactly which remote calls were made.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{Document, DomainError, DomainResult, ItemFields, ItemId, UserInfo};
use crate::remote::{AuthCallback, AuthProvider, ChangeCallback, ItemStore, Subscription, Timer};
use crate::sync::{ChangeBatch, ChangeEvent};

/// When notifications reach listeners
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Delivery {
    /// Right after each write, one batch per write
    #[default]
    Immediate,
    /// Queued until `flush()`, then delivered as one batch
    Manual,
}

/// A write received by [`MemoryStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Insert(ItemFields),
    SetFields(ItemId, ItemFields),
    Delete(ItemId),
}

#[derive(Default)]
struct StoreInner {
    docs: Vec<(ItemId, Document)>,
    next_doc: u64,
    listeners: Vec<(u64, Rc<dyn Fn(ChangeBatch)>)>,
    next_listener: u64,
    pending: Vec<ChangeEvent>,
    delivery: Delivery,
    calls: Vec<StoreCall>,
    fail_next: Option<DomainError>,
}

/// In-memory document collection
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<StoreInner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delivery(delivery: Delivery) -> Self {
        let store = Self::new();
        store.inner.borrow_mut().delivery = delivery;
        store
    }

    /// Put a document in place without recording a call
    pub fn seed(&self, id: impl Into<ItemId>, fields: ItemFields) {
        let id = id.into();
        let doc = fields.to_document();
        self.inner.borrow_mut().docs.push((id.clone(), doc.clone()));
        self.emit(ChangeEvent::added(id, doc));
    }

    /// Fail the next write with `error`
    pub fn fail_next(&self, error: DomainError) {
        self.inner.borrow_mut().fail_next = Some(error);
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.inner.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.inner.borrow_mut().calls.clear();
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Current documents in creation order
    pub fn snapshot(&self) -> Vec<(ItemId, Document)> {
        self.inner.borrow().docs.clone()
    }

    /// Deliver queued changes as one batch
    pub fn flush(&self) {
        let (events, listeners) = {
            let mut inner = self.inner.borrow_mut();
            let events = std::mem::take(&mut inner.pending);
            let listeners: Vec<_> = inner.listeners.iter().map(|(_, l)| Rc::clone(l)).collect();
            (events, listeners)
        };
        if events.is_empty() {
            return;
        }
        let batch = ChangeBatch::new(events);
        for listener in listeners {
            listener(batch.clone());
        }
    }

    fn emit(&self, event: ChangeEvent) {
        let immediate = {
            let mut inner = self.inner.borrow_mut();
            inner.pending.push(event);
            inner.delivery == Delivery::Immediate
        };
        if immediate {
            self.flush();
        }
    }

    fn record(&self, call: StoreCall) -> DomainResult<()> {
        let mut inner = self.inner.borrow_mut();
        inner.calls.push(call);
        match inner.fail_next.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait(?Send)]
impl ItemStore for MemoryStore {
    async fn insert(&self, fields: &ItemFields) -> DomainResult<ItemId> {
        self.record(StoreCall::Insert(fields.clone()))?;
        let id = {
            let mut inner = self.inner.borrow_mut();
            inner.next_doc += 1;
            let id = ItemId::new(format!("doc-{}", inner.next_doc));
            inner.docs.push((id.clone(), fields.to_document()));
            id
        };
        self.emit(ChangeEvent::added(id.clone(), fields.to_document()));
        Ok(id)
    }

    async fn set_fields(&self, id: &ItemId, fields: &ItemFields) -> DomainResult<()> {
        self.record(StoreCall::SetFields(id.clone(), fields.clone()))?;
        let doc = {
            let mut inner = self.inner.borrow_mut();
            let (_, doc) = inner
                .docs
                .iter_mut()
                .find(|(doc_id, _)| doc_id == id)
                .ok_or_else(|| DomainError::NotFound(format!("No document to update: {}", id)))?;
            fields.apply_to(doc);
            doc.clone()
        };
        self.emit(ChangeEvent::modified(id.clone(), doc));
        Ok(())
    }

    async fn delete(&self, id: &ItemId) -> DomainResult<()> {
        self.record(StoreCall::Delete(id.clone()))?;
        let existed = {
            let mut inner = self.inner.borrow_mut();
            let before = inner.docs.len();
            inner.docs.retain(|(doc_id, _)| doc_id != id);
            inner.docs.len() != before
        };
        if existed {
            self.emit(ChangeEvent::removed(id.clone()));
        }
        Ok(())
    }

    fn subscribe(&self, on_change: ChangeCallback) -> Subscription {
        let listener: Rc<dyn Fn(ChangeBatch)> = Rc::from(on_change);
        let (key, initial) = {
            let mut inner = self.inner.borrow_mut();
            inner.next_listener += 1;
            let key = inner.next_listener;
            inner.listeners.push((key, Rc::clone(&listener)));
            let initial: Vec<_> = inner
                .docs
                .iter()
                .map(|(id, doc)| ChangeEvent::added(id.clone(), doc.clone()))
                .collect();
            (key, initial)
        };
        listener(ChangeBatch::new(initial));

        let weak: Weak<RefCell<StoreInner>> = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().listeners.retain(|(k, _)| *k != key);
            }
        })
    }
}

struct AuthInner {
    user: Option<UserInfo>,
    popup: Result<UserInfo, DomainError>,
    listeners: Vec<(u64, Rc<dyn Fn(Option<UserInfo>)>)>,
    next_listener: u64,
    delivery: Delivery,
    pending: Vec<Option<UserInfo>>,
}

/// In-memory auth provider whose popup signs in a fixed user
#[derive(Clone)]
pub struct MemoryAuth {
    inner: Rc<RefCell<AuthInner>>,
}

impl MemoryAuth {
    pub fn new(popup_user: UserInfo) -> Self {
        Self {
            inner: Rc::new(RefCell::new(AuthInner {
                user: None,
                popup: Ok(popup_user),
                listeners: Vec::new(),
                next_listener: 0,
                delivery: Delivery::Immediate,
                pending: Vec::new(),
            })),
        }
    }

    pub fn with_delivery(self, delivery: Delivery) -> Self {
        self.inner.borrow_mut().delivery = delivery;
        self
    }

    /// Start already signed in
    pub fn signed_in(self, user: UserInfo) -> Self {
        self.inner.borrow_mut().user = Some(user);
        self
    }

    /// Make the popup flow fail with `message`
    pub fn fail_popup(&self, message: impl Into<String>) {
        self.inner.borrow_mut().popup = Err(DomainError::Auth(message.into()));
    }

    pub fn current_user(&self) -> Option<UserInfo> {
        self.inner.borrow().user.clone()
    }

    /// Deliver queued auth notifications in order
    pub fn flush(&self) {
        let (pending, listeners) = {
            let mut inner = self.inner.borrow_mut();
            let pending = std::mem::take(&mut inner.pending);
            let listeners: Vec<_> = inner.listeners.iter().map(|(_, l)| Rc::clone(l)).collect();
            (pending, listeners)
        };
        for user in pending {
            for listener in &listeners {
                listener(user.clone());
            }
        }
    }

    fn set_user(&self, user: Option<UserInfo>) {
        let immediate = {
            let mut inner = self.inner.borrow_mut();
            inner.user = user.clone();
            inner.pending.push(user);
            inner.delivery == Delivery::Immediate
        };
        if immediate {
            self.flush();
        }
    }
}

#[async_trait(?Send)]
impl AuthProvider for MemoryAuth {
    fn on_auth_change(&self, callback: AuthCallback) -> Subscription {
        let listener: Rc<dyn Fn(Option<UserInfo>)> = Rc::from(callback);
        let (key, current) = {
            let mut inner = self.inner.borrow_mut();
            inner.next_listener += 1;
            let key = inner.next_listener;
            inner.listeners.push((key, Rc::clone(&listener)));
            (key, inner.user.clone())
        };
        listener(current);

        let weak = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().listeners.retain(|(k, _)| *k != key);
            }
        })
    }

    async fn sign_in_interactive(&self) -> DomainResult<UserInfo> {
        let popup = self.inner.borrow().popup.clone();
        let user = popup?;
        self.set_user(Some(user.clone()));
        Ok(user)
    }

    async fn sign_out(&self) -> DomainResult<()> {
        self.set_user(None);
        Ok(())
    }
}

/// Timer whose callbacks run only when asked to
#[derive(Default)]
pub struct ManualTimer {
    scheduled: RefCell<Vec<(Duration, Box<dyn FnOnce()>)>>,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.scheduled.borrow().len()
    }

    pub fn delays(&self) -> Vec<Duration> {
        self.scheduled.borrow().iter().map(|(d, _)| *d).collect()
    }

    /// Run the oldest scheduled callback. Returns false if none was pending.
    pub fn fire_next(&self) -> bool {
        let next = {
            let mut scheduled = self.scheduled.borrow_mut();
            if scheduled.is_empty() {
                None
            } else {
                Some(scheduled.remove(0))
            }
        };
        match next {
            Some((_, callback)) => {
                callback();
                true
            }
            None => false,
        }
    }

    /// Run every scheduled callback, oldest first
    pub fn fire_all(&self) {
        let scheduled = std::mem::take(&mut *self.scheduled.borrow_mut());
        for (_, callback) in scheduled {
            callback();
        }
    }
}

impl Timer for ManualTimer {
    fn after(&self, delay: Duration, callback: Box<dyn FnOnce()>) {
        self.scheduled.borrow_mut().push((delay, callback));
    }
}
