//! Application Controller
//!
//! Owns the state slices (items, session, form, banner), keeps the remote
//! subscriptions alive, turns user intents into remote calls and hands a
//! fresh [`View`] to the platform layer after every state change.
//!
//! State is only borrowed synchronously: never across an `.await` and never
//! while the render callback runs.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

use crate::banner::{DismissToken, ErrorBanner};
use crate::domain::{DomainResult, ItemFields, ItemId, UserInfo};
use crate::form::{FormState, SaveIntent};
use crate::remote::{AuthProvider, ItemStore, Subscription, Timer};
use crate::render::{render, RenderInput, View};
use crate::session::SessionTracker;
use crate::sync::{ChangeBatch, ItemCollection};

/// Application state, one slice per component
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub items: ItemCollection,
    pub list_revision: u64,
    pub session: SessionTracker,
    pub form: FormState,
    pub banner: ErrorBanner,
}

impl AppState {
    pub fn view(&self) -> View {
        render(RenderInput {
            items: &self.items,
            list_revision: self.list_revision,
            session: self.session.session(),
            form: &self.form,
            banner: &self.banner,
        })
    }
}

/// Remote collaborators the controller talks to
#[derive(Clone)]
pub struct Services {
    pub store: Rc<dyn ItemStore>,
    pub auth: Rc<dyn AuthProvider>,
    pub timer: Rc<dyn Timer>,
}

/// How a form submission ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank text; nothing was sent
    Rejected,
    Saved,
    Failed,
}

struct Inner {
    services: Services,
    dismiss_after: Duration,
    state: RefCell<AppState>,
    on_render: Box<dyn Fn(View)>,
    subscriptions: RefCell<Vec<Subscription>>,
    renders: Cell<u64>,
}

#[derive(Clone)]
pub struct TodoController {
    inner: Rc<Inner>,
}

impl TodoController {
    pub fn new(services: Services, dismiss_after: Duration, on_render: impl Fn(View) + 'static) -> Self {
        Self {
            inner: Rc::new(Inner {
                services,
                dismiss_after,
                state: RefCell::new(AppState::default()),
                on_render: Box::new(on_render),
                subscriptions: RefCell::new(Vec::new()),
                renders: Cell::new(0),
            }),
        }
    }

    fn from_weak(weak: &Weak<Inner>) -> Option<Self> {
        weak.upgrade().map(|inner| Self { inner })
    }

    /// Attach to the item collection and auth state, then draw once
    pub fn start(&self) {
        self.stop();
        // the new subscription replays the whole snapshot
        self.inner.state.borrow_mut().items = ItemCollection::new();

        let weak = Rc::downgrade(&self.inner);
        let items = self.inner.services.store.subscribe(Box::new(move |batch| {
            if let Some(controller) = Self::from_weak(&weak) {
                controller.apply_changes(&batch);
            }
        }));

        let weak = Rc::downgrade(&self.inner);
        let auth = self.inner.services.auth.on_auth_change(Box::new(move |user| {
            if let Some(controller) = Self::from_weak(&weak) {
                controller.apply_auth(user.as_ref());
            }
        }));

        self.inner.subscriptions.borrow_mut().extend([items, auth]);
        tracing::debug!("controller started");
        self.render();
    }

    /// Detach every remote listener
    pub fn stop(&self) {
        let subscriptions = std::mem::take(&mut *self.inner.subscriptions.borrow_mut());
        if !subscriptions.is_empty() {
            tracing::debug!(count = subscriptions.len(), "disposing subscriptions");
        }
        drop(subscriptions);
    }

    pub fn state(&self) -> AppState {
        self.inner.state.borrow().clone()
    }

    pub fn view(&self) -> View {
        self.inner.state.borrow().view()
    }

    /// Number of views handed to the render callback so far
    pub fn render_count(&self) -> u64 {
        self.inner.renders.get()
    }

    fn render(&self) {
        let view = self.inner.state.borrow().view();
        self.inner.renders.set(self.inner.renders.get() + 1);
        (self.inner.on_render)(view);
    }

    // ========================
    // Remote notifications
    // ========================

    /// Apply one change batch, then render once
    pub fn apply_changes(&self, batch: &ChangeBatch) {
        self.inner.state.borrow_mut().items.apply_batch(batch);
        self.render();
    }

    pub fn apply_auth(&self, user: Option<&UserInfo>) {
        self.inner.state.borrow_mut().session.on_auth_change(user);
        self.render();
    }

    // ========================
    // Form intents
    // ========================

    pub fn set_text(&self, text: impl Into<String>) {
        self.inner.state.borrow_mut().form.set_text(text);
        self.render();
    }

    /// Load an item into the form for editing
    pub fn edit(&self, id: &ItemId) {
        let changed = {
            let mut state = self.inner.state.borrow_mut();
            let AppState { items, form, .. } = &mut *state;
            form.begin_edit(items, id)
        };
        if changed {
            self.render();
        }
    }

    pub fn reset_form(&self) {
        self.inner.state.borrow_mut().form.reset();
        self.render();
    }

    /// Send the form to the store. The form is cleared whether the write
    /// succeeds or fails; blank text is rejected without a remote call.
    pub async fn submit(&self) -> SubmitOutcome {
        let Some(intent) = self.inner.state.borrow().form.submission() else {
            return SubmitOutcome::Rejected;
        };

        let store = Rc::clone(&self.inner.services.store);
        let result = match &intent {
            SaveIntent::Insert { fields } => store.insert(fields).await.map(|id| {
                tracing::debug!(id = %id, "item inserted");
            }),
            SaveIntent::Update { id, fields } => store.set_fields(id, fields).await,
        };

        self.inner.state.borrow_mut().form.reset();
        match result {
            Ok(()) => {
                self.render();
                SubmitOutcome::Saved
            }
            Err(e) => {
                tracing::error!(error = %e, "saving item failed");
                self.report_error(e.user_message());
                SubmitOutcome::Failed
            }
        }
    }

    // ========================
    // Row intents
    // ========================

    /// Write only the `done` field, using the checkbox's new state
    pub async fn toggle_done(&self, id: &ItemId, done: bool) -> DomainResult<()> {
        let store = Rc::clone(&self.inner.services.store);
        let result = store.set_fields(id, &ItemFields::done(done)).await;
        if let Err(e) = &result {
            tracing::error!(id = %id, error = %e, "updating done flag failed");
            // the checkbox already shows the rejected state
            self.inner.state.borrow_mut().list_revision += 1;
            self.report_error(e.user_message());
        }
        result
    }

    pub async fn delete(&self, id: &ItemId) -> DomainResult<()> {
        let store = Rc::clone(&self.inner.services.store);
        let result = store.delete(id).await;
        if let Err(e) = &result {
            tracing::error!(id = %id, error = %e, "deleting item failed");
            self.report_error(e.user_message());
        }
        result
    }

    // ========================
    // Auth intents
    // ========================

    pub async fn sign_in(&self) -> DomainResult<()> {
        let auth = Rc::clone(&self.inner.services.auth);
        match auth.sign_in_interactive().await {
            Ok(user) => {
                self.inner.state.borrow_mut().session.signed_in(&user);
                self.render();
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "sign-in failed");
                self.report_error(e.user_message());
                Err(e)
            }
        }
    }

    /// Request sign-out. The session changes when the provider notifies.
    pub async fn sign_out(&self) -> DomainResult<()> {
        let auth = Rc::clone(&self.inner.services.auth);
        let result = auth.sign_out().await;
        if let Err(e) = &result {
            tracing::warn!(error = %e, "sign-out failed");
            self.report_error(e.user_message());
        }
        result
    }

    // ========================
    // Error banner
    // ========================

    /// Show `message` on the banner and schedule its dismissal
    pub fn report_error(&self, message: impl Into<String>) {
        let token = self.inner.state.borrow_mut().banner.show(message);
        self.render();

        let weak = Rc::downgrade(&self.inner);
        self.inner.services.timer.after(
            self.inner.dismiss_after,
            Box::new(move || {
                if let Some(controller) = Self::from_weak(&weak) {
                    controller.dismiss_error(token);
                }
            }),
        );
    }

    fn dismiss_error(&self, token: DismissToken) {
        let changed = self.inner.state.borrow_mut().banner.dismiss(token);
        if changed {
            self.render();
        }
    }
}
