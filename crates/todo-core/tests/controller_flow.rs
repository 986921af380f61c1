//! Controller Integration Tests
//!
//! Drives the controller against the in-memory backend and checks exactly
//! which remote calls each user action makes.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use todo_core::memory::{Delivery, ManualTimer, MemoryAuth, MemoryStore, StoreCall};
use todo_core::{
    DomainError, Entity, FormMode, Item, ItemFields, ItemId, ItemStore, Services, SubmitOutcome,
    TodoController, UserInfo, View,
};

struct Harness {
    controller: TodoController,
    store: MemoryStore,
    auth: MemoryAuth,
    timer: Rc<ManualTimer>,
    views: Rc<RefCell<Vec<View>>>,
}

impl Harness {
    fn new(store: MemoryStore, auth: MemoryAuth) -> Self {
        let timer = Rc::new(ManualTimer::new());
        let views = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&views);
        let services = Services {
            store: Rc::new(store.clone()),
            auth: Rc::new(auth.clone()),
            timer: timer.clone(),
        };
        let controller = TodoController::new(services, Duration::from_secs(5), move |view| {
            sink.borrow_mut().push(view)
        });
        controller.start();
        Self {
            controller,
            store,
            auth,
            timer,
            views,
        }
    }

    fn last_view(&self) -> View {
        self.views.borrow().last().cloned().expect("at least one render")
    }

    fn texts(&self) -> Vec<String> {
        self.last_view().list.rows.into_iter().map(|r| r.text).collect()
    }
}

fn ada() -> UserInfo {
    UserInfo::new("u1", Some("Ada"))
}

fn default_harness() -> Harness {
    Harness::new(MemoryStore::new(), MemoryAuth::new(ada()))
}

fn seeded_harness(id: &str, text: &str) -> Harness {
    let store = MemoryStore::new();
    store.seed(id, ItemFields::text(text));
    Harness::new(store, MemoryAuth::new(ada()))
}

#[tokio::test]
async fn test_create_flow() {
    let h = default_harness();
    h.controller.set_text("Buy milk");
    assert_eq!(h.last_view().form.submit_label, "Add");

    let outcome = h.controller.submit().await;

    assert_eq!(outcome, SubmitOutcome::Saved);
    assert_eq!(h.store.calls(), vec![StoreCall::Insert(ItemFields::text("Buy milk"))]);
    let state = h.controller.state();
    assert_eq!(state.form.mode(), &FormMode::Create);
    assert_eq!(state.form.text(), "");
    assert_eq!(h.texts(), vec!["Buy milk".to_string()]);
}

#[tokio::test]
async fn test_blank_submission_makes_no_call() {
    let h = default_harness();
    for blank in ["", "   "] {
        h.controller.set_text(blank);
        let before = h.controller.state().form;
        assert_eq!(h.controller.submit().await, SubmitOutcome::Rejected);
        assert_eq!(h.controller.state().form, before);
    }
    assert!(h.store.calls().is_empty());
    assert!(!h.last_view().banner.visible);
}

#[tokio::test]
async fn test_edit_flow() {
    let h = seeded_harness("5", "Old");
    h.controller.edit(&ItemId::new("5"));

    let form = h.last_view().form;
    assert_eq!(form.text, "Old");
    assert_eq!(form.target, Some(ItemId::new("5")));
    assert_eq!(form.submit_label, "Update");

    h.controller.set_text("New");
    assert_eq!(h.controller.submit().await, SubmitOutcome::Saved);

    assert_eq!(
        h.store.calls(),
        vec![StoreCall::SetFields("5".into(), ItemFields::text("New"))]
    );
    assert_eq!(h.controller.state().form.mode(), &FormMode::Create);
    assert_eq!(h.texts(), vec!["New".to_string()]);
}

#[tokio::test]
async fn test_edit_keeps_done_flag() {
    let store = MemoryStore::new();
    store.seed(
        "5",
        ItemFields {
            text: Some("Old".into()),
            done: Some(true),
        },
    );
    let h = Harness::new(store, MemoryAuth::new(ada()));
    h.controller.edit(&"5".into());
    h.controller.set_text("New");
    h.controller.submit().await;

    let row = h.last_view().list.rows.remove(0);
    assert_eq!(row.text, "New");
    assert!(row.done);
}

#[tokio::test]
async fn test_toggle_sends_only_done() {
    let h = seeded_harness("5", "Old");
    h.controller.toggle_done(&"5".into(), true).await.unwrap();
    assert_eq!(h.store.calls(), vec![StoreCall::SetFields("5".into(), ItemFields::done(true))]);
    assert!(h.last_view().list.rows[0].done);

    h.store.clear_calls();
    h.controller.toggle_done(&"5".into(), false).await.unwrap();
    assert_eq!(h.store.calls(), vec![StoreCall::SetFields("5".into(), ItemFields::done(false))]);
    assert!(!h.last_view().list.rows[0].done);
}

#[tokio::test]
async fn test_failed_toggle_redraws_rows_with_remote_state() {
    let h = seeded_harness("5", "Old");
    let before = h.last_view().list;
    h.store.fail_next(DomainError::Remote("offline".into()));

    assert!(h.controller.toggle_done(&"5".into(), true).await.is_err());

    let view = h.last_view();
    assert!(view.banner.visible);
    assert!(!view.list.rows[0].done);
    assert!(!h.controller.state().items.items()[0].done);
    // same rows, but the list slice differs so the checkbox is redrawn
    assert_eq!(view.list.rows, before.rows);
    assert_ne!(view.list, before);
}

#[tokio::test]
async fn test_delete_bypasses_form() {
    let h = seeded_harness("5", "Old");
    h.controller.set_text("draft");

    h.controller.delete(&"5".into()).await.unwrap();

    assert_eq!(h.store.calls(), vec![StoreCall::Delete("5".into())]);
    assert_eq!(h.controller.state().form.text(), "draft");
    assert!(h.last_view().list.rows.is_empty());
}

#[tokio::test]
async fn test_reset_clears_edit_mode() {
    let h = seeded_harness("5", "Old");
    h.controller.edit(&"5".into());
    h.controller.reset_form();
    let form = h.last_view().form;
    assert_eq!(form.text, "");
    assert_eq!(form.target, None);
    assert!(h.store.calls().is_empty());
}

#[tokio::test]
async fn test_edit_unknown_item_is_ignored() {
    let h = default_harness();
    let renders = h.controller.render_count();
    h.controller.edit(&"ghost".into());
    assert_eq!(h.controller.render_count(), renders);
    assert_eq!(h.controller.state().form.mode(), &FormMode::Create);
}

#[tokio::test]
async fn test_sign_out_waits_for_notification() {
    let auth = MemoryAuth::new(ada())
        .signed_in(ada())
        .with_delivery(Delivery::Manual);
    let h = Harness::new(MemoryStore::new(), auth);
    let view = h.last_view().auth;
    assert!(view.show_sign_out);
    assert_eq!(view.username, "Ada");

    h.controller.sign_out().await.unwrap();
    assert!(h.last_view().auth.show_sign_out);

    h.auth.flush();
    let view = h.last_view().auth;
    assert!(view.show_sign_in);
    assert!(!view.show_sign_out);
    assert_eq!(view.username, "");
}

#[tokio::test]
async fn test_sign_in_is_optimistic() {
    let auth = MemoryAuth::new(ada()).with_delivery(Delivery::Manual);
    let h = Harness::new(MemoryStore::new(), auth);
    assert!(h.last_view().auth.show_sign_in);

    h.controller.sign_in().await.unwrap();
    let view = h.last_view().auth;
    assert!(view.show_sign_out);
    assert_eq!(view.username, "Ada");
}

#[tokio::test]
async fn test_sign_in_failure_reaches_banner() {
    let h = default_harness();
    h.auth.fail_popup("The popup has been closed by the user.");

    let err = h.controller.sign_in().await.unwrap_err();

    assert!(matches!(err, DomainError::Auth(_)));
    let view = h.last_view();
    assert!(view.banner.visible);
    assert_eq!(view.banner.message, "The popup has been closed by the user.");
    assert!(view.auth.show_sign_in);
}

#[tokio::test]
async fn test_failed_write_clears_form_and_shows_banner() {
    let h = default_harness();
    h.store.fail_next(DomainError::Remote("Missing or insufficient permissions.".into()));
    h.controller.set_text("Buy milk");

    assert_eq!(h.controller.submit().await, SubmitOutcome::Failed);

    let view = h.last_view();
    assert_eq!(view.form.text, "");
    assert!(view.banner.visible);
    assert_eq!(view.banner.message, "Missing or insufficient permissions.");
    assert!(view.list.rows.is_empty());
    assert_eq!(h.timer.delays(), vec![Duration::from_secs(5)]);

    h.timer.fire_all();
    assert!(!h.last_view().banner.visible);

    // still listening after the failure
    h.controller.set_text("Buy milk");
    assert_eq!(h.controller.submit().await, SubmitOutcome::Saved);
    assert_eq!(h.texts(), vec!["Buy milk".to_string()]);
}

#[tokio::test]
async fn test_failed_update_of_missing_item() {
    let h = default_harness();
    let err = h.controller.toggle_done(&"gone".into(), true).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));
    assert!(h.last_view().banner.visible);
}

#[test]
fn test_older_dismissal_keeps_newer_message() {
    let h = default_harness();
    h.controller.report_error("first");
    h.controller.report_error("second");

    assert!(h.timer.fire_next());
    let banner = h.last_view().banner;
    assert!(banner.visible);
    assert_eq!(banner.message, "second");

    assert!(h.timer.fire_next());
    assert!(!h.last_view().banner.visible);
}

#[tokio::test]
async fn test_one_render_per_batch() {
    let h = Harness::new(MemoryStore::with_delivery(Delivery::Manual), MemoryAuth::new(ada()));
    let renders = h.controller.render_count();

    let a = h.store.insert(&ItemFields::text("a")).await.unwrap();
    h.store.insert(&ItemFields::text("b")).await.unwrap();
    h.store.set_fields(&a, &ItemFields::done(true)).await.unwrap();
    assert_eq!(h.controller.render_count(), renders);

    h.store.flush();
    assert_eq!(h.controller.render_count(), renders + 1);
    assert_eq!(h.texts(), vec!["a".to_string(), "b".to_string()]);
    assert!(h.last_view().list.rows[0].done);
}

#[tokio::test]
async fn test_local_state_is_stale_until_notified() {
    let h = Harness::new(MemoryStore::with_delivery(Delivery::Manual), MemoryAuth::new(ada()));
    h.controller.set_text("pending");
    h.controller.submit().await;
    assert!(h.controller.state().items.is_empty());
    h.store.flush();
    assert_eq!(h.controller.state().items.len(), 1);
}

#[tokio::test]
async fn test_collection_mirrors_remote_snapshot() {
    let h = Harness::new(MemoryStore::with_delivery(Delivery::Manual), MemoryAuth::new(ada()));
    let store = &h.store;

    let mut ids = Vec::new();
    for text in ["one", "two", "three", "four"] {
        ids.push(store.insert(&ItemFields::text(text)).await.unwrap());
    }
    store.flush();
    store.set_fields(&ids[1], &ItemFields::text("TWO")).await.unwrap();
    store.delete(&ids[0]).await.unwrap();
    store.flush();
    store.set_fields(&ids[3], &ItemFields::done(true)).await.unwrap();
    store.insert(&ItemFields::text("five")).await.unwrap();
    store.delete(&ids[2]).await.unwrap();
    store.flush();

    let remote: Vec<Item> = store
        .snapshot()
        .into_iter()
        .map(|(id, doc)| Item::from_document(id, &doc).unwrap())
        .collect();
    assert_eq!(h.controller.state().items.items(), remote.as_slice());
    assert_eq!(h.texts(), vec!["TWO", "four", "five"]);
}

#[test]
fn test_stop_detaches_listeners() {
    let h = default_harness();
    assert_eq!(h.store.listener_count(), 1);
    h.controller.stop();
    assert_eq!(h.store.listener_count(), 0);

    let renders = h.controller.render_count();
    h.store.seed("x", ItemFields::text("late"));
    assert_eq!(h.controller.render_count(), renders);
}

#[test]
fn test_dropping_controller_detaches_listeners() {
    let Harness { controller, store, .. } = default_harness();
    assert_eq!(store.listener_count(), 1);
    drop(controller);
    assert_eq!(store.listener_count(), 0);
}

#[test]
fn test_restart_replays_snapshot_once() {
    let h = seeded_harness("5", "Old");
    h.controller.stop();
    h.controller.start();
    assert_eq!(h.store.listener_count(), 1);
    assert_eq!(h.texts(), vec!["Old".to_string()]);
}
