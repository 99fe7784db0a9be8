//! Admin screen state machine against the fake API.

use std::cell::RefCell;
use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeDelta, TimeZone, Utc};
use folio_auth::storage::MemoryStorage;
use folio_auth::testing::token_expiring_in;
use folio_auth::{ManualClock, SessionStore};
use folio_client::ClientError;
use folio_client::testing::FakeApi;
use folio_config::AdminConfig;
use folio_views::admin::delete_prompt;
use folio_views::{
    BlogAdmin, FormDefaults, PublicationAdmin, ResearchAdmin, Route, Router, ViewError, ViewPhase,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn defaults() -> FormDefaults {
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2026, 5, 1, 9, 0, 0).unwrap());
    FormDefaults::new(&AdminConfig::default(), &clock)
}

struct Harness {
    api: FakeApi,
    session: Arc<SessionStore>,
    router: Router,
    events: tokio::sync::broadcast::Receiver<folio_auth::AuthEvent>,
}

impl Harness {
    async fn logged_in() -> Self {
        let api = FakeApi::spawn().await;
        let token = token_expiring_in("admin", TimeDelta::hours(1));
        api.set_credentials("admin", "secret", &token);
        let session = Arc::new(SessionStore::new(Box::new(MemoryStorage::with_token(&token))));
        Self::with_session(api, session)
    }

    async fn logged_out() -> Self {
        let api = FakeApi::spawn().await;
        Self::with_session(api, Arc::new(SessionStore::in_memory()))
    }

    fn with_session(api: FakeApi, session: Arc<SessionStore>) -> Self {
        let events = session.subscribe();
        Self {
            api,
            session,
            router: Router::new(Route::AdminBlogs),
            events,
        }
    }

    fn blogs(&self) -> BlogAdmin {
        BlogAdmin::new(&self.api.client(Arc::clone(&self.session)), defaults())
    }

    fn redirects(&mut self) -> usize {
        self.router.drain(&mut self.events)
    }
}

#[tokio::test]
async fn guard_without_token_redirects_before_fetching() {
    let mut h = Harness::logged_out().await;
    let mut view = h.blogs();

    let err = view.mount().await.unwrap_err();

    assert!(matches!(err, ViewError::LoginRequired));
    assert_eq!(view.phase(), ViewPhase::Redirected);
    assert!(h.api.requests().is_empty());
    assert_eq!(h.redirects(), 1);
    assert_eq!(h.router.current(), Route::AdminLogin);
}

#[tokio::test]
async fn rejected_verify_ends_session_without_loading() {
    let mut h = Harness::logged_in().await;
    h.api.revoke_token();
    let mut view = h.blogs();

    assert!(matches!(view.mount().await, Err(ViewError::LoginRequired)));

    assert_eq!(h.session.get(), None);
    assert!(h.api.requests_to("/api/blogs/").is_empty());
    assert_eq!(h.redirects(), 1);
}

#[tokio::test]
async fn mount_lists_items_with_identity() {
    let h = Harness::logged_in().await;
    h.api.seed("blogs", json!({"title": "First", "content": "x"}));
    let mut view = h.blogs();

    view.mount().await.unwrap();

    assert_eq!(view.phase(), ViewPhase::Listing);
    assert_eq!(view.identity().unwrap().username, "admin");
    assert_eq!(view.items().len(), 1);
    assert_eq!(view.items()[0].title, "First");
}

#[tokio::test]
async fn create_resets_form_and_refetches() {
    let h = Harness::logged_in().await;
    let mut view = h.blogs();
    view.mount().await.unwrap();
    assert!(view.items().iter().all(|p| p.title != "T1"));

    view.start_create().unwrap();
    assert_eq!(view.editing_id(), None);
    let form = view.form_mut().unwrap();
    form.title = "T1".into();
    form.content = "Hello".into();
    view.submit().await.unwrap();

    assert_eq!(view.phase(), ViewPhase::Listing);
    assert!(view.form().is_none());
    assert_eq!(view.items().iter().filter(|p| p.title == "T1").count(), 1);
    let lists = h
        .api
        .requests_to("/api/blogs/")
        .into_iter()
        .filter(|r| r.method == "GET")
        .count();
    assert_eq!(lists, 2);
    assert_eq!(h.api.items("blogs")[0]["author"], "Your Name");
}

#[tokio::test]
async fn edit_then_cancel_writes_nothing() {
    let h = Harness::logged_in().await;
    let id = h.api.seed("blogs", json!({"title": "Original", "content": "x"}));
    let mut view = h.blogs();
    view.mount().await.unwrap();

    view.start_edit(id).await.unwrap();
    assert_eq!(view.editing_id(), Some(id));
    view.form_mut().unwrap().title = "Changed".into();
    view.cancel_edit().unwrap();

    assert_eq!(view.phase(), ViewPhase::Listing);
    assert!(h.api.requests().iter().all(|r| r.method != "PUT"));
    assert_eq!(h.api.items("blogs")[0]["title"], "Original");
}

#[tokio::test]
async fn edit_submit_updates_by_editing_id() {
    let h = Harness::logged_in().await;
    let id = h.api.seed(
        "papers",
        json!({"title": "Paper", "authors": "A. Author", "order": 2}),
    );
    let mut view = PublicationAdmin::new(&h.api.client(Arc::clone(&h.session)), defaults());
    view.mount().await.unwrap();

    view.start_edit(id).await.unwrap();
    assert_eq!(view.form().unwrap().year, 2026);
    view.form_mut().unwrap().journal = "Journal of Tests".into();
    let saved = view.submit().await.unwrap();

    assert_eq!(saved.id, id);
    assert_eq!(view.items()[0].journal.as_deref(), Some("Journal of Tests"));
    assert!(h.api.requests().iter().any(|r| r.method == "PUT"));
}

#[tokio::test]
async fn invalid_form_stays_open_with_error() {
    let h = Harness::logged_in().await;
    let mut view = ResearchAdmin::new(&h.api.client(Arc::clone(&h.session)), defaults());
    view.mount().await.unwrap();

    view.start_create().unwrap();
    view.form_mut().unwrap().description = "No title".into();
    let err = view.submit().await.unwrap_err();

    assert!(matches!(err, ViewError::Client(ClientError::Validation(_))));
    assert_eq!(view.phase(), ViewPhase::Editing);
    assert!(view.error().unwrap().contains("title"));
    assert!(h.api.requests().iter().all(|r| r.method != "POST"));
}

#[tokio::test]
async fn delete_requires_confirmation() {
    let h = Harness::logged_in().await;
    let id = h.api.seed("blogs", json!({"title": "Doomed", "content": "x"}));
    let mut view = h.blogs();
    view.mount().await.unwrap();

    let prompts = RefCell::new(Vec::new());
    let declined = view
        .delete(id, &|prompt: &str| {
            prompts.borrow_mut().push(prompt.to_string());
            false
        })
        .await
        .unwrap();
    assert!(!declined);
    assert!(h.api.requests().iter().all(|r| r.method != "DELETE"));
    assert_eq!(prompts.borrow().as_slice(), [delete_prompt("Doomed")]);

    assert!(view.delete(id, &|_: &str| true).await.unwrap());
    assert!(view.items().is_empty());
    assert!(h.api.items("blogs").is_empty());
}

#[tokio::test]
async fn revoked_session_mid_use_redirects_once() {
    let mut h = Harness::logged_in().await;
    let mut view = h.blogs();
    view.mount().await.unwrap();
    let mut research = ResearchAdmin::new(&h.api.client(Arc::clone(&h.session)), defaults());
    research.mount().await.unwrap();

    h.api.revoke_token();
    let (a, b) = tokio::join!(view.refresh(), research.refresh());

    assert!(matches!(a, Err(ViewError::LoginRequired)));
    assert!(matches!(b, Err(ViewError::LoginRequired)));
    assert_eq!(view.phase(), ViewPhase::Redirected);
    assert_eq!(research.phase(), ViewPhase::Redirected);
    assert_eq!(h.session.get(), None);
    assert_eq!(h.redirects(), 1);
}

#[tokio::test]
async fn unmount_discards_in_flight_result() {
    let h = Harness::logged_in().await;
    let mut view = h.blogs();
    view.mount().await.unwrap();
    h.api.seed("blogs", json!({"title": "Late", "content": "x"}));
    h.api.set_delay(Duration::from_millis(500));

    let cancel = view.cancel_token();
    let canceller = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        cancel.cancel();
    });
    let err = view.refresh().await.unwrap_err();
    canceller.await.unwrap();

    assert!(err.is_cancelled());
    assert!(view.items().is_empty());
    view.unmount();
    assert_eq!(view.phase(), ViewPhase::Unmounted);
    assert!(view.start_create().is_err());
}

#[tokio::test]
async fn logout_clears_session_and_redirects() {
    let mut h = Harness::logged_in().await;
    let mut view = h.blogs();
    view.mount().await.unwrap();

    view.logout().unwrap();

    assert_eq!(view.phase(), ViewPhase::Redirected);
    assert_eq!(h.session.get(), None);
    assert_eq!(h.redirects(), 1);
}
