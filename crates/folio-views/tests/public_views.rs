//! Public screens and the dashboard against the fake API.

use std::sync::Arc;

use chrono::TimeDelta;
use folio_auth::storage::MemoryStorage;
use folio_auth::testing::token_expiring_in;
use folio_auth::SessionStore;
use folio_client::testing::FakeApi;
use folio_core::Pagination;
use folio_core::entities::ContactPayload;
use folio_views::dashboard::load_dashboard;
use folio_views::public::{ContactForm, blog_index, publication_listing, research_listing};
use folio_views::ViewError;
use pretty_assertions::assert_eq;
use serde_json::json;
use tokio_util::sync::CancellationToken;

#[tokio::test]
async fn blog_index_previews_long_posts() {
    let api = FakeApi::spawn().await;
    api.seed("blogs", json!({"title": "Short", "content": "Tiny", "excerpt": "Custom"}));
    api.seed("blogs", json!({"title": "Long", "content": "a".repeat(200), "tags": "rust, web"}));
    api.seed("blogs", json!({"title": "Note", "content": "Brief note"}));
    let client = api.client(Arc::new(SessionStore::in_memory()));

    let page = blog_index(&client, Pagination::default()).await.unwrap();

    assert_eq!(page.items[0].preview, "Custom");
    assert_eq!(page.items[1].preview, format!("{}...", "a".repeat(150)));
    assert_eq!(page.items[1].tags, vec!["rust", "web"]);
    assert_eq!(page.items[2].preview, "Brief note...");
}

#[tokio::test]
async fn research_is_sorted_by_order() {
    let api = FakeApi::spawn().await;
    api.seed("research", json!({"title": "C", "description": "x", "order": 3}));
    api.seed("research", json!({"title": "A", "description": "x", "order": 1}));
    api.seed("research", json!({"title": "B", "description": "x", "order": 2}));
    let client = api.client(Arc::new(SessionStore::in_memory()));

    let titles: Vec<String> = research_listing(&client)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.title)
        .collect();

    assert_eq!(titles, ["A", "B", "C"]);
}

#[tokio::test]
async fn publications_newest_first_with_doi_links() {
    let api = FakeApi::spawn().await;
    api.seed("papers", json!({"title": "Old", "authors": "X", "year": 2019}));
    api.seed("papers", json!({"title": "New", "authors": "X", "year": 2024, "doi": "10.1/abc"}));
    let client = api.client(Arc::new(SessionStore::in_memory()));

    let entries = publication_listing(&client).await.unwrap();

    assert_eq!(entries[0].publication.title, "New");
    assert_eq!(entries[0].doi_url.as_deref(), Some("https://doi.org/10.1/abc"));
    assert_eq!(entries[1].doi_url, None);
}

#[tokio::test]
async fn contact_form_throttles_repeat_submissions() {
    let api = FakeApi::spawn().await;
    let client = api.client(Arc::new(SessionStore::in_memory()));
    let form = ContactForm::new(&client);
    let payload = ContactPayload {
        name: "Ada".into(),
        email: "ada@example.com".into(),
        subject: Some("Hi".into()),
        message: "Hello".into(),
    };

    form.submit(&payload).await.unwrap();
    let err = form.submit(&payload).await.unwrap_err();

    assert!(matches!(err, ViewError::Throttled { .. }));
    assert_eq!(api.items("contact").len(), 1);
}

#[tokio::test]
async fn contact_text_is_escaped_before_sending() {
    let api = FakeApi::spawn().await;
    let client = api.client(Arc::new(SessionStore::in_memory()));
    let payload = ContactPayload {
        name: "Ada".into(),
        email: "ada@example.com".into(),
        subject: None,
        message: "<b>hi</b>".into(),
    };

    ContactForm::new(&client).submit(&payload).await.unwrap();

    assert_eq!(api.items("contact")[0]["message"], "&lt;b&gt;hi&lt;&#x2F;b&gt;");
}

#[tokio::test]
async fn invalid_contact_is_not_throttled() {
    let api = FakeApi::spawn().await;
    let client = api.client(Arc::new(SessionStore::in_memory()));
    let form = ContactForm::new(&client);
    let mut payload = ContactPayload {
        name: "Ada".into(),
        email: "not-an-email".into(),
        subject: None,
        message: "Hello".into(),
    };

    assert!(matches!(form.submit(&payload).await, Err(ViewError::Core(_))));
    payload.email = "ada@example.com".into();
    form.submit(&payload).await.unwrap();
}

#[tokio::test]
async fn dashboard_counts_collections() {
    let api = FakeApi::spawn().await;
    let token = token_expiring_in("admin", TimeDelta::hours(1));
    api.set_credentials("admin", "secret", &token);
    for n in 0..3 {
        api.seed("blogs", json!({"title": format!("Post {n}"), "content": "x"}));
    }
    api.seed("research", json!({"title": "R", "description": "x"}));
    let session = Arc::new(SessionStore::new(Box::new(MemoryStorage::with_token(&token))));
    let client = api.client(session);

    let stats = load_dashboard(&client, &CancellationToken::new()).await.unwrap();

    assert_eq!(stats.username, "admin");
    assert_eq!((stats.blogs, stats.research, stats.papers), (3, 1, 0));
}

#[tokio::test]
async fn dashboard_without_session_fetches_nothing() {
    let api = FakeApi::spawn().await;
    let client = api.client(Arc::new(SessionStore::in_memory()));

    let err = load_dashboard(&client, &CancellationToken::new()).await.unwrap_err();

    assert!(matches!(err, ViewError::LoginRequired));
    assert!(api.requests().is_empty());
}
