//! Request-level behaviour of the client wrapper against the fake API.

use std::sync::Arc;
use std::time::Duration;

use chrono::TimeDelta;
use folio_auth::storage::MemoryStorage;
use folio_auth::testing::token_expiring_in;
use folio_auth::{AuthEvent, LogoutReason, SessionStore};
use folio_client::testing::FakeApi;
use folio_client::{ApiClient, ClientError, ErrorKind};
use folio_config::ApiConfig;
use pretty_assertions::assert_eq;

fn store_with(token: &str) -> Arc<SessionStore> {
    Arc::new(SessionStore::new(Box::new(MemoryStorage::with_token(token))))
}

#[tokio::test]
async fn attaches_bearer_when_token_present() {
    let api = FakeApi::spawn().await;
    let token = token_expiring_in("admin", TimeDelta::hours(1));
    api.issue_token(&token);
    let client = api.client(store_with(&token));

    client.blogs().list(None).await.unwrap();

    let sent = api.requests_to("/api/blogs/");
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].bearer.as_deref(), Some(token.as_str()));
}

#[tokio::test]
async fn omits_bearer_without_session() {
    let api = FakeApi::spawn().await;
    let client = api.client(Arc::new(SessionStore::in_memory()));

    client.research().list(None).await.unwrap();

    let sent = api.requests_to("/api/research/");
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].bearer, None);
}

#[tokio::test]
async fn concurrent_401s_end_session_once() {
    let api = FakeApi::spawn().await;
    let token = token_expiring_in("admin", TimeDelta::hours(1));
    // The server never issued this token.
    let session = store_with(&token);
    let mut events = session.subscribe();
    let client = api.client(Arc::clone(&session));

    let (blog_api, research_api, paper_api, auth_api) =
        (client.blogs(), client.research(), client.papers(), client.auth());
    let (blogs, research, papers, verify) = tokio::join!(
        blog_api.list(None),
        research_api.list(None),
        paper_api.list(None),
        auth_api.verify(),
    );

    for err in [blogs.err(), research.err(), papers.err(), verify.err()] {
        let err = err.expect("request should be rejected");
        assert!(matches!(err, ClientError::Unauthorized));
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
    }
    assert_eq!(session.get(), None);
    assert_eq!(
        events.try_recv().unwrap(),
        AuthEvent::LoginRequired {
            reason: LogoutReason::Unauthorized
        }
    );
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn failed_login_keeps_quiet() {
    let api = FakeApi::spawn().await;
    api.set_credentials("admin", "secret", "issued");
    let session = Arc::new(SessionStore::in_memory());
    let mut events = session.subscribe();
    let client = api.client(Arc::clone(&session));

    let err = client.auth().login("admin", "wrong").await.unwrap_err();

    assert!(matches!(
        err,
        ClientError::Api { status: 401, ref message } if message == "Incorrect username or password"
    ));
    assert_eq!(err.kind(), ErrorKind::Unauthorized);
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn failed_login_does_not_end_existing_session() {
    let api = FakeApi::spawn().await;
    api.set_credentials("admin", "secret", "current");
    let session = store_with("current");
    let client = api.client(Arc::clone(&session));

    client.auth().login("admin", "wrong").await.unwrap_err();

    assert_eq!(session.get().as_deref(), Some("current"));
    assert_eq!(api.requests_to("/api/auth/login")[0].bearer, None);
}

#[tokio::test]
async fn login_stores_token_and_verify_uses_it() {
    let api = FakeApi::spawn().await;
    let token = token_expiring_in("admin", TimeDelta::hours(1));
    api.set_credentials("admin", "secret", &token);
    let session = Arc::new(SessionStore::in_memory());
    let mut events = session.subscribe();
    let client = api.client(Arc::clone(&session));

    let resp = client.auth().login("admin", "secret").await.unwrap();
    assert_eq!(resp.token, token);
    assert_eq!(session.get().as_deref(), Some(token.as_str()));
    assert_eq!(
        events.try_recv().unwrap(),
        AuthEvent::LoggedIn {
            subject: Some("admin".into())
        }
    );

    let identity = client.auth().verify().await.unwrap();
    assert_eq!(identity.username, "admin");

    client.auth().logout().unwrap();
    assert_eq!(session.get(), None);
}

#[tokio::test]
async fn blank_credentials_are_not_sent() {
    let api = FakeApi::spawn().await;
    let client = api.client(Arc::new(SessionStore::in_memory()));

    let err = client.auth().login("  ", "secret").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(api.requests().is_empty());
}

#[tokio::test]
async fn slow_server_times_out() {
    let api = FakeApi::spawn().await;
    api.set_delay(Duration::from_secs(3));
    let config = ApiConfig {
        timeout_secs: 1,
        ..api.api_config()
    };
    let client = ApiClient::new(&config, Arc::new(SessionStore::in_memory())).unwrap();

    let err = client.papers().list(None).await.unwrap_err();

    assert!(matches!(err, ClientError::Timeout(d) if d == Duration::from_secs(1)));
    assert_eq!(err.kind(), ErrorKind::Retryable);
}

#[tokio::test]
async fn unreachable_server_is_retryable() {
    let config = ApiConfig {
        base_url: "http://127.0.0.1:9".into(),
        ..ApiConfig::default()
    };
    let client = ApiClient::new(&config, Arc::new(SessionStore::in_memory())).unwrap();

    let err = client.blogs().list(None).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Retryable);
}
