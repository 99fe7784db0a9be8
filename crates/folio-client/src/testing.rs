//! In-process fake of the portfolio API for tests.
//!
//! Serves the blog, research, papers, contact and auth routes from memory on
//! `127.0.0.1:0`. Every request is recorded with the bearer token it carried.
//! Requests that carry a token other than the issued one get a 401, as do
//! admin-only calls without a token.

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use axum::extract::{Json, Path, Query, State};
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use folio_auth::SessionStore;
use folio_config::ApiConfig;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::client::ApiClient;

const CREATED_AT: &str = "2026-01-01T00:00:00";

/// One request as seen by the fake server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub bearer: Option<String>,
}

#[derive(Default)]
struct Collection {
    next_id: i64,
    items: BTreeMap<i64, Value>,
}

impl Collection {
    fn insert(&mut self, mut item: Value) -> Value {
        self.next_id += 1;
        item["id"] = json!(self.next_id);
        if item.get("created_at").is_none() {
            item["created_at"] = json!(CREATED_AT);
        }
        self.items.insert(self.next_id, item.clone());
        item
    }
}

#[derive(Default)]
struct FakeState {
    blogs: Mutex<Collection>,
    research: Mutex<Collection>,
    papers: Mutex<Collection>,
    contact: Mutex<Collection>,
    token: Mutex<Option<String>>,
    credentials: Mutex<Option<(String, String)>>,
    requests: Mutex<Vec<Recorded>>,
    delay: Mutex<Option<Duration>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

impl FakeState {
    fn collection(&self, name: &str) -> Option<&Mutex<Collection>> {
        match name {
            "blogs" => Some(&self.blogs),
            "research" => Some(&self.research),
            "papers" => Some(&self.papers),
            _ => None,
        }
    }

    async fn enter(&self, method: &Method, uri: &Uri, headers: &HeaderMap) {
        lock(&self.requests).push(Recorded {
            method: method.to_string(),
            path: uri.path().to_string(),
            bearer: bearer(headers),
        });
        let delay = *lock(&self.delay);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }

    fn authorize(&self, headers: &HeaderMap, required: bool) -> Result<(), Response> {
        let issued = lock(&self.token).clone();
        match bearer(headers) {
            Some(sent) if issued.as_deref() == Some(sent.as_str()) => Ok(()),
            Some(_) => Err(unauthorized()),
            None if required => Err(unauthorized()),
            None => Ok(()),
        }
    }
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(ToString::to_string)
}

fn unauthorized() -> Response {
    detail(StatusCode::UNAUTHORIZED, "Could not validate credentials")
}

fn detail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "detail": message }))).into_response()
}

#[derive(Deserialize)]
struct Window {
    skip: Option<usize>,
    limit: Option<usize>,
}

type Shared = State<Arc<FakeState>>;

async fn list(
    State(state): Shared,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Path(name): Path<String>,
    Query(window): Query<Window>,
) -> Response {
    state.enter(&method, &uri, &headers).await;
    if let Err(resp) = state.authorize(&headers, false) {
        return resp;
    }
    let Some(collection) = state.collection(&name) else {
        return detail(StatusCode::NOT_FOUND, "Not Found");
    };
    let items: Vec<Value> = lock(collection)
        .items
        .values()
        .skip(window.skip.unwrap_or(0))
        .take(window.limit.unwrap_or(usize::MAX))
        .cloned()
        .collect();
    Json(items).into_response()
}

async fn create(
    State(state): Shared,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Path(name): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    state.enter(&method, &uri, &headers).await;
    if let Err(resp) = state.authorize(&headers, true) {
        return resp;
    }
    let Some(collection) = state.collection(&name) else {
        return detail(StatusCode::NOT_FOUND, "Not Found");
    };
    Json(lock(collection).insert(body)).into_response()
}

async fn read(
    State(state): Shared,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Path((name, id)): Path<(String, i64)>,
) -> Response {
    state.enter(&method, &uri, &headers).await;
    if let Err(resp) = state.authorize(&headers, false) {
        return resp;
    }
    let found = state
        .collection(&name)
        .and_then(|c| lock(c).items.get(&id).cloned());
    found.map_or_else(|| detail(StatusCode::NOT_FOUND, "Item not found"), |item| Json(item).into_response())
}

async fn replace(
    State(state): Shared,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Path((name, id)): Path<(String, i64)>,
    Json(mut body): Json<Value>,
) -> Response {
    state.enter(&method, &uri, &headers).await;
    if let Err(resp) = state.authorize(&headers, true) {
        return resp;
    }
    let Some(collection) = state.collection(&name) else {
        return detail(StatusCode::NOT_FOUND, "Not Found");
    };
    let mut collection = lock(collection);
    let Some(existing) = collection.items.get_mut(&id) else {
        return detail(StatusCode::NOT_FOUND, "Item not found");
    };
    body["id"] = json!(id);
    body["created_at"] = existing["created_at"].clone();
    *existing = body.clone();
    Json(body).into_response()
}

async fn remove(
    State(state): Shared,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Path((name, id)): Path<(String, i64)>,
) -> Response {
    state.enter(&method, &uri, &headers).await;
    if let Err(resp) = state.authorize(&headers, true) {
        return resp;
    }
    let removed = state
        .collection(&name)
        .and_then(|c| lock(c).items.remove(&id));
    match removed {
        Some(_) => Json(json!({ "message": "deleted" })).into_response(),
        None => detail(StatusCode::NOT_FOUND, "Item not found"),
    }
}

async fn contact_send(
    State(state): Shared,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Json(mut body): Json<Value>,
) -> Response {
    state.enter(&method, &uri, &headers).await;
    body["read"] = json!(false);
    Json(lock(&state.contact).insert(body)).into_response()
}

async fn contact_list(
    State(state): Shared,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Query(window): Query<Window>,
) -> Response {
    state.enter(&method, &uri, &headers).await;
    if let Err(resp) = state.authorize(&headers, true) {
        return resp;
    }
    let items: Vec<Value> = lock(&state.contact)
        .items
        .values()
        .skip(window.skip.unwrap_or(0))
        .take(window.limit.unwrap_or(50))
        .cloned()
        .collect();
    Json(items).into_response()
}

#[derive(Deserialize)]
struct Credentials {
    username: String,
    password: String,
}

async fn login(
    State(state): Shared,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Json(creds): Json<Credentials>,
) -> Response {
    state.enter(&method, &uri, &headers).await;
    let accepted = lock(&state.credentials)
        .as_ref()
        .is_some_and(|(u, p)| *u == creds.username && *p == creds.password);
    let token = lock(&state.token).clone();
    match (accepted, token) {
        (true, Some(token)) => {
            Json(json!({ "access_token": token, "token_type": "bearer" })).into_response()
        }
        _ => detail(StatusCode::UNAUTHORIZED, "Incorrect username or password"),
    }
}

async fn verify(State(state): Shared, method: Method, uri: Uri, headers: HeaderMap) -> Response {
    state.enter(&method, &uri, &headers).await;
    if let Err(resp) = state.authorize(&headers, true) {
        return resp;
    }
    let username = lock(&state.credentials)
        .as_ref()
        .map_or_else(|| "admin".to_string(), |(u, _)| u.clone());
    Json(json!({ "authenticated": true, "username": username })).into_response()
}

fn router(state: Arc<FakeState>) -> Router {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/verify", get(verify))
        .route("/api/contact/", get(contact_list).post(contact_send))
        .route("/api/{collection}/", get(list).post(create))
        .route("/api/{collection}/{id}", get(read).put(replace).delete(remove))
        .with_state(state)
}

/// A running fake API. The server task lives until the runtime shuts down.
pub struct FakeApi {
    addr: SocketAddr,
    state: Arc<FakeState>,
}

impl FakeApi {
    /// Bind on an ephemeral port and start serving.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn spawn() -> Self {
        let state = Arc::new(FakeState::default());
        let app = router(Arc::clone(&state));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().expect("listener address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("fake API server");
        });
        Self { addr, state }
    }

    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    #[must_use]
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.base_url(),
            ..ApiConfig::default()
        }
    }

    /// A client for this server backed by `session`.
    ///
    /// # Panics
    ///
    /// Panics if the client cannot be built.
    #[must_use]
    pub fn client(&self, session: Arc<SessionStore>) -> ApiClient {
        ApiClient::new(&self.api_config(), session).expect("client for fake API")
    }

    /// Accept `username`/`password` at login, answering with `token`.
    pub fn set_credentials(&self, username: &str, password: &str, token: &str) {
        *lock(&self.state.credentials) = Some((username.into(), password.into()));
        self.issue_token(token);
    }

    /// Make `token` the only bearer token the server accepts.
    pub fn issue_token(&self, token: &str) {
        *lock(&self.state.token) = Some(token.into());
    }

    /// Reject every bearer token from now on.
    pub fn revoke_token(&self) {
        *lock(&self.state.token) = None;
    }

    /// Hold every response for `delay`.
    pub fn set_delay(&self, delay: Duration) {
        *lock(&self.state.delay) = Some(delay);
    }

    /// Insert an item into `collection` directly, returning its id.
    ///
    /// # Panics
    ///
    /// Panics on an unknown collection name.
    pub fn seed(&self, collection: &str, item: Value) -> i64 {
        let stored = match collection {
            "contact" => lock(&self.state.contact).insert(item),
            name => lock(self.state.collection(name).expect("known collection")).insert(item),
        };
        stored["id"].as_i64().unwrap_or_default()
    }

    /// Current items of `collection`, in id order.
    ///
    /// # Panics
    ///
    /// Panics on an unknown collection name.
    #[must_use]
    pub fn items(&self, collection: &str) -> Vec<Value> {
        let target = match collection {
            "contact" => &self.state.contact,
            name => self.state.collection(name).expect("known collection"),
        };
        lock(target).items.values().cloned().collect()
    }

    #[must_use]
    pub fn requests(&self) -> Vec<Recorded> {
        lock(&self.state.requests).clone()
    }

    /// Requests whose path starts with `prefix`.
    #[must_use]
    pub fn requests_to(&self, prefix: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.path.starts_with(prefix))
            .collect()
    }
}
