//! The single outbound HTTP path.
//!
//! Every request is built here: base URL, JSON content type, the request
//! timeout, and the bearer token read from the [`SessionStore`] at send
//! time. A 401 for a request that carried a token ends that session through
//! [`SessionStore::expire`] before the call is rejected.

use std::sync::Arc;
use std::time::{Duration, Instant};

use folio_auth::{LogoutReason, SessionStore};
use folio_config::ApiConfig;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use crate::error::ClientError;
use crate::http::{check_response, read_json};

const USER_AGENT: &str = concat!("folio/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the portfolio API. Cheap to clone.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<Inner>,
}

struct Inner {
    http: reqwest::Client,
    origin: String,
    timeout: Duration,
    session: Arc<SessionStore>,
}

/// A request about to be sent, with the token it carries.
struct Outgoing {
    request: reqwest::RequestBuilder,
    token: Option<String>,
}

impl ApiClient {
    /// Build a client for `config.base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidBaseUrl`] if the base URL is not an
    /// absolute http(s) URL, or [`ClientError::Network`] if the HTTP client
    /// cannot be constructed.
    pub fn new(config: &ApiConfig, session: Arc<SessionStore>) -> Result<Self, ClientError> {
        let origin = config.origin().to_string();
        let parsed = url::Url::parse(&origin).map_err(|e| ClientError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::InvalidBaseUrl {
                url: config.base_url.clone(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(config.timeout())
            .build()
            .map_err(ClientError::Network)?;

        Ok(Self {
            inner: Arc::new(Inner {
                http,
                origin,
                timeout: config.timeout(),
                session,
            }),
        })
    }

    #[must_use]
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.inner.session
    }

    #[must_use]
    pub fn origin(&self) -> &str {
        &self.inner.origin
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let resp = self.execute(self.request(Method::GET, path)).await?;
        read_json(resp).await
    }

    pub(crate) async fn send_json<B, T>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut out = self.request(method, path);
        out.request = out.request.json(body);
        read_json(self.execute(out).await?).await
    }

    /// Send without the session token, for the login call.
    pub(crate) async fn send_anonymous<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let out = Outgoing {
            request: self.inner.http.post(self.url(path)).json(body),
            token: None,
        };
        read_json(self.execute(out).await?).await
    }

    /// Send a request whose response body is ignored.
    pub(crate) async fn send_unit<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<(), ClientError> {
        let mut out = self.request(method, path);
        if let Some(body) = body {
            out.request = out.request.json(body);
        }
        self.execute(out).await.map(drop)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.origin)
    }

    fn request(&self, method: Method, path: &str) -> Outgoing {
        let token = self.inner.session.get();
        let mut request = self.inner.http.request(method, self.url(path));
        if let Some(token) = &token {
            request = request.bearer_auth(token);
        }
        Outgoing { request, token }
    }

    async fn execute(&self, out: Outgoing) -> Result<reqwest::Response, ClientError> {
        let Outgoing { request, token } = out;
        let request = request.build().map_err(ClientError::Network)?;
        let (method, path) = (request.method().clone(), request.url().path().to_string());
        let started = Instant::now();

        let resp = self
            .inner
            .http
            .execute(request)
            .await
            .map_err(|e| self.transport_error(e))?;
        tracing::debug!(
            %method,
            path,
            status = resp.status().as_u16(),
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "api request"
        );

        if resp.status() == StatusCode::UNAUTHORIZED {
            if let Some(token) = token {
                self.inner.session.expire(&token, LogoutReason::Unauthorized);
                return Err(ClientError::Unauthorized);
            }
        }
        check_response(resp).await
    }

    fn transport_error(&self, error: reqwest::Error) -> ClientError {
        if error.is_timeout() {
            tracing::warn!(timeout_secs = self.inner.timeout.as_secs(), "api request timed out");
            ClientError::Timeout(self.inner.timeout)
        } else {
            ClientError::Network(error)
        }
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("origin", &self.inner.origin)
            .field("timeout", &self.inner.timeout)
            .finish_non_exhaustive()
    }
}

/// Run `call` unless `cancel` fires first.
///
/// # Errors
///
/// Returns [`ClientError::Cancelled`] if the token is cancelled before the
/// call resolves; otherwise the call's own result.
pub async fn with_cancel<T, F>(cancel: &CancellationToken, call: F) -> Result<T, ClientError>
where
    F: Future<Output = Result<T, ClientError>>,
{
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(ClientError::Cancelled),
        result = call => result,
    }
}
