//! Screen routes and the single place that navigates.
//!
//! Nothing else changes the current route in response to auth failures:
//! the router subscribes to the session's [`AuthEvent`]s and moves to
//! [`Route::AdminLogin`] when a login is required or the user logs out.

use std::fmt;

use folio_auth::AuthEvent;
use tokio::sync::{broadcast, watch};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    About,
    Blog,
    BlogPost(i64),
    Research,
    ResearchProject(i64),
    Papers,
    Contact,
    AdminLogin,
    AdminDashboard,
    AdminBlogs,
    AdminResearch,
    AdminPapers,
}

impl Route {
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".into(),
            Self::About => "/about".into(),
            Self::Blog => "/blog".into(),
            Self::BlogPost(id) => format!("/blog/{id}"),
            Self::Research => "/research".into(),
            Self::ResearchProject(id) => format!("/research/{id}"),
            Self::Papers => "/papers".into(),
            Self::Contact => "/contact".into(),
            Self::AdminLogin => "/admin/login".into(),
            Self::AdminDashboard => "/admin".into(),
            Self::AdminBlogs => "/admin/blogs".into(),
            Self::AdminResearch => "/admin/research".into(),
            Self::AdminPapers => "/admin/papers".into(),
        }
    }

    #[must_use]
    pub const fn requires_session(&self) -> bool {
        matches!(
            self,
            Self::AdminDashboard | Self::AdminBlogs | Self::AdminResearch | Self::AdminPapers
        )
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

pub struct Router {
    current: watch::Sender<Route>,
}

impl Router {
    #[must_use]
    pub fn new(initial: Route) -> Self {
        let (current, _) = watch::channel(initial);
        Self { current }
    }

    #[must_use]
    pub fn current(&self) -> Route {
        *self.current.borrow()
    }

    #[must_use]
    pub fn watch(&self) -> watch::Receiver<Route> {
        self.current.subscribe()
    }

    pub fn navigate(&self, route: Route) {
        let previous = self.current.send_replace(route);
        if previous != route {
            tracing::debug!(from = %previous, to = %route, "navigate");
        }
    }

    /// Apply one auth event. Returns `true` if it caused a redirect to login.
    pub fn handle(&self, event: &AuthEvent) -> bool {
        match event {
            AuthEvent::LoginRequired { reason } => {
                tracing::info!(%reason, "redirecting to login");
                self.navigate(Route::AdminLogin);
                true
            }
            AuthEvent::LoggedOut => {
                self.navigate(Route::AdminLogin);
                true
            }
            AuthEvent::LoggedIn { .. } => false,
        }
    }

    /// Apply every event already queued on `events` without waiting.
    /// Returns the number of redirects.
    pub fn drain(&self, events: &mut broadcast::Receiver<AuthEvent>) -> usize {
        let mut redirects = 0;
        loop {
            match events.try_recv() {
                Ok(event) => redirects += usize::from(self.handle(&event)),
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "router lagged behind auth events");
                }
                Err(_) => return redirects,
            }
        }
    }

    /// Follow auth events until `cancel` fires or the session store is gone.
    pub async fn run(&self, mut events: broadcast::Receiver<AuthEvent>, cancel: CancellationToken) {
        loop {
            tokio::select! {
                () = cancel.cancelled() => break,
                event = events.recv() => match event {
                    Ok(event) => {
                        self.handle(&event);
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "router lagged behind auth events");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                },
            }
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new(Route::Home)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_auth::{LogoutReason, SessionStore};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(Route::Home, "/")]
    #[case(Route::BlogPost(7), "/blog/7")]
    #[case(Route::ResearchProject(2), "/research/2")]
    #[case(Route::AdminLogin, "/admin/login")]
    #[case(Route::AdminDashboard, "/admin")]
    #[case(Route::AdminPapers, "/admin/papers")]
    fn route_paths(#[case] route: Route, #[case] path: &str) {
        assert_eq!(route.path(), path);
    }

    #[test]
    fn login_required_redirects_once_per_event() {
        let store = SessionStore::new(Box::new(
            folio_auth::storage::MemoryStorage::with_token("t"),
        ));
        let router = Router::new(Route::AdminBlogs);
        let mut events = store.subscribe();

        store.expire("t", LogoutReason::Unauthorized);
        store.expire("t", LogoutReason::Expired);

        assert_eq!(router.drain(&mut events), 1);
        assert_eq!(router.current(), Route::AdminLogin);
    }

    #[test]
    fn login_does_not_navigate() {
        let router = Router::new(Route::AdminLogin);
        assert!(!router.handle(&AuthEvent::LoggedIn { subject: None }));
        assert_eq!(router.current(), Route::AdminLogin);
    }

    #[tokio::test]
    async fn run_follows_events_until_cancelled() {
        let store = SessionStore::in_memory();
        let router = std::sync::Arc::new(Router::new(Route::AdminResearch));
        let cancel = CancellationToken::new();
        let task = tokio::spawn({
            let router = std::sync::Arc::clone(&router);
            let events = store.subscribe();
            let cancel = cancel.clone();
            async move { router.run(events, cancel).await }
        });
        let mut current = router.watch();

        store.require_login(LogoutReason::NoSession);
        current.wait_for(|r| *r == Route::AdminLogin).await.unwrap();

        cancel.cancel();
        task.await.unwrap();
    }
}
