use std::sync::Arc;

use anyhow::Context;
use folio_auth::{AuthEvent, Clock, MonitorSettings, SessionStore, SystemClock};
use folio_client::ApiClient;
use folio_config::FolioConfig;
use folio_views::{FormDefaults, Route, Router};
use tokio::sync::broadcast;

use crate::cli::GlobalFlags;
use crate::ui;

/// Everything a command needs: config, the session-backed client, and the
/// router that reacts to the session ending.
pub struct AppContext {
    pub config: FolioConfig,
    pub client: ApiClient,
    pub router: Router,
    pub clock: Arc<dyn Clock>,
    events: broadcast::Receiver<AuthEvent>,
}

impl AppContext {
    pub fn init(config: FolioConfig) -> anyhow::Result<Self> {
        let store = folio_auth::open_store(&config.session).context("failed to open token storage")?;
        Self::with_store(config, Arc::new(store), Arc::new(SystemClock))
    }

    pub fn with_store(
        config: FolioConfig,
        store: Arc<SessionStore>,
        clock: Arc<dyn Clock>,
    ) -> anyhow::Result<Self> {
        let events = store.subscribe();
        let client = ApiClient::new(&config.api, store).context("invalid API configuration")?;
        tracing::debug!(origin = client.origin(), backend = client.session().backend(), "client ready");
        Ok(Self {
            config,
            client,
            router: Router::new(Route::Home),
            clock,
            events,
        })
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        self.client.session()
    }

    pub fn form_defaults(&self) -> FormDefaults {
        FormDefaults::new(&self.config.admin, self.clock.as_ref())
    }

    pub fn monitor_settings(&self) -> MonitorSettings {
        MonitorSettings::from(&self.config.session)
    }

    /// Route pending auth events; if the session ended, say how to get back in.
    pub fn finish(&mut self, flags: &GlobalFlags, announce: bool) {
        let redirects = self.router.drain(&mut self.events);
        if redirects > 0 && announce && !flags.quiet {
            ui::notice(&format!(
                "Signed out ({}). Run `folio auth login` to sign in again.",
                self.router.current()
            ));
        }
    }
}
