//! The admin CRUD screen as a state machine.
//!
//! ```text
//! Guarding --> Listing <--> Editing
//!     \           |            |
//!      +--> Redirected <-------+
//! ```
//!
//! Every successful write re-fetches the listing instead of patching it.
//! Any phase except `Redirected` may move to `Unmounted`, which cancels the
//! in-flight call so its result is never applied.

use std::fmt;
use std::sync::Arc;

use folio_auth::SessionStore;
use folio_client::{ApiClient, AuthApi, ClientError, Resources, with_cancel};
use folio_core::identity::AdminIdentity;
use folio_core::{CoreError, Resource};
use tokio_util::sync::CancellationToken;

use crate::error::ViewError;
use crate::form::{BlogForm, EditForm, FormDefaults, PublicationForm, ResearchForm};
use crate::guard::guard;

pub type BlogAdmin = AdminView<BlogForm>;
pub type ResearchAdmin = AdminView<ResearchForm>;
pub type PublicationAdmin = AdminView<PublicationForm>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewPhase {
    Guarding,
    Listing,
    Editing,
    Redirected,
    Unmounted,
}

impl ViewPhase {
    /// Valid next phases from the current phase.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Guarding => &[Self::Listing, Self::Redirected, Self::Unmounted],
            Self::Listing | Self::Editing => {
                &[Self::Listing, Self::Editing, Self::Redirected, Self::Unmounted]
            }
            Self::Redirected => &[Self::Unmounted],
            Self::Unmounted => &[],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Guarding => "guarding",
            Self::Listing => "listing",
            Self::Editing => "editing",
            Self::Redirected => "redirected",
            Self::Unmounted => "unmounted",
        }
    }
}

impl fmt::Display for ViewPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Asks the user to confirm a destructive action.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F: Fn(&str) -> bool> Confirm for F {
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// The confirmation text shown before deleting `title`.
#[must_use]
pub fn delete_prompt(title: &str) -> String {
    format!("Delete \"{title}\"?\n\nThis cannot be undone.")
}

pub struct AdminView<F: EditForm> {
    resources: Resources<F::Resource>,
    auth: AuthApi,
    session: Arc<SessionStore>,
    defaults: FormDefaults,
    phase: ViewPhase,
    identity: Option<AdminIdentity>,
    items: Vec<F::Resource>,
    form: Option<F>,
    editing_id: Option<i64>,
    error: Option<String>,
    cancel: CancellationToken,
}

impl<F: EditForm> AdminView<F> {
    #[must_use]
    pub fn new(client: &ApiClient, defaults: FormDefaults) -> Self {
        Self {
            resources: Resources::new(client.clone()),
            auth: client.auth(),
            session: Arc::clone(client.session()),
            defaults,
            phase: ViewPhase::Guarding,
            identity: None,
            items: Vec::new(),
            form: None,
            editing_id: None,
            error: None,
            cancel: CancellationToken::new(),
        }
    }

    #[must_use]
    pub const fn phase(&self) -> ViewPhase {
        self.phase
    }

    #[must_use]
    pub fn items(&self) -> &[F::Resource] {
        &self.items
    }

    #[must_use]
    pub const fn identity(&self) -> Option<&AdminIdentity> {
        self.identity.as_ref()
    }

    #[must_use]
    pub const fn form(&self) -> Option<&F> {
        self.form.as_ref()
    }

    pub const fn form_mut(&mut self) -> Option<&mut F> {
        self.form.as_mut()
    }

    /// `Some` while editing an existing item, `None` while creating.
    #[must_use]
    pub const fn editing_id(&self) -> Option<i64> {
        self.editing_id
    }

    /// Message from the last failed action, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Handle that aborts this view's in-flight calls.
    #[must_use]
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Verify the session, then load the listing.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::LoginRequired`] if the guard fails; no resource
    /// call is made in that case.
    pub async fn mount(&mut self) -> Result<(), ViewError> {
        self.expect_phase(ViewPhase::Guarding, ViewPhase::Listing)?;
        match guard(&self.auth, &self.session, &self.cancel).await {
            Ok(identity) => self.identity = Some(identity),
            Err(ViewError::LoginRequired) => {
                self.phase = ViewPhase::Redirected;
                return Err(ViewError::LoginRequired);
            }
            Err(other) => return Err(other),
        }
        self.phase = ViewPhase::Listing;
        self.reload().await
    }

    /// Re-fetch the listing.
    ///
    /// # Errors
    ///
    /// Returns the client error; the previous listing is kept.
    pub async fn refresh(&mut self) -> Result<(), ViewError> {
        self.expect_phase(ViewPhase::Listing, ViewPhase::Listing)?;
        self.reload().await
    }

    /// Open a blank form.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] outside `Listing`.
    pub fn start_create(&mut self) -> Result<(), ViewError> {
        self.expect_phase(ViewPhase::Listing, ViewPhase::Editing)?;
        self.form = Some(F::blank(&self.defaults));
        self.editing_id = None;
        self.error = None;
        self.phase = ViewPhase::Editing;
        Ok(())
    }

    /// Open the form pre-filled from item `id`, fetching it if it is not in
    /// the current listing.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] outside `Listing`, or the
    /// client error if the item cannot be fetched.
    pub async fn start_edit(&mut self, id: i64) -> Result<(), ViewError> {
        self.expect_phase(ViewPhase::Listing, ViewPhase::Editing)?;
        let cached = self.items.iter().find(|item| item.id() == id).cloned();
        let item = match cached {
            Some(item) => item,
            None => {
                let fetched = with_cancel(&self.cancel, self.resources.get(id)).await;
                fetched.map_err(|e| self.fail(e))?
            }
        };
        self.form = Some(F::from_item(&item, &self.defaults));
        self.editing_id = Some(id);
        self.error = None;
        self.phase = ViewPhase::Editing;
        Ok(())
    }

    /// Close the form without writing anything.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] outside `Editing`.
    pub fn cancel_edit(&mut self) -> Result<(), ViewError> {
        self.expect_phase(ViewPhase::Editing, ViewPhase::Listing)?;
        self.reset_form();
        self.phase = ViewPhase::Listing;
        Ok(())
    }

    /// Create or update from the form, then re-fetch the listing.
    ///
    /// Update when an editing id is set, create otherwise. On failure the
    /// form stays open with the error recorded.
    ///
    /// # Errors
    ///
    /// Returns the validation or client error from the write, or from the
    /// re-fetch that follows a successful write.
    pub async fn submit(&mut self) -> Result<F::Resource, ViewError> {
        self.expect_phase(ViewPhase::Editing, ViewPhase::Listing)?;
        let Some(form) = &self.form else {
            return Err(CoreError::InvalidTransition {
                from: "editing without form".into(),
                to: ViewPhase::Listing.to_string(),
            }
            .into());
        };
        let payload = form.to_payload();
        let written = match self.editing_id {
            Some(id) => with_cancel(&self.cancel, self.resources.update(id, &payload)).await,
            None => with_cancel(&self.cancel, self.resources.create(&payload)).await,
        };
        let item = written.map_err(|e| self.fail(e))?;

        tracing::info!(
            resource = <F::Resource as Resource>::PATH,
            id = item.id(),
            updated = self.editing_id.is_some(),
            "saved"
        );
        self.reset_form();
        self.phase = ViewPhase::Listing;
        self.reload().await?;
        Ok(item)
    }

    /// Delete item `id` after the user confirms, then re-fetch.
    ///
    /// Returns `false` without any call if the user declines.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] outside `Listing`, or the
    /// client error from the delete or re-fetch.
    pub async fn delete(&mut self, id: i64, confirm: &impl Confirm) -> Result<bool, ViewError> {
        self.expect_phase(ViewPhase::Listing, ViewPhase::Listing)?;
        let title = self.items.iter().find(|item| item.id() == id).map_or_else(
            || format!("this {}", <F::Resource as Resource>::LABEL),
            |item| item.title().to_string(),
        );
        if !confirm.confirm(&delete_prompt(&title)) {
            tracing::debug!(id, "delete declined");
            return Ok(false);
        }
        let deleted = with_cancel(&self.cancel, self.resources.delete(id)).await;
        deleted.map_err(|e| self.fail(e))?;
        self.reload().await?;
        Ok(true)
    }

    /// Explicit logout from this screen.
    ///
    /// # Errors
    ///
    /// Returns the storage error if the token cannot be removed.
    pub fn logout(&mut self) -> Result<(), ViewError> {
        self.expect_phase(self.phase, ViewPhase::Redirected)?;
        self.session.clear().map_err(ClientError::from)?;
        self.reset_form();
        self.phase = ViewPhase::Redirected;
        Ok(())
    }

    /// Leave the screen, abandoning any in-flight call.
    pub fn unmount(&mut self) {
        self.cancel.cancel();
        self.phase = ViewPhase::Unmounted;
    }

    async fn reload(&mut self) -> Result<(), ViewError> {
        let window = F::list_window(&self.defaults);
        let listed = with_cancel(&self.cancel, self.resources.list(window)).await;
        let page = listed.map_err(|e| self.fail(e))?;
        self.items = page.items;
        self.error = None;
        Ok(())
    }

    fn reset_form(&mut self) {
        self.form = None;
        self.editing_id = None;
        self.error = None;
    }

    fn expect_phase(&self, required: ViewPhase, next: ViewPhase) -> Result<(), ViewError> {
        if self.phase == required && self.phase.can_transition_to(next) {
            return Ok(());
        }
        Err(CoreError::InvalidTransition {
            from: self.phase.to_string(),
            to: next.to_string(),
        }
        .into())
    }

    /// Record a failed call and decide what it means for the view.
    fn fail(&mut self, error: ClientError) -> ViewError {
        match error {
            ClientError::Cancelled => ViewError::Client(error),
            ClientError::Unauthorized => {
                // The 401 handler has already ended the session.
                self.reset_form();
                self.phase = ViewPhase::Redirected;
                ViewError::LoginRequired
            }
            other => {
                tracing::warn!(error = %other, phase = %self.phase, "admin action failed");
                self.error = Some(other.to_string());
                ViewError::Client(other)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(ViewPhase::Guarding, ViewPhase::Listing, true)]
    #[case(ViewPhase::Guarding, ViewPhase::Editing, false)]
    #[case(ViewPhase::Listing, ViewPhase::Editing, true)]
    #[case(ViewPhase::Editing, ViewPhase::Listing, true)]
    #[case(ViewPhase::Redirected, ViewPhase::Listing, false)]
    #[case(ViewPhase::Unmounted, ViewPhase::Guarding, false)]
    fn phase_transitions(#[case] from: ViewPhase, #[case] to: ViewPhase, #[case] allowed: bool) {
        assert_eq!(from.can_transition_to(to), allowed);
    }

    #[test]
    fn delete_prompt_names_item() {
        assert_eq!(
            delete_prompt("Hello"),
            "Delete \"Hello\"?\n\nThis cannot be undone."
        );
    }
}
