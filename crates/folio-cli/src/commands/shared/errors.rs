//! Maps a failed command onto the client's error taxonomy so the top-level
//! reporter can say what to do next.

use folio_client::{ClientError, ErrorKind};
use folio_core::CoreError;
use folio_views::ViewError;

/// The first classifiable error in the chain, outermost first.
#[must_use]
pub fn classify(error: &anyhow::Error) -> Option<ErrorKind> {
    error.chain().find_map(|cause| {
        if let Some(view) = cause.downcast_ref::<ViewError>() {
            Some(view.kind())
        } else if let Some(client) = cause.downcast_ref::<ClientError>() {
            Some(client.kind())
        } else {
            cause
                .downcast_ref::<CoreError>()
                .filter(|core| matches!(core, CoreError::Validation { .. }))
                .map(|_| ErrorKind::Validation)
        }
    })
}

/// What the user can do about a failure of this kind.
#[must_use]
pub const fn hint(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::Retryable => "the API could not be reached or was busy; try again",
        ErrorKind::Unauthorized => "run `folio auth login` to sign in again",
        ErrorKind::Validation => "correct the field named above and resubmit",
    }
}

/// Lines printed on stderr for a failed command: the error chain, then a
/// hint when the failure is classifiable.
#[must_use]
pub fn report(error: &anyhow::Error) -> (String, Option<&'static str>) {
    (format!("folio error: {error:#}"), classify(error).map(hint))
}

/// Convert a view failure, giving form and network failures a headline.
/// The view error stays in the chain for [`classify`].
pub fn explain(error: ViewError) -> anyhow::Error {
    let headline = match error.kind() {
        ErrorKind::Validation => Some("the form was rejected"),
        ErrorKind::Retryable if !error.is_cancelled() => Some("the request did not complete"),
        _ => None,
    };
    let error = anyhow::Error::new(error);
    match headline {
        Some(headline) => error.context(headline),
        None => error,
    }
}
