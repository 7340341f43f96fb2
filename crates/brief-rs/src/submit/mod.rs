//! Sending answer sets to the submission endpoint.
//!
//! A frontend calls [`request_submit`](crate::ui::request_submit), which
//! flips the form to `Submitting` and queues a payload in `UiState`. The
//! async side then calls [`drive_pending_submission`] to send it and apply
//! the outcome. The `UiState` lock is never held while the request is in
//! flight.

pub mod endpoint;
pub mod payload;

use std::sync::{Arc, Mutex};

pub use endpoint::{HttpEndpoint, SubmissionEndpoint, SubmitError, SubmitFuture};
pub use payload::SubmissionPayload;

use crate::controller::SubmitBlocked;
use crate::ui::{self, UiState, with_state};

/// Send the queued payload, if any, and record the outcome on the form.
///
/// Returns `true` if a request was made.
pub async fn drive_pending_submission(
    state: &Arc<Mutex<UiState>>,
    endpoint: &dyn SubmissionEndpoint,
) -> bool {
    let Some(payload) = with_state!(state, |s| s.pending_submission.take()) else {
        return false;
    };
    let outcome = endpoint.submit(&payload).await;
    with_state!(state, |s| s.form.finish_submit(outcome));
    true
}

/// Validate, send and record in one call. Used by headless callers.
pub async fn submit(
    state: &Arc<Mutex<UiState>>,
    endpoint: &dyn SubmissionEndpoint,
) -> Result<(), SubmitBlocked> {
    ui::request_submit(state)?;
    drive_pending_submission(state, endpoint).await;
    Ok(())
}
