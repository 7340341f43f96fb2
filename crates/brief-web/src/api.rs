//! REST API endpoint handlers.
//!
//! Mutations answer `204` when applied, `400` for an unknown field or
//! option, and `409` while the form is not interactive.

use std::sync::{Arc, Mutex, MutexGuard};

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use brief_rs::controller::SubmitBlocked;
use brief_rs::form::{ChoiceField, Platform, RequiredField, ScalarField};
use brief_rs::submit::{SubmissionEndpoint, SubmitError, drive_pending_submission};
use brief_rs::ui::{self, UiState};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::snapshot::FormSnapshot;

/// Shared application state passed to all handlers via axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub ui_state: Arc<Mutex<UiState>>,
    pub endpoint: Arc<dyn SubmissionEndpoint>,
}

impl AppState {
    fn lock(&self) -> MutexGuard<'_, UiState> {
        self.ui_state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn snapshot(&self) -> FormSnapshot {
        FormSnapshot::from_ui_state(&self.lock())
    }
}

/// Outcome of a mutation on the form.
fn applied(ok: bool) -> StatusCode {
    if ok {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::CONFLICT
    }
}

/// GET /api/state: Full form snapshot.
pub async fn get_state(State(app): State<AppState>) -> Json<FormSnapshot> {
    Json(app.snapshot())
}

/// Request body for POST /api/scalar.
#[derive(Deserialize)]
pub struct ScalarRequest {
    pub field: String,
    pub value: String,
}

/// POST /api/scalar: Overwrite a free-text answer.
pub async fn post_scalar(
    State(app): State<AppState>,
    Json(body): Json<ScalarRequest>,
) -> StatusCode {
    let Some(field) = ScalarField::from_key(&body.field) else {
        debug!("Unknown text field {:?}", body.field);
        return StatusCode::BAD_REQUEST;
    };
    applied(ui::set_scalar(&app.ui_state, field, &body.value))
}

/// Request body for POST /api/choice.
#[derive(Deserialize)]
pub struct ChoiceRequest {
    pub field: String,
    pub option: String,
}

/// POST /api/choice: Select a single-choice option.
///
/// A budget tier outside the list for the current budget type is rejected
/// as an unknown option.
pub async fn post_choice(
    State(app): State<AppState>,
    Json(body): Json<ChoiceRequest>,
) -> StatusCode {
    let Some(choice) =
        ChoiceField::from_key(&body.field).and_then(|f| f.parse_option(&body.option))
    else {
        debug!("Unknown option {:?} for {:?}", body.option, body.field);
        return StatusCode::BAD_REQUEST;
    };

    let mut state = app.lock();
    if !state.form.is_interactive() {
        return StatusCode::CONFLICT;
    }
    if state.form.set_choice(choice) {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::BAD_REQUEST
    }
}

/// Request body for POST /api/distribution.
#[derive(Deserialize)]
pub struct DistributionRequest {
    pub platform: String,
}

/// POST /api/distribution: Toggle a platform in the distribution set.
pub async fn post_distribution(
    State(app): State<AppState>,
    Json(body): Json<DistributionRequest>,
) -> StatusCode {
    let Some(platform) = Platform::from_id(&body.platform) else {
        debug!("Unknown platform {:?}", body.platform);
        return StatusCode::BAD_REQUEST;
    };
    applied(ui::toggle_distribution(&app.ui_state, platform))
}

/// Body of a `422` answer to POST /api/submit.
#[derive(Debug, Serialize, Deserialize)]
pub struct MissingResponse {
    pub missing: Vec<String>,
}

/// POST /api/submit: Validate and send the answers.
///
/// Waits for the endpoint and returns the resulting snapshot with `200`.
/// The request is sent on a separate task, so a client that disconnects
/// early still leaves the form in `Submitted` or `EditingWithError`.
/// Missing answers give `422` with their keys; a submission already in
/// flight or already accepted gives `409` and sends nothing.
pub async fn post_submit(State(app): State<AppState>) -> Response {
    match ui::request_submit(&app.ui_state) {
        Ok(()) => {}
        Err(SubmitBlocked::MissingRequired(missing)) => {
            let missing = missing.iter().map(|r: &RequiredField| r.key().to_string()).collect();
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(MissingResponse { missing }),
            )
                .into_response();
        }
        Err(blocked) => {
            debug!("Submit ignored: {blocked}");
            return StatusCode::CONFLICT.into_response();
        }
    }

    let ui_state = app.ui_state.clone();
    let endpoint = app.endpoint.clone();
    let driver =
        tokio::spawn(async move { drive_pending_submission(&ui_state, endpoint.as_ref()).await });
    if let Err(e) = driver.await {
        error!("Submission task failed: {e}");
        app.lock()
            .form
            .finish_submit(Err(SubmitError::Transport(e.to_string())));
    }
    Json(app.snapshot()).into_response()
}

/// Request body for POST /api/control.
#[derive(Deserialize)]
pub struct ControlRequest {
    pub action: ControlAction,
}

/// Available control actions.
#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlAction {
    /// Stop the server.
    Quit,
}

/// POST /api/control: Server control commands.
pub async fn post_control(
    State(app): State<AppState>,
    Json(body): Json<ControlRequest>,
) -> StatusCode {
    match body.action {
        ControlAction::Quit => {
            info!("Quit requested over the API");
            ui::request_quit(&app.ui_state);
            StatusCode::NO_CONTENT
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choice_request_deserializes() {
        let json = r#"{"field":"budgetType","option":"monthly-package"}"#;
        let req: ChoiceRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.field, "budgetType");
        assert_eq!(req.option, "monthly-package");
    }

    #[test]
    fn control_request_deserializes() {
        let json = r#"{"action":"quit"}"#;
        let req: ControlRequest = serde_json::from_str(json).unwrap();
        assert!(matches!(req.action, ControlAction::Quit));
    }

    #[test]
    fn applied_maps_to_status() {
        assert_eq!(applied(true), StatusCode::NO_CONTENT);
        assert_eq!(applied(false), StatusCode::CONFLICT);
    }
}
