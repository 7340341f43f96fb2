//! Shared UI state for intake form frontends.
//!
//! Any frontend (TUI, web, headless) reads and writes the same
//! [`UiState`]. It contains no rendering dependencies.
//!
//! ```text
//! Frontend input ──set_* / request_submit──▶ Arc<Mutex<UiState>> ◀──reads── renderer
//!                                                   │
//!                         drive_pending_submission ─┴─▶ SubmissionEndpoint
//! ```

pub mod tracing;

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::controller::{IntakeForm, SubmitBlocked};
use crate::form::{Choice, Platform, ScalarField};
use crate::submit::SubmissionPayload;

/// Maximum log lines kept in memory.
pub const MAX_LOG_LINES: usize = 2000;
/// Trim to this many when the cap is exceeded.
pub const LOG_TRIM_TO: usize = 1200;

// ── Log Types ─────────────────────────────────────────────────────────

/// A single log line captured from tracing.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LogLine {
    pub time: String,
    pub level: LogLevel,
    pub message: String,
}

/// Log severity level (mirrors tracing levels).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Short fixed-width label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Info => "INFO ",
            Self::Warn => "WARN ",
            Self::Error => "ERROR",
        }
    }
}

// ── UiState ───────────────────────────────────────────────────────────

/// State shared between a frontend and the submission driver.
///
/// Protected by a `Mutex`. Never hold the lock across an `.await`.
#[derive(Default)]
pub struct UiState {
    /// Answers and lifecycle.
    pub form: IntakeForm,
    /// Payload produced by [`request_submit`], waiting for the driver.
    pub pending_submission: Option<SubmissionPayload>,
    /// Captured tracing output.
    pub logs: Vec<LogLine>,
    /// The frontend sets this to `true` when the user requests quit.
    pub quit_requested: bool,
}

impl UiState {
    pub fn with_form(form: IntakeForm) -> Self {
        Self {
            form,
            ..Default::default()
        }
    }
}

// ── Convenience Updaters ──────────────────────────────────────────────

/// Lock the shared state mutex and run a closure on the guard.
/// Poisoned locks are recovered: the state holds plain data.
macro_rules! with_state {
    ($state:expr, |$s:ident| $body:expr) => {{
        let mut $s = $state.lock().unwrap_or_else(|e| e.into_inner());
        $body
    }};
}
pub(crate) use with_state;

/// Overwrite a free-text answer. Returns whether it was applied.
pub fn set_scalar(state: &Arc<Mutex<UiState>>, field: ScalarField, value: &str) -> bool {
    with_state!(state, |s| s.form.set_scalar(field, value))
}

/// Select a single-choice option. Returns whether it was applied.
pub fn set_choice(state: &Arc<Mutex<UiState>>, choice: Choice) -> bool {
    with_state!(state, |s| s.form.set_choice(choice))
}

/// Toggle a distribution platform. Returns whether it was applied.
pub fn toggle_distribution(state: &Arc<Mutex<UiState>>, platform: Platform) -> bool {
    with_state!(state, |s| s.form.toggle_distribution(platform))
}

/// Enter `Submitting` and queue the payload for
/// [`drive_pending_submission`](crate::submit::drive_pending_submission).
pub fn request_submit(state: &Arc<Mutex<UiState>>) -> Result<(), SubmitBlocked> {
    with_state!(state, |s| {
        let payload = s.form.begin_submit()?;
        s.pending_submission = Some(payload);
        Ok(())
    })
}

pub fn request_quit(state: &Arc<Mutex<UiState>>) {
    with_state!(state, |s| s.quit_requested = true);
}

pub fn quit_requested(state: &Arc<Mutex<UiState>>) -> bool {
    with_state!(state, |s| s.quit_requested)
}

// ── Tests ─────────────────────────────────────────────────────────────
