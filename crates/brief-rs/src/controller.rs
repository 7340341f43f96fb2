//! The intake form controller: answer set plus submission lifecycle.
//!
//! ```text
//!            submit (all required answered)
//!  Editing ───────────────────────────────▶ Submitting ──ok──▶ Submitted
//!     ▲                                         │
//!     └──────── EditingWithError ◀──error───────┘
//! ```
//!
//! Submission is split in two so a UI thread can flip to `Submitting`
//! immediately while an async driver performs the request:
//! [`IntakeForm::begin_submit`] validates and produces the payload,
//! [`IntakeForm::finish_submit`] applies the endpoint outcome. The guard on
//! `Submitting` means a second submit never produces a second payload.

use serde::Serialize;
use tracing::{error, info, warn};

use crate::form::{AnswerSet, Choice, Platform, RequiredField, ScalarField};
use crate::submit::{SubmissionPayload, SubmitError};

/// Submit control label while idle.
pub const SUBMIT_LABEL: &str = "Enviar Solicitud";
/// Submit control label while a request is in flight.
pub const SUBMITTING_LABEL: &str = "Enviando...";

/// Coarse submission status, independent of the answers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Lifecycle {
    /// Form is interactive.
    #[default]
    Editing,
    /// A request is in flight; inputs and the submit control are disabled.
    Submitting,
    /// Terminal success; the confirmation view replaces the form.
    Submitted,
    /// The last request failed. The form is interactive again and the
    /// answers are untouched.
    EditingWithError { notice: String },
}

/// Why [`IntakeForm::begin_submit`] did not start a submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitBlocked {
    /// A request is already in flight.
    AlreadySubmitting,
    /// The form was already submitted successfully.
    AlreadySubmitted,
    /// Required answers are missing, in form order.
    MissingRequired(Vec<RequiredField>),
}

impl std::fmt::Display for SubmitBlocked {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadySubmitting => f.write_str("a submission is already in progress"),
            Self::AlreadySubmitted => f.write_str("the form has already been submitted"),
            Self::MissingRequired(fields) => {
                let keys: Vec<&str> = fields.iter().map(|f| f.key()).collect();
                write!(f, "required fields are empty: {}", keys.join(", "))
            }
        }
    }
}

/// Owns the answer set and the lifecycle state.
#[derive(Clone, Debug, Default)]
pub struct IntakeForm {
    answers: AnswerSet,
    lifecycle: Lifecycle,
}

impl IntakeForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from pre-filled answers (e.g. loaded from a file).
    pub fn with_answers(answers: AnswerSet) -> Self {
        Self {
            answers,
            lifecycle: Lifecycle::Editing,
        }
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    /// Inputs accept changes only while editing (with or without an error).
    pub fn is_interactive(&self) -> bool {
        matches!(
            self.lifecycle,
            Lifecycle::Editing | Lifecycle::EditingWithError { .. }
        )
    }

    pub fn is_submitting(&self) -> bool {
        self.lifecycle == Lifecycle::Submitting
    }

    pub fn is_submitted(&self) -> bool {
        self.lifecycle == Lifecycle::Submitted
    }

    /// Error notice from the last failed submission.
    pub fn notice(&self) -> Option<&str> {
        match &self.lifecycle {
            Lifecycle::EditingWithError { notice } => Some(notice),
            _ => None,
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_submitting() {
            SUBMITTING_LABEL
        } else {
            SUBMIT_LABEL
        }
    }

    // ── Actions ──
    //
    // Each returns whether it was applied. Writes are ignored while the form
    // is not interactive.

    pub fn set_scalar(&mut self, field: ScalarField, value: impl Into<String>) -> bool {
        if !self.is_interactive() {
            return false;
        }
        self.answers.set_scalar(field, value);
        true
    }

    pub fn set_choice(&mut self, choice: Choice) -> bool {
        self.is_interactive() && self.answers.set_choice(choice)
    }

    pub fn toggle_distribution(&mut self, platform: Platform) -> bool {
        if !self.is_interactive() {
            return false;
        }
        self.answers.toggle_distribution(platform);
        true
    }

    /// Hide the error notice without submitting again.
    pub fn dismiss_notice(&mut self) {
        if matches!(self.lifecycle, Lifecycle::EditingWithError { .. }) {
            self.lifecycle = Lifecycle::Editing;
        }
    }

    /// Enter `Submitting` and return the payload to send.
    ///
    /// Blocked while a request is in flight, after success, or while
    /// required answers are missing. A blocked call changes nothing.
    pub fn begin_submit(&mut self) -> Result<SubmissionPayload, SubmitBlocked> {
        match self.lifecycle {
            Lifecycle::Submitting => return Err(SubmitBlocked::AlreadySubmitting),
            Lifecycle::Submitted => return Err(SubmitBlocked::AlreadySubmitted),
            Lifecycle::Editing | Lifecycle::EditingWithError { .. } => {}
        }
        let missing = self.answers.missing_required();
        if !missing.is_empty() {
            return Err(SubmitBlocked::MissingRequired(missing));
        }
        self.lifecycle = Lifecycle::Submitting;
        Ok(SubmissionPayload::from_answers(&self.answers))
    }

    /// Apply the endpoint outcome of the in-flight submission.
    pub fn finish_submit(&mut self, outcome: Result<(), SubmitError>) {
        if !self.is_submitting() {
            warn!(
                "Ignoring submission outcome in state {:?}",
                self.lifecycle
            );
            return;
        }
        self.lifecycle = match outcome {
            Ok(()) => {
                info!("Submission accepted");
                Lifecycle::Submitted
            }
            Err(e) => {
                match &e {
                    SubmitError::Rejected { status, .. } => {
                        error!("Submission rejected by endpoint (HTTP {status}): {e}")
                    }
                    SubmitError::Transport(cause) => {
                        error!("Network error while submitting: {cause}")
                    }
                }
                Lifecycle::EditingWithError {
                    notice: e.notice().to_string(),
                }
            }
        };
    }
}
