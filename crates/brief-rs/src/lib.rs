//! Controller for a video-editing client intake form.
//!
//! `brief-rs` holds the answers a prospective client gives about a short-form
//! video project, derives which parts of the form are visible, and submits the
//! completed answer set as JSON to a form-collection endpoint. It contains no
//! rendering code; the `brief-tui` and `brief-web` crates are frontends over
//! the shared [`UiState`](ui::UiState).
//!
//! ```ignore
//! use brief_rs::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), String> {
//!     let endpoint = HttpEndpoint::new(&EndpointConfig::from_env())?;
//!     let state = Arc::new(Mutex::new(UiState::default()));
//!
//!     ui::set_scalar(&state, ScalarField::FullName, "Ana");
//!     ui::toggle_distribution(&state, Platform::TikTok);
//!     // ... remaining required answers ...
//!
//!     submit::submit(&state, &endpoint).await.map_err(|e| e.to_string())?;
//!     Ok(())
//! }
//! ```
//!
//! # Where to find things
//!
//! - **Answers and visibility rules:** [`form::AnswerSet`]. Conditional
//!   sections (custom editing style, budget tiers, "other" purpose) are pure
//!   derivations of the answers; nothing is stored about what is shown.
//! - **Option catalogues and wire ids:** [`form::options`].
//! - **Section layout for frontends:** [`form::layout`].
//! - **Submission lifecycle:** [`controller::IntakeForm`].
//! - **Sending:** [`submit::SubmissionEndpoint`] and
//!   [`submit::HttpEndpoint`]; the payload shape is
//!   [`submit::SubmissionPayload`].
//! - **Endpoint URL and timeout:** [`config::EndpointConfig`].
//! - **Shared frontend state and log capture:** [`ui`].

pub mod config;
pub mod controller;
pub mod form;
pub mod submit;
pub mod ui;

/// Form-collection endpoint used when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "https://formspree.io/f/movnqawg";

pub use config::EndpointConfig;
pub use controller::{IntakeForm, Lifecycle, SubmitBlocked};
pub use form::{AnswerSet, Choice, ChoiceField, RequiredField, ScalarField};
pub use submit::{HttpEndpoint, SubmissionEndpoint, SubmissionPayload, SubmitError};

/// Common imports for frontends.
pub mod prelude {
    pub use std::sync::{Arc, Mutex};

    pub use crate::config::EndpointConfig;
    pub use crate::controller::{IntakeForm, Lifecycle, SubmitBlocked};
    pub use crate::form::{
        AnswerSet, BudgetTier, BudgetType, Choice, ChoiceField, EditingStyle, Platform,
        RequiredField, ScalarField, VideoDuration, VideoPurpose,
    };
    pub use crate::submit::{self, HttpEndpoint, SubmissionEndpoint, SubmitError};
    pub use crate::ui::{self, UiState};
}
