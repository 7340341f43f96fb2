//! The submission endpoint collaborator.
//!
//! [`SubmissionEndpoint`] is the seam between the lifecycle controller and
//! the network. [`HttpEndpoint`] is the production implementation: a single
//! JSON `POST` per submission, no retries.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::time::Instant;

use tracing::{debug, trace};

use super::payload::SubmissionPayload;
use crate::config::EndpointConfig;

/// User-facing notice when the endpoint answers with a non-success status.
pub const REJECTED_NOTICE: &str =
    "Hubo un error al enviar tu solicitud. Por favor, intenta de nuevo.";

/// User-facing notice when the request could not be completed.
pub const TRANSPORT_NOTICE: &str =
    "Hubo un error de red. Por favor, revisa tu conexión e intenta de nuevo.";

/// Why a submission did not succeed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitError {
    /// The endpoint was reached but answered with a non-success status.
    Rejected { status: u16, body: String },
    /// The request could not be completed (offline, DNS, timeout, ...).
    Transport(String),
}

impl SubmitError {
    /// Text to show the user. Both failure kinds leave the form editable.
    pub fn notice(&self) -> &'static str {
        match self {
            Self::Rejected { .. } => REJECTED_NOTICE,
            Self::Transport(_) => TRANSPORT_NOTICE,
        }
    }
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected { status, body } => {
                write!(f, "submission endpoint HTTP {status}: {body}")
            }
            Self::Transport(e) => write!(f, "submission request failed: {e}"),
        }
    }
}

impl std::error::Error for SubmitError {}

/// Boxed future returned by [`SubmissionEndpoint::submit`].
pub type SubmitFuture<'a> = Pin<Box<dyn Future<Output = Result<(), SubmitError>> + Send + 'a>>;

/// Receives serialized answer sets.
///
/// Uses a boxed future so the trait stays dyn-compatible.
pub trait SubmissionEndpoint: Send + Sync {
    fn submit<'a>(&'a self, payload: &'a SubmissionPayload) -> SubmitFuture<'a>;
}

/// Async HTTP client for a form-submission service.
pub struct HttpEndpoint {
    client: reqwest::Client,
    url: String,
}

impl HttpEndpoint {
    pub fn new(config: &EndpointConfig) -> Result<Self, String> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| format!("failed to build HTTP client: {e}"))?;
        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl SubmissionEndpoint for HttpEndpoint {
    fn submit<'a>(&'a self, payload: &'a SubmissionPayload) -> SubmitFuture<'a> {
        Box::pin(async move {
            debug!("Submitting answers to {}", self.url);
            trace!(
                "Submission payload size: {} bytes",
                serde_json::to_string(payload).map_or(0, |s| s.len())
            );
            let start = Instant::now();

            let resp = self
                .client
                .post(&self.url)
                .header(reqwest::header::ACCEPT, "application/json")
                .json(payload)
                .send()
                .await
                .map_err(|e| SubmitError::Transport(e.to_string()))?;

            let status = resp.status();
            debug!(
                "Submission response: HTTP {} in {:.1}s",
                status,
                start.elapsed().as_secs_f64()
            );

            if status.is_success() {
                return Ok(());
            }
            let body = resp.text().await.unwrap_or_default();
            Err(SubmitError::Rejected {
                status: status.as_u16(),
                body,
            })
        })
    }
}
