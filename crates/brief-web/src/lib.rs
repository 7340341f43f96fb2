//! JSON API frontend for the brief-rs intake form.
//!
//! `brief-web` serves the shared [`UiState`] over a small REST API so a
//! browser (or `curl`) can fill in and submit the form. Every mutation goes
//! through the same `brief_rs::ui` updaters the TUI uses, so both frontends
//! enforce identical rules.
//!
//! # Quick start
//!
//! ```ignore
//! use brief_web::{WebConfig, spawn_web};
//! use brief_rs::prelude::*;
//!
//! let ui_state = Arc::new(Mutex::new(UiState::default()));
//! let endpoint = Arc::new(HttpEndpoint::new(&EndpointConfig::from_env())?);
//! let addr = spawn_web(ui_state, endpoint, WebConfig::default()).await?;
//! println!("Form API: http://{addr}/api/state");
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──/api/scalar, /api/choice, /api/distribution──▶ Arc<Mutex<UiState>>
//!    │                                                           │
//!    └──/api/submit──▶ request_submit ─▶ drive_pending_submission ─▶ SubmissionEndpoint
//! ```

mod api;
mod server;
pub mod snapshot;

pub use api::MissingResponse;
pub use server::build_router;
pub use snapshot::FormSnapshot;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use brief_rs::submit::SubmissionEndpoint;
use brief_rs::ui::UiState;

/// Configuration for the web server.
pub struct WebConfig {
    /// Address to bind to. Default: `127.0.0.1:3001`.
    pub bind_addr: SocketAddr,
    /// Directory of static files served for paths outside `/api`.
    ///
    /// If `None`, only the API is served.
    pub static_dir: Option<PathBuf>,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3001)),
            static_dir: None,
        }
    }
}

/// Spawn the web server on a Tokio task and return the bound address.
///
/// The server runs until the Tokio runtime shuts down.
pub async fn spawn_web(
    ui_state: Arc<Mutex<UiState>>,
    endpoint: Arc<dyn SubmissionEndpoint>,
    config: WebConfig,
) -> Result<SocketAddr, String> {
    let router = server::build_router(ui_state, endpoint, config.static_dir);
    server::start_server(router, config.bind_addr).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn web_config_default() {
        let config = WebConfig::default();
        assert_eq!(config.bind_addr.port(), 3001);
        assert!(config.bind_addr.ip().is_loopback());
        assert!(config.static_dir.is_none());
    }
}
