//! Axum server setup and router construction.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::routing::{get, post};
use brief_rs::submit::SubmissionEndpoint;
use brief_rs::ui::UiState;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::error;

use crate::api::{self, AppState};

/// Build the full axum router.
///
/// The router serves:
/// - REST API at `/api/*`
/// - Optional static files for a browser frontend
pub fn build_router(
    ui_state: Arc<Mutex<UiState>>,
    endpoint: Arc<dyn SubmissionEndpoint>,
    static_dir: Option<PathBuf>,
) -> Router {
    let app_state = AppState { ui_state, endpoint };

    // CORS layer for a frontend dev server on a different port.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .route("/api/state", get(api::get_state))
        .route("/api/scalar", post(api::post_scalar))
        .route("/api/choice", post(api::post_choice))
        .route("/api/distribution", post(api::post_distribution))
        .route("/api/submit", post(api::post_submit))
        .route("/api/control", post(api::post_control))
        .with_state(app_state)
        .layer(cors);

    if let Some(dir) = static_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
}

/// Bind the listener, serve on a Tokio task, and return the bound address.
pub async fn start_server(router: Router, bind_addr: SocketAddr) -> Result<SocketAddr, String> {
    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .map_err(|e| format!("failed to bind {bind_addr}: {e}"))?;
    let addr = listener
        .local_addr()
        .map_err(|e| format!("failed to read bound address: {e}"))?;

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            error!("Web server stopped: {e}");
        }
    });

    Ok(addr)
}
