//! Serve the intake form over a JSON API.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p brief-web
//! cargo run -p brief-web -- --port 8080 --endpoint http://localhost:9000/f
//! cargo run -p brief-web -- --static-dir ./site
//! ```
//!
//! ## Filling in the form
//!
//! ```bash
//! curl -X POST localhost:3001/api/scalar -H 'content-type: application/json' \
//!   -d '{"field": "fullName", "value": "Ana"}'
//! curl -X POST localhost:3001/api/distribution -H 'content-type: application/json' \
//!   -d '{"platform": "TikTok"}'
//! curl -X POST localhost:3001/api/submit
//! ```

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use brief_rs::prelude::*;
use brief_web::{WebConfig, spawn_web};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Serve the intake form over a JSON API.
#[derive(Parser)]
#[command(name = "brief-web", version)]
struct Args {
    /// Port for the API server.
    #[arg(long, default_value_t = 3001)]
    port: u16,

    /// Endpoint URL (overrides BRIEF_ENDPOINT).
    #[arg(long)]
    endpoint: Option<String>,

    /// Request timeout in seconds (0 disables it).
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Static files to serve next to the API.
    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// Pre-fill the form from an answers JSON file.
    #[arg(long)]
    answers: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = EndpointConfig::from_env().with_overrides(args.endpoint, args.timeout_secs);
    let endpoint = HttpEndpoint::new(&config)?;
    info!("Submissions go to {}", endpoint.url());

    let form = match &args.answers {
        Some(path) => IntakeForm::with_answers(brief_rs::form::load_answers(path)?),
        None => IntakeForm::new(),
    };
    let ui_state = Arc::new(Mutex::new(UiState::with_form(form)));

    let web_config = WebConfig {
        bind_addr: ([127, 0, 0, 1], args.port).into(),
        static_dir: args.static_dir,
    };
    let addr = spawn_web(ui_state.clone(), Arc::new(endpoint), web_config).await?;
    println!("Form API: http://{addr}/api/state");

    // Run until `POST /api/control {"action":"quit"}` or Ctrl+C.
    let mut tick = tokio::time::interval(Duration::from_millis(200));
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    loop {
        tokio::select! {
            _ = tick.tick() => {
                if ui::quit_requested(&ui_state) {
                    break;
                }
            }
            _ = &mut ctrl_c => break,
        }
    }
    info!("Shutting down");
    Ok(())
}
