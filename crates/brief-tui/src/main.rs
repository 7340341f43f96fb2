//! Fill in and submit the intake form in the terminal.
//!
//! # Examples
//!
//! ```sh
//! # Submit to the default endpoint (or BRIEF_ENDPOINT)
//! brief-tui
//!
//! # Start from a saved answers file and post to a local endpoint
//! brief-tui --answers answers.json --endpoint http://localhost:8080/f
//! ```

use std::path::PathBuf;
use std::time::Duration;

use brief_rs::prelude::*;
use brief_rs::ui::tracing::UiTracingLayer;
use brief_tui::{TuiConfig, spawn_tui};
use clap::Parser;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Fill in and submit the intake form in the terminal.
#[derive(Parser)]
#[command(name = "brief-tui", version)]
struct Cli {
    /// Endpoint URL (overrides BRIEF_ENDPOINT)
    #[arg(long)]
    endpoint: Option<String>,

    /// Request timeout in seconds (0 disables it)
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Pre-fill the form from an answers JSON file
    #[arg(long)]
    answers: Option<PathBuf>,

    /// Open the log pane on start
    #[arg(long)]
    logs: bool,
}

fn build_state(cli: &Cli) -> Result<Arc<Mutex<UiState>>, String> {
    let form = match &cli.answers {
        Some(path) => IntakeForm::with_answers(brief_rs::form::load_answers(path)?),
        None => IntakeForm::new(),
    };
    Ok(Arc::new(Mutex::new(UiState::with_form(form))))
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = EndpointConfig::from_env().with_overrides(cli.endpoint.clone(), cli.timeout_secs);
    let endpoint = match HttpEndpoint::new(&config) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    let ui_state = match build_state(&cli) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    // Tracing → TUI log buffer.
    let (tracing_layer, log_buffer) = UiTracingLayer::new();
    tracing_subscriber::registry().with(tracing_layer).init();
    info!("Submissions go to {}", endpoint.url());

    let tui_config = TuiConfig {
        log_buffer: Some(log_buffer),
        show_logs: cli.logs,
    };
    let tui_handle = spawn_tui(ui_state.clone(), tui_config);

    // Send whatever the TUI queues until the user quits.
    let mut tick = tokio::time::interval(Duration::from_millis(50));
    while !ui::quit_requested(&ui_state) {
        tick.tick().await;
        submit::drive_pending_submission(&ui_state, &endpoint).await;
    }

    tui_handle.join().ok();
}
