//! Submit a pre-filled intake form from the command line.
//!
//! Answers come from a JSON file keyed by the form's wire keys. The file is
//! validated against the form schema, checked for missing required answers,
//! and posted to the submission endpoint (`BRIEF_ENDPOINT` or the default).
//!
//! # Examples
//!
//! ```sh
//! # Print the JSON Schema for answers files
//! brief schema > answers.schema.json
//!
//! # Show what would be sent
//! brief payload --answers answers.json
//!
//! # Submit to a test endpoint with a short timeout
//! brief submit --answers answers.json --endpoint http://localhost:8080/f --timeout-secs 5
//! ```

use std::path::{Path, PathBuf};
use std::process;

use brief_rs::form::layout::{CONFIRMATION_BODY, CONFIRMATION_TITLE};
use brief_rs::prelude::*;
use brief_rs::submit::SubmissionPayload;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Submit a video-editing intake form.
#[derive(Parser)]
#[command(name = "brief", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate an answers file and post it to the submission endpoint
    Submit {
        /// Path to the answers JSON file
        #[arg(long)]
        answers: PathBuf,

        /// Endpoint URL (overrides BRIEF_ENDPOINT)
        #[arg(long)]
        endpoint: Option<String>,

        /// Request timeout in seconds (0 disables it)
        #[arg(long)]
        timeout_secs: Option<u64>,

        /// Print the payload instead of sending it
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the JSON Schema for answers files
    Schema,
    /// Print the payload that would be sent for an answers file
    Payload {
        /// Path to the answers JSON file
        #[arg(long)]
        answers: PathBuf,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn to_pretty_json(value: &impl serde::Serialize) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("failed to serialize: {e}"))
}

/// Load answers and refuse early when required ones are missing.
fn load_complete(path: &Path) -> Result<IntakeForm, String> {
    let answers = brief_rs::form::load_answers(path)?;
    let missing = answers.missing_required();
    if !missing.is_empty() {
        return Err(SubmitBlocked::MissingRequired(missing).to_string());
    }
    Ok(IntakeForm::with_answers(answers))
}

async fn run(cli: Cli) -> Result<String, String> {
    match cli.command {
        Command::Schema => to_pretty_json(&brief_rs::form::answers_schema()?),
        Command::Payload { answers } => {
            let answers = brief_rs::form::load_answers(&answers)?;
            to_pretty_json(&SubmissionPayload::from_answers(&answers))
        }
        Command::Submit {
            answers,
            endpoint,
            timeout_secs,
            dry_run,
        } => {
            let form = load_complete(&answers)?;
            if dry_run {
                return to_pretty_json(&SubmissionPayload::from_answers(form.answers()));
            }

            let config = EndpointConfig::from_env().with_overrides(endpoint, timeout_secs);
            let endpoint = HttpEndpoint::new(&config)?;
            info!("Submitting {} to {}", answers.display(), endpoint.url());

            let state = Arc::new(Mutex::new(UiState::with_form(form)));
            submit::submit(&state, &endpoint)
                .await
                .map_err(|e| e.to_string())?;

            let lifecycle = state
                .lock()
                .map_err(|_| "form state lock poisoned".to_string())?
                .form
                .lifecycle()
                .clone();
            match lifecycle {
                Lifecycle::Submitted => Ok(format!("{CONFIRMATION_TITLE}\n{CONFIRMATION_BODY}\n")),
                Lifecycle::EditingWithError { notice } => Err(notice),
                other => Err(format!("submission ended in unexpected state {other:?}")),
            }
        }
    }
}

#[tokio::main]
async fn main() {
    init_logging();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(output) => print!("{output}"),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
