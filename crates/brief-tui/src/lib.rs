//! Terminal frontend for the brief-rs intake form.
//!
//! Renders the form from [`UiState`] with ratatui + crossterm and writes
//! every edit through the `brief_rs::ui` updaters. Submission is only
//! queued here; the caller's async runtime sends it with
//! [`drive_pending_submission`](brief_rs::submit::drive_pending_submission).
//!
//! # Quick start
//!
//! ```ignore
//! use brief_tui::{TuiConfig, spawn_tui};
//! use brief_rs::ui::UiState;
//! use std::sync::{Arc, Mutex};
//!
//! let ui_state = Arc::new(Mutex::new(UiState::default()));
//! let handle = spawn_tui(ui_state.clone(), TuiConfig::default());
//! // ... drive pending submissions until quit_requested ...
//! handle.join().unwrap();
//! ```

use std::io;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use brief_rs::ui::tracing::LogBuffer;
use brief_rs::ui::{self, UiState};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use crossterm::{cursor, execute};
use ratatui::prelude::*;

mod app;
mod input;
mod render;

pub use render::{log_level_style, required_label};

use app::App;
use input::handle_key_event;
use render::render;

/// Configuration for the TUI.
#[derive(Default)]
pub struct TuiConfig {
    /// Optional log buffer from the tracing layer, drained into
    /// `UiState::logs` once per frame.
    pub log_buffer: Option<LogBuffer>,
    /// Start with the log pane open.
    pub show_logs: bool,
}

/// Sets `quit_requested` when dropped, including during a panic unwind.
struct QuitOnDrop(Arc<Mutex<UiState>>);

impl Drop for QuitOnDrop {
    fn drop(&mut self) {
        ui::request_quit(&self.0);
    }
}

/// Spawn the TUI on a dedicated OS thread.
///
/// When the TUI exits, for any reason including a panic, `quit_requested`
/// is set so the submission driver stops too.
pub fn spawn_tui(state: Arc<Mutex<UiState>>, config: TuiConfig) -> JoinHandle<()> {
    std::thread::spawn(move || {
        let _quit = QuitOnDrop(state.clone());
        if let Err(e) = run_tui(state, &config) {
            eprintln!("TUI error: {e}");
        }
    })
}

/// Run the TUI event loop (blocking). Call this from a dedicated OS thread.
///
/// Returns when the user presses `q` or `quit_requested` is set elsewhere.
pub fn run_tui(state: Arc<Mutex<UiState>>, config: &TuiConfig) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, cursor::Hide)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let mut app = App::new();
    app.show_logs = config.show_logs;

    let result = event_loop(&mut terminal, &mut app, &state, config);

    // Restore terminal even if the loop failed.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, cursor::Show)?;
    terminal.show_cursor()?;
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    state: &Arc<Mutex<UiState>>,
    config: &TuiConfig,
) -> io::Result<()> {
    loop {
        if app.should_quit || ui::quit_requested(state) {
            ui::request_quit(state);
            return Ok(());
        }

        if let Some(ref log_buf) = config.log_buffer {
            log_buf.flush_into(state);
        }

        terminal.draw(|frame| render(frame, state, app))?;

        // 100ms poll keeps the "Enviando..." state and logs fresh.
        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            handle_key_event(key, app, state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tui_config_default() {
        let config = TuiConfig::default();
        assert!(config.log_buffer.is_none());
        assert!(!config.show_logs);
    }

    #[test]
    fn panicking_tui_thread_still_requests_quit() {
        let state = Arc::new(Mutex::new(UiState::default()));
        let guarded = state.clone();
        let result = std::thread::spawn(move || {
            let _quit = QuitOnDrop(guarded);
            panic!("render failed");
        })
        .join();

        assert!(result.is_err());
        assert!(ui::quit_requested(&state));
    }

    #[test]
    fn app_defaults() {
        let app = App::new();
        assert!(!app.should_quit);
        assert!(app.status_message.is_none());
        assert_eq!(app.cursor, 0);
        assert_eq!(app.log_scroll, 0);
        assert!(app.editing().is_none());
    }
}
