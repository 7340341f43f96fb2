//! Key handling for the intake form TUI.

use std::sync::{Arc, Mutex};

use brief_rs::controller::{SUBMITTING_LABEL, SubmitBlocked};
use brief_rs::form::ScalarField;
use brief_rs::ui::{self, UiState};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, InputMode, Row, form_rows};
use crate::render::required_label;

const LOCKED_HINT: &str = "El formulario no acepta cambios mientras se envía.";

fn lock(state: &Arc<Mutex<UiState>>) -> std::sync::MutexGuard<'_, UiState> {
    state.lock().unwrap_or_else(|e| e.into_inner())
}

pub(crate) fn handle_key_event(key: KeyEvent, app: &mut App, state: &Arc<Mutex<UiState>>) {
    // Ctrl+C always quits.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_key(key, app, state),
        InputMode::EditText(field) => handle_edit_key(key, field, app, state),
    }
}

fn handle_normal_key(key: KeyEvent, app: &mut App, state: &Arc<Mutex<UiState>>) {
    let rows = {
        let s = lock(state);
        if s.form.is_submitted() {
            Vec::new()
        } else {
            form_rows(s.form.answers())
        }
    };
    app.clamp_cursor(rows.len());

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char(',') => app.show_logs = !app.show_logs,
        KeyCode::Up | KeyCode::Char('k') => app.cursor = app.cursor.saturating_sub(1),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => {
            if app.cursor + 1 < rows.len() {
                app.cursor += 1;
            }
        }
        KeyCode::Home => app.cursor = 0,
        KeyCode::End => app.cursor = rows.len().saturating_sub(1),
        KeyCode::PageUp => app.log_scroll = app.log_scroll.saturating_add(10),
        KeyCode::PageDown => app.log_scroll = app.log_scroll.saturating_sub(10),
        KeyCode::Esc => {
            lock(state).form.dismiss_notice();
            app.status_message = None;
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            if let Some(row) = rows.get(app.cursor).copied() {
                activate(row, app, state);
            }
        }
        _ => {}
    }
}

fn activate(row: Row, app: &mut App, state: &Arc<Mutex<UiState>>) {
    app.status_message = None;
    match row {
        Row::Text(field) => {
            let s = lock(state);
            if s.form.is_interactive() {
                app.input_buffer = s.form.answers().scalar(field).to_string();
                app.input_mode = InputMode::EditText(field);
            } else {
                app.status_message = Some(LOCKED_HINT.into());
            }
        }
        Row::Option(choice) => {
            if !ui::set_choice(state, choice) {
                app.status_message = Some(LOCKED_HINT.into());
            }
        }
        Row::Platform(platform) => {
            if !ui::toggle_distribution(state, platform) {
                app.status_message = Some(LOCKED_HINT.into());
            }
        }
        Row::Submit => match ui::request_submit(state) {
            Ok(()) => {}
            Err(SubmitBlocked::MissingRequired(missing)) => {
                let labels: Vec<&str> = missing.iter().map(|r| required_label(*r)).collect();
                app.status_message = Some(format!("Completa: {}", labels.join(", ")));
            }
            Err(SubmitBlocked::AlreadySubmitting) => {
                app.status_message = Some(SUBMITTING_LABEL.into());
            }
            Err(SubmitBlocked::AlreadySubmitted) => {}
        },
    }
}

fn handle_edit_key(
    key: KeyEvent,
    field: ScalarField,
    app: &mut App,
    state: &Arc<Mutex<UiState>>,
) {
    match key.code {
        KeyCode::Enter if key.modifiers.contains(KeyModifiers::ALT) && field.rows().is_some() => {
            app.input_buffer.push('\n');
        }
        KeyCode::Enter => {
            if !ui::set_scalar(state, field, &app.input_buffer) {
                app.status_message = Some(LOCKED_HINT.into());
            }
            app.input_buffer.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Esc => {
            app.input_buffer.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            app.input_buffer.pop();
        }
        KeyCode::Char(c) => {
            app.input_buffer.push(c);
        }
        _ => {}
    }
}
