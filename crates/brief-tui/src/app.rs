//! TUI-local state (not shared with the submission driver).

use brief_rs::form::layout::{SECTIONS, Widget, radio_options};
use brief_rs::form::{AnswerSet, Choice, Platform, ScalarField};

/// Input mode for the TUI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum InputMode {
    /// Arrow keys move between rows, Enter/Space activates, `q` quits.
    Normal,
    /// Typing into a text field. Enter commits, Esc cancels.
    EditText(ScalarField),
}

/// One focusable line of the form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Row {
    Text(ScalarField),
    Option(Choice),
    Platform(Platform),
    Submit,
}

/// Focusable rows for the current answers, in form order. Hidden widgets
/// contribute no rows.
pub(crate) fn form_rows(answers: &AnswerSet) -> Vec<Row> {
    let mut rows = Vec::new();
    for section in SECTIONS {
        for widget in section.visible_widgets(answers) {
            match widget {
                Widget::Text(field) => rows.push(Row::Text(field)),
                Widget::Radio(field) => rows.extend(
                    radio_options(field, answers)
                        .into_iter()
                        .map(Row::Option),
                ),
                Widget::Distribution => {
                    rows.extend(Platform::ALL.iter().copied().map(Row::Platform))
                }
            }
        }
    }
    rows.push(Row::Submit);
    rows
}

pub(crate) struct App {
    pub(crate) input_mode: InputMode,
    pub(crate) input_buffer: String,
    /// Index into [`form_rows`].
    pub(crate) cursor: usize,
    /// Whether the logs pane is visible (toggled with `,`).
    pub(crate) show_logs: bool,
    /// Offset from the bottom of the log (0 = follow tail).
    pub(crate) log_scroll: usize,
    /// Hint shown in the bottom bar until the next action.
    pub(crate) status_message: Option<String>,
    pub(crate) should_quit: bool,
}

impl App {
    pub(crate) fn new() -> Self {
        Self {
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            cursor: 0,
            show_logs: false,
            log_scroll: 0,
            status_message: None,
            should_quit: false,
        }
    }

    /// Keep the cursor on an existing row after rows disappear.
    pub(crate) fn clamp_cursor(&mut self, row_count: usize) {
        self.cursor = self.cursor.min(row_count.saturating_sub(1));
    }

    pub(crate) fn editing(&self) -> Option<ScalarField> {
        match self.input_mode {
            InputMode::EditText(field) => Some(field),
            InputMode::Normal => None,
        }
    }
}
