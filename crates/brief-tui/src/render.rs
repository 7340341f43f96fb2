//! Rendering for the intake form TUI.

use std::sync::{Arc, Mutex};

use brief_rs::controller::{Lifecycle, SUBMIT_LABEL, SUBMITTING_LABEL};
use brief_rs::form::layout::{
    self, CONFIRMATION_BODY, CONFIRMATION_TITLE, DISTRIBUTION_PROMPT, FORM_INTRO, FORM_TITLE,
    PURPOSE_HINT, SECTIONS, Widget,
};
use brief_rs::form::{AnswerSet, ChoiceField, Platform, RequiredField, ScalarField};
use brief_rs::ui::{LogLevel, LogLine, UiState};
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::{App, InputMode, Row, form_rows};

const REQUIRED_BADGE: &str = "Requerido";
const EMAIL_FORMAT_LABEL: &str = "Un correo electrónico válido (ej: nombre@dominio.com)";

// ── Public Utilities ──────────────────────────────────────────────────

/// Map a log level to a ratatui [`Style`].
pub fn log_level_style(level: LogLevel) -> Style {
    match level {
        LogLevel::Trace => Style::default().fg(Color::DarkGray),
        LogLevel::Debug => Style::default().fg(Color::Cyan),
        LogLevel::Info => Style::default().fg(Color::Green),
        LogLevel::Warn => Style::default().fg(Color::Yellow),
        LogLevel::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    }
}

/// Human label for a missing answer.
pub fn required_label(field: RequiredField) -> &'static str {
    match field {
        RequiredField::Scalar(f) => f.label(),
        RequiredField::Choice(f) => f.prompt(),
        RequiredField::Distribution => DISTRIBUTION_PROMPT,
        RequiredField::EmailFormat => EMAIL_FORMAT_LABEL,
    }
}

// ── Root Render ───────────────────────────────────────────────────────

/// Everything the frame needs, cloned so the `UiState` lock is released
/// before any widget is built.
struct RenderSnapshot {
    answers: AnswerSet,
    lifecycle: Lifecycle,
    logs: Vec<LogLine>,
}

pub(crate) fn render(frame: &mut Frame, state: &Arc<Mutex<UiState>>, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(6),
            Constraint::Length(3),
        ])
        .split(area);

    let snap = {
        let s = state.lock().unwrap_or_else(|e| e.into_inner());
        RenderSnapshot {
            answers: s.form.answers().clone(),
            lifecycle: s.form.lifecycle().clone(),
            logs: if app.show_logs {
                s.logs.clone()
            } else {
                Vec::new()
            },
        }
    };

    render_header(frame, chunks[0], &snap);
    render_input(frame, chunks[2], app);

    let body = if app.show_logs {
        let mid = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(chunks[1]);
        render_logs(frame, mid[1], &snap.logs, app);
        mid[0]
    } else {
        chunks[1]
    };

    if snap.lifecycle == Lifecycle::Submitted {
        render_confirmation(frame, body);
    } else {
        render_form(frame, body, &snap, app);
    }
}

// ── Header ────────────────────────────────────────────────────────────

fn render_header(frame: &mut Frame, area: Rect, snap: &RenderSnapshot) {
    let (status, status_style) = match &snap.lifecycle {
        Lifecycle::Editing => ("Editando", Style::default().fg(Color::Green)),
        Lifecycle::Submitting => (SUBMITTING_LABEL, Style::default().fg(Color::Yellow)),
        Lifecycle::Submitted => ("Enviado", Style::default().fg(Color::Cyan)),
        Lifecycle::EditingWithError { .. } => ("Error", Style::default().fg(Color::Red)),
    };

    let text = vec![
        Line::from(Span::styled(FORM_INTRO, Style::default().fg(Color::Gray))),
        Line::from(vec![
            Span::styled("Estado: ", Style::default().fg(Color::DarkGray)),
            Span::styled(status, status_style.add_modifier(Modifier::BOLD)),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue))
        .title(format!(" {FORM_TITLE} "));

    let paragraph = Paragraph::new(text)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

// ── Form Pane ─────────────────────────────────────────────────────────

fn badge(required: bool) -> Span<'static> {
    if required {
        Span::styled(
            format!("  {REQUIRED_BADGE}"),
            Style::default().fg(Color::Magenta),
        )
    } else {
        Span::raw("")
    }
}

fn cursor_marker(focused: bool) -> Span<'static> {
    if focused {
        Span::styled("> ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    } else {
        Span::raw("  ")
    }
}

fn row_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

/// Lines for a text input. The label sits in the input while it is empty
/// and unfocused, and floats above it otherwise.
fn text_lines(
    field: ScalarField,
    answers: &AnswerSet,
    focused: bool,
    editing: Option<&str>,
) -> Vec<Line<'static>> {
    let value = editing.unwrap_or(answers.scalar(field));
    let label = layout::field_label(field);

    if !layout::label_floats(focused || editing.is_some(), value) {
        return vec![Line::from(vec![
            cursor_marker(focused),
            Span::styled(format!("[ {label} ]"), Style::default().fg(Color::DarkGray)),
        ])];
    }

    let mut lines = vec![Line::from(vec![
        cursor_marker(focused),
        Span::styled(label, Style::default().fg(Color::Cyan)),
    ])];
    let value_style = if editing.is_some() {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    let mut value_lines: Vec<String> = value.split('\n').map(str::to_string).collect();
    if editing.is_some()
        && let Some(last) = value_lines.last_mut()
    {
        last.push('\u{2588}');
    }
    for v in value_lines {
        lines.push(Line::from(vec![
            Span::raw("    "),
            Span::styled(v, value_style),
        ]));
    }
    if value.is_empty() && editing.is_none() {
        lines.push(Line::from(Span::styled(
            format!("    {}", field.placeholder()),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines
}

/// Build the form body. Returns the lines and the index of the line that
/// holds the focused row.
fn form_lines(answers: &AnswerSet, app: &App, submitting: bool) -> (Vec<Line<'static>>, usize) {
    let rows = form_rows(answers);
    let focused_row = rows.get(app.cursor).copied();
    let editing = app.editing();

    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut cursor_line = 0usize;
    let mut mark = |row: Row, lines: &Vec<Line<'static>>| -> bool {
        let focused = focused_row == Some(row);
        if focused {
            cursor_line = lines.len();
        }
        focused
    };

    for section in SECTIONS {
        lines.push(Line::from(vec![
            Span::styled(
                section.title,
                Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            ),
            badge(section.required_badge),
        ]));

        for widget in section.visible_widgets(answers) {
            match widget {
                Widget::Text(field) => {
                    let focused = mark(Row::Text(field), &lines);
                    let buffer = (editing == Some(field)).then_some(app.input_buffer.as_str());
                    lines.extend(text_lines(field, answers, focused, buffer));
                }
                Widget::Radio(field) => {
                    lines.push(Line::from(vec![
                        Span::raw("  "),
                        Span::styled(
                            layout::radio_prompt(field, answers),
                            Style::default().add_modifier(Modifier::BOLD),
                        ),
                        badge(layout::radio_required(field)),
                    ]));
                    if field == ChoiceField::Purpose {
                        lines.push(Line::from(Span::styled(
                            format!("  {PURPOSE_HINT}"),
                            Style::default().fg(Color::DarkGray),
                        )));
                    }
                    for choice in layout::radio_options(field, answers) {
                        let focused = mark(Row::Option(choice), &lines);
                        let dot = if layout::is_selected(answers, choice) {
                            "(\u{2022}) "
                        } else {
                            "( ) "
                        };
                        lines.push(Line::from(vec![
                            cursor_marker(focused),
                            Span::styled(format!("  {dot}{}", choice.label()), row_style(focused)),
                        ]));
                    }
                }
                Widget::Distribution => {
                    lines.push(Line::from(vec![
                        Span::raw("  "),
                        Span::styled(
                            DISTRIBUTION_PROMPT,
                            Style::default().add_modifier(Modifier::BOLD),
                        ),
                        badge(true),
                    ]));
                    for platform in Platform::ALL.iter().copied() {
                        let focused = mark(Row::Platform(platform), &lines);
                        let check = if layout::is_checked(answers, platform) {
                            "[x] "
                        } else {
                            "[ ] "
                        };
                        lines.push(Line::from(vec![
                            cursor_marker(focused),
                            Span::styled(
                                format!("  {check}{}", platform.label()),
                                row_style(focused),
                            ),
                        ]));
                    }
                }
            }
        }
        lines.push(Line::from(""));
    }

    let focused = mark(Row::Submit, &lines);
    let button_style = if submitting {
        Style::default().fg(Color::DarkGray)
    } else {
        row_style(focused).add_modifier(Modifier::REVERSED)
    };
    lines.push(Line::from(vec![
        cursor_marker(focused),
        Span::styled(format!(" {} ", submit_label(submitting)), button_style),
    ]));

    (lines, cursor_line)
}

fn submit_label(submitting: bool) -> &'static str {
    if submitting {
        SUBMITTING_LABEL
    } else {
        SUBMIT_LABEL
    }
}

fn render_form(frame: &mut Frame, area: Rect, snap: &RenderSnapshot, app: &App) {
    let submitting = snap.lifecycle == Lifecycle::Submitting;
    let (mut lines, cursor_line) = form_lines(&snap.answers, app, submitting);

    let mut offset = 0usize;
    if let Lifecycle::EditingWithError { notice } = &snap.lifecycle {
        lines.insert(
            0,
            Line::from(Span::styled(
                format!("{notice}  [Esc] cerrar"),
                Style::default().fg(Color::White).bg(Color::Red),
            )),
        );
        offset = 1;
    }

    // Keep the focused row roughly centered.
    let inner_height = area.height.saturating_sub(2) as usize;
    let scroll = (cursor_line + offset).saturating_sub(inner_height / 2);

    let border_color = if submitting { Color::DarkGray } else { Color::Cyan };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(" Formulario ");

    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((scroll as u16, 0));
    frame.render_widget(paragraph, area);
}

fn render_confirmation(frame: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            CONFIRMATION_TITLE,
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(CONFIRMATION_BODY),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

// ── Log Pane ──────────────────────────────────────────────────────────

fn render_logs(frame: &mut Frame, area: Rect, logs: &[LogLine], app: &App) {
    let inner_height = area.height.saturating_sub(2) as usize;

    let lines: Vec<Line> = logs
        .iter()
        .filter(|log| !matches!(log.level, LogLevel::Trace))
        .map(|log| {
            Line::from(vec![
                Span::styled(
                    format!("{} ", log.time),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("{} ", log.level.label()),
                    log_level_style(log.level),
                ),
                Span::raw(log.message.as_str()),
            ])
        })
        .collect();

    let scroll = lines
        .len()
        .saturating_sub(inner_height)
        .saturating_sub(app.log_scroll);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Log ");

    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((scroll as u16, 0))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

// ── Input Bar ─────────────────────────────────────────────────────────

fn render_input(frame: &mut Frame, area: Rect, app: &App) {
    let (title, style) = match app.input_mode {
        InputMode::Normal => {
            let hint = app.status_message.clone().unwrap_or_else(|| {
                "[q] salir  [Up/Down] mover  [Enter/Space] elegir  [,] logs".to_string()
            });
            (format!(" {hint} "), Style::default().fg(Color::DarkGray))
        }
        InputMode::EditText(field) => {
            let newline = if field.rows().is_some() {
                "  [Alt+Enter] nueva línea"
            } else {
                ""
            };
            (
                format!(" {}: [Enter] guardar  [Esc] cancelar{newline} ", field.label()),
                Style::default().fg(Color::Green),
            )
        }
    };

    let text = match app.input_mode {
        InputMode::Normal => String::new(),
        InputMode::EditText(_) => {
            let last = app.input_buffer.rsplit('\n').next().unwrap_or_default();
            format!("> {last}\u{2588}")
        }
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(title);
    frame.render_widget(Paragraph::new(text).block(block), area);
}

// ── Tests ─────────────────────────────────────────────────────────────
