//! Tracing layer that collects log events for display inside a frontend.
//!
//! Events land in a [`LogBuffer`] guarded by its own mutex. The frontend
//! moves them into [`UiState::logs`](super::UiState) with
//! [`LogBuffer::flush_into`], so emitting a log line never waits on the
//! render thread.

use std::sync::{Arc, Mutex};

use chrono::Local;
use tracing::Subscriber;
use tracing::field::{Field, Visit};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

use super::{LOG_TRIM_TO, LogLevel, LogLine, MAX_LOG_LINES, UiState};

/// Pending log lines not yet merged into `UiState`.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<LogLine>>>);

fn cap(lines: &mut Vec<LogLine>) {
    if lines.len() > MAX_LOG_LINES {
        let excess = lines.len() - LOG_TRIM_TO;
        lines.drain(..excess);
    }
}

impl LogBuffer {
    fn push(&self, line: LogLine) {
        let mut buf = self.0.lock().unwrap_or_else(|e| e.into_inner());
        buf.push(line);
        cap(&mut buf);
    }

    /// Take every pending line.
    pub fn drain(&self) -> Vec<LogLine> {
        let mut buf = self.0.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut *buf)
    }

    /// Move pending lines into `UiState::logs`. Locks the state only when
    /// there is something to move.
    pub fn flush_into(&self, state: &Arc<Mutex<UiState>>) {
        let lines = self.drain();
        if lines.is_empty() {
            return;
        }
        let mut s = state.lock().unwrap_or_else(|e| e.into_inner());
        s.logs.extend(lines);
        cap(&mut s.logs);
    }
}

impl From<&tracing::Level> for LogLevel {
    fn from(level: &tracing::Level) -> Self {
        match *level {
            tracing::Level::TRACE => Self::Trace,
            tracing::Level::DEBUG => Self::Debug,
            tracing::Level::INFO => Self::Info,
            tracing::Level::WARN => Self::Warn,
            tracing::Level::ERROR => Self::Error,
        }
    }
}

/// A [`Layer`] writing every event into a [`LogBuffer`].
pub struct UiTracingLayer {
    buffer: LogBuffer,
}

impl UiTracingLayer {
    /// Create the layer together with the buffer the frontend drains.
    pub fn new() -> (Self, LogBuffer) {
        let buffer = LogBuffer::default();
        (
            Self {
                buffer: buffer.clone(),
            },
            buffer,
        )
    }
}

impl<S: Subscriber + for<'a> LookupSpan<'a>> Layer<S> for UiTracingLayer {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        self.buffer.push(LogLine {
            time: Local::now().format("%H:%M:%S").to_string(),
            level: event.metadata().level().into(),
            message: visitor.into_message(),
        });
    }
}

/// Collects the `message` field and any structured fields of an event.
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: Vec<String>,
}

impl MessageVisitor {
    fn into_message(self) -> String {
        match (self.message.is_empty(), self.fields.is_empty()) {
            (_, true) => self.message,
            (true, false) => self.fields.join(" "),
            (false, false) => format!("{} {{{}}}", self.message, self.fields.join(", ")),
        }
    }
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let raw = format!("{value:?}");
        if field.name() == "message" {
            self.message = raw
                .strip_prefix('"')
                .and_then(|s| s.strip_suffix('"'))
                .map(str::to_string)
                .unwrap_or(raw);
        } else {
            self.fields.push(format!("{}={raw}", field.name()));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push(format!("{}={value}", field.name()));
        }
    }
}
