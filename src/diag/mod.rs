// Mon Feb 2 2026 - Alex

use std::fmt;
use std::sync::Mutex;

/// Severity of an operator notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARNING"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// Textual log stream. Generation results must not depend on whether a sink
/// is attached, only observability does.
pub trait LogSink: Send + Sync {
    fn log_line(&self, line: &str);
}

/// Blocking notification channel toward the operator.
pub trait Notifier: Send + Sync {
    fn notify(&self, severity: Severity, message: &str);
}

/// Default sink: forwards to the `log` facade.
pub struct FacadeSink;

impl LogSink for FacadeSink {
    fn log_line(&self, line: &str) {
        log::info!("{}", line);
    }
}

/// Notifier that forwards to the `log` facade instead of a UI.
pub struct FacadeNotifier;

impl Notifier for FacadeNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Info => log::info!("{}", message),
            Severity::Warning => log::warn!("{}", message),
            Severity::Error => log::error!("{}", message),
        }
    }
}

/// Drops everything. Used to prove output bytes do not depend on logging.
pub struct NullSink;

impl LogSink for NullSink {
    fn log_line(&self, _line: &str) {}
}

impl Notifier for NullSink {
    fn notify(&self, _severity: Severity, _message: &str) {}
}

/// Captures lines and notifications for assertions in tests.
#[derive(Default)]
pub struct BufferSink {
    lines: Mutex<Vec<String>>,
    notifications: Mutex<Vec<(Severity, String)>>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    pub fn notifications(&self) -> Vec<(Severity, String)> {
        self.notifications.lock().unwrap().clone()
    }
}

impl LogSink for BufferSink {
    fn log_line(&self, line: &str) {
        self.lines.lock().unwrap().push(line.to_string());
    }
}

impl Notifier for BufferSink {
    fn notify(&self, severity: Severity, message: &str) {
        self.notifications
            .lock()
            .unwrap()
            .push((severity, message.to_string()));
    }
}

/// Per-run diagnostic handles plus event counters.
pub struct Diagnostics {
    sink: Box<dyn LogSink>,
    notifier: Box<dyn Notifier>,
    pub skipped_declarations: usize,
    pub unknown_properties: usize,
    pub added_padding_events: usize,
    pub unresolved_callbacks: usize,
}

impl Diagnostics {
    pub fn new(sink: Box<dyn LogSink>, notifier: Box<dyn Notifier>) -> Self {
        Self {
            sink,
            notifier,
            skipped_declarations: 0,
            unknown_properties: 0,
            added_padding_events: 0,
            unresolved_callbacks: 0,
        }
    }

    pub fn disabled() -> Self {
        Self::new(Box::new(NullSink), Box::new(NullSink))
    }

    pub fn log_line(&self, line: &str) {
        self.sink.log_line(line);
    }

    pub fn notify(&self, severity: Severity, message: &str) {
        self.notifier.notify(severity, message);
    }

    pub fn skip_declaration(&mut self, reason: &str) {
        self.skipped_declarations += 1;
        self.sink.log_line(reason);
        self.notifier.notify(Severity::Warning, reason);
    }
}
