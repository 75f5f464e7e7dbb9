//! Helpers for testing code that logs SQL: a capturing `tracing` subscriber and loggers that
//! record or fail on demand.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriter;

use crate::error::SqlLogError;
use crate::logger::{RenderedStatement, SqlLogger};

/// In-memory `tracing` writer.
#[derive(Clone, Default)]
pub struct CapturedLogs {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    #[must_use]
    pub fn contents(&self) -> String {
        let buf = self.buf.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

pub struct CapturedLogsGuard {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogsGuard;

    fn make_writer(&'a self) -> Self::Writer {
        CapturedLogsGuard {
            buf: Arc::clone(&self.buf),
        }
    }
}

impl Write for CapturedLogsGuard {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with a thread-local subscriber at `level` and return its result with everything
/// that was logged.
pub fn capture_logs<R>(level: Level, f: impl FnOnce() -> R) -> (R, String) {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .with_max_level(level)
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, logs.contents())
}

/// Records `"<name>: <expanded sql>"` for every statement into a shared journal.
pub struct RecordingLogger {
    name: String,
    journal: Arc<Mutex<Vec<String>>>,
}

impl RecordingLogger {
    #[must_use]
    pub fn journal() -> Arc<Mutex<Vec<String>>> {
        Arc::new(Mutex::new(Vec::new()))
    }

    #[must_use]
    pub fn named(name: impl Into<String>, journal: &Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            name: name.into(),
            journal: Arc::clone(journal),
        }
    }
}

impl SqlLogger for RecordingLogger {
    fn log_rendered(&self, statement: &RenderedStatement<'_>) -> Result<(), SqlLogError> {
        let line = format!("{}: {}", self.name, statement.sql()?);
        self.journal
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line);
        Ok(())
    }
}

/// Always fails with `SqlLogError::LoggerFailure`, without expanding the statement.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingLogger;

impl SqlLogger for FailingLogger {
    fn log_rendered(&self, _statement: &RenderedStatement<'_>) -> Result<(), SqlLogError> {
        Err(SqlLogError::LoggerFailure("sink unavailable".into()))
    }
}
