//! Process-wide named log sink.
//!
//! Every line this crate produces goes through `tracing` under the [`LOG_TARGET`] target, with
//! the sink's name attached as the `sink` field. A sink is a cheap handle that can be passed to
//! loggers and timing helpers explicitly; [`SqlLogSink::global`] is only the default.

use std::borrow::Cow;
use std::sync::OnceLock;

use tracing::Level;

use crate::error::SqlLogError;

/// Name of the default process-wide sink.
pub const DEFAULT_SINK_NAME: &str = "sql-statement-log";

/// `tracing` target for every event emitted through a sink.
pub const LOG_TARGET: &str = "sql_statement_log";

static GLOBAL_SINK: OnceLock<SqlLogSink> = OnceLock::new();

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlLogSink {
    name: Cow<'static, str>,
}

impl Default for SqlLogSink {
    fn default() -> Self {
        Self::new(DEFAULT_SINK_NAME)
    }
}

impl SqlLogSink {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self { name: name.into() }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The process-wide sink, created with [`DEFAULT_SINK_NAME`] on first use unless
    /// [`SqlLogSink::install`] ran before.
    pub fn global() -> &'static SqlLogSink {
        GLOBAL_SINK.get_or_init(SqlLogSink::default)
    }

    /// The process-wide sink if one is already fixed, without claiming the default.
    #[must_use]
    pub fn installed() -> Option<&'static SqlLogSink> {
        GLOBAL_SINK.get()
    }

    /// Make this sink the process-wide one. Only the first call (or first use of
    /// [`SqlLogSink::global`]) wins.
    ///
    /// # Errors
    /// Returns `SqlLogError::ConfigError` if the global sink is already set.
    pub fn install(self) -> Result<&'static SqlLogSink, SqlLogError> {
        let mut pending = Some(self);
        let installed = GLOBAL_SINK.get_or_init(|| pending.take().unwrap_or_default());
        match pending {
            None => Ok(installed),
            Some(rejected) => Err(SqlLogError::ConfigError(format!(
                "log sink `{}` already installed; cannot install `{}`",
                installed.name(),
                rejected.name()
            ))),
        }
    }

    /// Emit `message` at `level`.
    pub fn emit(&self, level: Level, message: &str) {
        let sink = self.name();
        match level {
            Level::ERROR => tracing::error!(target: LOG_TARGET, sink, "{message}"),
            Level::WARN => tracing::warn!(target: LOG_TARGET, sink, "{message}"),
            Level::INFO => tracing::info!(target: LOG_TARGET, sink, "{message}"),
            Level::DEBUG => tracing::debug!(target: LOG_TARGET, sink, "{message}"),
            _ => tracing::trace!(target: LOG_TARGET, sink, "{message}"),
        }
    }

    pub fn info(&self, message: &str) {
        self.emit(Level::INFO, message);
    }

    pub fn warn(&self, message: &str) {
        self.emit(Level::WARN, message);
    }
}
