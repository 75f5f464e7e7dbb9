use tracing::Level;

use crate::error::SqlLogError;
use crate::sink::SqlLogSink;

use super::{RenderedStatement, SqlLogger};

/// Sends every statement through a [`SqlLogSink`], at debug level unless told otherwise.
///
/// The default logger uses whichever sink is global at the time it logs.
///
/// The statement is always expanded, even when the subscriber filters the level out. Guard
/// the logger's registration instead if that cost matters.
#[derive(Debug, Clone)]
pub struct TracingSqlLogger {
    sink: Option<SqlLogSink>,
    level: Level,
}

impl Default for TracingSqlLogger {
    fn default() -> Self {
        Self {
            sink: None,
            level: Level::DEBUG,
        }
    }
}

impl TracingSqlLogger {
    #[must_use]
    pub fn new(sink: SqlLogSink) -> Self {
        Self {
            sink: Some(sink),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

}

impl SqlLogger for TracingSqlLogger {
    fn log_rendered(&self, statement: &RenderedStatement<'_>) -> Result<(), SqlLogError> {
        let sql = statement.sql()?;
        let sink = self.sink.as_ref().unwrap_or_else(|| SqlLogSink::global());
        sink.emit(self.level, sql);
        Ok(())
    }
}
