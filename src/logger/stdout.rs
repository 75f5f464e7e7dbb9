use std::io::{self, Write};
use std::sync::Mutex;

use crate::error::SqlLogError;

use super::{RenderedStatement, SqlLogger};

/// Prints every statement to standard output, one line each.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdOutSqlLogger;

impl SqlLogger for StdOutSqlLogger {
    fn log_rendered(&self, statement: &RenderedStatement<'_>) -> Result<(), SqlLogError> {
        let sql = statement.sql()?;
        let mut out = io::stdout().lock();
        writeln!(out, "{sql}")?;
        Ok(())
    }
}

/// Writes every statement as one line to an arbitrary writer (a file, a buffer, a pipe).
#[derive(Debug)]
pub struct WriterSqlLogger<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSqlLogger<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Flush and return the underlying writer.
    ///
    /// # Errors
    /// Returns `SqlLogError::LoggerFailure` if a previous write panicked while holding the
    /// writer, or `SqlLogError::Io` if flushing fails.
    pub fn into_inner(self) -> Result<W, SqlLogError> {
        let mut writer = self
            .writer
            .into_inner()
            .map_err(|_| SqlLogError::LoggerFailure("writer mutex poisoned".into()))?;
        writer.flush()?;
        Ok(writer)
    }
}

impl<W: Write + Send> SqlLogger for WriterSqlLogger<W> {
    fn log_rendered(&self, statement: &RenderedStatement<'_>) -> Result<(), SqlLogError> {
        let sql = statement.sql()?;
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| SqlLogError::LoggerFailure("writer mutex poisoned".into()))?;
        writeln!(writer, "{sql}")?;
        Ok(())
    }
}
