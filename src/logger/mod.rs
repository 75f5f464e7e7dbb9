//! Statement loggers.
//!
//! A logger receives every executed statement. Expansion is lazy: a [`RenderedStatement`]
//! expands its context on the first call to [`RenderedStatement::sql`] and caches the text, so
//! a composite fanning out to several loggers expands each statement at most once, and not at
//! all if no logger asks for it.

use std::borrow::Cow;
use std::cell::OnceCell;

use crate::context::StatementContext;
use crate::error::SqlLogError;

mod composite;
mod stdout;
mod tracing_logger;

pub use composite::{CompositeSqlLogger, FailurePolicy};
pub use stdout::{StdOutSqlLogger, WriterSqlLogger};
pub use tracing_logger::TracingSqlLogger;

/// Receives executed statements.
///
/// Implementors provide [`SqlLogger::log_rendered`]; callers normally use [`SqlLogger::log`].
pub trait SqlLogger: Send + Sync {
    /// Log a statement whose expansion may already be cached.
    ///
    /// # Errors
    /// Returns an error if expansion fails or the logger's sink rejects the write.
    fn log_rendered(&self, statement: &RenderedStatement<'_>) -> Result<(), SqlLogError>;

    /// Log a single executed statement.
    ///
    /// # Errors
    /// Returns an error if expansion fails or the logger's sink rejects the write.
    fn log(&self, context: &StatementContext) -> Result<(), SqlLogError> {
        self.log_rendered(&RenderedStatement::new(context))
    }
}

/// A statement context paired with its lazily computed expansion.
#[derive(Debug)]
pub struct RenderedStatement<'a> {
    context: &'a StatementContext,
    expanded: OnceCell<Cow<'a, str>>,
}

impl<'a> RenderedStatement<'a> {
    #[must_use]
    pub fn new(context: &'a StatementContext) -> Self {
        Self {
            context,
            expanded: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn context(&self) -> &'a StatementContext {
        self.context
    }

    /// Expanded SQL, computed on first use.
    ///
    /// # Errors
    /// Returns `SqlLogError::MissingArgument` if the context has fewer arguments than
    /// placeholders. The failure is not cached; a later call retries.
    pub fn sql(&self) -> Result<&str, SqlLogError> {
        if let Some(sql) = self.expanded.get() {
            return Ok(&**sql);
        }
        let expanded = self.context.expand_args()?;
        Ok(&**self.expanded.get_or_init(|| expanded))
    }

    /// Whether some logger already asked for the text.
    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.expanded.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column_type::{ColumnKind, ColumnType};

    #[test]
    fn expansion_is_deferred_and_cached() {
        let ctx = StatementContext::new("select ?")
            .with_arg(ColumnType::postgres(ColumnKind::Integer), 1_i64);
        let rendered = RenderedStatement::new(&ctx);
        assert!(!rendered.is_expanded());
        assert_eq!(rendered.sql().unwrap(), "select 1");
        assert!(rendered.is_expanded());
        let first = rendered.sql().unwrap().as_ptr();
        assert_eq!(rendered.sql().unwrap().as_ptr(), first);
    }

    #[test]
    fn failed_expansion_is_not_cached() {
        let ctx = StatementContext::new("select ?, ?")
            .with_arg(ColumnType::postgres(ColumnKind::Integer), 1_i64);
        let rendered = RenderedStatement::new(&ctx);
        assert!(rendered.sql().is_err());
        assert!(!rendered.is_expanded());
    }
}
