use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use crate::context::StatementContext;
use crate::error::SqlLogError;
use crate::interceptor::{ExecutedStatement, StatementInterceptor, TransactionInfo};
use crate::sink::SqlLogSink;

use super::{RenderedStatement, SqlLogger};

/// What a composite does when one of its loggers fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Stop at the first failing logger and return its error.
    #[default]
    FailFast,
    /// Warn through the sink, keep delivering, and return the first error at the end.
    Isolate,
}

/// Fans every statement out to a list of loggers, in registration order.
///
/// The composite is also a [`StatementInterceptor`]: registered with a transaction layer, it
/// logs each executed statement after it ran. Each statement is expanded at most once per call,
/// however many loggers ask for the text.
///
/// ```rust
/// use std::sync::Arc;
/// use sql_statement_log::prelude::*;
///
/// let composite = CompositeSqlLogger::new();
/// let stdout: Arc<dyn SqlLogger> = Arc::new(StdOutSqlLogger);
/// composite.add_logger(Arc::clone(&stdout));
/// composite.log(&StatementContext::new("select 1")).unwrap();
/// composite.remove_logger(&stdout);
/// assert!(composite.is_empty());
/// ```
pub struct CompositeSqlLogger {
    loggers: RwLock<Vec<Arc<dyn SqlLogger>>>,
    policy: FailurePolicy,
    // `None` reports through the global sink, resolved when a failure is reported.
    sink: Option<SqlLogSink>,
}

impl fmt::Debug for CompositeSqlLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeSqlLogger")
            .field("loggers", &self.len())
            .field("policy", &self.policy)
            .field("sink", &self.sink.as_ref().map(SqlLogSink::name))
            .finish()
    }
}

impl Default for CompositeSqlLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl CompositeSqlLogger {
    #[must_use]
    pub fn new() -> Self {
        Self::with_policy(FailurePolicy::default())
    }

    #[must_use]
    pub fn with_policy(policy: FailurePolicy) -> Self {
        Self {
            loggers: RwLock::new(Vec::new()),
            policy,
            sink: None,
        }
    }

    /// Sink used to report failures under [`FailurePolicy::Isolate`].
    #[must_use]
    pub fn with_sink(mut self, sink: SqlLogSink) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Append a logger. The same logger may be registered more than once.
    pub fn add_logger(&self, logger: Arc<dyn SqlLogger>) {
        self.loggers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(logger);
    }

    /// Remove the first registration of `logger` (compared by pointer). Removing a logger that
    /// is not registered does nothing.
    pub fn remove_logger(&self, logger: &Arc<dyn SqlLogger>) {
        let mut loggers = self.loggers.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(pos) = loggers.iter().position(|l| Arc::ptr_eq(l, logger)) {
            loggers.remove(pos);
        }
    }

    pub fn clear(&self) {
        self.loggers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.loggers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Loggers run without the lock held, so they may register or remove loggers themselves.
    fn snapshot(&self) -> Vec<Arc<dyn SqlLogger>> {
        self.loggers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn sink(&self) -> &SqlLogSink {
        self.sink.as_ref().unwrap_or_else(|| SqlLogSink::global())
    }
}

impl SqlLogger for CompositeSqlLogger {
    fn log_rendered(&self, statement: &RenderedStatement<'_>) -> Result<(), SqlLogError> {
        let mut first_error = None;
        for (idx, logger) in self.snapshot().iter().enumerate() {
            match (logger.log_rendered(statement), self.policy) {
                (Ok(()), _) => {}
                (Err(err), FailurePolicy::FailFast) => return Err(err),
                (Err(err), FailurePolicy::Isolate) => {
                    self.sink().warn(&format!(
                        "sql logger #{idx} failed for `{}`: {err}",
                        statement.context().sql()
                    ));
                    first_error.get_or_insert(err);
                }
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

impl StatementInterceptor for CompositeSqlLogger {
    fn after_execution(
        &self,
        _transaction: &TransactionInfo,
        contexts: &[StatementContext],
        _executed: &ExecutedStatement,
    ) -> Result<(), SqlLogError> {
        for context in contexts {
            self.log(context)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column_type::{ColumnKind, ColumnType};
    use crate::test_utils::{FailingLogger, RecordingLogger, capture_logs};
    use std::time::Duration;
    use tracing::Level;

    fn ctx(sql: &str) -> StatementContext {
        StatementContext::new(sql)
    }

    fn executed() -> ExecutedStatement {
        ExecutedStatement {
            rows_affected: None,
            elapsed: Duration::ZERO,
        }
    }

    #[test]
    fn loggers_fire_in_registration_order() {
        let journal = RecordingLogger::journal();
        let composite = CompositeSqlLogger::new();
        for name in ["l1", "l2", "l3"] {
            composite.add_logger(Arc::new(RecordingLogger::named(name, &journal)));
        }

        composite.log(&ctx("select 1")).unwrap();
        assert_eq!(
            *journal.lock().unwrap(),
            vec!["l1: select 1", "l2: select 1", "l3: select 1"]
        );
    }

    #[test]
    fn duplicates_fire_twice_and_removal_takes_one() {
        let journal = RecordingLogger::journal();
        let composite = CompositeSqlLogger::new();
        let logger: Arc<dyn SqlLogger> = Arc::new(RecordingLogger::named("dup", &journal));
        composite.add_logger(Arc::clone(&logger));
        composite.add_logger(Arc::clone(&logger));

        composite.log(&ctx("x")).unwrap();
        assert_eq!(journal.lock().unwrap().len(), 2);

        composite.remove_logger(&logger);
        assert_eq!(composite.len(), 1);
    }

    #[test]
    fn removing_absent_logger_is_a_no_op() {
        let journal = RecordingLogger::journal();
        let composite = CompositeSqlLogger::new();
        composite.add_logger(Arc::new(RecordingLogger::named("kept", &journal)));
        let stranger: Arc<dyn SqlLogger> = Arc::new(RecordingLogger::named("kept", &journal));

        composite.remove_logger(&stranger);
        assert_eq!(composite.len(), 1);
        composite.log(&ctx("select 2")).unwrap();
        assert_eq!(*journal.lock().unwrap(), vec!["kept: select 2"]);
    }

    #[test]
    fn fail_fast_stops_at_first_failure() {
        let journal = RecordingLogger::journal();
        let composite = CompositeSqlLogger::new();
        composite.add_logger(Arc::new(RecordingLogger::named("before", &journal)));
        composite.add_logger(Arc::new(FailingLogger));
        composite.add_logger(Arc::new(RecordingLogger::named("after", &journal)));

        let err = composite.log(&ctx("select 3")).unwrap_err();
        assert!(matches!(err, SqlLogError::LoggerFailure(_)));
        assert_eq!(*journal.lock().unwrap(), vec!["before: select 3"]);
    }

    #[test]
    fn isolate_delivers_to_everyone_and_still_reports() {
        let journal = RecordingLogger::journal();
        let composite = CompositeSqlLogger::with_policy(FailurePolicy::Isolate)
            .with_sink(SqlLogSink::new("isolate-test"));
        composite.add_logger(Arc::new(FailingLogger));
        composite.add_logger(Arc::new(RecordingLogger::named("after", &journal)));

        let (result, logs) = capture_logs(Level::WARN, || composite.log(&ctx("select 4")));
        assert!(matches!(result, Err(SqlLogError::LoggerFailure(_))));
        assert_eq!(*journal.lock().unwrap(), vec!["after: select 4"]);
        assert!(logs.contains("sql logger #0 failed"));
        assert!(logs.contains("isolate-test"));
    }

    #[test]
    fn after_execution_logs_each_context_in_order() {
        let journal = RecordingLogger::journal();
        let composite = CompositeSqlLogger::new();
        composite.add_logger(Arc::new(RecordingLogger::named("r", &journal)));
        let ty = ColumnType::postgres(ColumnKind::Integer);
        let contexts = vec![
            ctx("insert into t values (?)").with_arg(ty, 1_i64),
            ctx("insert into t values (?)").with_arg(ty, 2_i64),
            ctx("commit"),
        ];

        let tx = TransactionInfo::next();
        composite.before_execution(&tx, &contexts[0]).unwrap();
        assert!(journal.lock().unwrap().is_empty());

        composite.after_execution(&tx, &contexts, &executed()).unwrap();
        assert_eq!(
            *journal.lock().unwrap(),
            vec![
                "r: insert into t values (1)",
                "r: insert into t values (2)",
                "r: commit"
            ]
        );
    }

    #[test]
    fn after_execution_with_no_contexts_logs_nothing() {
        let journal = RecordingLogger::journal();
        let composite = CompositeSqlLogger::new();
        composite.add_logger(Arc::new(RecordingLogger::named("r", &journal)));
        composite
            .after_execution(&TransactionInfo::next(), &[], &executed())
            .unwrap();
        assert!(journal.lock().unwrap().is_empty());
    }

    #[test]
    fn empty_composite_never_expands() {
        let composite = CompositeSqlLogger::new();
        // Too few args would fail expansion, but nobody asks for the text.
        let context = ctx("select ?, ?").with_arg(ColumnType::postgres(ColumnKind::Integer), 1_i64);
        let rendered = RenderedStatement::new(&context);
        composite.log_rendered(&rendered).unwrap();
        assert!(!rendered.is_expanded());
    }

    #[test]
    fn composites_nest() {
        let journal = RecordingLogger::journal();
        let inner = Arc::new(CompositeSqlLogger::new());
        inner.add_logger(Arc::new(RecordingLogger::named("inner", &journal)));
        let outer = CompositeSqlLogger::new();
        outer.add_logger(Arc::new(RecordingLogger::named("outer", &journal)));
        outer.add_logger(inner);

        outer.log(&ctx("select 5")).unwrap();
        assert_eq!(
            *journal.lock().unwrap(),
            vec!["outer: select 5", "inner: select 5"]
        );
    }
}
