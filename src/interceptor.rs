//! Hooks fired around statement execution.
//!
//! A transaction layer calls [`execute_intercepted`] for every statement (or batch) it runs:
//! every interceptor sees each context before execution, then the whole batch together with
//! the executed-statement handle afterwards. A failed execution skips the after hooks.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use crate::context::StatementContext;
use crate::error::SqlLogError;

static NEXT_TRANSACTION_ID: AtomicU64 = AtomicU64::new(1);

/// What interceptors get to know about the transaction running a statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionInfo {
    id: u64,
    label: Option<String>,
}

impl TransactionInfo {
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self { id, label: None }
    }

    /// A transaction with a fresh process-unique id.
    #[must_use]
    pub fn next() -> Self {
        Self::new(NEXT_TRANSACTION_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

/// Handle describing a statement that finished executing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutedStatement {
    pub rows_affected: Option<usize>,
    pub elapsed: Duration,
}

/// Results an execution can report rows-affected from.
pub trait ExecutionOutcome {
    fn rows_affected(&self) -> Option<usize> {
        None
    }
}

impl ExecutionOutcome for () {}

impl ExecutionOutcome for usize {
    fn rows_affected(&self) -> Option<usize> {
        Some(*self)
    }
}

impl<T> ExecutionOutcome for Vec<T> {}

pub trait StatementInterceptor: Send + Sync {
    /// Called once per context before the statement runs.
    ///
    /// # Errors
    /// An error aborts the execution before it starts.
    fn before_execution(
        &self,
        _transaction: &TransactionInfo,
        _context: &StatementContext,
    ) -> Result<(), SqlLogError> {
        Ok(())
    }

    /// Called once after the statement ran, with every context it executed.
    ///
    /// # Errors
    /// An error is returned to the caller of the execution; the execution itself stands.
    fn after_execution(
        &self,
        transaction: &TransactionInfo,
        contexts: &[StatementContext],
        executed: &ExecutedStatement,
    ) -> Result<(), SqlLogError>;
}

/// Run `run` between the before and after hooks of every interceptor.
///
/// Before hooks fire in interceptor order, and for each interceptor in context order. After
/// hooks fire in interceptor order only when `run` succeeded. Errors from `run` are returned
/// untouched.
///
/// # Errors
/// Returns the first hook error, or the error from `run`.
pub fn execute_intercepted<T, F>(
    interceptors: &[Arc<dyn StatementInterceptor>],
    transaction: &TransactionInfo,
    contexts: &[StatementContext],
    run: F,
) -> Result<T, SqlLogError>
where
    T: ExecutionOutcome,
    F: FnOnce(&[StatementContext]) -> Result<T, SqlLogError>,
{
    for interceptor in interceptors {
        for context in contexts {
            interceptor.before_execution(transaction, context)?;
        }
    }

    let start = Instant::now();
    let outcome = run(contexts)?;
    let executed = ExecutedStatement {
        rows_affected: outcome.rows_affected(),
        elapsed: start.elapsed(),
    };

    for interceptor in interceptors {
        interceptor.after_execution(transaction, contexts, &executed)?;
    }
    Ok(outcome)
}
