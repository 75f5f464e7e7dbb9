use std::slice;
use std::sync::Arc;

use rusqlite::{Connection, params_from_iter};

use crate::context::StatementContext;
use crate::error::SqlLogError;
use crate::interceptor::{StatementInterceptor, TransactionInfo, execute_intercepted};
use crate::types::RowValues;

use super::params::Params;
use super::query::collect_rows;

/// `SQLite` transaction that runs every statement between its interceptors' hooks.
///
/// Dropping the handle without committing rolls the transaction back.
pub struct LoggedTransaction<'conn> {
    tx: rusqlite::Transaction<'conn>,
    info: TransactionInfo,
    interceptors: Vec<Arc<dyn StatementInterceptor>>,
}

/// Begin a transaction on `conn` that reports to `interceptors`.
///
/// # Errors
/// Returns `SqlLogError::SqliteError` if the transaction cannot be started.
pub fn begin_transaction<'conn>(
    conn: &'conn mut Connection,
    interceptors: &[Arc<dyn StatementInterceptor>],
) -> Result<LoggedTransaction<'conn>, SqlLogError> {
    let tx = conn.transaction()?;
    Ok(LoggedTransaction {
        tx,
        info: TransactionInfo::next(),
        interceptors: interceptors.to_vec(),
    })
}

impl LoggedTransaction<'_> {
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.info = self.info.with_label(label);
        self
    }

    #[must_use]
    pub fn info(&self) -> &TransactionInfo {
        &self.info
    }

    pub fn add_interceptor(&mut self, interceptor: Arc<dyn StatementInterceptor>) {
        self.interceptors.push(interceptor);
    }

    /// Execute one DML statement and return rows affected.
    ///
    /// # Errors
    /// Returns an error if a hook fails or `SQLite` rejects the statement.
    pub fn execute(&self, context: &StatementContext) -> Result<usize, SqlLogError> {
        execute_intercepted(
            &self.interceptors,
            &self.info,
            slice::from_ref(context),
            |_| self.run_dml(context),
        )
    }

    /// Execute several DML statements as one intercepted batch and return the total rows
    /// affected. The after hooks see every context at once.
    ///
    /// # Errors
    /// Returns an error if a hook fails or any statement is rejected; later statements are not
    /// run.
    pub fn execute_many(&self, contexts: &[StatementContext]) -> Result<usize, SqlLogError> {
        execute_intercepted(&self.interceptors, &self.info, contexts, |contexts| {
            contexts
                .iter()
                .try_fold(0_usize, |total, context| -> Result<usize, SqlLogError> {
                    Ok(total + self.run_dml(context)?)
                })
        })
    }

    /// Run a query and collect its rows.
    ///
    /// # Errors
    /// Returns an error if a hook fails or the query cannot be prepared or read.
    pub fn query(&self, context: &StatementContext) -> Result<Vec<Vec<RowValues>>, SqlLogError> {
        execute_intercepted(
            &self.interceptors,
            &self.info,
            slice::from_ref(context),
            |_| {
                let params = Params::from_context(context);
                let mut stmt = self.tx.prepare(context.sql())?;
                let column_count = stmt.column_count();
                let rows = stmt.query(params_from_iter(params.as_values()))?;
                collect_rows(rows, column_count)
            },
        )
    }

    /// Run parameterless SQL, possibly several statements separated by `;`.
    ///
    /// # Errors
    /// Returns an error if a hook fails or `SQLite` rejects the batch.
    pub fn execute_batch(&self, sql: &str) -> Result<(), SqlLogError> {
        let context = StatementContext::new(sql);
        execute_intercepted(
            &self.interceptors,
            &self.info,
            slice::from_ref(&context),
            |_| Ok(self.tx.execute_batch(sql)?),
        )
    }

    /// # Errors
    /// Returns `SqlLogError::SqliteError` if committing fails.
    pub fn commit(self) -> Result<(), SqlLogError> {
        self.tx.commit()?;
        Ok(())
    }

    /// # Errors
    /// Returns `SqlLogError::SqliteError` if rolling back fails.
    pub fn rollback(self) -> Result<(), SqlLogError> {
        self.tx.rollback()?;
        Ok(())
    }

    fn run_dml(&self, context: &StatementContext) -> Result<usize, SqlLogError> {
        let params = Params::from_context(context);
        Ok(self
            .tx
            .execute(context.sql(), params_from_iter(params.as_values()))?)
    }
}
