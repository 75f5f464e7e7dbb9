//! Convenient imports for common functionality.

pub use crate::column_type::{ColumnKind, ColumnType, ParameterType, SqlDialect};
pub use crate::context::{StatementArg, StatementContext};
pub use crate::error::SqlLogError;
pub use crate::expansion::{expand_args, placeholder_count};
pub use crate::interceptor::{
    ExecutedStatement, StatementInterceptor, TransactionInfo, execute_intercepted,
};
pub use crate::logger::{
    CompositeSqlLogger, FailurePolicy, RenderedStatement, SqlLogger, StdOutSqlLogger,
    TracingSqlLogger, WriterSqlLogger,
};
pub use crate::sink::SqlLogSink;
pub use crate::timing::{log_time_spent, try_log_time_spent};
pub use crate::types::RowValues;

#[cfg(feature = "sqlite")]
pub use crate::sqlite::{LoggedTransaction, begin_transaction};
