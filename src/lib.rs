//! Render executed SQL with its bound parameters and deliver it to pluggable loggers.
//!
//! The pieces, leaves first:
//! - [`ParameterType`] renders one bound value as a SQL literal; [`ColumnType`] is the default
//!   catalog.
//! - [`expand_args`] substitutes rendered values into the unquoted `?` placeholders of a
//!   template.
//! - [`SqlLogger`] implementations print, trace, or fan out the expanded text.
//! - [`CompositeSqlLogger`] doubles as a [`StatementInterceptor`], so a transaction layer can
//!   log every statement it runs through [`execute_intercepted`].
//! - [`timing::log_time_spent`] reports how long an arbitrary operation took.

pub mod column_type;
pub mod config;
pub mod context;
pub mod error;
pub mod expansion;
pub mod interceptor;
pub mod logger;
pub mod prelude;
pub mod sink;
pub mod timing;
pub mod types;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use column_type::{ColumnKind, ColumnType, ParameterType, SqlDialect};
pub use config::{LogConfig, LogLevel, init_logging};
pub use context::{StatementArg, StatementContext};
pub use error::SqlLogError;
pub use expansion::{expand_args, placeholder_count};
pub use interceptor::{
    ExecutedStatement, ExecutionOutcome, StatementInterceptor, TransactionInfo,
    execute_intercepted,
};
pub use logger::{
    CompositeSqlLogger, FailurePolicy, RenderedStatement, SqlLogger, StdOutSqlLogger,
    TracingSqlLogger, WriterSqlLogger,
};
pub use sink::SqlLogSink;
pub use types::RowValues;
