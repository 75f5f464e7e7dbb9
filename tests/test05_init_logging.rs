// Installs the process-wide subscriber and sink, so everything runs in one test.

use std::sync::Arc;

use sql_statement_log::prelude::*;
use sql_statement_log::test_utils::{FailingLogger, capture_logs};
use sql_statement_log::{LogConfig, init_logging};
use tracing::Level;

#[test]
fn loggers_built_early_follow_the_configured_sink() -> Result<(), SqlLogError> {
    let composite = CompositeSqlLogger::with_policy(FailurePolicy::Isolate);
    composite.add_logger(Arc::new(FailingLogger));
    let tracing_logger = TracingSqlLogger::default().with_level(Level::INFO);
    assert!(SqlLogSink::installed().is_none());

    let config = LogConfig::from_json_str(r#"{ "sink_name": "orders", "ansi": false }"#)?;
    let sink = init_logging(&config)?;
    assert_eq!(sink.name(), "orders");
    assert_eq!(SqlLogSink::global().name(), "orders");

    let (result, logs) = capture_logs(Level::INFO, || {
        tracing_logger.log(&StatementContext::new("select 1"))?;
        composite.log(&StatementContext::new("select 2"))
    });
    assert!(matches!(result, Err(SqlLogError::LoggerFailure(_))));
    assert!(logs.contains("select 1"));
    assert!(logs.contains("sql logger #0 failed"));
    assert!(!logs.contains("sql-statement-log"));
    assert_eq!(logs.matches("orders").count(), 2);

    let err = init_logging(&config).unwrap_err();
    assert!(matches!(err, SqlLogError::ConfigError(ref msg) if msg.contains("subscriber")));
    Ok(())
}
