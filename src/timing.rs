use std::time::Instant;

use crate::sink::SqlLogSink;

/// Run `op` and report `"<label> took <n>ms"` at info level through the global sink.
///
/// The result is returned unchanged. If `op` panics, nothing is reported. The global sink is
/// looked up only once `op` has returned.
///
/// ```rust
/// use sql_statement_log::timing::log_time_spent;
///
/// let rows = log_time_spent("load users", || vec![1, 2, 3]);
/// assert_eq!(rows.len(), 3);
/// ```
pub fn log_time_spent<R>(label: &str, op: impl FnOnce() -> R) -> R {
    let start = Instant::now();
    let answer = op();
    report(SqlLogSink::global(), label, start);
    answer
}

/// [`log_time_spent`] through an explicit sink.
pub fn log_time_spent_with_sink<R>(sink: &SqlLogSink, label: &str, op: impl FnOnce() -> R) -> R {
    let start = Instant::now();
    let answer = op();
    report(sink, label, start);
    answer
}

/// Like [`log_time_spent`], but an `Err` skips the report.
///
/// # Errors
/// Returns whatever error `op` returned, unchanged.
pub fn try_log_time_spent<T, E>(label: &str, op: impl FnOnce() -> Result<T, E>) -> Result<T, E> {
    let start = Instant::now();
    let answer = op()?;
    report(SqlLogSink::global(), label, start);
    Ok(answer)
}

/// [`try_log_time_spent`] through an explicit sink.
///
/// # Errors
/// Returns whatever error `op` returned, unchanged.
pub fn try_log_time_spent_with_sink<T, E>(
    sink: &SqlLogSink,
    label: &str,
    op: impl FnOnce() -> Result<T, E>,
) -> Result<T, E> {
    let start = Instant::now();
    let answer = op()?;
    report(sink, label, start);
    Ok(answer)
}

fn report(sink: &SqlLogSink, label: &str, start: Instant) {
    sink.info(&format!("{label} took {}ms", start.elapsed().as_millis()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::capture_logs;
    use std::panic::{AssertUnwindSafe, catch_unwind};
    use tracing::Level;

    #[test]
    fn reports_label_and_returns_result() {
        let sink = SqlLogSink::new("timing");
        let (value, logs) = capture_logs(Level::INFO, || {
            log_time_spent_with_sink(&sink, "warm cache", || 41 + 1)
        });
        assert_eq!(value, 42);
        assert!(logs.contains("warm cache took "));
        assert!(logs.contains("ms"));
    }

    #[test]
    fn runs_operation_exactly_once() {
        let mut calls = 0;
        let (_, _) = capture_logs(Level::INFO, || {
            log_time_spent("count", || calls += 1);
        });
        assert_eq!(calls, 1);
    }

    #[test]
    fn error_skips_report_and_propagates() {
        let sink = SqlLogSink::new("timing");
        let (result, logs) = capture_logs(Level::INFO, || {
            try_log_time_spent_with_sink(&sink, "migrate", || Err::<(), _>("disk full"))
        });
        assert_eq!(result, Err("disk full"));
        assert!(!logs.contains("migrate"));
    }

    #[test]
    fn panic_skips_report() {
        let sink = SqlLogSink::new("timing");
        let (result, logs) = capture_logs(Level::INFO, || {
            catch_unwind(AssertUnwindSafe(|| {
                log_time_spent_with_sink(&sink, "explode", || -> u8 { panic!("boom") })
            }))
        });
        assert!(result.is_err());
        assert!(!logs.contains("explode took"));
    }
}
