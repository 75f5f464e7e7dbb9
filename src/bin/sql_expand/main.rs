mod args;

use std::fs;
use std::process::ExitCode;

use clap::Parser;
use sql_statement_log::timing::try_log_time_spent;
use sql_statement_log::{
    LogConfig, SqlLogError, SqlLogger, StdOutSqlLogger, TracingSqlLogger, init_logging,
    placeholder_count,
};
use tracing::Level;

use crate::args::Args;

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("sql-expand: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), SqlLogError> {
    let context = args.to_context();
    if args.strict {
        let expected = placeholder_count(context.sql());
        if expected != context.args().len() {
            return Err(SqlLogError::ParameterError(format!(
                "template has {expected} placeholders but {} arguments were given",
                context.args().len()
            )));
        }
    }

    if !args.trace {
        return StdOutSqlLogger.log(&context);
    }

    let config = match &args.log_config {
        Some(path) => LogConfig::from_json_str(&fs::read_to_string(path)?)?,
        None => LogConfig::default(),
    };
    let sink = init_logging(&config)?;
    let logger = TracingSqlLogger::new(sink.clone()).with_level(Level::INFO);
    try_log_time_spent("sql-expand", || logger.log(&context))
}
