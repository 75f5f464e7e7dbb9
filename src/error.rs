use thiserror::Error;

#[derive(Debug, Error)]
pub enum SqlLogError {
    /// The template has more unquoted placeholders than the statement supplied values for.
    #[error("placeholder #{index} has no argument ({supplied} supplied)")]
    MissingArgument { index: usize, supplied: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[cfg(feature = "sqlite")]
    #[error(transparent)]
    SqliteError(#[from] rusqlite::Error),

    #[error("Logger failure: {0}")]
    LoggerFailure(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Parameter error: {0}")]
    ParameterError(String),

    #[error("SQL execution error: {0}")]
    ExecutionError(String),
}

impl From<serde_json::Error> for SqlLogError {
    fn from(err: serde_json::Error) -> Self {
        SqlLogError::ConfigError(format!("invalid logging configuration: {err}"))
    }
}
