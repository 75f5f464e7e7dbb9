use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::Level;

use crate::error::SqlLogError;
use crate::sink::{DEFAULT_SINK_NAME, SqlLogSink};

/// Verbosity of the installed subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

/// Logging setup for a process that records SQL.
///
/// ```rust
/// use sql_statement_log::config::{LogConfig, LogLevel};
///
/// let cfg = LogConfig::from_json_str(r#"{ "level": "debug", "sink_name": "orders" }"#).unwrap();
/// assert_eq!(cfg.level, LogLevel::Debug);
/// assert!(cfg.ansi);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: LogLevel,
    pub with_target: bool,
    pub ansi: bool,
    pub sink_name: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            with_target: false,
            ansi: true,
            sink_name: DEFAULT_SINK_NAME.to_string(),
        }
    }
}

impl LogConfig {
    /// Parse a JSON configuration; missing fields take their defaults.
    ///
    /// # Errors
    /// Returns `SqlLogError::ConfigError` if the JSON is malformed or a field has the wrong type.
    pub fn from_json_str(json: &str) -> Result<Self, SqlLogError> {
        let cfg: LogConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// # Errors
    /// Returns `SqlLogError::ConfigError` if the sink name is blank.
    pub fn validate(&self) -> Result<(), SqlLogError> {
        if self.sink_name.trim().is_empty() {
            return Err(SqlLogError::ConfigError("sink_name must not be empty".into()));
        }
        Ok(())
    }

    #[must_use]
    pub fn sink(&self) -> SqlLogSink {
        SqlLogSink::new(self.sink_name.clone())
    }
}

/// Install a stdout `tracing` subscriber and the process-wide sink described by `config`.
///
/// The sink is checked before the subscriber is installed, and installed only after it, so a
/// failed call leaves the sink free. Calling again once a subscriber is in place fails. A sink
/// with the same name that was already installed is accepted.
///
/// # Errors
/// Returns `SqlLogError::ConfigError` if the configuration is invalid, a global subscriber is
/// already installed, or a different global sink is already in place.
pub fn init_logging(config: &LogConfig) -> Result<&'static SqlLogSink, SqlLogError> {
    config.validate()?;

    if let Some(current) = SqlLogSink::installed()
        && current.name() != config.sink_name
    {
        return Err(SqlLogError::ConfigError(format!(
            "log sink `{}` already installed; cannot install `{}`",
            current.name(),
            config.sink_name
        )));
    }

    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .with_target(config.with_target)
        .with_ansi(config.ansi)
        .with_max_level(Level::from(config.level))
        .try_init()
        .map_err(|err| SqlLogError::ConfigError(format!("subscriber already installed: {err}")))?;

    match config.sink().install() {
        Ok(sink) => Ok(sink),
        Err(_) if SqlLogSink::global().name() == config.sink_name => Ok(SqlLogSink::global()),
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let cfg = LogConfig::from_json_str("{}").unwrap();
        assert_eq!(cfg, LogConfig::default());
        assert_eq!(cfg.sink().name(), DEFAULT_SINK_NAME);
    }

    #[test]
    fn rejects_blank_sink_name() {
        let err = LogConfig::from_json_str(r#"{ "sink_name": "  " }"#).unwrap_err();
        assert!(matches!(err, SqlLogError::ConfigError(_)));
    }

    #[test]
    fn rejects_unknown_level() {
        let err = LogConfig::from_json_str(r#"{ "level": "loud" }"#).unwrap_err();
        assert!(matches!(
            err,
            SqlLogError::ConfigError(msg) if msg.contains("invalid logging configuration")
        ));
    }

    #[test]
    fn level_maps_to_tracing() {
        assert_eq!(Level::from(LogLevel::Warn), Level::WARN);
        assert_eq!(Level::from(LogLevel::Trace), Level::TRACE);
    }
}
