//! Logger configuration from a declarative source
//!
//! A `LoggerConfig` describes one logger and its sinks and can be parsed
//! from JSON:
//!
//! ```
//! use sylog::config::LoggerConfig;
//!
//! let config = LoggerConfig::from_json(r#"{
//!     "name": "app",
//!     "level": "Info",
//!     "pattern": "[%p] %c: %m%n",
//!     "appenders": [
//!         { "kind": "stdout" }
//!     ]
//! }"#).unwrap();
//! let logger = config.build().unwrap();
//! assert_eq!(logger.name(), "app");
//! ```

use crate::appenders::{FileAppender, StdoutAppender};
use crate::core::{LogLevel, Logger, Result};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;

/// Declarative description of one appender.
///
/// `level` and `pattern` are optional; an absent level keeps the sink's
/// default threshold, an absent pattern falls back to the logger-wide
/// pattern, then to the sink-specific default.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AppenderConfig {
    Stdout {
        #[serde(default)]
        level: Option<LogLevel>,
        #[serde(default)]
        pattern: Option<String>,
        #[serde(default)]
        colors: Option<bool>,
    },
    File {
        path: PathBuf,
        #[serde(default)]
        level: Option<LogLevel>,
        #[serde(default)]
        pattern: Option<String>,
    },
}

/// Declarative description of one logger.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggerConfig {
    pub name: String,
    #[serde(default)]
    pub level: LogLevel,
    /// Default pattern for appenders that do not carry their own.
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default)]
    pub appenders: Vec<AppenderConfig>,
}

impl LoggerConfig {
    pub fn from_json(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    /// Build a wired logger from this description.
    pub fn build(&self) -> Result<Logger> {
        let logger = Logger::new(&self.name);
        logger.set_level(self.level);

        for appender in &self.appenders {
            match appender {
                AppenderConfig::Stdout {
                    level,
                    pattern,
                    colors,
                } => {
                    let mut sink = StdoutAppender::new();
                    if let Some(level) = level {
                        sink = sink.with_level(*level);
                    }
                    if let Some(pattern) = pattern.as_deref().or(self.pattern.as_deref()) {
                        sink = sink.with_pattern(pattern);
                    }
                    if let Some(colors) = colors {
                        sink = sink.with_colors(*colors);
                    }
                    logger.add_appender(Arc::new(sink));
                }
                AppenderConfig::File { path, level, pattern } => {
                    let mut sink = FileAppender::new(path)?;
                    if let Some(level) = level {
                        sink = sink.with_level(*level);
                    }
                    if let Some(pattern) = pattern.as_deref().or(self.pattern.as_deref()) {
                        sink = sink.with_pattern(pattern);
                    }
                    logger.add_appender(Arc::new(sink));
                }
            }
        }

        Ok(logger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LoggerError;

    #[test]
    fn test_parse_minimal() {
        let config = LoggerConfig::from_json(r#"{ "name": "root" }"#).unwrap();
        assert_eq!(config.name, "root");
        assert_eq!(config.level, LogLevel::Debug);
        assert!(config.appenders.is_empty());
    }

    #[test]
    fn test_parse_full() {
        let config = LoggerConfig::from_json(
            r#"{
                "name": "app",
                "level": "Warn",
                "pattern": "%m%n",
                "appenders": [
                    { "kind": "stdout", "colors": false },
                    { "kind": "file", "path": "/tmp/app.log", "level": "Error", "pattern": "[%p] %m%n" }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(config.level, LogLevel::Warn);
        assert_eq!(config.appenders.len(), 2);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let result = LoggerConfig::from_json("{ not json");
        assert!(matches!(result, Err(LoggerError::JsonError(_))));
    }

    #[test]
    fn test_unknown_kind_is_an_error() {
        let result = LoggerConfig::from_json(
            r#"{ "name": "app", "appenders": [ { "kind": "syslog" } ] }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_build_wires_appenders() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("app.log");
        let config = LoggerConfig::from_json(&format!(
            r#"{{
                "name": "app",
                "level": "Info",
                "appenders": [
                    {{ "kind": "file", "path": {:?}, "pattern": "[%p] %c: %m%n" }}
                ]
            }}"#,
            path
        ))
        .unwrap();

        let logger = config.build().unwrap();
        assert_eq!(logger.name(), "app");
        assert_eq!(logger.level(), LogLevel::Info);
        assert_eq!(logger.appender_count(), 1);

        logger.info(&crate::LogEvent::new("config.rs", 1, "hello"));
        logger.flush().unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "[INFO] app: hello\n");
    }

    #[test]
    fn test_build_with_bad_file_path() {
        let config = LoggerConfig::from_json(
            r#"{
                "name": "app",
                "appenders": [
                    { "kind": "file", "path": "/nonexistent-dir-sylog/app.log" }
                ]
            }"#,
        )
        .unwrap();
        assert!(matches!(
            config.build(),
            Err(LoggerError::FileAppenderError { .. })
        ));
    }
}
