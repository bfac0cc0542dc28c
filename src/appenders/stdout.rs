//! Stdout appender implementation

use crate::core::{Appender, LogEvent, LogLevel, Logger, PatternFormatter, Result};
use colored::Colorize;
use std::io::Write;

/// Pattern used when a stdout appender is built without an explicit one.
pub const DEFAULT_STDOUT_PATTERN: &str = "%d [%p] %c: %m%n";

/// Writes rendered events to the process's standard output.
///
/// Stdout is assumed always available; write failures are not modeled.
pub struct StdoutAppender {
    level: LogLevel,
    formatter: PatternFormatter,
    use_colors: bool,
}

impl StdoutAppender {
    pub fn new() -> Self {
        Self {
            level: LogLevel::Debug,
            formatter: PatternFormatter::new(DEFAULT_STDOUT_PATTERN),
            use_colors: true,
        }
    }

    /// Set the severity threshold for this sink
    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Replace the format pattern for this sink
    #[must_use]
    pub fn with_pattern(mut self, pattern: &str) -> Self {
        self.formatter = PatternFormatter::new(pattern);
        self
    }

    /// Enable or disable per-level line coloring
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn formatter(&self) -> &PatternFormatter {
        &self.formatter
    }
}

impl Default for StdoutAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for StdoutAppender {
    fn log(&self, logger: &Logger, level: LogLevel, event: &LogEvent) -> Result<()> {
        if level < self.level {
            return Ok(());
        }

        let text = self.formatter.render(logger.name(), level, event);
        let mut stdout = std::io::stdout().lock();
        if self.use_colors {
            write!(stdout, "{}", text.color(level.color_code()))?;
        } else {
            stdout.write_all(text.as_bytes())?;
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        std::io::stdout().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "stdout"
    }
}
