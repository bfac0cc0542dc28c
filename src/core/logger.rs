//! Main logger implementation

use super::{appender::Appender, error::Result, event::LogEvent, level::LogLevel};
use parking_lot::RwLock;
use std::sync::Arc;

/// A named log channel owning a severity threshold and an ordered set of
/// appenders.
///
/// Dispatch is synchronous: `log` blocks until every appender has attempted
/// delivery. The appender list is guarded by one `RwLock` so a dispatch loop
/// (read) can never observe a half-mutated list (`add_appender`/`del_appender`
/// take the write side). Appenders are reference counted, so one removed
/// concurrently stays valid for any dispatch already holding it.
pub struct Logger {
    name: String,
    level: RwLock<LogLevel>,
    appenders: RwLock<Vec<Arc<dyn Appender>>>,
}

impl Logger {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: RwLock::new(LogLevel::Debug),
            appenders: RwLock::new(Vec::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> LogLevel {
        *self.level.read()
    }

    pub fn set_level(&self, level: LogLevel) {
        *self.level.write() = level;
    }

    /// Append a sink; dispatch order is insertion order. The same appender
    /// may be added more than once.
    pub fn add_appender(&self, appender: Arc<dyn Appender>) {
        self.appenders.write().push(appender);
    }

    /// Remove the first appender matching by identity (`Arc::ptr_eq`).
    /// A no-op if none matches.
    pub fn del_appender(&self, appender: &Arc<dyn Appender>) {
        let mut appenders = self.appenders.write();
        if let Some(pos) = appenders.iter().position(|a| Arc::ptr_eq(a, appender)) {
            appenders.remove(pos);
        }
    }

    pub fn appender_count(&self) -> usize {
        self.appenders.read().len()
    }

    /// Dispatch one event.
    ///
    /// No-op below the logger threshold; otherwise every appender is offered
    /// the event in insertion order. Each appender applies its own threshold.
    /// A sink's error or panic is reported to stderr and never prevents
    /// delivery to the remaining appenders.
    pub fn log(&self, level: LogLevel, event: &LogEvent) {
        if level < *self.level.read() {
            return;
        }

        let appenders = self.appenders.read();
        for appender in appenders.iter() {
            let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                appender.log(self, level, event)
            }));

            match outcome {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!("[LOGGER ERROR] Appender '{}' failed: {}", appender.name(), e);
                }
                Err(panic_info) => {
                    eprintln!(
                        "[LOGGER CRITICAL] Appender '{}' panicked: {}. \
                         Other appenders continue to function.",
                        appender.name(),
                        panic_message(&panic_info)
                    );
                }
            }
        }
    }

    pub fn flush(&self) -> Result<()> {
        let appenders = self.appenders.read();
        for appender in appenders.iter() {
            appender.flush()?;
        }
        Ok(())
    }

    #[inline]
    pub fn debug(&self, event: &LogEvent) {
        self.log(LogLevel::Debug, event);
    }

    #[inline]
    pub fn info(&self, event: &LogEvent) {
        self.log(LogLevel::Info, event);
    }

    #[inline]
    pub fn warn(&self, event: &LogEvent) {
        self.log(LogLevel::Warn, event);
    }

    #[inline]
    pub fn error(&self, event: &LogEvent) {
        self.log(LogLevel::Error, event);
    }

    #[inline]
    pub fn fatal(&self, event: &LogEvent) {
        self.log(LogLevel::Fatal, event);
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use sylog::prelude::*;
    ///
    /// let logger = Logger::builder("app")
    ///     .level(LogLevel::Info)
    ///     .appender(StdoutAppender::new())
    ///     .build();
    /// ```
    #[must_use]
    pub fn builder(name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder::new(name)
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new("root")
    }
}

fn panic_message(panic_info: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// Builder for constructing a Logger with a fluent API
pub struct LoggerBuilder {
    name: String,
    level: LogLevel,
    appenders: Vec<Arc<dyn Appender>>,
}

impl LoggerBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: LogLevel::Debug,
            appenders: Vec::new(),
        }
    }

    /// Set the severity threshold
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Add an appender
    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.appenders.push(Arc::new(appender));
        self
    }

    /// Add an already-shared appender
    #[must_use = "builder methods return a new value"]
    pub fn shared_appender(mut self, appender: Arc<dyn Appender>) -> Self {
        self.appenders.push(appender);
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        let logger = Logger::new(self.name);
        logger.set_level(self.level);
        for appender in self.appenders {
            logger.add_appender(appender);
        }
        logger
    }
}
