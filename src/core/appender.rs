//! Appender trait for log output destinations

use super::{error::Result, event::LogEvent, level::LogLevel, logger::Logger};

/// A filtered output sink bound to a pattern formatter.
///
/// The logger-aware signature is the canonical one: the `%c` directive needs
/// the dispatching logger's name at render time. Implementations take `&self`
/// and guard any mutable sink state internally, since appenders are shared
/// across loggers and threads behind `Arc`.
pub trait Appender: Send + Sync {
    /// Render and deliver one event, applying this sink's own severity gate.
    fn log(&self, logger: &Logger, level: LogLevel, event: &LogEvent) -> Result<()>;

    /// Flush any buffered output to the sink.
    fn flush(&self) -> Result<()>;

    fn name(&self) -> &str;
}
