//! Core logger types and traits

pub mod appender;
pub mod error;
pub mod event;
pub mod level;
pub mod logger;
pub mod pattern;

pub use appender::Appender;
pub use error::{LoggerError, Result};
pub use event::LogEvent;
pub use level::LogLevel;
pub use logger::{Logger, LoggerBuilder};
pub use pattern::{FormatItem, PatternFormatter, DEFAULT_DATETIME_FORMAT, DEFAULT_PATTERN};
