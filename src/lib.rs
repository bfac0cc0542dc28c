//! # Sylog
//!
//! A pattern-based logging library with leveled loggers, compiled format
//! patterns, and pluggable appenders.
//!
//! ## Features
//!
//! - **Compiled Patterns**: A `%`-directive mini-language, compiled once per
//!   formatter and reused for every render
//! - **Multiple Appenders**: Stdout and file sinks with per-sink severity
//!   thresholds and patterns
//! - **Thread Safe**: Loggers and appenders are safely shared across threads
//! - **Resilient**: Malformed patterns render inline diagnostics instead of
//!   failing; one broken sink never blocks the others
//!
//! ```
//! use sylog::prelude::*;
//!
//! let logger = Logger::builder("app")
//!     .level(LogLevel::Info)
//!     .appender(StdoutAppender::new().with_pattern("[%p] %c: %m%n"))
//!     .build();
//!
//! logger.info(&LogEvent::new(file!(), line!(), "started"));
//! ```

pub mod appenders;
pub mod config;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{FileAppender, StdoutAppender};
    pub use crate::config::{AppenderConfig, LoggerConfig};
    pub use crate::core::{
        Appender, FormatItem, LogEvent, LogLevel, Logger, LoggerBuilder, LoggerError,
        PatternFormatter, Result, DEFAULT_DATETIME_FORMAT, DEFAULT_PATTERN,
    };
}

pub use appenders::{FileAppender, StdoutAppender};
pub use config::{AppenderConfig, LoggerConfig};
pub use core::{
    Appender, FormatItem, LogEvent, LogLevel, Logger, LoggerBuilder, LoggerError,
    PatternFormatter, Result, DEFAULT_DATETIME_FORMAT, DEFAULT_PATTERN,
};
