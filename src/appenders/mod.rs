//! Appender implementations

pub mod file;
pub mod stdout;

pub use file::{FileAppender, DEFAULT_FILE_PATTERN};
pub use stdout::{StdoutAppender, DEFAULT_STDOUT_PATTERN};

// Re-export the trait next to its implementations
pub use crate::core::Appender;
