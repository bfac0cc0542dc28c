//! File appender implementation

use crate::core::{Appender, LogEvent, LogLevel, Logger, LoggerError, PatternFormatter, Result};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Pattern used when a file appender is built without an explicit one.
pub const DEFAULT_FILE_PATTERN: &str = "%d %t [%p] %c %f:%l: %m%n";

/// Appends rendered events to a file, creating it if absent.
///
/// The handle lives behind one mutex, so a write never interleaves with a
/// `reopen` across the close/open boundary.
pub struct FileAppender {
    level: LogLevel,
    formatter: PatternFormatter,
    path: PathBuf,
    writer: Mutex<Option<BufWriter<File>>>,
}

impl FileAppender {
    /// Open `path` for appending, creating it if absent.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = open_append(&path)?;
        Ok(Self {
            level: LogLevel::Debug,
            formatter: PatternFormatter::new(DEFAULT_FILE_PATTERN),
            path,
            writer: Mutex::new(Some(BufWriter::new(file))),
        })
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

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn formatter(&self) -> &PatternFormatter {
        &self.formatter
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Close any current handle and reopen the path for appending.
    ///
    /// Safe whether the appender is currently open or closed. Lets a caller
    /// recover from a log file that was rotated or deleted externally without
    /// restarting the process.
    pub fn reopen(&self) -> Result<()> {
        let mut writer = self.writer.lock();
        if let Some(mut old) = writer.take() {
            let _ = old.flush();
        }
        let file = open_append(&self.path)?;
        *writer = Some(BufWriter::new(file));
        Ok(())
    }
}

fn open_append(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| LoggerError::file_appender(path.display().to_string(), e.to_string()))
}

impl Appender for FileAppender {
    fn log(&self, logger: &Logger, level: LogLevel, event: &LogEvent) -> Result<()> {
        if level < self.level {
            return Ok(());
        }

        let text = self.formatter.render(logger.name(), level, event);
        let mut writer = self.writer.lock();
        let w = writer
            .as_mut()
            .ok_or_else(|| LoggerError::writer("file appender is closed"))?;
        w.write_all(text.as_bytes())?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        let mut writer = self.writer.lock();
        if let Some(w) = writer.as_mut() {
            w.flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileAppender {
    fn drop(&mut self) {
        // Ensure all buffered data reaches the disk
        let _ = self.flush();
    }
}
