//! Log event structure

use chrono::{DateTime, Utc};
use std::cell::RefCell;
use std::sync::OnceLock;
use std::time::Instant;

// Thread-local cache for the thread id string to avoid repeated allocations
thread_local! {
    static THREAD_ID_CACHE: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Get cached thread ID, computing and caching it on first access
fn current_thread_id() -> String {
    THREAD_ID_CACHE.with(|cache| {
        let mut cache = cache.borrow_mut();
        if cache.is_none() {
            *cache = Some(format!("{:?}", std::thread::current().id()));
        }
        cache
            .as_ref()
            .expect("thread_id cache initialized in previous line")
            .clone()
    })
}

static PROCESS_START: OnceLock<Instant> = OnceLock::new();

/// Milliseconds elapsed since the process-start anchor. The anchor is the
/// first call into this function, so it must be touched early (event
/// construction does).
pub fn elapsed_ms() -> u64 {
    PROCESS_START.get_or_init(Instant::now).elapsed().as_millis() as u64
}

/// An immutable snapshot of one log occurrence.
///
/// Constructed once at the call site and never mutated afterwards; every
/// field is behind a read accessor. The source file reference is borrowed
/// (`file!()` at the call site yields a `'static` string) while the message
/// text is owned by the event.
#[derive(Debug, Clone)]
pub struct LogEvent {
    file: &'static str,
    line: u32,
    elapsed_ms: u64,
    thread_id: String,
    fiber_id: u64,
    timestamp: DateTime<Utc>,
    message: String,
}

impl LogEvent {
    /// Sanitize log message to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// so a crafted message cannot forge additional log lines.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    /// Create an event, capturing the timestamp, elapsed time, and thread id
    /// at the moment of logging.
    pub fn new(file: &'static str, line: u32, message: impl Into<String>) -> Self {
        Self {
            file,
            line,
            elapsed_ms: elapsed_ms(),
            thread_id: current_thread_id(),
            fiber_id: 0,
            timestamp: Utc::now(),
            message: Self::sanitize_message(&message.into()),
        }
    }

    /// Attach a lightweight-task/fiber identifier supplied by the runtime.
    #[must_use]
    pub fn with_fiber_id(mut self, fiber_id: u64) -> Self {
        self.fiber_id = fiber_id;
        self
    }

    pub fn file(&self) -> &'static str {
        self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn thread_id(&self) -> &str {
        &self.thread_id
    }

    pub fn fiber_id(&self) -> u64 {
        self.fiber_id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_sanitization() {
        let event = LogEvent::new(file!(), line!(), "a\nb\rc\td");
        assert_eq!(event.message(), "a\\nb\\rc\\td");
    }

    #[test]
    fn test_fiber_id_default_and_override() {
        let event = LogEvent::new(file!(), line!(), "msg");
        assert_eq!(event.fiber_id(), 0);
        let event = event.with_fiber_id(7);
        assert_eq!(event.fiber_id(), 7);
    }

    #[test]
    fn test_thread_id_stable_within_thread() {
        let a = LogEvent::new(file!(), line!(), "one");
        let b = LogEvent::new(file!(), line!(), "two");
        assert_eq!(a.thread_id(), b.thread_id());
    }
}
