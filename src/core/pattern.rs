//! Pattern compilation and rendering
//!
//! A format pattern is a mini-language scanned left to right:
//!
//! - `%%` is a literal percent sign.
//! - A run of characters not starting with `%` is copied verbatim.
//! - `%<letter>` selects a built-in renderer: `%m` message, `%p` level name,
//!   `%r` elapsed milliseconds, `%c` logger name, `%t` thread id, `%F` fiber
//!   id, `%n` newline, `%d` datetime, `%f` source file, `%l` line number.
//! - `%<letter>{arg}` passes an argument to the renderer; only `%d` consumes
//!   it, as a strftime subformat (default `"%Y-%m-%d %H:%M:%S"`).
//!
//! Malformed input never aborts compilation: an unrecognized directive or an
//! unclosed `{` becomes an error marker that renders as a visible diagnostic,
//! and scanning resumes after the bad span. The pattern is compiled exactly
//! once, when the formatter is built; rendering never re-parses.

use super::event::LogEvent;
use super::level::LogLevel;
use std::fmt::Write;

/// Subformat applied by `%d` when no argument is given.
pub const DEFAULT_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Pattern used when a formatter is built without an explicit one.
pub const DEFAULT_PATTERN: &str = "%d [%p] %c: %m%n";

/// One compiled slice of output.
///
/// A closed set of variants rather than an open trait: the directive table is
/// fixed, and a closed enum gets exhaustiveness checking in `render`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatItem {
    /// `%m` — the event message
    Message,
    /// `%p` — the severity name
    LevelName,
    /// `%r` — milliseconds elapsed since process start
    ElapsedMs,
    /// `%c` — the logger name
    LoggerName,
    /// `%t` — the OS thread id
    ThreadId,
    /// `%F` — the lightweight-task/fiber id
    FiberId,
    /// `%d` — event timestamp, rendered with a strftime subformat
    DateTime(String),
    /// `%f` — source file of the call site
    SourceFile,
    /// `%l` — line number of the call site
    LineNumber,
    /// `%n` — a newline
    NewLine,
    /// Verbatim text between directives
    Literal(String),
    /// Diagnostic for a malformed span, carrying the offending text
    ErrorMarker(String),
}

impl FormatItem {
    /// Look up a directive name in the fixed table. `arg` is only consumed by
    /// `%d`; other directives ignore a supplied argument.
    fn from_directive(name: &str, arg: Option<&str>) -> Option<FormatItem> {
        let item = match name {
            "m" => FormatItem::Message,
            "p" => FormatItem::LevelName,
            "r" => FormatItem::ElapsedMs,
            "c" => FormatItem::LoggerName,
            "t" => FormatItem::ThreadId,
            "F" => FormatItem::FiberId,
            "n" => FormatItem::NewLine,
            "d" => {
                let subformat = arg.filter(|a| !a.is_empty()).unwrap_or(DEFAULT_DATETIME_FORMAT);
                FormatItem::DateTime(subformat.to_string())
            }
            "f" => FormatItem::SourceFile,
            "l" => FormatItem::LineNumber,
            _ => return None,
        };
        Some(item)
    }

    /// Append this item's text for one event.
    pub fn render(&self, out: &mut String, logger_name: &str, level: LogLevel, event: &LogEvent) {
        match self {
            FormatItem::Message => out.push_str(event.message()),
            FormatItem::LevelName => out.push_str(level.to_str()),
            FormatItem::ElapsedMs => {
                let _ = write!(out, "{}", event.elapsed_ms());
            }
            FormatItem::LoggerName => out.push_str(logger_name),
            FormatItem::ThreadId => out.push_str(event.thread_id()),
            FormatItem::FiberId => {
                let _ = write!(out, "{}", event.fiber_id());
            }
            FormatItem::DateTime(subformat) => {
                let _ = write!(out, "{}", event.timestamp().format(subformat));
            }
            FormatItem::SourceFile => out.push_str(event.file()),
            FormatItem::LineNumber => {
                let _ = write!(out, "{}", event.line());
            }
            FormatItem::NewLine => out.push('\n'),
            FormatItem::Literal(text) => out.push_str(text),
            FormatItem::ErrorMarker(offending) => {
                out.push_str("<<pattern_error ");
                out.push_str(offending);
                out.push_str(">>");
            }
        }
    }
}

/// Compile a pattern into its item sequence. Total: every input, however
/// malformed, yields some sequence.
fn compile(pattern: &str) -> Vec<FormatItem> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut items = Vec::new();
    let mut literal = String::new();
    let mut i = 0;

    while i < chars.len() {
        if chars[i] != '%' {
            literal.push(chars[i]);
            i += 1;
            continue;
        }
        if i + 1 < chars.len() && chars[i + 1] == '%' {
            literal.push('%');
            i += 2;
            continue;
        }

        // Directive scan: a run of letters, optionally followed by {arg}.
        let start = i;
        i += 1;
        let name_start = i;
        while i < chars.len() && chars[i].is_alphabetic() {
            i += 1;
        }
        let name: String = chars[name_start..i].iter().collect();

        let mut arg: Option<String> = None;
        let mut unclosed = false;
        if i < chars.len() && chars[i] == '{' {
            let arg_start = i + 1;
            let mut j = arg_start;
            loop {
                if j >= chars.len() || chars[j].is_whitespace() {
                    // Brace never closed before the scan terminated.
                    unclosed = true;
                    i = j;
                    break;
                }
                if chars[j] == '}' {
                    arg = Some(chars[arg_start..j].iter().collect());
                    i = j + 1;
                    break;
                }
                j += 1;
            }
        }

        if !literal.is_empty() {
            items.push(FormatItem::Literal(std::mem::take(&mut literal)));
        }

        if unclosed || name.is_empty() {
            let offending: String = chars[start..i].iter().collect();
            items.push(FormatItem::ErrorMarker(offending));
            continue;
        }

        match FormatItem::from_directive(&name, arg.as_deref()) {
            Some(item) => items.push(item),
            None => {
                let offending: String = chars[start..i].iter().collect();
                items.push(FormatItem::ErrorMarker(offending));
            }
        }
    }

    if !literal.is_empty() {
        items.push(FormatItem::Literal(literal));
    }
    items
}

/// A compiled pattern bound to its source string.
///
/// Construction pays the compilation cost once; the item sequence never
/// changes afterwards and `render` is a pure concatenation over it.
#[derive(Debug, Clone)]
pub struct PatternFormatter {
    pattern: String,
    items: Vec<FormatItem>,
}

impl PatternFormatter {
    pub fn new(pattern: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            items: compile(pattern),
        }
    }

    /// The original pattern string.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The compiled item sequence.
    pub fn items(&self) -> &[FormatItem] {
        &self.items
    }

    /// True if compilation captured any malformed span.
    pub fn has_errors(&self) -> bool {
        self.items
            .iter()
            .any(|item| matches!(item, FormatItem::ErrorMarker(_)))
    }

    /// Render one event by concatenating each item's output in compiled order.
    pub fn render(&self, logger_name: &str, level: LogLevel, event: &LogEvent) -> String {
        let mut out = String::with_capacity(self.pattern.len() + event.message().len() + 16);
        for item in &self.items {
            item.render(&mut out, logger_name, level, event);
        }
        out
    }
}

impl Default for PatternFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_PATTERN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(message: &str) -> LogEvent {
        LogEvent::new("pattern.rs", 42, message)
    }

    fn render(pattern: &str, message: &str) -> String {
        PatternFormatter::new(pattern).render("root", LogLevel::Info, &event(message))
    }

    #[test]
    fn test_basic_scenario() {
        assert_eq!(render("[%p] %c: %m%n", "hello"), "[INFO] root: hello\n");
    }

    #[test]
    fn test_percent_escape() {
        assert_eq!(render("100%% done", "x"), "100% done");
        assert_eq!(render("%%", "x"), "%");
        assert_eq!(render("%%%m%%", "mid"), "%mid%");
    }

    #[test]
    fn test_literal_only() {
        assert_eq!(render("plain text, no directives", "x"), "plain text, no directives");
        assert_eq!(render("", "x"), "");
    }

    #[test]
    fn test_source_location_directives() {
        assert_eq!(render("%f:%l", "x"), "pattern.rs:42");
    }

    #[test]
    fn test_elapsed_renders_milliseconds() {
        let ev = event("x");
        let out = PatternFormatter::new("%r").render("root", LogLevel::Info, &ev);
        assert_eq!(out, ev.elapsed_ms().to_string());
    }

    #[test]
    fn test_fiber_directive() {
        let ev = event("x").with_fiber_id(9);
        let out = PatternFormatter::new("%F").render("root", LogLevel::Info, &ev);
        assert_eq!(out, "9");
    }

    #[test]
    fn test_thread_directive() {
        let ev = event("x");
        let out = PatternFormatter::new("%t").render("root", LogLevel::Info, &ev);
        assert_eq!(out, ev.thread_id());
    }

    #[test]
    fn test_datetime_subformat() {
        let ev = event("x");
        let out = PatternFormatter::new("%d{%Y}").render("root", LogLevel::Info, &ev);
        assert_eq!(out, ev.timestamp().format("%Y").to_string());
    }

    #[test]
    fn test_datetime_default_subformat() {
        let ev = event("x");
        let expected = ev.timestamp().format(DEFAULT_DATETIME_FORMAT).to_string();
        assert_eq!(
            PatternFormatter::new("%d").render("root", LogLevel::Info, &ev),
            expected
        );
        // Empty braces fall back to the default as well.
        assert_eq!(
            PatternFormatter::new("%d{}").render("root", LogLevel::Info, &ev),
            expected
        );
    }

    #[test]
    fn test_unknown_directive_becomes_marker() {
        let out = render("a %q b", "x");
        assert_eq!(out, "a <<pattern_error %q>> b");
    }

    #[test]
    fn test_multi_letter_unknown_directive() {
        let out = render("%msg", "x");
        assert!(out.contains("<<pattern_error %msg>>"));
    }

    #[test]
    fn test_bare_percent_at_end() {
        let out = render("tail %", "x");
        assert_eq!(out, "tail <<pattern_error %>>");
    }

    #[test]
    fn test_percent_before_non_letter() {
        let out = render("%[oops]", "x");
        assert_eq!(out, "<<pattern_error %>>[oops]");
    }

    #[test]
    fn test_unclosed_brace_keeps_offending_text() {
        let formatter = PatternFormatter::new("%d{%Y-%m");
        assert!(formatter.has_errors());
        let out = formatter.render("root", LogLevel::Info, &event("x"));
        assert!(out.contains("%d{%Y-%m"), "marker must embed the bad span: {}", out);
    }

    #[test]
    fn test_unclosed_brace_resumes_after_whitespace() {
        let out = render("%d{%Y tail %m", "hi");
        assert!(out.contains("<<pattern_error %d{%Y>>"));
        assert!(out.ends_with(" tail hi"));
    }

    #[test]
    fn test_argument_ignored_by_non_datetime_directives() {
        assert_eq!(render("%p{ignored}", "x"), "INFO");
    }

    #[test]
    fn test_compilation_is_deterministic() {
        let pattern = "%d{%H:%M} [%p] %c %f:%l %t %r %F %m%n %q %%";
        let a = PatternFormatter::new(pattern);
        let b = PatternFormatter::new(pattern);
        assert_eq!(a.items(), b.items());
        let ev = event("same");
        assert_eq!(
            a.render("root", LogLevel::Warn, &ev),
            b.render("root", LogLevel::Warn, &ev)
        );
    }

    #[test]
    fn test_non_ascii_literals() {
        assert_eq!(render("héllo %m — done", "msg"), "héllo msg — done");
    }

    #[test]
    fn test_items_never_change_between_renders() {
        let formatter = PatternFormatter::new("[%p] %m");
        let before = formatter.items().to_vec();
        let _ = formatter.render("root", LogLevel::Debug, &event("a"));
        let _ = formatter.render("root", LogLevel::Fatal, &event("b"));
        assert_eq!(formatter.items(), &before[..]);
    }
}
