//! Line-oriented output sinks.

use std::io::Write;
use std::sync::Mutex;

/// Destination for user-visible text.
///
/// Implementations must be thread-safe; lines are written whole.
pub trait OutputSink: Send + Sync {
    /// Write one line to the normal stream.
    fn writeln(&self, text: &str);

    /// Write one line to the error stream.
    fn write_errorln(&self, text: &str);
}

/// Writes to the process stdout and stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleOutput;

impl ConsoleOutput {
    pub const fn new() -> Self {
        Self
    }
}

impl OutputSink for ConsoleOutput {
    fn writeln(&self, text: &str) {
        // A closed pipe is not worth failing a command over
        let _ = writeln!(std::io::stdout().lock(), "{text}");
    }

    fn write_errorln(&self, text: &str) {
        let _ = writeln!(std::io::stderr().lock(), "{text}");
    }
}

/// Captures output in memory.
///
/// Used by tests and by callers that want to post-process command output.
#[derive(Debug, Default)]
pub struct BufferedOutput {
    lines: Mutex<Vec<String>>,
    error_lines: Mutex<Vec<String>>,
}

impl BufferedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines written to the normal stream so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().map(|lines| lines.clone()).unwrap_or_default()
    }

    /// Lines written to the error stream so far.
    pub fn error_lines(&self) -> Vec<String> {
        self.error_lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }

    /// Normal-stream output joined with newlines.
    pub fn text(&self) -> String {
        self.lines().join("\n")
    }
}

impl OutputSink for BufferedOutput {
    fn writeln(&self, text: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(text.to_string());
        }
    }

    fn write_errorln(&self, text: &str) {
        if let Ok(mut lines) = self.error_lines.lock() {
            lines.push(text.to_string());
        }
    }
}
