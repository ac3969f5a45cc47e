//! Fallback sinks for the drop-time audit
//!
//! A logger that is dropped while still holding unacknowledged messages
//! writes them to its fallback sink so they are not lost silently.

use std::cell::RefCell;
use std::fmt::Write as _;
use std::io::Write as _;
use std::rc::Rc;

use crate::message::ErrorMessage;
use gdlog_core_types::LoggerId;

/// Destination for audit dumps
pub trait FallbackSink {
    /// Write a complete, newline-terminated dump
    fn write_dump(&self, dump: &str);
}

/// Writes dumps to standard error
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrSink;

impl FallbackSink for StderrSink {
    fn write_dump(&self, dump: &str) {
        // Nowhere left to report a failing stderr.
        let _ = std::io::stderr().lock().write_all(dump.as_bytes());
    }
}

/// Collects dumps in memory
///
/// Clones share the same buffer, so a test can keep one clone and hand the
/// other to a logger.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    buffer: Rc<RefCell<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far
    pub fn contents(&self) -> String {
        self.buffer.borrow().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.borrow().is_empty()
    }
}

impl FallbackSink for MemorySink {
    fn write_dump(&self, dump: &str) {
        self.buffer.borrow_mut().push_str(dump);
    }
}

/// Render the audit dump for a logger
///
/// ```text
/// logger #<id> dropped with <n> unread message(s):
///   <severity>: <text>
/// ```
pub fn render_dump(id: LoggerId, messages: &[ErrorMessage]) -> String {
    let mut dump = format!(
        "logger {} dropped with {} unread message(s):\n",
        id,
        messages.len()
    );
    for msg in messages {
        let _ = writeln!(dump, "  {}", msg);
    }
    dump
}
