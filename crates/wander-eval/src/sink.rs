//! Destinations for the `log` builtin.

use std::cell::RefCell;

/// Receives rendered messages from the `log` builtin.
pub trait LogSink {
    fn log(&self, message: &str);
}

/// Forwards messages to `tracing` at info level under the `wander` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogSink;

impl LogSink for TracingLogSink {
    fn log(&self, message: &str) {
        tracing::info!(target: "wander", "{message}");
    }
}

/// Keeps every message in memory, in order.
#[derive(Debug, Default)]
pub struct CollectingLogSink {
    lines: RefCell<Vec<String>>,
}

impl CollectingLogSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages logged so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }
}

impl LogSink for CollectingLogSink {
    fn log(&self, message: &str) {
        self.lines.borrow_mut().push(message.to_string());
    }
}
