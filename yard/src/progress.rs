//! Progress event reporting for long-running backend commands.
//!
//! Provisioning output is surfaced line by line as named events. The
//! sink trait decouples the command runner from whatever presentation
//! layer is listening (a CLI printing to stdout, a test collecting
//! lines).

use std::sync::Mutex;

/// Event name under which backend output lines are emitted.
pub const TERMINAL_OUTPUT: &str = "TERMINAL_OUTPUT";

/// Receiver for progress events emitted during an operation.
///
/// Implementations must be safe to share across tasks: lines from a
/// backend's stdout and stderr are forwarded concurrently.
pub trait ProgressSink: Send + Sync {
    /// Delivers one event carrying one output line.
    fn emit(&self, event: &str, line: &str);
}

/// A sink that discards all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ProgressSink for NullSink {
    fn emit(&self, _event: &str, _line: &str) {}
}

/// A sink that records every event in memory, for tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<(String, String)>>,
}

impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all recorded `(event, line)` pairs in emission order.
    #[must_use]
    pub fn events(&self) -> Vec<(String, String)> {
        self.events.lock().expect("sink poisoned").clone()
    }

    /// Returns only the recorded lines, in emission order.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .map(|(_, line)| line)
            .collect()
    }
}

impl ProgressSink for MemorySink {
    fn emit(&self, event: &str, line: &str) {
        self.events
            .lock()
            .expect("sink poisoned")
            .push((event.to_string(), line.to_string()));
    }
}
