//! Severity-Coded Log Channel.
//!
//! The engine reports events to its presentation collaborator through a small
//! keyed channel rather than a stream: each severity code maps to the latest
//! message of that class, except hazard traces which accumulate. The channel
//! is drained when read.

use std::collections::BTreeMap;

/// Severity code for success messages.
pub const LOG_SUCCESS: u16 = 200;

/// Severity code for informational and hazard-trace messages.
pub const LOG_TRACE: u16 = 300;

/// Severity code for warnings (e.g. the step-limit safety stop).
pub const LOG_WARNING: u16 = 400;

/// Severity code for fatal faults.
pub const LOG_FATAL: u16 = 404;

/// Keyed message channel drained on read.
#[derive(Clone, Debug, Default)]
pub struct LogChannel {
    messages: BTreeMap<u16, String>,
}

impl LogChannel {
    /// Creates an empty channel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message under the given severity code.
    ///
    /// Trace messages (code 300) are appended with newline separation so a
    /// cycle that produces several hazard events preserves all of them; any
    /// other code keeps only the most recent message.
    pub fn record(&mut self, code: u16, message: impl Into<String>) {
        let message = message.into();
        if code == LOG_TRACE {
            self.messages
                .entry(code)
                .and_modify(|existing| {
                    existing.push('\n');
                    existing.push_str(&message);
                })
                .or_insert(message);
        } else {
            self.messages.insert(code, message);
        }
    }

    /// Returns all pending messages and clears the channel.
    pub fn drain(&mut self) -> BTreeMap<u16, String> {
        std::mem::take(&mut self.messages)
    }

    /// Discards all pending messages.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// True when no messages are pending.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
