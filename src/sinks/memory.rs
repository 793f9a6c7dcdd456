//! In-memory sink for tests and embedding

use crate::core::{LogLevel, MinilogError, Result, Sink};
use parking_lot::Mutex;
use std::sync::Arc;

/// Collects formatted lines in memory.
///
/// Useful in tests and embedded scenarios where output must be inspected
/// rather than persisted. Keep a [`MemoryLines`] handle (from
/// [`lines_handle`](MemorySink::lines_handle)) before moving the sink into
/// a registry.
///
/// # Example
///
/// ```
/// use minilog::prelude::*;
///
/// let sink = MemorySink::new();
/// let lines = sink.lines_handle();
/// let registry = Registry::builder().sink(sink).build();
///
/// registry.logger("app").info("captured");
/// assert_eq!(lines.snapshot().len(), 1);
/// ```
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
    closed: bool,
}

/// Shared read handle over a [`MemorySink`]'s collected lines
#[derive(Clone)]
pub struct MemoryLines(Arc<Mutex<Vec<String>>>);

impl MemoryLines {
    /// Copy of all lines collected so far, in write order
    pub fn snapshot(&self) -> Vec<String> {
        self.0.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.0.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.lock().is_empty()
    }
}

impl MemorySink {
    pub fn new() -> Self {
        Self {
            lines: Arc::new(Mutex::new(Vec::new())),
            closed: false,
        }
    }

    /// Handle for reading collected lines after the sink has been moved
    /// into a registry
    pub fn lines_handle(&self) -> MemoryLines {
        MemoryLines(Arc::clone(&self.lines))
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for MemorySink {
    fn write(&mut self, line: &str, _level: LogLevel) -> Result<()> {
        if self.closed {
            return Err(MinilogError::sink_closed(self.name()));
        }
        self.lines.lock().push(line.to_string());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.closed = true;
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
