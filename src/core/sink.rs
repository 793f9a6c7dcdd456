//! Sink trait for log output destinations

use super::{error::Result, level::LogLevel};

/// Destination for formatted log lines.
///
/// A sink owns its underlying resource (stream, file handle) for its whole
/// lifecycle: opened at configuration time, flushed and released by
/// `close()`. Writes observed by a single caller appear in the sink's
/// output in call order; the dispatch path serializes concurrent writers.
pub trait Sink: Send + Sync {
    /// Consume one formatted line. Must fail with
    /// [`MinilogError::SinkClosed`](super::error::MinilogError::SinkClosed)
    /// after `close()` rather than silently dropping.
    fn write(&mut self, line: &str, level: LogLevel) -> Result<()>;

    /// Flush pending output to the underlying resource
    fn flush(&mut self) -> Result<()>;

    /// Flush pending output, then release the underlying resource.
    /// Closing an already-closed sink is a no-op.
    fn close(&mut self) -> Result<()>;

    fn name(&self) -> &str;
}
