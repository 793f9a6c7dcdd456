//! File sink implementation

use crate::core::{LogLevel, MinilogError, Result, Sink};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Appends formatted lines to a file through a buffered writer.
///
/// The file is opened (and created if missing) at construction time and
/// held until `close()`, which flushes and releases the handle. Writes
/// after close fail with [`MinilogError::SinkClosed`].
pub struct FileSink {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        Ok(Self {
            path,
            writer: Some(BufWriter::new(file)),
        })
    }

    /// The path this sink appends to
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl Sink for FileSink {
    fn write(&mut self, line: &str, _level: LogLevel) -> Result<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| MinilogError::sink_closed("file"))?;

        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            // Flush before the handle is released
            writer.flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        // Buffered data must reach disk even without an explicit close
        let _ = self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_appends_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.log");

        let mut sink = FileSink::new(&path).unwrap();
        sink.write("first", LogLevel::Info).unwrap();
        sink.write("second", LogLevel::Warn).unwrap();
        sink.flush().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "first\nsecond\n");
    }

    #[test]
    fn test_close_flushes_and_releases() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.log");

        let mut sink = FileSink::new(&path).unwrap();
        sink.write("buffered", LogLevel::Info).unwrap();
        sink.close().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("buffered"));
    }

    #[test]
    fn test_write_after_close_fails() {
        let dir = TempDir::new().unwrap();
        let mut sink = FileSink::new(dir.path().join("app.log")).unwrap();
        sink.close().unwrap();

        let err = sink.write("late", LogLevel::Info).unwrap_err();
        assert!(matches!(err, MinilogError::SinkClosed { .. }));
    }

    #[test]
    fn test_reopening_appends() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.log");

        let mut sink = FileSink::new(&path).unwrap();
        sink.write("one", LogLevel::Info).unwrap();
        sink.close().unwrap();

        let mut sink = FileSink::new(&path).unwrap();
        sink.write("two", LogLevel::Info).unwrap();
        sink.close().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "one\ntwo\n");
    }
}
