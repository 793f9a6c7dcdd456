//! Console sink implementation

use crate::core::{LogLevel, MinilogError, Result, Sink};
use colored::Colorize;
use std::io::Write;

/// Writes formatted lines to the terminal: Error to stderr, everything
/// else to stdout. Lines are colored by level unless disabled.
pub struct ConsoleSink {
    use_colors: bool,
    closed: bool,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self {
            use_colors: true,
            closed: false,
        }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            use_colors,
            closed: false,
        }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn write(&mut self, line: &str, level: LogLevel) -> Result<()> {
        if self.closed {
            return Err(MinilogError::sink_closed(self.name()));
        }

        let rendered = if self.use_colors {
            line.color(level.color_code()).to_string()
        } else {
            line.to_string()
        };

        match level {
            LogLevel::Error => eprintln!("{}", rendered),
            _ => println!("{}", rendered),
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        // Both streams, since writes go to both
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if !self.closed {
            self.flush()?;
            self.closed = true;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
