//! # minilog
//!
//! A minimal, hierarchical logging facade with pluggable sinks.
//!
//! ## Features
//!
//! - **Hierarchical loggers**: dotted names with nearest-ancestor level
//!   inheritance ("app.db.pool" inherits from "app.db", then "app", then
//!   the root)
//! - **Cheap disabled calls**: the enabled check is allocation-free, and
//!   the macros skip argument rendering entirely when a level is off
//! - **Pluggable sinks**: console, file, in-memory, or your own
//! - **Bounded async dispatch**: optional writer thread with explicit
//!   overflow policies instead of unbounded queuing
//! - **Never throws**: logging calls report failures on stderr, never into
//!   the caller's control flow
//!
//! ## Example
//!
//! ```
//! use minilog::prelude::*;
//!
//! let registry = Registry::builder()
//!     .root_level(LogLevel::Info)
//!     .level("app.db", LogLevel::Debug)
//!     .sink(MemorySink::new())
//!     .build();
//!
//! let log = registry.logger("app.db");
//! minilog::info!(log, "User {} logged in at {}", "alice", "10:00");
//! ```

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    #[cfg(feature = "console")]
    pub use crate::sinks::ConsoleSink;
    #[cfg(feature = "file")]
    pub use crate::sinks::FileSink;
    pub use crate::core::{
        Formatter, LevelConfig, LogLevel, LogMetrics, Logger, MinilogError, OutputFormat,
        OverflowCallback, OverflowPolicy, Record, Registry, RegistryBuilder, Result, Sink,
        TimestampFormat, DEFAULT_SHUTDOWN_TIMEOUT, ROOT_LEVEL_ENV,
    };
    pub use crate::sinks::{MemoryLines, MemorySink};
}

#[cfg(feature = "console")]
pub use sinks::ConsoleSink;
#[cfg(feature = "file")]
pub use sinks::FileSink;
pub use core::registry::{init, logger};
pub use core::{
    Formatter, LevelConfig, LogLevel, LogMetrics, Logger, MinilogError, OutputFormat,
    OverflowCallback, OverflowPolicy, Record, Registry, RegistryBuilder, Result, Sink,
    TimestampFormat, DEFAULT_SHUTDOWN_TIMEOUT, ROOT_LEVEL_ENV,
};
pub use sinks::{MemoryLines, MemorySink};
