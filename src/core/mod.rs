//! Core facade types and traits

pub mod config;
pub mod error;
pub mod formatter;
pub mod level;
pub mod logger;
pub mod metrics;
pub mod overflow;
pub mod record;
pub mod registry;
pub mod sink;
pub mod timestamp;

pub use config::LevelConfig;
pub use error::{MinilogError, Result};
pub use formatter::{render_template, Formatter, OutputFormat};
pub use level::LogLevel;
pub use logger::Logger;
pub use metrics::LogMetrics;
pub use overflow::{OverflowCallback, OverflowPolicy};
pub use record::Record;
pub use registry::{Registry, RegistryBuilder, DEFAULT_SHUTDOWN_TIMEOUT, ROOT_LEVEL_ENV};
pub use sink::Sink;
pub use timestamp::TimestampFormat;
