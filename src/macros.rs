//! Logging macros with deferred argument evaluation
//!
//! The macros check the logger's effective level before touching the
//! arguments, so a disabled call never renders them. Arguments are
//! rendered with `Display` in call order and substituted into positional
//! `{}` placeholders by the formatter.
//!
//! # Examples
//!
//! ```
//! use minilog::prelude::*;
//! use minilog::info;
//!
//! let registry = Registry::builder().sink(MemorySink::new()).build();
//! let log = registry.logger("app.http");
//!
//! info!(log, "server started");
//!
//! let port = 8080;
//! info!(log, "listening on port {}", port);
//! ```

/// Log at an explicit level with a positional `{}` template.
///
/// Arguments are only rendered when the level is enabled for the logger.
///
/// # Examples
///
/// ```
/// # use minilog::prelude::*;
/// # let registry = Registry::builder().sink(MemorySink::new()).build();
/// # let log = registry.logger("app");
/// use minilog::log;
/// log!(log, LogLevel::Info, "simple message");
/// log!(log, LogLevel::Error, "request failed with status {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $template:expr $(, $arg:expr)* $(,)?) => {{
        let logger = &$logger;
        let level = $level;
        if logger.enabled(level) {
            logger.log(level, $template, ::std::vec![$(::std::format!("{}", $arg)),*]);
        }
    }};
}

/// Log a trace-level message.
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use minilog::prelude::*;
/// # let registry = Registry::builder().sink(MemorySink::new()).build();
/// # let log = registry.logger("app");
/// use minilog::info;
/// info!(log, "processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}
