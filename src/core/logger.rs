//! Logger handle: the named entry point applications call
//!
//! Handles are cheap clones over the registry's shared state. Emitting a
//! record walks: enabled check (drop or continue) → [`Record`]
//! construction → dispatch → formatter → sinks. A logging call never
//! returns an error into the caller's control flow; failures are reported
//! on stderr by the dispatch path.

use super::{level::LogLevel, record::Record, registry::RegistryInner};
use std::sync::Arc;

/// Named entry point for emitting log records.
///
/// Obtained from [`Registry::logger`](super::registry::Registry::logger)
/// or the global [`logger`](super::registry::logger) function. The name
/// places the logger in the dotted hierarchy that level inheritance walks.
///
/// # Example
///
/// ```
/// use minilog::prelude::*;
///
/// let registry = Registry::builder().sink(MemorySink::new()).build();
/// let log = registry.logger("app.db");
///
/// log.info("connected");
/// minilog::warn!(log, "slow query: {} ms", 1200);
/// ```
#[derive(Clone)]
pub struct Logger {
    name: Arc<str>,
    inner: Arc<RegistryInner>,
}

impl Logger {
    pub(crate) fn new(name: String, inner: Arc<RegistryInner>) -> Self {
        Self {
            name: Arc::from(name),
            inner,
        }
    }

    /// The dotted logger name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether a call at `level` would produce output. Constant-time over
    /// the configuration snapshot and allocation-free; this is the whole
    /// cost of a disabled logging call.
    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        self.inner.enabled(&self.name, level)
    }

    /// Emit a record with a positional `{}` template and pre-rendered
    /// arguments. No-ops when `level` is disabled for this logger.
    ///
    /// Prefer the [`log!`](crate::log)/[`info!`](crate::info)/… macros,
    /// which skip rendering the arguments entirely when the level is
    /// disabled.
    pub fn log(&self, level: LogLevel, template: impl Into<String>, args: Vec<String>) {
        if !self.enabled(level) {
            return;
        }
        let record = Record::new(level, self.name.to_string(), template.into(), args);
        self.inner.dispatch(record);
    }

    /// Emit a record whose template and arguments are produced by a
    /// closure, invoked only when `level` is enabled. For messages that
    /// are expensive to build.
    ///
    /// # Example
    ///
    /// ```
    /// use minilog::prelude::*;
    ///
    /// let registry = Registry::builder()
    ///     .root_level(LogLevel::Warn)
    ///     .sink(MemorySink::new())
    ///     .build();
    /// let log = registry.logger("app");
    ///
    /// // The closure never runs: Debug is disabled
    /// log.log_lazy(LogLevel::Debug, || {
    ///     ("expensive: {}".to_string(), vec![compute_report()])
    /// });
    /// # fn compute_report() -> String { unreachable!() }
    /// ```
    pub fn log_lazy<F>(&self, level: LogLevel, f: F)
    where
        F: FnOnce() -> (String, Vec<String>),
    {
        if !self.enabled(level) {
            return;
        }
        let (template, args) = f();
        self.log(level, template, args);
    }

    #[inline]
    pub fn trace(&self, message: impl Into<String>) {
        self.log(LogLevel::Trace, message, Vec::new());
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message, Vec::new());
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message, Vec::new());
    }

    #[inline]
    pub fn warn(&self, message: impl Into<String>) {
        self.log(LogLevel::Warn, message, Vec::new());
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message, Vec::new());
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger").field("name", &self.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::registry::Registry;
    use crate::sinks::MemorySink;

    #[test]
    fn test_handle_is_cheap_to_clone() {
        let registry = Registry::builder().build();
        let log = registry.logger("app.db");
        let clone = log.clone();
        assert_eq!(log.name(), clone.name());
    }

    #[test]
    fn test_disabled_level_is_a_noop() {
        let sink = MemorySink::new();
        let lines = sink.lines_handle();
        let registry = Registry::builder()
            .root_level(LogLevel::Info)
            .sink(sink)
            .build();
        let log = registry.logger("app.db");

        log.debug("not written");
        assert!(lines.snapshot().is_empty());

        log.info("written");
        assert_eq!(lines.snapshot().len(), 1);
    }

    #[test]
    fn test_log_substitutes_template() {
        let sink = MemorySink::new();
        let lines = sink.lines_handle();
        let registry = Registry::builder().sink(sink).build();
        let log = registry.logger("app");

        log.log(
            LogLevel::Info,
            "User {} logged in at {}",
            vec!["alice".to_string(), "10:00".to_string()],
        );

        let snapshot = lines.snapshot();
        assert!(snapshot[0].contains("User alice logged in at 10:00"));
    }

    #[test]
    fn test_log_lazy_skips_closure_when_disabled() {
        let registry = Registry::builder().root_level(LogLevel::Error).build();
        let log = registry.logger("app");

        let mut evaluated = false;
        log.log_lazy(LogLevel::Debug, || {
            evaluated = true;
            ("unused".to_string(), Vec::new())
        });
        assert!(!evaluated);

        log.log_lazy(LogLevel::Error, || {
            evaluated = true;
            ("used".to_string(), Vec::new())
        });
        assert!(evaluated);
    }
}
