//! Registry: configuration snapshot, sinks, and record dispatch
//!
//! The registry owns everything logger handles share: the current
//! [`LevelConfig`] snapshot, the [`Formatter`], the sink set, metrics, and
//! the optional async writer thread. Handles obtained from
//! [`Registry::logger`] are cheap Arc-backed clones and stay valid for the
//! registry's lifetime.

use super::{
    config::LevelConfig,
    error::{MinilogError, Result},
    formatter::{Formatter, OutputFormat},
    level::LogLevel,
    logger::Logger,
    metrics::LogMetrics,
    overflow::{OverflowCallback, OverflowPolicy},
    record::Record,
    sink::Sink,
    timestamp::TimestampFormat,
};
use crossbeam_channel::{bounded, Sender, TrySendError};
use parking_lot::RwLock;
use std::sync::{Arc, OnceLock};
use std::thread;
use std::time::Duration;

/// Default shutdown timeout when the registry is dropped without an
/// explicit `shutdown()` call.
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Environment variable overriding the root level at build time
pub const ROOT_LEVEL_ENV: &str = "MINILOG_LEVEL";

/// Shared state behind every logger handle.
///
/// The configuration is an immutable snapshot behind a read lock; reload
/// swaps the whole Arc, so the enabled check never observes a partially
/// updated configuration.
pub(crate) struct RegistryInner {
    config: RwLock<Arc<LevelConfig>>,
    formatter: Formatter,
    sinks: Arc<RwLock<Vec<Box<dyn Sink>>>>,
    sender: RwLock<Option<Sender<Record>>>,
    overflow_policy: OverflowPolicy,
    on_overflow: Option<OverflowCallback>,
    metrics: Arc<LogMetrics>,
}

impl RegistryInner {
    /// Whether a call at `level` from logger `name` should produce output.
    /// Hot path: one read lock, a prefix walk over borrowed slices, no
    /// allocation.
    #[inline]
    pub(crate) fn enabled(&self, name: &str, level: LogLevel) -> bool {
        self.config.read().is_enabled(name, level)
    }

    /// Forward a record to the writer thread, or write it inline in sync
    /// mode. Never returns an error to the logging caller.
    pub(crate) fn dispatch(&self, record: Record) {
        let sender_guard = self.sender.read();
        match sender_guard.as_ref() {
            Some(sender) => match sender.try_send(record) {
                Ok(()) => {}
                Err(TrySendError::Full(record)) => {
                    drop(sender_guard);
                    self.handle_overflow(record);
                }
                Err(TrySendError::Disconnected(_)) => {
                    // Shutting down, queue already drained
                    self.metrics.record_dropped();
                }
            },
            None => {
                drop(sender_guard);
                self.write_record(&record);
            }
        }
    }

    /// Apply the overflow policy to a record that found the queue full.
    /// Error-level records bypass the policy and are force-written.
    fn handle_overflow(&self, record: Record) {
        self.metrics.record_queue_full();

        if record.level >= LogLevel::Error {
            self.write_record(&record);
            return;
        }

        match &self.overflow_policy {
            OverflowPolicy::DropNewest => {
                self.metrics.record_dropped();
            }

            OverflowPolicy::Block => {
                self.metrics.record_block();
                if let Some(sender) = self.sender.read().as_ref() {
                    // send() blocks until space is available
                    let _ = sender.send(record);
                }
            }

            OverflowPolicy::BlockWithTimeout(timeout) => {
                self.metrics.record_block();
                if let Some(sender) = self.sender.read().as_ref() {
                    match sender.send_timeout(record, *timeout) {
                        Ok(()) => {}
                        Err(crossbeam_channel::SendTimeoutError::Timeout(_)) => {
                            self.alert_and_drop();
                        }
                        Err(crossbeam_channel::SendTimeoutError::Disconnected(_)) => {
                            // Shutting down
                        }
                    }
                }
            }

            OverflowPolicy::AlertAndDrop => {
                self.alert_and_drop();
            }
        }
    }

    /// Drop one record, alerting on the first drop and every 1000 after
    fn alert_and_drop(&self) {
        let dropped = self.metrics.record_dropped() + 1;

        if dropped == 1 || dropped % 1000 == 0 {
            eprintln!(
                "[MINILOG WARNING] dispatch queue full, {} records dropped. \
                 Consider a larger buffer or a blocking overflow policy.",
                dropped
            );
            if let Some(ref callback) = self.on_overflow {
                callback(dropped);
            }
        }
    }

    /// Format a record once and hand the line to every sink.
    /// Serializes concurrent writers via the sink-set write lock, which
    /// preserves per-caller call order in each sink's output.
    fn write_record(&self, record: &Record) {
        let line = self.formatter.format(record);
        let mut sinks = self.sinks.write();
        write_line(&mut sinks, &line, record.level, &self.metrics);
    }

    fn flush_sinks(&self) -> Result<()> {
        let mut sinks = self.sinks.write();
        for sink in sinks.iter_mut() {
            sink.flush()?;
        }
        Ok(())
    }

    fn close_sinks(&self) -> bool {
        let mut clean = true;
        let mut sinks = self.sinks.write();
        for sink in sinks.iter_mut() {
            if let Err(e) = sink.close() {
                eprintln!("[MINILOG ERROR] sink '{}' close failed: {}", sink.name(), e);
                clean = false;
            }
        }
        clean
    }
}

/// Write one formatted line to every sink, isolating failures so one bad
/// sink never stops the others. Failures go to the fallback channel
/// (stderr), never to the logging caller.
fn write_line(sinks: &mut [Box<dyn Sink>], line: &str, level: LogLevel, metrics: &LogMetrics) {
    let mut failed = false;

    for sink in sinks.iter_mut() {
        let result =
            std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| sink.write(line, level)));
        match result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                eprintln!("[MINILOG ERROR] sink '{}' write failed: {}", sink.name(), e);
                metrics.record_write_error();
                failed = true;
            }
            Err(panic_info) => {
                eprintln!(
                    "[MINILOG ERROR] sink '{}' panicked: {}. Remaining sinks continue.",
                    sink.name(),
                    panic_message(&panic_info)
                );
                metrics.record_write_error();
                failed = true;
            }
        }
    }

    if failed {
        metrics.record_dropped();
    } else {
        metrics.record_written();
    }
}

fn panic_message(panic_info: &Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Owner of the logging facade: sinks, configuration, and the optional
/// writer thread.
///
/// # Example
///
/// ```
/// use minilog::prelude::*;
///
/// let registry = Registry::builder()
///     .root_level(LogLevel::Info)
///     .level("app.db", LogLevel::Debug)
///     .sink(MemorySink::new())
///     .build();
///
/// let log = registry.logger("app.db");
/// minilog::info!(log, "connected in {} ms", 42);
/// ```
pub struct Registry {
    inner: Arc<RegistryInner>,
    worker: Option<thread::JoinHandle<()>>,
    shut_down: bool,
}

impl Registry {
    /// Create a builder with default values
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Obtain a handle for the given dotted logger name
    pub fn logger(&self, name: impl Into<String>) -> Logger {
        Logger::new(name.into(), Arc::clone(&self.inner))
    }

    /// Current effective level for a logger name
    pub fn effective_level(&self, name: &str) -> LogLevel {
        self.inner.config.read().effective_level(name)
    }

    /// Atomically replace the level configuration.
    ///
    /// Concurrent enabled checks see either the old or the new snapshot in
    /// full. An invalid configuration is rejected and the previous one
    /// stays active.
    pub fn reload(&self, config: LevelConfig) -> Result<()> {
        config.validate()?;
        *self.inner.config.write() = Arc::new(config);
        Ok(())
    }

    /// Reload the configuration from a JSON file. On any read, parse, or
    /// validation error the previous configuration remains active.
    pub fn reload_from_file(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let config = LevelConfig::from_json_file(path)?;
        self.reload(config)
    }

    /// Replace only the root level, keeping explicit per-logger levels
    pub fn set_root_level(&self, level: LogLevel) {
        let mut guard = self.inner.config.write();
        let updated = (**guard).clone().with_root(level);
        *guard = Arc::new(updated);
    }

    /// Flush every sink
    pub fn flush(&self) -> Result<()> {
        self.inner.flush_sinks()
    }

    /// Facade metrics for observability
    pub fn metrics(&self) -> &LogMetrics {
        &self.inner.metrics
    }

    /// Drain the dispatch queue, then flush and close every sink.
    ///
    /// Returns `true` if the writer thread finished within the timeout and
    /// all sinks flushed and closed cleanly. Records logged after shutdown
    /// fail at the sink with a closed-sink error, reported on stderr.
    pub fn shutdown(&mut self, timeout: Duration) -> bool {
        self.shut_down = true;

        // Dropping the only sender closes the channel; the writer drains
        // pending records and exits.
        drop(self.inner.sender.write().take());

        let mut clean = true;

        if let Some(handle) = self.worker.take() {
            let start = std::time::Instant::now();
            loop {
                if handle.is_finished() {
                    if let Err(e) = handle.join() {
                        eprintln!(
                            "[MINILOG ERROR] writer thread panicked during shutdown: {:?}",
                            e
                        );
                        clean = false;
                    }
                    break;
                }
                if start.elapsed() >= timeout {
                    eprintln!(
                        "[MINILOG WARNING] writer thread did not finish within {:?}. \
                         Some records may be lost.",
                        timeout
                    );
                    clean = false;
                    break;
                }
                thread::sleep(Duration::from_millis(10));
            }
        }

        if let Err(e) = self.inner.flush_sinks() {
            eprintln!("[MINILOG ERROR] flush during shutdown failed: {}", e);
            clean = false;
        }
        if !self.inner.close_sinks() {
            clean = false;
        }

        clean
    }
}

impl Drop for Registry {
    fn drop(&mut self) {
        if !self.shut_down {
            self.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);
        }

        let dropped = self.inner.metrics.dropped_count();
        if dropped > 0 {
            eprintln!(
                "[MINILOG WARNING] registry shut down with {} dropped records (drop rate: {:.2}%)",
                dropped,
                self.inner.metrics.drop_rate()
            );
        }
    }
}

/// Builder for [`Registry`] with a fluent API
///
/// # Example
///
/// ```
/// use minilog::prelude::*;
/// use std::time::Duration;
///
/// let registry = Registry::builder()
///     .root_level(LogLevel::Debug)
///     .sink(MemorySink::new())
///     .async_mode(1000)
///     .overflow_policy(OverflowPolicy::BlockWithTimeout(Duration::from_millis(50)))
///     .build();
/// ```
pub struct RegistryBuilder {
    config: LevelConfig,
    sinks: Vec<Box<dyn Sink>>,
    timestamp_format: TimestampFormat,
    output_format: OutputFormat,
    async_buffer: Option<usize>,
    overflow_policy: OverflowPolicy,
    on_overflow: Option<OverflowCallback>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self {
            config: LevelConfig::new(),
            sinks: Vec::new(),
            timestamp_format: TimestampFormat::default(),
            output_format: OutputFormat::default(),
            async_buffer: None,
            overflow_policy: OverflowPolicy::default(),
            on_overflow: None,
        }
    }

    /// Set the root level (inherited by loggers without an explicit one)
    #[must_use = "builder methods return a new value"]
    pub fn root_level(mut self, level: LogLevel) -> Self {
        self.config = self.config.with_root(level);
        self
    }

    /// Override the root level from the `MINILOG_LEVEL` environment
    /// variable. An unset variable leaves the current value; an invalid
    /// one is reported on stderr and ignored, keeping the previous value.
    #[must_use = "builder methods return a new value"]
    pub fn root_level_from_env(mut self) -> Self {
        if let Ok(value) = std::env::var(ROOT_LEVEL_ENV) {
            match value.parse::<LogLevel>() {
                Ok(level) => self.config = self.config.with_root(level),
                Err(e) => {
                    eprintln!("[MINILOG WARNING] ignoring {}: {}", ROOT_LEVEL_ENV, e);
                }
            }
        }
        self
    }

    /// Set an explicit level for a dotted logger name
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, name: impl Into<String>, level: LogLevel) -> Self {
        self.config = self.config.with_logger(name, level);
        self
    }

    /// Replace root and per-logger levels with a loaded configuration
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: LevelConfig) -> Self {
        self.config = config;
        self
    }

    /// Add a sink
    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    /// Set the timestamp format used by the formatter
    #[must_use = "builder methods return a new value"]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Set the output format (text or JSON)
    #[must_use = "builder methods return a new value"]
    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Enable async dispatch through a bounded queue of the given size.
    /// Without this, records are written synchronously on the caller's
    /// thread.
    #[must_use = "builder methods return a new value"]
    pub fn async_mode(mut self, buffer_size: usize) -> Self {
        self.async_buffer = Some(buffer_size);
        self
    }

    /// Set the overflow policy for async dispatch
    #[must_use = "builder methods return a new value"]
    pub fn overflow_policy(mut self, policy: OverflowPolicy) -> Self {
        self.overflow_policy = policy;
        self
    }

    /// Set a callback for overflow notifications
    #[must_use = "builder methods return a new value"]
    pub fn on_overflow(mut self, callback: OverflowCallback) -> Self {
        self.on_overflow = Some(callback);
        self
    }

    /// Build the registry, spawning the writer thread in async mode
    pub fn build(self) -> Registry {
        let formatter = Formatter::new()
            .with_timestamp_format(self.timestamp_format)
            .with_output_format(self.output_format);
        let sinks: Arc<RwLock<Vec<Box<dyn Sink>>>> = Arc::new(RwLock::new(self.sinks));
        let metrics = Arc::new(LogMetrics::new());

        let (sender, worker) = match self.async_buffer {
            Some(buffer_size) => {
                let (sender, receiver) = bounded::<Record>(buffer_size);
                let worker_formatter = formatter.clone();
                let worker_sinks = Arc::clone(&sinks);
                let worker_metrics = Arc::clone(&metrics);

                let handle = thread::Builder::new()
                    .name("minilog-writer".to_string())
                    .spawn(move || {
                        // Collect small batches before taking the sink lock
                        // to cut contention with synchronous force-writes.
                        const BATCH_SIZE: usize = 32;
                        let mut batch = Vec::with_capacity(BATCH_SIZE);

                        while let Ok(record) = receiver.recv() {
                            batch.push(record);
                            while batch.len() < BATCH_SIZE {
                                match receiver.try_recv() {
                                    Ok(record) => batch.push(record),
                                    Err(_) => break,
                                }
                            }

                            {
                                let mut sinks = worker_sinks.write();
                                for record in &batch {
                                    let line = worker_formatter.format(record);
                                    write_line(&mut sinks, &line, record.level, &worker_metrics);
                                }
                                for sink in sinks.iter_mut() {
                                    if let Err(e) = sink.flush() {
                                        eprintln!(
                                            "[MINILOG ERROR] sink '{}' flush failed: {}",
                                            sink.name(),
                                            e
                                        );
                                    }
                                }
                            }
                            batch.clear();
                        }
                        // recv() failed: channel closed and drained, exit
                    })
                    .expect("failed to spawn minilog writer thread");

                (Some(sender), Some(handle))
            }
            None => (None, None),
        };

        Registry {
            inner: Arc::new(RegistryInner {
                config: RwLock::new(Arc::new(self.config)),
                formatter,
                sinks,
                sender: RwLock::new(sender),
                overflow_policy: self.overflow_policy,
                on_overflow: self.on_overflow,
                metrics,
            }),
            worker,
            shut_down: false,
        }
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Global facade
// ---------------------------------------------------------------------------

static GLOBAL: OnceLock<Registry> = OnceLock::new();

/// Install a registry as the process-wide default used by
/// [`logger`]. Fails if one is already installed (including the implicit
/// default created by a prior [`logger`] call).
pub fn init(registry: Registry) -> Result<()> {
    GLOBAL
        .set(registry)
        .map_err(|_| MinilogError::AlreadyInitialized)
}

/// Obtain a handle from the process-wide registry, creating a default
/// console registry (root level Info, `MINILOG_LEVEL` honored) if
/// [`init`] was never called.
pub fn logger(name: impl Into<String>) -> Logger {
    GLOBAL.get_or_init(default_registry).logger(name)
}

fn default_registry() -> Registry {
    let builder = Registry::builder().root_level_from_env();
    #[cfg(feature = "console")]
    let builder = builder.sink(crate::sinks::ConsoleSink::new());
    builder.build()
}
