//! Facade metrics for observability
//!
//! Counters for monitoring dispatch health: written and dropped records,
//! queue overflow events, and sink write failures.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics shared between logger handles, the dispatch path, and the
/// async writer thread.
///
/// # Example
///
/// ```
/// use minilog::LogMetrics;
///
/// let metrics = LogMetrics::new();
/// metrics.record_written();
/// metrics.record_dropped();
/// assert_eq!(metrics.written_count(), 1);
/// assert_eq!(metrics.dropped_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct LogMetrics {
    /// Records delivered to every configured sink
    written: AtomicU64,

    /// Records lost to overflow or sink failure
    dropped: AtomicU64,

    /// Times the dispatch queue was found full
    queue_full_events: AtomicU64,

    /// Times a caller blocked waiting for queue space
    block_events: AtomicU64,

    /// Individual sink write failures (one record can count several)
    write_errors: AtomicU64,
}

impl LogMetrics {
    pub const fn new() -> Self {
        Self {
            written: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
            queue_full_events: AtomicU64::new(0),
            block_events: AtomicU64::new(0),
            write_errors: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn written_count(&self) -> u64 {
        self.written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dropped_count(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn queue_full_events(&self) -> u64 {
        self.queue_full_events.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn block_events(&self) -> u64 {
        self.block_events.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn write_errors(&self) -> u64 {
        self.write_errors.load(Ordering::Relaxed)
    }

    /// Record a delivered record; returns the previous count
    #[inline]
    pub fn record_written(&self) -> u64 {
        self.written.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a dropped record; returns the previous count
    #[inline]
    pub fn record_dropped(&self) -> u64 {
        self.dropped.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_queue_full(&self) -> u64 {
        self.queue_full_events.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_block(&self) -> u64 {
        self.block_events.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_write_error(&self) -> u64 {
        self.write_errors.fetch_add(1, Ordering::Relaxed)
    }

    /// Dropped records as a percentage of all records seen (0.0 - 100.0).
    /// Returns 0.0 before any record has been dispatched.
    pub fn drop_rate(&self) -> f64 {
        let dropped = self.dropped_count() as f64;
        let total = self.written_count() as f64 + dropped;
        if total == 0.0 {
            0.0
        } else {
            (dropped / total) * 100.0
        }
    }

    /// Reset all counters to zero
    pub fn reset(&self) {
        self.written.store(0, Ordering::Relaxed);
        self.dropped.store(0, Ordering::Relaxed);
        self.queue_full_events.store(0, Ordering::Relaxed);
        self.block_events.store(0, Ordering::Relaxed);
        self.write_errors.store(0, Ordering::Relaxed);
    }
}
