//! Overflow policies for the async dispatch queue
//!
//! When the bounded queue between callers and the writer thread is full,
//! the policy decides what happens to new records. Every policy bounds the
//! caller's wait; none queues without limit.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Backpressure policy for a full dispatch queue.
///
/// Error-level records bypass the policy entirely and are force-written
/// synchronously, so the severest diagnostics survive overload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Drop the new record silently; metrics still count it.
    /// For high-throughput callers that tolerate some log loss.
    DropNewest,

    /// Block the caller until queue space is available.
    /// Preserves every record at the cost of caller latency.
    Block,

    /// Block up to the given duration, then drop with an alert
    BlockWithTimeout(Duration),

    /// Drop, but alert operators via stderr and the overflow callback.
    /// The recommended default.
    #[default]
    AlertAndDrop,
}

impl fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverflowPolicy::DropNewest => write!(f, "DropNewest"),
            OverflowPolicy::Block => write!(f, "Block"),
            OverflowPolicy::BlockWithTimeout(d) => write!(f, "BlockWithTimeout({:?})", d),
            OverflowPolicy::AlertAndDrop => write!(f, "AlertAndDrop"),
        }
    }
}

/// Callback invoked when records are dropped due to queue overflow.
/// The parameter is the total count of dropped records so far.
pub type OverflowCallback = Arc<dyn Fn(u64) + Send + Sync>;
