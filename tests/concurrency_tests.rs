//! Concurrency tests: per-caller ordering, concurrent reload, async drain
//!
//! The facade promises that records from one logger handle appear in each
//! sink's output in call order, that enabled checks never observe a
//! partially applied configuration, and that the async queue drains on
//! shutdown.

use minilog::prelude::*;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Extract the per-thread sequence numbers from lines like
/// "... worker-3 - seq 17" and assert they are strictly increasing.
fn assert_per_thread_order(lines: &[String], threads: usize, per_thread: usize) {
    for t in 0..threads {
        let marker = format!("worker-{} - seq ", t);
        let seqs: Vec<usize> = lines
            .iter()
            .filter_map(|line| line.split(&marker).nth(1))
            .map(|rest| rest.trim().parse().expect("sequence number"))
            .collect();

        assert_eq!(seqs.len(), per_thread, "thread {} lost records", t);
        for (i, seq) in seqs.iter().enumerate() {
            assert_eq!(*seq, i, "thread {} records out of order", t);
        }
    }
}

#[test]
fn test_sync_mode_preserves_per_caller_order() {
    const THREADS: usize = 4;
    const PER_THREAD: usize = 200;

    let sink = MemorySink::new();
    let lines = sink.lines_handle();
    let registry = Arc::new(Registry::builder().sink(sink).build());

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let log = registry.logger(format!("worker-{}", t));
                for i in 0..PER_THREAD {
                    minilog::info!(log, "seq {}", i);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let snapshot = lines.snapshot();
    assert_eq!(snapshot.len(), THREADS * PER_THREAD);
    assert_per_thread_order(&snapshot, THREADS, PER_THREAD);
}

#[test]
fn test_async_mode_preserves_per_caller_order() {
    const THREADS: usize = 4;
    const PER_THREAD: usize = 200;

    let sink = MemorySink::new();
    let lines = sink.lines_handle();
    let mut registry = Registry::builder()
        .sink(sink)
        .async_mode(64)
        .overflow_policy(OverflowPolicy::Block)
        .build();

    thread::scope(|s| {
        for t in 0..THREADS {
            let log = registry.logger(format!("worker-{}", t));
            s.spawn(move || {
                for i in 0..PER_THREAD {
                    minilog::info!(log, "seq {}", i);
                }
            });
        }
    });

    assert!(registry.shutdown(Duration::from_secs(10)));

    let snapshot = lines.snapshot();
    assert_eq!(snapshot.len(), THREADS * PER_THREAD);
    assert_per_thread_order(&snapshot, THREADS, PER_THREAD);
}

#[test]
fn test_concurrent_reload_never_partial() {
    // Readers must see either the old snapshot (root Trace, app.db Error)
    // or the new one (root Error, app.db Trace) in full. A mixed view
    // would make both of these checks true at once for some level.
    let registry = Arc::new(
        Registry::builder()
            .root_level(LogLevel::Trace)
            .level("app.db", LogLevel::Error)
            .build(),
    );

    let old_view = |r: &Registry| {
        r.effective_level("other") == LogLevel::Trace
            && r.effective_level("app.db") == LogLevel::Error
    };
    let new_view = |r: &Registry| {
        r.effective_level("other") == LogLevel::Error
            && r.effective_level("app.db") == LogLevel::Trace
    };

    let reader = {
        let registry = Arc::clone(&registry);
        thread::spawn(move || {
            for _ in 0..2000 {
                assert!(old_view(&registry) || new_view(&registry));
            }
        })
    };

    let writer = {
        let registry = Arc::clone(&registry);
        thread::spawn(move || {
            for i in 0..200 {
                let config = if i % 2 == 0 {
                    LevelConfig::new()
                        .with_root(LogLevel::Error)
                        .with_logger("app.db", LogLevel::Trace)
                } else {
                    LevelConfig::new()
                        .with_root(LogLevel::Trace)
                        .with_logger("app.db", LogLevel::Error)
                };
                registry.reload(config).unwrap();
            }
        })
    };

    reader.join().unwrap();
    writer.join().unwrap();
}

#[test]
fn test_many_handles_one_registry() {
    let sink = MemorySink::new();
    let lines = sink.lines_handle();
    let registry = Arc::new(Registry::builder().sink(sink).build());

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                for i in 0..50 {
                    let log = registry.logger(format!("app.task{}.step{}", t, i));
                    log.info("done");
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(lines.snapshot().len(), 8 * 50);
}
