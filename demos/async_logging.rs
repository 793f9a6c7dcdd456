//! Async logging example
//!
//! Demonstrates the bounded background writer, overflow policies, and
//! multi-threaded producers.
//!
//! Run with: cargo run --example async_logging

use minilog::prelude::*;
use std::sync::Arc;
use std::thread;

fn main() -> Result<()> {
    println!("=== minilog - Async Logging Example ===\n");

    // Bounded queue of 1000 records drained by a background writer thread.
    // Block keeps every record at the cost of caller latency when full.
    let mut registry = Registry::builder()
        .sink(ConsoleSink::new())
        .async_mode(1000)
        .overflow_policy(OverflowPolicy::Block)
        .build();

    println!("1. High-throughput async logging:");

    let log = registry.logger("app");
    for i in 0..100 {
        minilog::info!(log, "Message #{}", i);
    }

    println!("   Queued 100 messages for the background writer");

    println!("\n2. Multi-threaded producers:");

    let mut handles = vec![];
    for thread_id in 0..5 {
        let log = registry.logger(format!("app.worker{}", thread_id));
        handles.push(thread::spawn(move || {
            for i in 0..20 {
                minilog::info!(log, "Thread {} - Message {}", thread_id, i);
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    println!("   5 threads logged 20 messages each");

    println!("\n3. Observing drops under AlertAndDrop:");

    let mut lossy = Registry::builder()
        .sink(ConsoleSink::new())
        .async_mode(8)
        .overflow_policy(OverflowPolicy::AlertAndDrop)
        .on_overflow(Arc::new(|dropped| {
            eprintln!("   overflow callback: {} records dropped so far", dropped);
        }))
        .build();
    let burst = lossy.logger("app.burst");
    for i in 0..500 {
        minilog::info!(burst, "burst {}", i);
    }
    println!(
        "   written={} dropped={}",
        lossy.metrics().written_count(),
        lossy.metrics().dropped_count()
    );
    lossy.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);

    // Drains the queue, flushes, and closes the sinks
    let clean = registry.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);
    println!("\n   Shutdown drained the queue cleanly: {}", clean);

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
