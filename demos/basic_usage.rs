//! Basic facade usage example
//!
//! Demonstrates hierarchical loggers, level inheritance, and templated
//! messages on a console sink.
//!
//! Run with: cargo run --example basic_usage

use minilog::prelude::*;

fn main() -> Result<()> {
    println!("=== minilog - Basic Usage Example ===\n");

    // Root at INFO, the database subtree at DEBUG
    let registry = Registry::builder()
        .root_level(LogLevel::Info)
        .level("app.db", LogLevel::Debug)
        .sink(ConsoleSink::new())
        .build();

    println!("1. Logging at different levels:");
    let log = registry.logger("app");
    log.trace("This trace message is hidden (root is INFO)");
    log.debug("This debug message is hidden (root is INFO)");
    log.info("This is an info message");
    log.warn("This is a warning message");
    log.error("This is an error message");

    println!("\n2. Hierarchical inheritance:");
    // "app.db.pool" has no explicit level, so it inherits DEBUG from "app.db"
    let db = registry.logger("app.db.pool");
    db.debug("Pool sized to 10 connections (visible, inherits app.db = DEBUG)");

    let http = registry.logger("app.http");
    http.debug("Route table built (hidden, inherits root = INFO)");

    println!("\n3. Templated messages:");
    minilog::info!(log, "User {} logged in at {}", "alice", "10:00");
    minilog::warn!(log, "Disk {} at {}% capacity", "/dev/sda1", 91);

    println!("\n4. Reloading levels at runtime:");
    registry.reload(LevelConfig::new().with_root(LogLevel::Trace))?;
    log.trace("Trace is visible after the reload");

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
