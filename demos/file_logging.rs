//! File logging example
//!
//! Demonstrates logging to console and file sinks simultaneously, plus
//! JSON-formatted output to a second registry.
//!
//! Run with: cargo run --example file_logging --features file

use minilog::prelude::*;

fn main() -> Result<()> {
    println!("=== minilog - File Logging Example ===\n");

    let mut registry = Registry::builder()
        .root_level(LogLevel::Debug)
        .sink(ConsoleSink::new())
        .sink(FileSink::new("application.log")?)
        .build();

    println!("1. Logging to both console and file:");

    let log = registry.logger("app");
    log.info("Application started");
    log.debug("Loading configuration...");
    log.info("Configuration loaded successfully");
    log.warn("Using default settings for some options");

    let db = registry.logger("app.db");
    db.info("Connecting to database...");
    minilog::info!(db, "Database connection established in {} ms", 42);
    db.error("Failed to load optional plugin");

    println!("\n2. Performing some operations:");

    for i in 1..=5 {
        minilog::info!(log, "Processing item {}/{}", i, 5);
        if i == 3 {
            log.warn("Item 3 took longer than expected");
        }
    }

    log.info("All operations completed");

    // Flush to ensure all lines reach disk
    registry.flush()?;

    println!("\n3. JSON output for machine processing:");

    let mut json_registry = Registry::builder()
        .output_format(OutputFormat::Json)
        .sink(FileSink::new("application.json.log")?)
        .build();
    let json_log = json_registry.logger("app.audit");
    minilog::info!(json_log, "User {} changed setting {}", "alice", "theme");
    json_registry.flush()?;

    json_registry.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);
    registry.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);

    println!("\n=== Example completed successfully! ===");
    println!("Check 'application.log' and 'application.json.log' for output");

    Ok(())
}
