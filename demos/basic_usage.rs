//! Basic logger usage example
//!
//! Demonstrates category loggers, level filtering, a file target and the
//! fatal drain.
//!
//! Run with: cargo run --example basic_usage

use rust_log_dispatch::prelude::*;
use rust_log_dispatch::{info, warn};
use std::io::Write;

fn main() -> Result<()> {
    println!("=== Rust Log Dispatch - Basic Usage Example ===\n");

    // Root logger writing to the console, with errors about logging on stderr
    let root = Logger::builder()
        .category("app")
        .target(ConsoleTarget::new())
        .build()?;

    println!("1. Logging at different levels:");
    root.debug("This is a debug message");
    root.info("This is an info message");
    root.warn("This is a warning message");
    root.error("This is an error message");

    println!("\n2. Category loggers share the engine:");
    let db = root.get_logger("db");
    let http = root.get_logger_with_formatter("http", formatter::json());
    info!(db, "connected to {}", "postgres://localhost");
    warn!(http, "slow request: {}ms", 1250);

    println!("\n3. Raising the threshold to Warn:");
    root.set_max_level(LogLevel::Warn);
    root.info("Info message (hidden)");
    root.warn("Warning message (visible)");
    root.set_max_level(LogLevel::Debug);

    println!("\n4. Adding a file target:");
    let path = std::env::temp_dir().join("rust_log_dispatch_demo.log");
    root.add_target(FileTarget::new(&path))?;
    root.info(format!("also written to {}", path.display()));

    println!("\n5. Writer adapter:");
    let mut out = root.writer(LogLevel::Info);
    writeln!(out, "captured from a writer").map_err(LoggerError::from)?;

    println!("\n6. Fatal waits for everything logged before it:");
    for i in 0..5 {
        root.infof(format_args!("queued {}", i));
    }
    root.fatal("fatal message; all earlier entries are already delivered");

    root.close();
    println!("\n=== Example completed successfully! ===");
    Ok(())
}
