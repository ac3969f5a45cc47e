//! Session Demonstration
//!
//! Shows a top-level logger owned by `main`, a nested logger isolating one
//! unit of work, context breadcrumbs, and the audit for unread messages.
//!
//! Run with `RUST_LOG=gdlog=trace` to see registry push/pop events.

use gdlog_core::logging_facility::{init, Profile};
use gdlog_core::{context_scope, diag_warning, message, warning, Logger, Severity};

fn load_cave(name: &str, rows: &[&str]) -> gdlog_core::Result<()> {
    let _cave = context_scope(&format!("Loading cave {}", name))?;
    for (y, row) in rows.iter().enumerate() {
        let _row = context_scope(&format!("row {}", y))?;
        for (x, ch) in row.chars().enumerate() {
            if !"#.o*".contains(ch) {
                diag_warning!("unknown element '{}' at column {}", ch, x);
            }
        }
    }
    message("loaded");
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init(Profile::Development);

    let session = Logger::new();
    println!("=== gdlog session demo ===\n");

    // A unit of work gets its own logger; the caller inspects and clears it.
    {
        let unit = Logger::new();
        load_cave("A", &["#.o", "#?#"])?;
        println!("cave A reported {} message(s):", unit.messages().len());
        for msg in unit.take_messages() {
            println!("  {}", msg);
        }
    }

    // Reports outside any nested logger land in the session logger.
    warning("settings file missing, using defaults");
    if !session.is_empty() {
        println!("\nsession:\n{}", session.messages_in_one_string());
        session.clear();
    }

    // This logger is dropped with an unread message, so it dumps to stderr.
    let forgotten = Logger::new();
    forgotten.log(Severity::Critical, "nobody checked this");
    drop(forgotten);

    Ok(())
}
