//! Severities command
//!
//! Usage: gdlog severities

use gdlog_core::Severity;

/// Print every severity, least important first
pub fn execute() -> Result<(), Box<dyn std::error::Error>> {
    for severity in Severity::ALL {
        println!("{}", severity);
    }
    Ok(())
}
