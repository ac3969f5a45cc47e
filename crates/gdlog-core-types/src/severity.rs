//! Severity classification for collected diagnostics
//!
//! Severity is metadata only. It orders messages for display and filtering
//! but never changes what the collector does with them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Importance of a diagnostic message
///
/// The derived ordering is total: `Debug < Info < Message < Warning < Critical < Error`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Debug,
    Info,
    Message,
    Warning,
    Critical,
    Error,
}

impl Severity {
    /// All severities in ascending order
    pub const ALL: [Severity; 6] = [
        Severity::Debug,
        Severity::Info,
        Severity::Message,
        Severity::Warning,
        Severity::Critical,
        Severity::Error,
    ];

    /// Get the lowercase display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Message => "message",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known severity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSeverityError {
    name: String,
}

impl ParseSeverityError {
    /// The rejected input
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for ParseSeverityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown severity '{}'", self.name)
    }
}

impl std::error::Error for ParseSeverityError {}

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(Severity::Debug),
            "info" => Ok(Severity::Info),
            "message" => Ok(Severity::Message),
            "warning" | "warn" => Ok(Severity::Warning),
            "critical" => Ok(Severity::Critical),
            "error" => Ok(Severity::Error),
            _ => Err(ParseSeverityError {
                name: s.to_string(),
            }),
        }
    }
}
