//! Identifiers for live loggers

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_LOGGER_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identifier of a logger instance
///
/// Ids are handed out in construction order and never reused, so a later
/// logger always compares greater than an earlier one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LoggerId(u64);

impl LoggerId {
    /// Allocate the next identifier
    pub fn next() -> Self {
        Self(NEXT_LOGGER_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the numeric value
    pub fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for LoggerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_id_generation() {
        let id1 = LoggerId::next();
        let id2 = LoggerId::next();

        assert_ne!(id1, id2);
        assert!(id2 > id1);
    }

    #[test]
    fn test_logger_id_display() {
        let id = LoggerId::next();
        assert_eq!(format!("{}", id), format!("#{}", id.get()));
    }

    #[test]
    fn test_logger_id_serializes_as_number() {
        let id = LoggerId::next();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, id.get().to_string());
    }
}
