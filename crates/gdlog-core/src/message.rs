//! Collected diagnostic messages

use gdlog_core_types::Severity;
use serde::Serialize;
use std::fmt;

/// A single diagnostic: a severity plus human-readable text
///
/// Immutable once constructed. Any context in effect when the message was
/// reported is already folded into `text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorMessage {
    severity: Severity,
    text: String,
}

impl ErrorMessage {
    pub fn new(severity: Severity, text: impl Into<String>) -> Self {
        Self {
            severity,
            text: text.into(),
        }
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for ErrorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let msg = ErrorMessage::new(Severity::Warning, "unknown element");
        assert_eq!(msg.severity(), Severity::Warning);
        assert_eq!(msg.text(), "unknown element");
    }

    #[test]
    fn test_display_layout() {
        let msg = ErrorMessage::new(Severity::Critical, "cave has no inbox");
        assert_eq!(msg.to_string(), "critical: cave has no inbox");
    }

    #[test]
    fn test_serialize_shape() {
        let msg = ErrorMessage::new(Severity::Debug, "x");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json, serde_json::json!({"severity": "debug", "text": "x"}));
    }
}
