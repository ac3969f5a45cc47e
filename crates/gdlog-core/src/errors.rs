use gdlog_core_types::{LoggerId, ParseSeverityError};
use thiserror::Error;

/// Result type alias using DiagError
pub type Result<T> = std::result::Result<T, DiagError>;

/// Stable classification of contract violations
///
/// Collected diagnostics are data, not errors. These kinds only cover misuse
/// of the collector itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagErrorKind {
    NoActiveLogger,
    OutOfOrderRelease,
    ContextOutOfOrder,
    UnknownSeverity,
}

impl DiagErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            DiagErrorKind::NoActiveLogger => "ERR_NO_ACTIVE_LOGGER",
            DiagErrorKind::OutOfOrderRelease => "ERR_OUT_OF_ORDER_RELEASE",
            DiagErrorKind::ContextOutOfOrder => "ERR_CONTEXT_OUT_OF_ORDER",
            DiagErrorKind::UnknownSeverity => "ERR_UNKNOWN_SEVERITY",
        }
    }
}

/// Misuse of the logger registry or the context protocol
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiagError {
    /// A reporting call or resolver ran with no logger alive on this thread
    #[error("no active logger: construct a Logger before reporting")]
    NoActiveLogger,

    /// A logger was dropped while a younger logger was still alive
    #[error("logger {logger_id} released out of registry order (top was {})", fmt_top(.top))]
    OutOfOrderRelease {
        logger_id: LoggerId,
        top: Option<LoggerId>,
    },

    /// A context guard was released while a younger guard still held the context
    #[error("context guard released out of order: expected '{expected}', found '{found}'")]
    ContextOutOfOrder { expected: String, found: String },

    /// A severity name could not be parsed
    #[error("unknown severity '{name}'")]
    UnknownSeverity { name: String },
}

fn fmt_top(top: &Option<LoggerId>) -> String {
    match top {
        Some(id) => id.to_string(),
        None => "none".to_string(),
    }
}

impl DiagError {
    /// Get the error kind
    pub fn kind(&self) -> DiagErrorKind {
        match self {
            DiagError::NoActiveLogger => DiagErrorKind::NoActiveLogger,
            DiagError::OutOfOrderRelease { .. } => DiagErrorKind::OutOfOrderRelease,
            DiagError::ContextOutOfOrder { .. } => DiagErrorKind::ContextOutOfOrder,
            DiagError::UnknownSeverity { .. } => DiagErrorKind::UnknownSeverity,
        }
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind().code()
    }
}

impl From<ParseSeverityError> for DiagError {
    fn from(err: ParseSeverityError) -> Self {
        DiagError::UnknownSeverity {
            name: err.name().to_string(),
        }
    }
}
