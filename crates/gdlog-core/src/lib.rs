//! gdlog Core - scoped diagnostic collection
//!
//! This crate collects human-readable, severity-tagged diagnostics for a
//! block of work without passing a logger through every call:
//! - `Logger` instances nest in a thread-local LIFO registry
//! - Free reporting functions (`critical`, `warning`, `message`, `debug`,
//!   `log`) and `diag_*!` macros record into the active logger
//! - `ContextGuard` attaches breadcrumbs to everything reported in a scope
//! - Loggers dropped with unread messages dump them to a fallback sink
//!
//! Diagnostics are data: severity is metadata and never aborts or
//! propagates. The registry is per thread; loggers are not `Send`.

pub mod context;
pub mod errors;
pub mod logger;
pub mod logging_facility;
pub mod message;
pub mod registry;
pub mod report;
pub mod sink;

// Re-export commonly used types
pub use context::{context_scope, ContextGuard};
pub use errors::{DiagError, DiagErrorKind, Result};
pub use gdlog_core_types::{LoggerId, Severity};
pub use logger::{get_active_logger, has_error, ActiveLogger, Logger, LoggerBuilder};
pub use message::ErrorMessage;
pub use registry::{active_logger_count, live_logger_ids};
pub use report::{critical, debug, log, message, warning};
pub use sink::{FallbackSink, MemorySink, StderrSink};
