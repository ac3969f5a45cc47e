//! Free reporting functions
//!
//! These are the only surface code outside this crate needs: each call
//! resolves the active logger once and records one message on it. Nothing
//! here returns an error; severity never changes control flow.
//!
//! Reporting with no logger alive is a contract violation. The message is
//! written to stderr and a `no_active_logger` event is emitted; debug builds
//! then panic.

use crate::errors::DiagError;
use crate::logger::get_active_logger;
use crate::logging_facility::macros::log_diag_event;
use crate::sink::{FallbackSink, StderrSink};
use gdlog_core_types::schema::EVENT_NO_ACTIVE_LOGGER;
use gdlog_core_types::Severity;

/// Report `text` with an explicit severity to the active logger
pub fn log(severity: Severity, text: impl AsRef<str>) {
    let text = text.as_ref();
    match get_active_logger() {
        Ok(logger) => logger.log(severity, text),
        Err(err) => orphaned(severity, text, &err),
    }
}

pub fn critical(text: impl AsRef<str>) {
    log(Severity::Critical, text);
}

pub fn warning(text: impl AsRef<str>) {
    log(Severity::Warning, text);
}

pub fn message(text: impl AsRef<str>) {
    log(Severity::Message, text);
}

pub fn debug(text: impl AsRef<str>) {
    log(Severity::Debug, text);
}

fn orphaned(severity: Severity, text: &str, err: &DiagError) {
    StderrSink.write_dump(&format!("no active logger: {}: {}\n", severity, text));
    log_diag_event!(
        error,
        EVENT_NO_ACTIVE_LOGGER,
        severity = severity.as_str(),
        err_code = err.code()
    );
    if cfg!(debug_assertions) && !std::thread::panicking() {
        panic!("no active logger: {}: {}", severity, text);
    }
}

/// Report a formatted message with an explicit severity
///
/// ```
/// use gdlog_core::{diag_log, Logger, Severity};
///
/// let logger = Logger::new();
/// diag_log!(Severity::Info, "{} objects", 3);
/// assert_eq!(logger.messages_in_one_string(), "3 objects");
/// # logger.clear();
/// ```
#[macro_export]
macro_rules! diag_log {
    ($severity:expr, $($arg:tt)+) => {
        $crate::report::log($severity, ::std::format!($($arg)+))
    };
}

/// Report a formatted critical message
#[macro_export]
macro_rules! diag_critical {
    ($($arg:tt)+) => {
        $crate::report::critical(::std::format!($($arg)+))
    };
}

/// Report a formatted warning
///
/// ```
/// use gdlog_core::{diag_warning, Logger};
///
/// let logger = Logger::new();
/// diag_warning!("unknown element '{}' at {},{}", "XYZ", 4, 7);
/// assert_eq!(logger.messages()[0].text(), "unknown element 'XYZ' at 4,7");
/// # logger.clear();
/// ```
#[macro_export]
macro_rules! diag_warning {
    ($($arg:tt)+) => {
        $crate::report::warning(::std::format!($($arg)+))
    };
}

/// Report a formatted informational message
#[macro_export]
macro_rules! diag_message {
    ($($arg:tt)+) => {
        $crate::report::message(::std::format!($($arg)+))
    };
}

/// Report a formatted debug message
#[macro_export]
macro_rules! diag_debug {
    ($($arg:tt)+) => {
        $crate::report::debug(::std::format!($($arg)+))
    };
}
