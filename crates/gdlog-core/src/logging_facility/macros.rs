//! Structured event macro shared by the collector's modules

/// Emit a tracing event tagged with the emitting module and an event name
///
/// ```ignore
/// log_diag_event!(warn, EVENT_AUDIT_DUMP, logger_id = id.get(), unread = 3);
/// ```
macro_rules! log_diag_event {
    ($level:ident, $event:expr) => {
        tracing::$level!(component = module_path!(), event = $event)
    };
    ($level:ident, $event:expr, $($field:tt)*) => {
        tracing::$level!(component = module_path!(), event = $event, $($field)*)
    };
}

pub(crate) use log_diag_event;
