//! Canonical schema constants for the crate's own tracing events
//!
//! Collected diagnostics never go through tracing; these keys only describe
//! what the collector itself reports about registry and context handling.

// Canonical field keys
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_LOGGER_ID: &str = "logger_id";
pub const FIELD_TOP_ID: &str = "top_id";
pub const FIELD_DEPTH: &str = "depth";
pub const FIELD_UNREAD: &str = "unread";
pub const FIELD_SEVERITY: &str = "severity";

// Context fields
pub const FIELD_EXPECTED_CONTEXT: &str = "expected_context";
pub const FIELD_FOUND_CONTEXT: &str = "found_context";

// Error fields
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_LOGGER_PUSH: &str = "logger_push";
pub const EVENT_LOGGER_POP: &str = "logger_pop";
pub const EVENT_AUDIT_DUMP: &str = "audit_dump";
pub const EVENT_OUT_OF_ORDER_RELEASE: &str = "out_of_order_release";
pub const EVENT_CONTEXT_OUT_OF_ORDER: &str = "context_out_of_order";
pub const EVENT_NO_ACTIVE_LOGGER: &str = "no_active_logger";
