//! Scoped loggers and the active-logger resolver
//!
//! A [`Logger`] collects [`ErrorMessage`]s for one logical scope. Creating it
//! pushes it onto the thread's registry, making it the target of the free
//! reporting functions; dropping it pops it again and audits anything left
//! unread.
//!
//! ```
//! use gdlog_core::{warning, Logger};
//!
//! let outer = Logger::new();
//! warning("x");
//! {
//!     let inner = Logger::new();
//!     warning("y");
//!     assert_eq!(inner.messages_in_one_string(), "y");
//!     inner.clear();
//! }
//! warning("z");
//! assert_eq!(outer.messages_in_one_string(), "x\nz");
//! outer.clear();
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::context::ContextGuard;
use crate::errors::{DiagError, Result};
use crate::logging_facility::macros::log_diag_event;
use crate::message::ErrorMessage;
use crate::registry::{self, Removal};
use crate::sink::{render_dump, FallbackSink, StderrSink};
use gdlog_core_types::schema::{
    EVENT_AUDIT_DUMP, EVENT_LOGGER_POP, EVENT_LOGGER_PUSH, EVENT_OUT_OF_ORDER_RELEASE,
};
use gdlog_core_types::{LoggerId, Severity};

/// Mutable state shared between a logger, its guards and resolver handles
#[derive(Debug)]
pub(crate) struct LoggerState {
    id: LoggerId,
    ignore: bool,
    acknowledged: bool,
    /// Cleared once the owning `Logger` is dropped; later reports are dropped.
    attached: bool,
    messages: Vec<ErrorMessage>,
    context: String,
}

pub(crate) type SharedState = Rc<RefCell<LoggerState>>;

impl LoggerState {
    fn record(&mut self, severity: Severity, text: &str) {
        if self.ignore || !self.attached {
            return;
        }
        let text = if self.context.is_empty() {
            text.to_string()
        } else {
            format!("{}: {}", self.context, text)
        };
        self.messages.push(ErrorMessage::new(severity, text));
        self.acknowledged = false;
    }

    pub(crate) fn id(&self) -> LoggerId {
        self.id
    }

    /// Append `label` to the context; returns the previous and the new value
    pub(crate) fn push_context(&mut self, label: &str) -> (String, String) {
        let installed = if self.context.is_empty() {
            label.to_string()
        } else {
            format!("{}, {}", self.context, label)
        };
        let previous = std::mem::replace(&mut self.context, installed.clone());
        (previous, installed)
    }

    /// Restore `previous`, checking that `installed` is still in effect
    ///
    /// When another guard changed the context in between, `previous` is only
    /// restored if the current context still extends it. A context that was
    /// already unwound past `previous` is left alone.
    pub(crate) fn restore_context(&mut self, installed: &str, previous: String) -> Result<()> {
        if self.context == installed {
            self.context = previous;
            return Ok(());
        }

        let found = self.context.clone();
        if extends(&found, &previous) {
            self.context = previous;
        }
        Err(DiagError::ContextOutOfOrder {
            expected: installed.to_string(),
            found,
        })
    }
}

/// True when `context` is `base` or `base` followed by more labels
pub(crate) fn extends(context: &str, base: &str) -> bool {
    base.is_empty()
        || context == base
        || context
            .strip_prefix(base)
            .is_some_and(|rest| rest.starts_with(", "))
}

/// Builder for loggers with non-default options
///
/// ```
/// use gdlog_core::{Logger, MemorySink};
///
/// let sink = MemorySink::new();
/// let logger = Logger::builder().fallback_sink(sink.clone()).build();
/// logger.log(gdlog_core::Severity::Warning, "left unread");
/// drop(logger);
/// assert!(sink.contents().contains("warning: left unread"));
/// ```
pub struct LoggerBuilder {
    ignore: bool,
    sink: Rc<dyn FallbackSink>,
}

impl LoggerBuilder {
    /// Drop every reported message instead of recording it
    pub fn ignore(mut self, ignore: bool) -> Self {
        self.ignore = ignore;
        self
    }

    /// Where the drop-time audit writes unread messages (stderr by default)
    pub fn fallback_sink(mut self, sink: impl FallbackSink + 'static) -> Self {
        self.sink = Rc::new(sink);
        self
    }

    /// Create the logger and make it the active one on this thread
    pub fn build(self) -> Logger {
        let id = LoggerId::next();
        let state = Rc::new(RefCell::new(LoggerState {
            id,
            ignore: self.ignore,
            acknowledged: true,
            attached: true,
            messages: Vec::new(),
            context: String::new(),
        }));
        let depth = registry::push(id, &state);
        log_diag_event!(trace, EVENT_LOGGER_PUSH, logger_id = id.get(), depth = depth);
        Logger {
            state,
            sink: self.sink,
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self {
            ignore: false,
            sink: Rc::new(StderrSink),
        }
    }
}

/// Collector of diagnostics for one scope
///
/// Loggers nest: the most recently created live logger on the current thread
/// receives everything reported through [`crate::report`]. Dropping a logger
/// that still holds messages nobody cleared or acknowledged writes them to
/// its [`FallbackSink`].
///
/// Loggers must be dropped in reverse creation order. Dropping one while a
/// younger logger is alive removes it anyway, emits an
/// `out_of_order_release` event and panics in debug builds.
///
/// A `Logger` is tied to the thread that created it (`!Send`).
pub struct Logger {
    state: SharedState,
    sink: Rc<dyn FallbackSink>,
}

impl Logger {
    /// Create a recording logger and make it active
    pub fn new() -> Self {
        LoggerBuilder::default().build()
    }

    /// Create a logger that silently drops everything reported to it
    pub fn ignoring() -> Self {
        LoggerBuilder::default().ignore(true).build()
    }

    /// Start configuring a logger; see [`LoggerBuilder`]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::default()
    }

    /// Process-unique id, shown as `#N` in audit dumps
    pub fn id(&self) -> LoggerId {
        self.state.borrow().id
    }

    /// True for loggers created with `ignore` set
    pub fn is_ignoring(&self) -> bool {
        self.state.borrow().ignore
    }

    /// Record a message, prefixed with the current context if there is one
    ///
    /// Ignoring loggers drop the message without a trace.
    pub fn log(&self, severity: Severity, text: impl AsRef<str>) {
        self.state.borrow_mut().record(severity, text.as_ref());
    }

    /// Discard all messages and mark the logger acknowledged
    pub fn clear(&self) {
        let mut state = self.state.borrow_mut();
        state.messages.clear();
        state.acknowledged = true;
    }

    /// Mark all current messages as seen without discarding them
    pub fn acknowledge(&self) {
        self.state.borrow_mut().acknowledged = true;
    }

    /// True when no messages are held, whether or not any were acknowledged
    pub fn is_empty(&self) -> bool {
        self.state.borrow().messages.is_empty()
    }

    /// Whether messages arrived since creation or the last clear/acknowledge
    pub fn has_unacknowledged(&self) -> bool {
        let state = self.state.borrow();
        !state.acknowledged && !state.messages.is_empty()
    }

    /// Snapshot of the collected messages in insertion order
    pub fn messages(&self) -> Vec<ErrorMessage> {
        self.state.borrow().messages.clone()
    }

    /// Move the collected messages out, leaving the logger cleared
    pub fn take_messages(&self) -> Vec<ErrorMessage> {
        let mut state = self.state.borrow_mut();
        state.acknowledged = true;
        std::mem::take(&mut state.messages)
    }

    /// All message texts joined with `'\n'`, without a trailing newline
    pub fn messages_in_one_string(&self) -> String {
        join_texts(&self.state.borrow().messages)
    }

    /// Current context, empty outside any [`ContextGuard`]
    pub fn context(&self) -> String {
        self.state.borrow().context.clone()
    }

    /// Append `label` to this logger's context until the guard is dropped
    pub fn context_scope(&self, label: &str) -> ContextGuard<'_> {
        ContextGuard::acquire(self.state.clone(), label)
    }

    fn audit(&self) {
        let state = self.state.borrow();
        if state.acknowledged || state.messages.is_empty() {
            return;
        }
        log_diag_event!(
            warn,
            EVENT_AUDIT_DUMP,
            logger_id = state.id.get(),
            unread = state.messages.len()
        );
        let dump = render_dump(state.id, &state.messages);
        drop(state);
        self.sink.write_dump(&dump);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("Logger")
            .field("id", &state.id)
            .field("ignore", &state.ignore)
            .field("acknowledged", &state.acknowledged)
            .field("messages", &state.messages.len())
            .field("context", &state.context)
            .finish()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        let id = {
            let mut state = self.state.borrow_mut();
            state.attached = false;
            state.id
        };
        let removal = registry::remove(id);
        log_diag_event!(trace, EVENT_LOGGER_POP, logger_id = id.get());

        self.audit();

        if let Removal::OutOfOrder { top } = removal {
            let err = DiagError::OutOfOrderRelease { logger_id: id, top };
            log_diag_event!(
                error,
                EVENT_OUT_OF_ORDER_RELEASE,
                logger_id = id.get(),
                top_id = top.map(LoggerId::get),
                err_code = err.code()
            );
            if cfg!(debug_assertions) && !std::thread::panicking() {
                panic!("{}", err);
            }
        }
    }
}

fn join_texts(messages: &[ErrorMessage]) -> String {
    messages
        .iter()
        .map(ErrorMessage::text)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Non-owning handle to the logger that was active when it was resolved
///
/// Dropping the handle does not touch the registry. Reports made through a
/// handle whose logger has since been dropped are discarded.
#[derive(Clone)]
pub struct ActiveLogger {
    state: SharedState,
}

impl ActiveLogger {
    pub fn id(&self) -> LoggerId {
        self.state.borrow().id
    }

    /// Same as [`Logger::log`]; a no-op once the logger is gone
    pub fn log(&self, severity: Severity, text: impl AsRef<str>) {
        self.state.borrow_mut().record(severity, text.as_ref());
    }

    pub fn is_empty(&self) -> bool {
        self.state.borrow().messages.is_empty()
    }

    pub fn messages(&self) -> Vec<ErrorMessage> {
        self.state.borrow().messages.clone()
    }

    pub fn context(&self) -> String {
        self.state.borrow().context.clone()
    }

    /// Guard on the resolved logger; it keeps the shared state alive
    pub fn context_scope(&self, label: &str) -> ContextGuard<'static> {
        ContextGuard::acquire(self.state.clone(), label)
    }
}

impl fmt::Debug for ActiveLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActiveLogger")
            .field("id", &self.id())
            .finish()
    }
}

/// Resolve the most recently created live logger on this thread
///
/// # Errors
///
/// Returns [`DiagError::NoActiveLogger`] when no logger is alive; one is
/// never created implicitly.
pub fn get_active_logger() -> Result<ActiveLogger> {
    registry::top()
        .map(|state| ActiveLogger { state })
        .ok_or(DiagError::NoActiveLogger)
}

/// Whether the active logger holds any message
pub fn has_error() -> bool {
    get_active_logger().is_ok_and(|logger| !logger.is_empty())
}
