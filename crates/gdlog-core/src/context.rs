//! Scope-bound context breadcrumbs
//!
//! A [`ContextGuard`] appends a label to a logger's context for as long as it
//! lives. Messages reported meanwhile are stored as `"<context>: <text>"`.
//!
//! ```
//! use gdlog_core::Logger;
//!
//! let logger = Logger::new();
//! {
//!     let _file = logger.context_scope("Reading file");
//!     let _header = logger.context_scope("Parsing header");
//!     assert_eq!(logger.context(), "Reading file, Parsing header");
//! }
//! assert_eq!(logger.context(), "");
//! ```

use std::marker::PhantomData;

use crate::errors::{DiagError, Result};
use crate::logger::{get_active_logger, SharedState};
use crate::logging_facility::macros::log_diag_event;
use gdlog_core_types::schema::EVENT_CONTEXT_OUT_OF_ORDER;

/// Restores a logger's previous context when dropped
///
/// Guards on the same logger must be dropped in reverse acquisition order.
/// Releasing an outer guard while an inner one is alive still restores the
/// outer guard's saved value, but emits a `context_out_of_order` event and
/// panics in debug builds. An inner guard released after that finds its
/// saved value already unwound and leaves the context as it is.
#[must_use = "the context is restored as soon as the guard is dropped"]
pub struct ContextGuard<'a> {
    target: SharedState,
    previous: String,
    installed: String,
    _scope: PhantomData<&'a ()>,
}

impl<'a> ContextGuard<'a> {
    pub(crate) fn acquire(target: SharedState, label: &str) -> Self {
        let (previous, installed) = target.borrow_mut().push_context(label);
        Self {
            target,
            previous,
            installed,
            _scope: PhantomData,
        }
    }

    /// The full context this guard installed
    pub fn context(&self) -> &str {
        &self.installed
    }
}

impl Drop for ContextGuard<'_> {
    fn drop(&mut self) {
        let previous = std::mem::take(&mut self.previous);
        let result = self
            .target
            .borrow_mut()
            .restore_context(&self.installed, previous);

        if let Err(err) = result {
            let logger_id = self.target.borrow().id();
            if let DiagError::ContextOutOfOrder { expected, found } = &err {
                log_diag_event!(
                    error,
                    EVENT_CONTEXT_OUT_OF_ORDER,
                    logger_id = logger_id.get(),
                    expected_context = expected.as_str(),
                    found_context = found.as_str(),
                    err_code = err.code()
                );
            }
            if cfg!(debug_assertions) && !std::thread::panicking() {
                panic!("{}", err);
            }
        }
    }
}

impl std::fmt::Debug for ContextGuard<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextGuard")
            .field("installed", &self.installed)
            .field("previous", &self.previous)
            .finish()
    }
}

/// Append `label` to the active logger's context until the guard is dropped
///
/// # Errors
///
/// Returns [`DiagError::NoActiveLogger`] when no logger is alive.
pub fn context_scope(label: &str) -> Result<ContextGuard<'static>> {
    Ok(get_active_logger()?.context_scope(label))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::Logger;
    use gdlog_core_types::Severity;
    use proptest::prelude::*;

    #[test]
    fn test_nested_guards_build_and_restore_context() {
        let logger = Logger::new();
        assert_eq!(logger.context(), "");

        let outer = logger.context_scope("Reading file");
        assert_eq!(logger.context(), "Reading file");

        let inner = logger.context_scope("Parsing header");
        assert_eq!(logger.context(), "Reading file, Parsing header");
        assert_eq!(inner.context(), "Reading file, Parsing header");

        drop(inner);
        assert_eq!(logger.context(), "Reading file");

        drop(outer);
        assert_eq!(logger.context(), "");
    }

    #[test]
    fn test_messages_carry_context_prefix() {
        let logger = Logger::new();
        logger.log(Severity::Message, "plain");
        {
            let _g = logger.context_scope("Reading file");
            logger.log(Severity::Warning, "bad tile");
            let _h = logger.context_scope("row 3");
            logger.log(Severity::Error, "unknown element");
        }
        logger.log(Severity::Message, "after");

        assert_eq!(
            logger.messages_in_one_string(),
            "plain\nReading file: bad tile\nReading file, row 3: unknown element\nafter"
        );
        logger.clear();
    }

    #[test]
    fn test_free_context_scope_targets_active_logger() {
        let outer = Logger::new();
        let inner = Logger::new();
        {
            let _g = context_scope("loading").unwrap();
            assert_eq!(inner.context(), "loading");
            assert_eq!(outer.context(), "");
        }
        assert_eq!(inner.context(), "");
    }

    #[test]
    fn test_free_context_scope_without_logger_fails() {
        let err = context_scope("orphan").unwrap_err();
        assert_eq!(err, DiagError::NoActiveLogger);
    }

    #[test]
    fn test_context_restored_on_early_return() {
        fn parse(logger: &Logger, fail: bool) -> Option<u32> {
            let _g = logger.context_scope("parse");
            if fail {
                return None;
            }
            Some(1)
        }

        let logger = Logger::new();
        assert_eq!(parse(&logger, true), None);
        assert_eq!(logger.context(), "");
        assert_eq!(parse(&logger, false), Some(1));
        assert_eq!(logger.context(), "");
    }

    #[test]
    fn test_context_restored_on_unwind() {
        let logger = Logger::new();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _g = logger.context_scope("doomed");
            panic!("boom");
        }));

        assert!(result.is_err());
        assert_eq!(logger.context(), "");
    }

    #[cfg(debug_assertions)]
    #[test]
    fn test_out_of_order_guard_release_panics_in_debug() {
        let logger = Logger::new();
        let outer = logger.context_scope("a");
        let inner = logger.context_scope("b");

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || drop(outer)));
        assert!(result.is_err());
        // The outer guard restored its saved value before failing.
        assert_eq!(logger.context(), "");

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || drop(inner)));
        assert!(result.is_err());
        // The inner guard must not bring back "a".
        assert_eq!(logger.context(), "");
    }

    #[cfg(not(debug_assertions))]
    #[test]
    fn test_out_of_order_guard_release_leaves_no_stale_context() {
        let logger = Logger::new();
        let outer = logger.context_scope("a");
        let inner = logger.context_scope("b");

        drop(outer);
        drop(inner);
        assert_eq!(logger.context(), "");

        logger.log(Severity::Warning, "after");
        assert_eq!(logger.messages_in_one_string(), "after");
        logger.clear();
    }

    #[test]
    fn test_late_inner_release_keeps_unwound_context() {
        let logger = Logger::new();
        let base = logger.context_scope("file");
        let middle = logger.context_scope("header");
        let top = logger.context_scope("field");

        // Releasing `middle` early unwinds to "file". `top` saved
        // "file, header", which "file" no longer extends.
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || drop(middle)));
        assert_eq!(logger.context(), "file");
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || drop(top)));
        assert_eq!(logger.context(), "file");

        drop(base);
        assert_eq!(logger.context(), "");
    }

    #[test]
    fn test_extends_matches_whole_labels_only() {
        use crate::logger::extends;

        assert!(extends("a, b", ""));
        assert!(extends("a, b", "a"));
        assert!(extends("a", "a"));
        assert!(!extends("", "a"));
        assert!(!extends("ab", "a"));
        assert!(!extends("x, a", "a"));
    }

    proptest! {
        #[test]
        fn prop_nested_guards_restore_in_lifo_order(
            labels in proptest::collection::vec("[a-z]{1,8}", 1..8)
        ) {
            let logger = Logger::new();
            let mut guards = Vec::new();
            let mut seen = Vec::new();

            for label in &labels {
                seen.push(logger.context());
                guards.push(logger.context_scope(label));
                prop_assert_eq!(logger.context(), labels[..guards.len()].join(", "));
            }

            while let Some(guard) = guards.pop() {
                drop(guard);
                prop_assert_eq!(Some(logger.context()), seen.pop());
            }
            prop_assert_eq!(logger.context(), "");
        }
    }
}
