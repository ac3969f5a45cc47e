//! Thread-local LIFO registry of live loggers
//!
//! The registry is created lazily on first use by each thread and is empty
//! again once the last logger on that thread is dropped. Entries are weak:
//! a logger owns its state, the registry only resolves it.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::logger::LoggerState;
use gdlog_core_types::LoggerId;

struct Entry {
    id: LoggerId,
    state: Weak<RefCell<LoggerState>>,
}

thread_local! {
    static REGISTRY: RefCell<Vec<Entry>> = const { RefCell::new(Vec::new()) };
}

/// Outcome of removing a logger's entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Removal {
    /// The entry was the top of the registry
    Top,
    /// The entry sat below `top` and was removed by identity
    OutOfOrder { top: Option<LoggerId> },
    /// No entry, e.g. the thread's registry is already torn down
    Missing,
}

/// Push a new active logger; returns the resulting depth
pub(crate) fn push(id: LoggerId, state: &Rc<RefCell<LoggerState>>) -> usize {
    REGISTRY.with(|r| {
        let mut entries = r.borrow_mut();
        entries.push(Entry {
            id,
            state: Rc::downgrade(state),
        });
        entries.len()
    })
}

/// Remove the entry for `id` wherever it sits
pub(crate) fn remove(id: LoggerId) -> Removal {
    REGISTRY
        .try_with(|r| {
            let mut entries = r.borrow_mut();
            let top = entries.last().map(|e| e.id);
            match entries.iter().rposition(|e| e.id == id) {
                Some(pos) if pos + 1 == entries.len() => {
                    entries.pop();
                    Removal::Top
                }
                Some(pos) => {
                    entries.remove(pos);
                    Removal::OutOfOrder { top }
                }
                None => Removal::Missing,
            }
        })
        .unwrap_or(Removal::Missing)
}

/// State of the active logger, if any
pub(crate) fn top() -> Option<Rc<RefCell<LoggerState>>> {
    REGISTRY
        .try_with(|r| r.borrow().last().and_then(|e| e.state.upgrade()))
        .ok()
        .flatten()
}

/// Identifiers of live loggers on this thread, oldest first
pub fn live_logger_ids() -> Vec<LoggerId> {
    REGISTRY
        .try_with(|r| r.borrow().iter().map(|e| e.id).collect())
        .unwrap_or_default()
}

/// Number of live loggers on the current thread
pub fn active_logger_count() -> usize {
    REGISTRY.try_with(|r| r.borrow().len()).unwrap_or(0)
}
