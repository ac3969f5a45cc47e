//! Core types shared across the gdlog crates
//!
//! This crate provides the vocabulary used by both the diagnostic
//! collector and its command-line driver:
//!
//! - **Severity**: the six-level, totally ordered message classification
//! - **Identifiers**: `LoggerId` for registry identity
//! - **Schema constants**: canonical field keys and event names for tracing

pub mod id;
pub mod schema;
pub mod severity;

pub use id::LoggerId;
pub use severity::{ParseSeverityError, Severity};
