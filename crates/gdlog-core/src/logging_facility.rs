//! Internal observability for the collector
//!
//! Collected diagnostics are data and never pass through here. This module
//! wires up `tracing` for the events the collector emits about itself:
//! registry push/pop, audit dumps and contract violations.
//!
//! - Single initialization point via `init(profile)`
//! - Test capture mode for deterministic assertions
//!
//! # Usage
//!
//! ```rust
//! use gdlog_core::logging_facility::{init, Profile};
//!
//! // Initialize once at application startup
//! init(Profile::Development);
//! ```

pub mod init;
pub(crate) mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
