//! Observability for ledgerbook
//!
//! Structured, line-oriented logs on stderr via `tracing`.
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on store behavior
//! 3. One log line = one event

mod logger;

pub use logger::{build_filter, init, is_valid_filter, DEFAULT_LOG_LEVEL, LOG_ENV};
