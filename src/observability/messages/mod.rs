// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Messages are grouped by subsystem:
//!
//! * `agent` - configuration, connection, poll loop and shutdown events
//! * `dispatch` - rule matches, enrichment and posting
//! * `workers` - fetch worker, log writer and article collection
//! * `cache` - TTL cache refreshes and fetch failures

use tracing::Span;

pub mod agent;
pub mod cache;
pub mod dispatch;
pub mod workers;

/// A log message that knows its own level and structured fields.
pub trait StructuredLog {
    /// Emit the message at its level with structured fields attached.
    fn log(&self);

    /// Open a span carrying the same fields.
    fn span(&self, name: &str) -> Span;
}
