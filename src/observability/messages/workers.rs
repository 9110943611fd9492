// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for background workers.
//!
//! This module contains message types for logging events related to:
//! * Fetch worker item failures and shutdown
//! * Log writer flush failures
//! * Article collection progress

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Target of events about the run log itself. The run log's own subscriber
/// layer drops this target so a failing flush cannot feed itself.
pub const RUN_LOG_TARGET: &str = "leaguebot::run_log";

/// A single fetch in a worker pipeline failed; the worker moves on.
///
/// # Log Level
/// `warn!` - The item is dropped, no retry
///
/// # Example
/// ```
/// use leaguebot::errors::FetchError;
/// use leaguebot::observability::messages::workers::FetchFailed;
///
/// let error = FetchError::Unavailable("connection reset".to_string());
/// let msg = FetchFailed {
///     worker: "articles",
///     item: "https://example.com/a",
///     error: &error,
/// };
///
/// tracing::warn!("{}", msg);
/// ```
pub struct FetchFailed<'a> {
    pub worker: &'a str,
    pub item: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for FetchFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Worker '{}' failed to fetch {}: {}",
            self.worker, self.item, self.error
        )
    }
}

impl StructuredLog for FetchFailed<'_> {
    fn log(&self) {
        tracing::warn!(
            worker = self.worker,
            item = self.item,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "fetch_failed",
            span_name = name,
            worker = self.worker,
            item = self.item,
        )
    }
}

/// A worker loop has exited.
///
/// # Log Level
/// `info!` - Important operational event
pub struct WorkerStopped<'a> {
    pub worker: &'a str,
    pub processed: u64,
    pub failed: u64,
}

impl Display for WorkerStopped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Worker '{}' stopped: {} processed, {} failed",
            self.worker, self.processed, self.failed
        )
    }
}

impl StructuredLog for WorkerStopped<'_> {
    fn log(&self) {
        tracing::info!(
            worker = self.worker,
            processed = self.processed,
            failed = self.failed,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("worker_stopped", span_name = name, worker = self.worker)
    }
}

/// A log batch could not be written and was dropped.
///
/// # Log Level
/// `warn!` - Accepted log loss for one interval
pub struct LogFlushFailed<'a> {
    pub path: &'a str,
    pub lines: usize,
    pub reason: &'a str,
}

impl Display for LogFlushFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Dropped {} log line(s) for {}: {}",
            self.lines, self.path, self.reason
        )
    }
}

impl StructuredLog for LogFlushFailed<'_> {
    fn log(&self) {
        tracing::warn!(
            target: RUN_LOG_TARGET,
            path = self.path,
            lines = self.lines,
            reason = self.reason,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(target: RUN_LOG_TARGET, "log_flush_failed", span_name = name, path = self.path)
    }
}

/// Article collection finished a run.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ArticlesCollected {
    pub new_articles: usize,
    pub total_articles: usize,
}

impl Display for ArticlesCollected {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Collected {} new article(s), have {}",
            self.new_articles, self.total_articles
        )
    }
}

impl StructuredLog for ArticlesCollected {
    fn log(&self) {
        tracing::info!(
            new_articles = self.new_articles,
            total_articles = self.total_articles,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "articles_collected",
            span_name = name,
            new_articles = self.new_articles,
        )
    }
}
