// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for TTL cache refreshes.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use tracing::Span;

/// A cache entry was (re)fetched from its source.
///
/// # Log Level
/// `info!` - Refreshes are rare enough to be worth seeing
pub struct CacheRefreshed<'a> {
    pub cache: &'a str,
    pub key: &'a str,
    pub duration: Duration,
}

impl Display for CacheRefreshed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Cache '{}' refreshed key {} in {:?}",
            self.cache, self.key, self.duration
        )
    }
}

impl StructuredLog for CacheRefreshed<'_> {
    fn log(&self) {
        tracing::info!(
            cache = self.cache,
            key = self.key,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "cache_refresh",
            span_name = name,
            cache = self.cache,
            key = self.key,
        )
    }
}

/// A cache fetch failed; the caller receives `DataSourceUnavailable`.
///
/// # Log Level
/// `warn!` - Caller decides whether to retry
pub struct CacheFetchFailed<'a> {
    pub cache: &'a str,
    pub key: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for CacheFetchFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Cache '{}' could not fetch key {}: {}",
            self.cache, self.key, self.error
        )
    }
}

impl StructuredLog for CacheFetchFailed<'_> {
    fn log(&self) {
        tracing::warn!(
            cache = self.cache,
            key = self.key,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "cache_fetch_failed",
            span_name = name,
            cache = self.cache,
            key = self.key,
        )
    }
}
