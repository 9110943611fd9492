// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::errors::FetchError;

/// A pluggable fetch step: turn one input into one output, or fail.
///
/// Both the TTL cache (key -> value) and the fetch worker pipeline
/// (work item -> result) are driven by a `Fetcher`. Implementations make a
/// single attempt; retry policy belongs to whoever calls them.
#[async_trait]
pub trait Fetcher<I: Send + 'static, O>: Send + Sync {
    async fn fetch(&self, item: I) -> Result<O, FetchError>;

    /// Short label used in log messages.
    fn name(&self) -> &str {
        "fetcher"
    }
}
