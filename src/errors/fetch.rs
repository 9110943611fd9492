// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Failure reported by an external fetch collaborator (league data, articles).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// The remote side could not be reached or answered with an error.
    #[error("Source unavailable: {0}")]
    Unavailable(String),

    /// The remote side answered but the payload could not be understood.
    #[error("Unparseable response: {0}")]
    Parse(String),

    /// The requested entity does not exist at the source.
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Failure of a `TtlCache::get` call.
///
/// A cache never serves data past its TTL and never retries on its own;
/// callers decide what to do with this.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CacheError {
    #[error("Data source unavailable for key {key}: {source}")]
    DataSourceUnavailable {
        key: String,
        #[source]
        source: FetchError,
    },
}

/// Reading or writing the seen-article snapshot failed.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Snapshot I/O failed for {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Snapshot at {path} is not valid JSON: {source}")]
    Format {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
