// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Construction-time failures of the rule engine.
///
/// These are fatal: a dispatcher with a broken rule never starts.
#[derive(Error, Debug)]
pub enum RuleError {
    /// A rule pattern failed to compile.
    #[error("Rule '{name}' has an invalid pattern: {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },

    /// A rule was declared with an empty name.
    #[error("Rule names must not be empty (pattern {pattern:?})")]
    EmptyName { pattern: String },
}
