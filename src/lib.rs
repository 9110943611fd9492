// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod articles;   // article collection + snapshot
pub mod backends;   // chat and data source implementations
pub mod config;     // config loading + validation
pub mod dispatch;   // rule → handler dispatch
pub mod engine;     // poll loop, workers, shutdown
pub mod errors;     // error handling
pub mod league;     // league model + TTL caches
pub mod logging;
pub mod observability;
pub mod rules;      // regex rule engine
pub mod traits;     // unified abstractions
