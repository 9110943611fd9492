// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod agent;
mod config;
mod fetch;
mod rules;

pub use agent::{AgentError, ChatError};
pub use config::ConfigError;
pub use fetch::{CacheError, FetchError, StoreError};
pub use rules::RuleError;
