// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod loader;
mod validation;

pub mod consts;

pub use loader::{
    load_and_validate_config, load_config, AgentConfig, ArticlesConfig, Config, LeagueAuth,
    LeagueConfig, LoggingConfig,
};
pub use validation::validate_config;
