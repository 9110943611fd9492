// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Startup validation for agent configuration.
//!
//! The sample configuration ships with placeholder credentials and league
//! identifiers. An agent that connected with them would either fail in
//! confusing ways or report on somebody else's league, so startup refuses
//! them outright. All checks run for every agent and every problem is
//! reported together.

use crate::config::consts::{
    MAX_TTL_MINUTES, PLACEHOLDER_API_TOKEN, PLACEHOLDER_LEAGUE_ID, PLACEHOLDER_LEAGUE_YEAR,
};
use crate::config::{AgentConfig, Config};
use crate::errors::ConfigError;
use crate::observability::messages::agent::ConfigRejected;
use crate::observability::messages::StructuredLog;

/// Validates a whole configuration document.
///
/// Returns `Ok(())` when every agent is usable, otherwise the full list of
/// problems in agent-name order.
pub fn validate_config(config: &Config) -> Result<(), Vec<ConfigError>> {
    if config.agents.is_empty() {
        return Err(vec![ConfigError::NoAgents]);
    }

    let errors: Vec<ConfigError> = config
        .agents
        .iter()
        .flat_map(|(name, agent)| validate_agent(name, agent))
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        for error in &errors {
            ConfigRejected { error }.log();
        }
        Err(errors)
    }
}

fn validate_agent(name: &str, agent: &AgentConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    if agent.api_token == PLACEHOLDER_API_TOKEN {
        errors.push(ConfigError::PlaceholderValue {
            agent: name.to_string(),
            field: "api_token",
            value: agent.api_token.clone(),
        });
    }
    if agent.league.id == PLACEHOLDER_LEAGUE_ID {
        errors.push(ConfigError::PlaceholderValue {
            agent: name.to_string(),
            field: "league.id",
            value: agent.league.id.to_string(),
        });
    }
    if agent.league.year == PLACEHOLDER_LEAGUE_YEAR {
        errors.push(ConfigError::PlaceholderValue {
            agent: name.to_string(),
            field: "league.year",
            value: agent.league.year.to_string(),
        });
    }
    if agent.channels.is_empty() {
        errors.push(ConfigError::NoChannels {
            agent: name.to_string(),
        });
    }
    for (field, minutes) in [
        ("league.ttl_minutes", agent.league.ttl_minutes),
        ("league.week_ttl_minutes", agent.league.week_ttl_minutes),
    ] {
        if minutes == 0 {
            errors.push(ConfigError::ZeroTtl {
                agent: name.to_string(),
                field,
            });
        } else if minutes > MAX_TTL_MINUTES {
            errors.push(ConfigError::TtlTooLarge {
                agent: name.to_string(),
                field,
                max_minutes: MAX_TTL_MINUTES,
            });
        }
    }

    errors
}
