// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;

/// Errors that can occur while loading or validating agent configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The configuration file could not be read
    Unreadable {
        path: String,
        reason: String,
    },
    /// The configuration document is not valid YAML for `Config`
    Malformed {
        reason: String,
    },
    /// No agents are defined
    NoAgents,
    /// A field still carries the value shipped in the sample configuration
    PlaceholderValue {
        /// The agent whose configuration is incomplete
        agent: String,
        /// The offending field
        field: &'static str,
        /// The placeholder value found
        value: String,
    },
    /// An agent has no permitted channels and would never respond
    NoChannels {
        agent: String,
    },
    /// A TTL was configured as zero
    ZeroTtl {
        agent: String,
        field: &'static str,
    },
    /// A TTL exceeds the longest accepted staleness window
    TtlTooLarge {
        agent: String,
        field: &'static str,
        max_minutes: u64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Unreadable { path, reason } => {
                write!(f, "Cannot read configuration '{}': {}", path, reason)
            }
            ConfigError::Malformed { reason } => {
                write!(f, "Malformed configuration: {}", reason)
            }
            ConfigError::NoAgents => write!(f, "Configuration defines no agents"),
            ConfigError::PlaceholderValue {
                agent,
                field,
                value,
            } => {
                write!(
                    f,
                    "Agent '{}': change '{}' from its default value {:?}",
                    agent, field, value
                )
            }
            ConfigError::NoChannels { agent } => {
                write!(f, "Agent '{}' has no permitted channels", agent)
            }
            ConfigError::ZeroTtl { agent, field } => {
                write!(f, "Agent '{}': '{}' must be greater than zero", agent, field)
            }
            ConfigError::TtlTooLarge {
                agent,
                field,
                max_minutes,
            } => {
                write!(
                    f,
                    "Agent '{}': '{}' must be at most {} minutes",
                    agent, field, max_minutes
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}
