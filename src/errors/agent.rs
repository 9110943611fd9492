// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

use super::{ConfigError, RuleError};

/// Failure reported by the chat transport.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChatError {
    #[error("Chat transport error: {0}")]
    Transport(String),

    #[error("Unknown {kind} id '{id}'")]
    UnknownId { kind: &'static str, id: String },
}

/// Errors that stop an agent from starting or running.
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Agent '{0}' could not connect to the chat service")]
    ConnectFailed(String),

    #[error("Invalid configuration: {}", format_config_errors(.0))]
    Config(Vec<ConfigError>),

    #[error(transparent)]
    Rule(#[from] RuleError),

    #[error(transparent)]
    Chat(#[from] ChatError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn format_config_errors(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
