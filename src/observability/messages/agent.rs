// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for agent lifecycle events.
//!
//! This module contains message types for logging events related to:
//! * Configuration validation
//! * Chat connection and the poll loop
//! * Shutdown sequencing

use crate::errors::ConfigError;
use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use tracing::Span;

/// A configuration problem was found at startup.
///
/// # Log Level
/// `error!` - Startup will be aborted
pub struct ConfigRejected<'a> {
    pub error: &'a ConfigError,
}

impl Display for ConfigRejected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Configuration rejected: {}", self.error)
    }
}

impl StructuredLog for ConfigRejected<'_> {
    fn log(&self) {
        tracing::error!(error = %self.error, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!("config_rejected", span_name = name, error = %self.error)
    }
}

/// Agent connected to the chat service and is about to start polling.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use leaguebot::observability::messages::agent::AgentConnected;
///
/// let msg = AgentConnected {
///     agent: "squirtle",
///     channel_count: 2,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct AgentConnected<'a> {
    pub agent: &'a str,
    pub channel_count: usize,
}

impl Display for AgentConnected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} is connected, listening in {} channel(s)",
            self.agent, self.channel_count
        )
    }
}

impl StructuredLog for AgentConnected<'_> {
    fn log(&self) {
        tracing::info!(
            agent = self.agent,
            channel_count = self.channel_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "agent",
            span_name = name,
            agent = self.agent,
            channel_count = self.channel_count,
        )
    }
}

/// Agent could not connect.
///
/// # Log Level
/// `error!` - The poll loop will not start
pub struct AgentConnectFailed<'a> {
    pub agent: &'a str,
}

impl Display for AgentConnectFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{} failed to connect to the chat service", self.agent)
    }
}

impl StructuredLog for AgentConnectFailed<'_> {
    fn log(&self) {
        tracing::error!(agent = self.agent, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!("agent_connect_failed", span_name = name, agent = self.agent)
    }
}

/// Reading events from the chat service failed for one cycle.
///
/// # Log Level
/// `warn!` - The loop keeps going
pub struct ChatReadFailed<'a> {
    pub agent: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for ChatReadFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{} could not read chat events: {}", self.agent, self.error)
    }
}

impl StructuredLog for ChatReadFailed<'_> {
    fn log(&self) {
        tracing::warn!(agent = self.agent, error = %self.error, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "chat_read_failed",
            span_name = name,
            agent = self.agent,
            error = %self.error,
        )
    }
}

/// An inbound event was dropped before rule matching.
///
/// # Log Level
/// `debug!` - Routine filtering
pub struct EventIgnored<'a> {
    pub agent: &'a str,
    pub channel_id: &'a str,
    pub reason: &'a str,
}

impl Display for EventIgnored<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} ignored event in {}: {}",
            self.agent, self.channel_id, self.reason
        )
    }
}

impl StructuredLog for EventIgnored<'_> {
    fn log(&self) {
        tracing::debug!(
            agent = self.agent,
            channel_id = self.channel_id,
            reason = self.reason,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "event_ignored",
            span_name = name,
            agent = self.agent,
            channel_id = self.channel_id,
        )
    }
}

/// Poll loop exited.
///
/// # Log Level
/// `info!` - Important operational event
pub struct AgentStopped<'a> {
    pub agent: &'a str,
    pub events_handled: u64,
}

impl Display for AgentStopped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} exiting after {} dispatched event(s)",
            self.agent, self.events_handled
        )
    }
}

impl StructuredLog for AgentStopped<'_> {
    fn log(&self) {
        tracing::info!(
            agent = self.agent,
            events_handled = self.events_handled,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("agent_stopped", span_name = name, agent = self.agent)
    }
}

/// One step of the shutdown sequence has begun.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ShutdownPhase<'a> {
    pub phase: &'a str,
    pub component_count: usize,
}

impl Display for ShutdownPhase<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Shutdown: stopping {} ({} component(s))",
            self.phase, self.component_count
        )
    }
}

impl StructuredLog for ShutdownPhase<'_> {
    fn log(&self) {
        tracing::info!(
            phase = self.phase,
            component_count = self.component_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("shutdown", span_name = name, phase = self.phase)
    }
}

/// A component did not report stopped within its shutdown phase.
///
/// # Log Level
/// `warn!` - Shutdown continues without it
pub struct ShutdownTimedOut<'a> {
    pub phase: &'a str,
    pub component: &'a str,
    pub timeout: Duration,
}

impl Display for ShutdownTimedOut<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Shutdown: {} did not stop within {:?} during {}",
            self.component, self.timeout, self.phase
        )
    }
}

impl StructuredLog for ShutdownTimedOut<'_> {
    fn log(&self) {
        tracing::warn!(
            phase = self.phase,
            component = self.component,
            timeout_ms = self.timeout.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "shutdown_timeout",
            span_name = name,
            phase = self.phase,
            component = self.component,
        )
    }
}
