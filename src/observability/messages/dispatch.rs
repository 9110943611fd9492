// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for rule matching and action dispatch.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// One inbound message matched one or more rules.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use leaguebot::observability::messages::dispatch::RulesMatched;
///
/// let msg = RulesMatched {
///     channel: "fantasy",
///     user: "alice",
///     rules: "matchup, jets",
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct RulesMatched<'a> {
    pub channel: &'a str,
    pub user: &'a str,
    pub rules: &'a str,
}

impl Display for RulesMatched<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Message from {} in {} matched [{}]",
            self.user, self.channel, self.rules
        )
    }
}

impl StructuredLog for RulesMatched<'_> {
    fn log(&self) {
        tracing::info!(
            channel = self.channel,
            user = self.user,
            rules = self.rules,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "dispatch",
            span_name = name,
            channel = self.channel,
            user = self.user,
            rules = self.rules,
        )
    }
}

/// Context enrichment for a matched rule failed; a fallback reply is sent.
///
/// # Log Level
/// `warn!` - Degraded response
pub struct EnrichmentFailed<'a> {
    pub rule: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for EnrichmentFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Could not enrich context for rule '{}': {}",
            self.rule, self.error
        )
    }
}

impl StructuredLog for EnrichmentFailed<'_> {
    fn log(&self) {
        tracing::warn!(rule = self.rule, error = %self.error, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "enrichment_failed",
            span_name = name,
            rule = self.rule,
            error = %self.error,
        )
    }
}

/// A handler produced output that was forwarded to the sink.
///
/// # Log Level
/// `debug!` - Detailed diagnostic information
pub struct HandlerOutput<'a> {
    pub rule: &'a str,
    pub channel_id: &'a str,
    pub output_len: usize,
}

impl Display for HandlerOutput<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Rule '{}' posted {} chars to {}",
            self.rule, self.output_len, self.channel_id
        )
    }
}

impl StructuredLog for HandlerOutput<'_> {
    fn log(&self) {
        tracing::debug!(
            rule = self.rule,
            channel_id = self.channel_id,
            output_len = self.output_len,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("handler_output", span_name = name, rule = self.rule)
    }
}

/// The output sink refused a message.
///
/// # Log Level
/// `error!` - A reply was lost
pub struct PostFailed<'a> {
    pub channel_id: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for PostFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Failed to post to {}: {}", self.channel_id, self.error)
    }
}

impl StructuredLog for PostFailed<'_> {
    fn log(&self) {
        tracing::error!(channel_id = self.channel_id, error = %self.error, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "post_failed",
            span_name = name,
            channel_id = self.channel_id,
            error = %self.error,
        )
    }
}
