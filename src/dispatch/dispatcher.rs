// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! # Dispatch cycle
//!
//! For every matched rule name, in match order:
//!
//! 1. Build a [`DispatchContext`] from the event's [`BaseContext`] and the
//!    rule's match.
//! 2. Resolve the rule's declared [`Enrichment`] through the league cache.
//!    A failed season or week lookup replaces the rule's handlers with a
//!    single fallback reply; a failed previous-season lookup only leaves
//!    that field empty.
//! 3. Invoke every handler registered under the name, each on its own copy
//!    of the context, and post each output in handler-registration order.
//!
//! Dispatch awaits every handler before returning. A cold cache fetch
//! therefore stalls the calling poll loop for the duration of the fetch.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::Instrument;

use crate::config::AgentConfig;
use crate::dispatch::builtin::HandlerEntry;
use crate::dispatch::handlers::{self, UNAVAILABLE_MESSAGE};
use crate::dispatch::{
    cheeky_rules, core_rules, fantasy_rules, BaseContext, DispatchContext, Enrichment, RuleSet,
};
use crate::errors::{FetchError, RuleError};
use crate::league::LeagueCache;
use crate::observability::messages::dispatch::{
    EnrichmentFailed, HandlerOutput, PostFailed, RulesMatched,
};
use crate::observability::messages::StructuredLog;
use crate::rules::{RuleEngine, RuleMatch, RuleMatches};
use crate::traits::OutputSink;

/// Who the bot is, as seen by its rules and replies.
#[derive(Debug, Clone, PartialEq)]
pub struct BotIdentity {
    pub name: String,
    pub user_id: String,
    pub author: Option<String>,
    pub website: Option<String>,
}

impl BotIdentity {
    pub fn new(name: &str, user_id: &str) -> Self {
        Self {
            name: name.to_string(),
            user_id: user_id.to_string(),
            author: None,
            website: None,
        }
    }

    pub fn with_credits(mut self, author: Option<String>, website: Option<String>) -> Self {
        self.author = author;
        self.website = website;
        self
    }

    pub fn from_agent(name: &str, agent: &AgentConfig) -> Self {
        Self::new(name, &agent.user_id).with_credits(agent.author.clone(), agent.website.clone())
    }

    /// The in-text mention form, e.g. `<@U024BE7LH>`.
    pub fn mention(&self) -> String {
        format!("<@{}>", self.user_id)
    }
}

pub struct DispatcherBuilder {
    identity: BotIdentity,
    sets: Vec<RuleSet>,
    league: Option<Arc<LeagueCache>>,
}

impl DispatcherBuilder {
    pub fn new(identity: BotIdentity) -> Self {
        Self {
            identity,
            sets: Vec::new(),
            league: None,
        }
    }

    pub fn league(mut self, cache: Arc<LeagueCache>) -> Self {
        self.league = Some(cache);
        self
    }

    /// Queue a rule set. Declarations already present are skipped at build.
    pub fn register(mut self, set: RuleSet) -> Self {
        self.sets.push(set);
        self
    }

    pub fn build(self) -> Result<ActionDispatcher, RuleError> {
        let mut engine = RuleEngine::new();
        let mut registered: Vec<HandlerEntry> = Vec::new();
        let mut enrichments: HashMap<String, Enrichment> = HashMap::new();

        for set in self.sets {
            for spec in set.rules {
                engine.register(spec)?;
            }
            for entry in set.handlers {
                let known = registered
                    .iter()
                    .any(|h| h.rule == entry.rule && h.key == entry.key);
                if !known {
                    registered.push(entry);
                }
            }
            for (rule, needs) in set.enrichments {
                let merged = enrichments.entry(rule).or_default();
                merged.league |= needs.league;
                merged.previous_season |= needs.previous_season;
                merged.week |= needs.week;
            }
        }

        let has_help_rule = engine.rules().iter().any(|r| r.name() == "help");
        let has_help_handler = registered.iter().any(|h| h.rule == "help");
        if has_help_rule && !has_help_handler {
            registered.push(HandlerEntry {
                rule: "help".to_string(),
                key: "help".to_string(),
                handler: Arc::new(handlers::help(engine.help_lines())),
            });
        }

        Ok(ActionDispatcher {
            identity: self.identity,
            engine,
            handlers: registered,
            enrichments,
            league: self.league,
        })
    }
}

/// Maps matched rule names to handlers and posts what they produce.
pub struct ActionDispatcher {
    identity: BotIdentity,
    engine: RuleEngine,
    handlers: Vec<HandlerEntry>,
    enrichments: HashMap<String, Enrichment>,
    league: Option<Arc<LeagueCache>>,
}

impl ActionDispatcher {
    pub fn builder(identity: BotIdentity) -> DispatcherBuilder {
        DispatcherBuilder::new(identity)
    }

    /// The standard composition: core and fantasy rules, plus cheeky rules
    /// when enabled.
    pub fn standard(
        identity: BotIdentity,
        cheeky: bool,
        league: Option<Arc<LeagueCache>>,
    ) -> Result<Self, RuleError> {
        let mut builder = Self::builder(identity.clone())
            .register(core_rules(&identity))
            .register(fantasy_rules(&identity));
        if cheeky {
            builder = builder.register(cheeky_rules());
        }
        if let Some(cache) = league {
            builder = builder.league(cache);
        }
        builder.build()
    }

    pub fn identity(&self) -> &BotIdentity {
        &self.identity
    }

    pub fn engine(&self) -> &RuleEngine {
        &self.engine
    }

    pub fn handler_count(&self, rule: &str) -> usize {
        self.handlers.iter().filter(|h| h.rule == rule).count()
    }

    pub fn match_text(&self, text: &str) -> Option<RuleMatches> {
        self.engine.match_text(text)
    }

    /// Run every handler for every match and post the outputs to `sink`.
    ///
    /// Returns the produced outputs in the order they were posted. A failed
    /// post is logged and does not stop the cycle.
    pub async fn dispatch<S>(&self, matches: &RuleMatches, base: &BaseContext, sink: &S) -> Vec<String>
    where
        S: OutputSink + ?Sized,
    {
        let names = matches.names().join(", ");
        let matched = RulesMatched {
            channel: &base.channel.name,
            user: &base.user.name,
            rules: &names,
        };
        matched.log();

        self.run_handlers(matches, base, sink)
            .instrument(matched.span("dispatch_cycle"))
            .await
    }

    async fn run_handlers<S>(&self, matches: &RuleMatches, base: &BaseContext, sink: &S) -> Vec<String>
    where
        S: OutputSink + ?Sized,
    {
        let mut outputs = Vec::new();
        for found in matches.iter() {
            let entries: Vec<&HandlerEntry> = self
                .handlers
                .iter()
                .filter(|h| h.rule == found.rule_name)
                .collect();
            if entries.is_empty() {
                continue;
            }

            let ctx = match self.build_context(found, base).await {
                Some(ctx) => ctx,
                None => {
                    self.deliver(sink, found, base, UNAVAILABLE_MESSAGE.to_string(), &mut outputs)
                        .await;
                    continue;
                }
            };

            for entry in entries {
                let local = ctx.clone();
                if let Some(text) = entry.handler.handle(&local) {
                    self.deliver(sink, found, base, text, &mut outputs).await;
                }
            }
        }
        outputs
    }

    /// `None` when a required lookup failed.
    async fn build_context(&self, found: &RuleMatch, base: &BaseContext) -> Option<DispatchContext> {
        let mut ctx = DispatchContext::new(base, found);
        let needs = self
            .enrichments
            .get(&found.rule_name)
            .copied()
            .unwrap_or_default();
        if needs.is_empty() {
            return Some(ctx);
        }

        let rule = found.rule_name.as_str();
        let Some(cache) = self.league.as_ref() else {
            EnrichmentFailed {
                rule,
                error: &FetchError::NotFound("no league configured".to_string()),
            }
            .log();
            return None;
        };

        if needs.league {
            match cache.get(None).await {
                Ok(league) => ctx.league = Some(league),
                Err(error) => {
                    EnrichmentFailed { rule, error: &error }.log();
                    return None;
                }
            }
        }
        if needs.week {
            match cache.current_week().await {
                Ok(week) => ctx.week = Some(week),
                Err(error) => {
                    EnrichmentFailed { rule, error: &error }.log();
                    return None;
                }
            }
        }
        if needs.previous_season {
            match cache.previous_season().await {
                Ok(previous) => ctx.previous_league = Some(previous),
                Err(error) => EnrichmentFailed { rule, error: &error }.log(),
            }
        }
        Some(ctx)
    }

    async fn deliver<S>(
        &self,
        sink: &S,
        found: &RuleMatch,
        base: &BaseContext,
        text: String,
        outputs: &mut Vec<String>,
    ) where
        S: OutputSink + ?Sized,
    {
        HandlerOutput {
            rule: &found.rule_name,
            channel_id: &base.channel.id,
            output_len: text.len(),
        }
        .log();

        if let Err(error) = sink.post(&base.channel.id, &text).await {
            PostFailed {
                channel_id: &base.channel.id,
                error: &error,
            }
            .log();
        }
        outputs.push(text);
    }
}
