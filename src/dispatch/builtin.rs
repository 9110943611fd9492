// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use regex::escape;

use crate::dispatch::handlers;
use crate::dispatch::{BotIdentity, Enrichment};
use crate::rules::RuleSpec;
use crate::traits::Handler;

/// A named handler belonging to a rule.
///
/// `key` identifies the handler within its rule so that registering the
/// same set twice does not fan out twice.
#[derive(Clone)]
pub struct HandlerEntry {
    pub rule: String,
    pub key: String,
    pub handler: Arc<dyn Handler>,
}

impl std::fmt::Debug for HandlerEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerEntry")
            .field("rule", &self.rule)
            .field("key", &self.key)
            .finish()
    }
}

/// Rules, handlers and enrichment needs that are registered together.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    pub rules: Vec<RuleSpec>,
    pub handlers: Vec<HandlerEntry>,
    pub enrichments: Vec<(String, Enrichment)>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rule(mut self, spec: RuleSpec) -> Self {
        self.rules.push(spec);
        self
    }

    pub fn handler(mut self, rule: &str, key: &str, handler: impl Handler + 'static) -> Self {
        self.handlers.push(HandlerEntry {
            rule: rule.to_lowercase(),
            key: key.to_string(),
            handler: Arc::new(handler),
        });
        self
    }

    pub fn enrich(mut self, rule: &str, needs: Enrichment) -> Self {
        self.enrichments.push((rule.to_lowercase(), needs));
        self
    }
}

/// Identity, help and (when configured) author credits.
///
/// The help handler itself is attached by the dispatcher builder, since it
/// has to see every registered rule.
pub fn core_rules(identity: &BotIdentity) -> RuleSet {
    let mention = identity.mention();
    let mut set = RuleSet::new()
        .rule(
            RuleSpec::any("about:bot", format!("(?i)(?:about|who is) {}", escape(&identity.name)))
                .with_help("about the bot", [format!("who is {}", identity.name)]),
        )
        .handler("about:bot", "about_bot", handlers::about_bot(identity))
        .rule(
            RuleSpec::prefix("help", format!(r"{} help\b", escape(&mention)))
                .with_help("help", [format!("@{} help", identity.name)]),
        );

    if let Some(author) = identity.author.as_deref() {
        set = set
            .rule(RuleSpec::any("about:author", format!("(?i){}", escape(author))))
            .handler(
                "about:author",
                "about_author",
                handlers::about_author(author, identity.website.as_deref()),
            );
    }
    set
}

/// League queries answered from the league cache.
pub fn fantasy_rules(identity: &BotIdentity) -> RuleSet {
    let at = escape(&identity.mention());
    let name = &identity.name;

    RuleSet::new()
        .rule(
            RuleSpec::prefix("matchup", format!(r"{} show (\w+)(?:'s|')? matchup\b", at))
                .with_help(
                    "show a matchup",
                    [
                        format!("@{} show Alice's matchup", name),
                        format!("@{} show my matchup", name),
                    ],
                ),
        )
        .handler("matchup", "matchup", handlers::matchup)
        .enrich("matchup", Enrichment::league_and_week())
        .rule(
            RuleSpec::prefix("matchups_all", format!(r"{} show all matchups", at))
                .with_help("show all matchups", [format!("@{} show all matchups", name)]),
        )
        .handler("matchups_all", "matchups_all", handlers::matchups_all)
        .enrich("matchups_all", Enrichment::league_and_week())
        .rule(
            RuleSpec::prefix(
                "tell",
                format!(r"(?i){} (?:tell me|what|how) about (\w+)(?:'s|')? team", at),
            )
            .with_help(
                "an honest opinion",
                [format!("@{} tell me about Alice's team", name)],
            ),
        )
        .handler("tell", "tell", handlers::tell)
        .enrich("tell", Enrichment::league_and_previous_season())
}

/// Keyword reactions; enabled per agent with `cheeky`.
pub fn cheeky_rules() -> RuleSet {
    RuleSet::new()
        .rule(RuleSpec::any("brady", "(?i)brady"))
        .handler("brady", "brady", handlers::brady)
        .rule(RuleSpec::any("geno", "(?i)g+e+n+o+"))
        .handler("geno", "geno", handlers::geno)
        .rule(RuleSpec::any("jets", "(?i)j+-*e+-*t+-*s+"))
        .rule(RuleSpec::any("jets", "(?i)fumble"))
        .handler("jets", "jets", handlers::jets)
        .rule(RuleSpec::any("lacy", "(?i)lacy"))
        .handler("lacy", "lacy", handlers::lacy)
}
