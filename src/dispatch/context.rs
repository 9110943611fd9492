// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::league::LeagueSnapshot;
use crate::rules::RuleMatch;
use crate::traits::UserProfile;

/// A channel by id plus its resolved name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChannelRef {
    pub id: String,
    pub name: String,
}

/// Message metadata shared by every rule matched in one event.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseContext {
    pub text: String,
    pub channel: ChannelRef,
    pub user: UserProfile,
}

/// Which cached league facts a rule needs before its handlers run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Enrichment {
    pub league: bool,
    pub previous_season: bool,
    pub week: bool,
}

impl Enrichment {
    pub const NONE: Enrichment = Enrichment {
        league: false,
        previous_season: false,
        week: false,
    };

    pub fn league_and_week() -> Self {
        Self {
            league: true,
            week: true,
            ..Self::NONE
        }
    }

    pub fn league_and_previous_season() -> Self {
        Self {
            league: true,
            previous_season: true,
            ..Self::NONE
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }
}

/// Everything a handler sees for one matched rule.
///
/// Enrichment fields are `Some` only when the rule declared the need and the
/// lookup succeeded.
#[derive(Debug, Clone)]
pub struct DispatchContext {
    pub text: String,
    pub rule_name: String,
    pub matched: RuleMatch,
    pub channel: ChannelRef,
    pub user: UserProfile,
    pub league: Option<Arc<LeagueSnapshot>>,
    pub previous_league: Option<Arc<LeagueSnapshot>>,
    pub week: Option<u32>,
}

/// The person a query is about.
#[derive(Debug, Clone, PartialEq)]
pub struct Subject {
    pub first_name: String,
    /// The query used "my", i.e. the requester asked about themselves
    pub is_requester: bool,
}

impl DispatchContext {
    pub fn new(base: &BaseContext, matched: &RuleMatch) -> Self {
        Self {
            text: base.text.clone(),
            rule_name: matched.rule_name.clone(),
            matched: matched.clone(),
            channel: base.channel.clone(),
            user: base.user.clone(),
            league: None,
            previous_league: None,
            week: None,
        }
    }

    /// Capture group `index` of the rule's match (1-based).
    pub fn argument(&self, index: usize) -> Option<&str> {
        self.matched.group(index)
    }

    /// Resolve the first capture group to a person, mapping "my" to the
    /// requesting user's first name, or their user name when the profile
    /// has none.
    pub fn subject(&self) -> Option<Subject> {
        let named = self.argument(1)?;
        if named.eq_ignore_ascii_case("my") {
            let first_name = match self.user.first_name.trim() {
                "" => self.user.name.clone(),
                first => first.to_string(),
            };
            return Some(Subject {
                first_name,
                is_requester: true,
            });
        }
        Some(Subject {
            first_name: named.to_string(),
            is_requester: false,
        })
    }
}
