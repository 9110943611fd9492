// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Keyword rules and the engine that matches them against message text.

mod engine;
mod rule;

pub use engine::{RuleEngine, RuleMatches};
pub(crate) use rule::capitalize;
pub use rule::{MatchMode, Rule, RuleMatch, RuleSpec};
