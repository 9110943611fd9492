// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Action dispatch: from matched rules to posted replies.
//!
//! A dispatcher is composed from [`RuleSet`]s. Each set contributes rule
//! declarations, the handlers that fire for them, and the enrichment each
//! rule needs before its handlers run. Specialising a bot means passing a
//! different collection of sets, not subclassing anything.

mod builtin;
mod context;
mod dispatcher;
mod format;
mod handlers;

pub use builtin::{cheeky_rules, core_rules, fantasy_rules, HandlerEntry, RuleSet};
pub use context::{BaseContext, ChannelRef, DispatchContext, Enrichment, Subject};
pub use dispatcher::{ActionDispatcher, BotIdentity, DispatcherBuilder};
pub use format::{format_matchup, format_score, ordinal};
pub use handlers::{UNAVAILABLE_MESSAGE, unknown_person};
