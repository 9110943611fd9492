// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! League data model and the TTL caches in front of the league provider.

mod cache;
mod league_cache;
mod model;

pub use cache::{CacheEntry, TtlCache};
pub use league_cache::LeagueCache;
pub use model::{LeagueSettings, LeagueSnapshot, Matchup, Player, Team};
