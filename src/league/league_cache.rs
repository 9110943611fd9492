// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::{LeagueAuth, LeagueConfig};
use crate::errors::{CacheError, FetchError};
use crate::league::{LeagueSnapshot, TtlCache};
use crate::traits::{Fetcher, LeagueSource};

/// Season snapshots and the current week for one configured league.
///
/// Snapshots are keyed by season year. The current week is a separate,
/// shorter-lived fact with its own cache so it can roll over without
/// refetching the whole league.
pub struct LeagueCache {
    year: u16,
    seasons: TtlCache<u16, Arc<LeagueSnapshot>>,
    weeks: TtlCache<u16, u32>,
}

impl LeagueCache {
    pub fn new(source: Arc<dyn LeagueSource>, league: &LeagueConfig) -> Self {
        Self::with_ttls(
            source,
            league.id,
            league.year,
            league.auth.clone(),
            league.ttl(),
            league.week_ttl(),
        )
    }

    pub fn with_ttls(
        source: Arc<dyn LeagueSource>,
        league_id: u64,
        year: u16,
        auth: LeagueAuth,
        ttl: Duration,
        week_ttl: Duration,
    ) -> Self {
        let seasons = SeasonFetcher {
            source: source.clone(),
            league_id,
            auth,
        };
        let weeks = WeekFetcher { source, league_id };

        Self {
            year,
            seasons: TtlCache::new("league_seasons", ttl, Arc::new(seasons)),
            weeks: TtlCache::new("league_week", week_ttl, Arc::new(weeks)),
        }
    }

    /// The configured season year.
    pub fn year(&self) -> u16 {
        self.year
    }

    /// Snapshot for `year`, or for the configured season when `None`.
    pub async fn get(&self, year: Option<u16>) -> Result<Arc<LeagueSnapshot>, CacheError> {
        self.seasons.get(year.unwrap_or(self.year)).await
    }

    pub async fn previous_season(&self) -> Result<Arc<LeagueSnapshot>, CacheError> {
        self.seasons.get(self.year.saturating_sub(1)).await
    }

    pub async fn current_week(&self) -> Result<u32, CacheError> {
        self.weeks.get(self.year).await
    }
}

struct SeasonFetcher {
    source: Arc<dyn LeagueSource>,
    league_id: u64,
    auth: LeagueAuth,
}

#[async_trait]
impl Fetcher<u16, Arc<LeagueSnapshot>> for SeasonFetcher {
    async fn fetch(&self, year: u16) -> Result<Arc<LeagueSnapshot>, FetchError> {
        self.source
            .fetch_league(self.league_id, year, &self.auth)
            .await
            .map(Arc::new)
    }

    fn name(&self) -> &str {
        "season"
    }
}

struct WeekFetcher {
    source: Arc<dyn LeagueSource>,
    league_id: u64,
}

#[async_trait]
impl Fetcher<u16, u32> for WeekFetcher {
    async fn fetch(&self, year: u16) -> Result<u32, FetchError> {
        self.source.fetch_current_week(self.league_id, year).await
    }

    fn name(&self) -> &str {
        "week"
    }
}
