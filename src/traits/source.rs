// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! External data collaborators.

use async_trait::async_trait;

use crate::config::LeagueAuth;
use crate::errors::FetchError;
use crate::league::LeagueSnapshot;

/// Fantasy league data provider. Consumed only through the league cache.
#[async_trait]
pub trait LeagueSource: Send + Sync {
    async fn fetch_league(
        &self,
        league_id: u64,
        year: u16,
        auth: &LeagueAuth,
    ) -> Result<LeagueSnapshot, FetchError>;

    async fn fetch_current_week(&self, league_id: u64, year: u16) -> Result<u32, FetchError>;
}

/// Retrieves one article as `(content, title)`. Consumed only through a fetch worker.
#[async_trait]
pub trait ArticleSource: Send + Sync {
    async fn fetch_one(&self, url: &str) -> Result<(String, String), FetchError>;
}
