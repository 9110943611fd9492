// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::config::LeagueAuth;
use crate::errors::FetchError;
use crate::league::LeagueSnapshot;
use crate::traits::{ArticleSource, LeagueSource};

/// League seasons stored as `<dir>/<year>.json`.
pub struct FixtureLeagueSource {
    dir: PathBuf,
}

impl FixtureLeagueSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    async fn load(&self, year: u16) -> Result<LeagueSnapshot, FetchError> {
        let path = self.dir.join(format!("{}.json", year));
        let raw = read(&path).await?;
        serde_json::from_str(&raw).map_err(|e| FetchError::Parse(format!("{}: {}", path.display(), e)))
    }
}

#[async_trait]
impl LeagueSource for FixtureLeagueSource {
    async fn fetch_league(
        &self,
        _league_id: u64,
        year: u16,
        _auth: &LeagueAuth,
    ) -> Result<LeagueSnapshot, FetchError> {
        self.load(year).await
    }

    async fn fetch_current_week(&self, _league_id: u64, year: u16) -> Result<u32, FetchError> {
        self.load(year)
            .await?
            .current_week
            .ok_or_else(|| FetchError::NotFound(format!("current week for {}", year)))
    }
}

/// Articles read from local files; the first non-empty line is the title.
#[derive(Debug, Default)]
pub struct FileArticleSource;

#[async_trait]
impl ArticleSource for FileArticleSource {
    async fn fetch_one(&self, url: &str) -> Result<(String, String), FetchError> {
        let path = Path::new(url.strip_prefix("file://").unwrap_or(url));
        let raw = read(path).await?;

        let mut lines = raw.lines().skip_while(|l| l.trim().is_empty());
        let title = lines.next().unwrap_or_default().trim().to_string();
        let content = lines.collect::<Vec<_>>().join("\n").trim().to_string();
        Ok((content, title))
    }
}

async fn read(path: &Path) -> Result<String, FetchError> {
    tokio::fs::read_to_string(path).await.map_err(|e| match e.kind() {
        ErrorKind::NotFound => FetchError::NotFound(path.display().to_string()),
        _ => FetchError::Unavailable(format!("{}: {}", path.display(), e)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::stub::sample_league;
    use tempfile::TempDir;

    fn write_season(dir: &Path, year: u16, week: Option<u32>) {
        let mut league = sample_league(year);
        league.current_week = week;
        std::fs::write(
            dir.join(format!("{}.json", year)),
            serde_json::to_string(&league).unwrap(),
        )
        .unwrap();
    }

    #[tokio::test]
    async fn test_reads_season_and_week() {
        let dir = TempDir::new().unwrap();
        write_season(dir.path(), 2017, Some(5));
        let source = FixtureLeagueSource::new(dir.path());

        let league = source.fetch_league(1, 2017, &LeagueAuth::default()).await.unwrap();
        assert_eq!(league.teams.len(), 4);
        assert_eq!(source.fetch_current_week(1, 2017).await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_missing_season_and_week() {
        let dir = TempDir::new().unwrap();
        write_season(dir.path(), 2016, None);
        let source = FixtureLeagueSource::new(dir.path());

        assert!(matches!(
            source.fetch_league(1, 2015, &LeagueAuth::default()).await,
            Err(FetchError::NotFound(_))
        ));
        assert!(matches!(
            source.fetch_current_week(1, 2016).await,
            Err(FetchError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_malformed_season_is_parse_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("2017.json"), "[]").unwrap();
        let source = FixtureLeagueSource::new(dir.path());

        assert!(matches!(
            source.fetch_league(1, 2017, &LeagueAuth::default()).await,
            Err(FetchError::Parse(_))
        ));
    }

    #[tokio::test]
    async fn test_file_article_title_and_body() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("story.txt");
        std::fs::write(&path, "\nWaiver Wire Week 5\n\nPick up everyone.\n").unwrap();

        let url = format!("file://{}", path.display());
        let (content, title) = FileArticleSource.fetch_one(&url).await.unwrap();

        assert_eq!(title, "Waiver Wire Week 5");
        assert_eq!(content, "Pick up everyone.");
    }
}
