// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! In-memory collaborators for tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::config::LeagueAuth;
use crate::errors::{ChatError, FetchError};
use crate::league::{LeagueSettings, LeagueSnapshot, Player, Team};
use crate::traits::{ArticleSource, ChatClient, InboundEvent, LeagueSource, OutputSink, UserProfile};

/// A four-team league with six scheduled weeks.
///
/// Week 5: Alice Smith's "Alpha Dogs" (105.0) vs. Bob Jones's "Bob's Team"
/// (98.5), and Carol vs. Dave. Final standings in 2016 follow the team ids.
pub fn sample_league(year: u16) -> LeagueSnapshot {
    let owners = [
        (1, "Alpha Dogs", "Alice", "Smith"),
        (2, "Bob's Team", "Bob", "Jones"),
        (3, "Carol's Crew", "Carol", "White"),
        (4, "Dave's Dynasty", "Dave", "Brown"),
    ];
    let schedules: [[u32; 6]; 4] = [
        [3, 4, 2, 3, 2, 4],
        [4, 3, 1, 4, 1, 3],
        [1, 2, 4, 1, 4, 2],
        [2, 1, 3, 2, 3, 1],
    ];
    let scores: [[f64; 6]; 4] = [
        [110.0, 95.5, 120.0, 88.0, 105.0, 101.0],
        [90.0, 100.0, 87.5, 112.0, 98.5, 93.0],
        [99.0, 81.0, 104.5, 77.0, 120.25, 110.0],
        [85.0, 92.0, 91.0, 101.5, 64.0, 99.5],
    ];

    let teams = owners
        .iter()
        .enumerate()
        .map(|(i, (id, team_name, first, last))| Team {
            team_id: *id,
            team_name: team_name.to_string(),
            owner: format!("{} {}", first, last),
            owner_id: format!("p{}", id),
            overall_standing: Some(if year == 2016 { *id } else { 5 - *id }),
            scores: scores[i].to_vec(),
            schedule: schedules[i].to_vec(),
        })
        .collect();

    let players = owners
        .iter()
        .map(|(id, _, first, last)| Player {
            player_id: format!("p{}", id),
            first_name: first.to_string(),
            last_name: last.to_string(),
            user_name: first.to_lowercase(),
        })
        .collect();

    LeagueSnapshot {
        settings: LeagueSettings {
            name: "Stub League".to_string(),
            year,
        },
        teams,
        players,
        current_week: None,
    }
}

/// League source serving [`sample_league`] for any year, with counters.
pub struct StubLeagueSource {
    week: AtomicU32,
    available: AtomicBool,
    league_fetches: AtomicUsize,
    week_fetches: AtomicUsize,
}

impl StubLeagueSource {
    pub fn sample(_year: u16, week: u32) -> Self {
        Self {
            week: AtomicU32::new(week),
            available: AtomicBool::new(true),
            league_fetches: AtomicUsize::new(0),
            week_fetches: AtomicUsize::new(0),
        }
    }

    pub fn set_week(&self, week: u32) {
        self.week.store(week, Ordering::SeqCst);
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub fn league_fetches(&self) -> usize {
        self.league_fetches.load(Ordering::SeqCst)
    }

    pub fn week_fetches(&self) -> usize {
        self.week_fetches.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> Result<(), FetchError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(FetchError::Unavailable("stub offline".to_string()))
        }
    }
}

#[async_trait]
impl LeagueSource for StubLeagueSource {
    async fn fetch_league(
        &self,
        _league_id: u64,
        year: u16,
        _auth: &LeagueAuth,
    ) -> Result<LeagueSnapshot, FetchError> {
        self.league_fetches.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        Ok(sample_league(year))
    }

    async fn fetch_current_week(&self, _league_id: u64, _year: u16) -> Result<u32, FetchError> {
        self.week_fetches.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        Ok(self.week.load(Ordering::SeqCst))
    }
}

/// Output sink that records posts and can be told to fail.
#[derive(Default)]
pub struct RecordingSink {
    posts: Mutex<Vec<(String, String)>>,
    fail: AtomicBool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_posts(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn posts(&self) -> Vec<(String, String)> {
        self.posts.lock().unwrap().clone()
    }
}

#[async_trait]
impl OutputSink for RecordingSink {
    async fn post(&self, channel_id: &str, text: &str) -> Result<(), ChatError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(ChatError::Transport("sink closed".to_string()));
        }
        self.posts
            .lock()
            .unwrap()
            .push((channel_id.to_string(), text.to_string()));
        Ok(())
    }
}

/// Chat client replaying scripted batches.
///
/// Channels: `C1` is "fantasy", `C9` is "random". Users: `U1` Alice,
/// `U2` Bob.
pub struct ScriptedChat {
    batches: Mutex<VecDeque<Vec<InboundEvent>>>,
    posts: RecordingSink,
    connect: AtomicBool,
    fail_next_read: AtomicBool,
}

impl Default for ScriptedChat {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedChat {
    pub fn new() -> Self {
        Self {
            batches: Mutex::new(VecDeque::new()),
            posts: RecordingSink::new(),
            connect: AtomicBool::new(true),
            fail_next_read: AtomicBool::new(false),
        }
    }

    pub fn push_batch(&self, events: Vec<InboundEvent>) {
        self.batches.lock().unwrap().push_back(events);
    }

    pub fn set_connect(&self, ok: bool) {
        self.connect.store(ok, Ordering::SeqCst);
    }

    pub fn fail_next_read(&self) {
        self.fail_next_read.store(true, Ordering::SeqCst);
    }

    pub fn posts(&self) -> Vec<(String, String)> {
        self.posts.posts()
    }
}

#[async_trait]
impl ChatClient for ScriptedChat {
    async fn connect(&self) -> bool {
        self.connect.load(Ordering::SeqCst)
    }

    async fn read_events(&self) -> Result<Vec<InboundEvent>, ChatError> {
        if self.fail_next_read.swap(false, Ordering::SeqCst) {
            return Err(ChatError::Transport("read failed".to_string()));
        }
        Ok(self.batches.lock().unwrap().pop_front().unwrap_or_default())
    }

    async fn post_message(&self, channel_id: &str, text: &str) -> Result<(), ChatError> {
        self.posts.post(channel_id, text).await
    }

    async fn resolve_channel_name(&self, channel_id: &str) -> Result<Option<String>, ChatError> {
        Ok(match channel_id {
            "C1" => Some("fantasy".to_string()),
            "C9" => Some("random".to_string()),
            _ => None,
        })
    }

    async fn resolve_user_name(&self, user_id: &str) -> Result<Option<UserProfile>, ChatError> {
        let (name, first_name) = match user_id {
            "U1" => ("asmith", "Alice"),
            "U2" => ("bjones", "Bob"),
            _ => return Ok(None),
        };
        Ok(Some(UserProfile {
            id: user_id.to_string(),
            name: name.to_string(),
            first_name: first_name.to_string(),
        }))
    }
}

/// Article source returning canned content; URLs containing "broken" fail.
#[derive(Default)]
pub struct StubArticleSource {
    fetched: Mutex<Vec<String>>,
}

impl StubArticleSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every URL fetched so far, failures excluded.
    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }
}

#[async_trait]
impl ArticleSource for StubArticleSource {
    async fn fetch_one(&self, url: &str) -> Result<(String, String), FetchError> {
        if url.contains("broken") {
            return Err(FetchError::NotFound(url.to_string()));
        }
        self.fetched.lock().unwrap().push(url.to_string());
        Ok((format!("Body of {}", url), format!("Title of {}", url)))
    }
}
