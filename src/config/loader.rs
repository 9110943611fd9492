// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::{
    DEFAULT_FIXTURE_DIR, DEFAULT_LOG_DIR, DEFAULT_POLL_INTERVAL_MS, DEFAULT_TTL_MINUTES,
    DEFAULT_WEEK_TTL_MINUTES,
};
use crate::errors::ConfigError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level configuration document.
///
/// One file can describe several agents; each agent gets its own chat
/// credential, channel allow-list and league.
///
/// # Example
/// ```yaml
/// logging:
///   dir: logs
/// agents:
///   squirtle:
///     api_token: "xoxb-1234"
///     user_id: "U024BE7LH"
///     channels: [general, fantasy]
///     league:
///       id: 336358
///       year: 2017
///       auth: { espn_s2: "abc", swid: "{def}" }
/// ```
#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub articles: Option<ArticlesConfig>,
    #[serde(default)]
    pub agents: BTreeMap<String, AgentConfig>,
}

/// Where the append-only run log goes.
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_dir")]
    pub dir: PathBuf,
    #[serde(default)]
    pub debug: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: default_log_dir(),
            debug: false,
        }
    }
}

/// Snapshot of previously seen article URLs.
#[derive(Debug, Deserialize)]
pub struct ArticlesConfig {
    pub snapshot_path: PathBuf,
    /// Article URLs collected once at startup; `file://` paths in the console harness
    #[serde(default)]
    pub urls: Vec<String>,
}

/// Per-agent settings.
#[derive(Debug, Deserialize)]
pub struct AgentConfig {
    pub api_token: String,
    /// The bot's own chat user id; used for its mention and to ignore its own posts
    pub user_id: String,
    pub channels: Vec<String>,
    #[serde(default = "default_true")]
    pub cheeky: bool,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    pub author: Option<String>,
    pub website: Option<String>,
    pub league: LeagueConfig,
}

impl AgentConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Fantasy league the agent reports on.
#[derive(Debug, Deserialize)]
pub struct LeagueConfig {
    pub id: u64,
    pub year: u16,
    #[serde(default)]
    pub auth: LeagueAuth,
    #[serde(default = "default_ttl_minutes")]
    pub ttl_minutes: u64,
    #[serde(default = "default_week_ttl_minutes")]
    pub week_ttl_minutes: u64,
    #[serde(default = "default_fixture_dir")]
    pub fixture_dir: PathBuf,
}

impl LeagueConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_minutes.saturating_mul(60))
    }

    pub fn week_ttl(&self) -> Duration {
        Duration::from_secs(self.week_ttl_minutes.saturating_mul(60))
    }
}

/// Cookies the league provider wants for private leagues.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct LeagueAuth {
    #[serde(default)]
    pub espn_s2: String,
    #[serde(default)]
    pub swid: String,
}

fn default_log_dir() -> PathBuf {
    PathBuf::from(DEFAULT_LOG_DIR)
}

fn default_fixture_dir() -> PathBuf {
    PathBuf::from(DEFAULT_FIXTURE_DIR)
}

fn default_true() -> bool {
    true
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

fn default_ttl_minutes() -> u64 {
    DEFAULT_TTL_MINUTES
}

fn default_week_ttl_minutes() -> u64 {
    DEFAULT_WEEK_TTL_MINUTES
}

/// Load a config from a YAML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    serde_yaml::from_str(&content).map_err(|e| ConfigError::Malformed {
        reason: e.to_string(),
    })
}

/// Load and validate a config from a YAML file
///
/// Every problem found is returned, not just the first, so a user can fix
/// the whole file in one pass.
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<Config, Vec<ConfigError>> {
    let cfg = load_config(path).map_err(|e| vec![e])?;
    crate::config::validate_config(&cfg)?;
    Ok(cfg)
}
