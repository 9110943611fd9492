// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};

/// Everything the provider returns for one league season.
///
/// Opponents in a team's schedule are stored as team ids rather than
/// references, so a snapshot is plain data and can be cached and shared
/// behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueSnapshot {
    pub settings: LeagueSettings,
    pub teams: Vec<Team>,
    #[serde(default)]
    pub players: Vec<Player>,
    /// Week the provider considers current, when it includes one
    #[serde(default)]
    pub current_week: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueSettings {
    pub name: String,
    pub year: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub team_id: u32,
    pub team_name: String,
    /// Owner's full name
    pub owner: String,
    /// Links the team to a league member (`Player::player_id`)
    pub owner_id: String,
    /// Final (or current) overall standing, 1-based
    #[serde(default)]
    pub overall_standing: Option<u32>,
    /// Points per week, index 0 is week 1
    #[serde(default)]
    pub scores: Vec<f64>,
    /// Opponent team id per week, index 0 is week 1
    #[serde(default)]
    pub schedule: Vec<u32>,
}

impl Team {
    pub fn owner_first_name(&self) -> &str {
        self.owner.split_whitespace().next().unwrap_or("")
    }
}

/// A league member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub player_id: String,
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub user_name: String,
}

impl Player {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// One team's game in one week.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matchup<'a> {
    pub week: u32,
    pub team: &'a Team,
    pub opponent: &'a Team,
    pub score: f64,
    pub opponent_score: f64,
}

impl LeagueSnapshot {
    pub fn team(&self, team_id: u32) -> Option<&Team> {
        self.teams.iter().find(|t| t.team_id == team_id)
    }

    pub fn player_by_first_name(&self, first_name: &str) -> Option<&Player> {
        self.players
            .iter()
            .find(|p| p.first_name.trim().eq_ignore_ascii_case(first_name))
    }

    pub fn team_owned_by(&self, player_id: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.owner_id == player_id)
    }

    pub fn team_by_owner_first_name(&self, first_name: &str) -> Option<&Team> {
        self.teams
            .iter()
            .find(|t| t.owner_first_name().eq_ignore_ascii_case(first_name))
    }

    /// The game `team` plays in `week` (1-based). Missing scores count as zero.
    pub fn matchup<'a>(&'a self, team: &'a Team, week: u32) -> Option<Matchup<'a>> {
        let index = usize::try_from(week.checked_sub(1)?).ok()?;
        let opponent = self.team(*team.schedule.get(index)?)?;

        Some(Matchup {
            week,
            team,
            opponent,
            score: team.scores.get(index).copied().unwrap_or(0.0),
            opponent_score: opponent.scores.get(index).copied().unwrap_or(0.0),
        })
    }
}
