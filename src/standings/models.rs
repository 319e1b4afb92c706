use serde::{Deserialize, Serialize};

use crate::scoring::Special;

/// Season-cumulative totals for one (user, year)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StandingsRecord {
    pub username: String,
    pub year: i32,
    pub total_points: f64,
    pub perfect_weeks: u32,
    #[serde(default)]
    pub weeks_scored: u32,
}

impl StandingsRecord {
    pub fn new(username: &str, year: i32) -> Self {
        Self {
            username: username.to_string(),
            year,
            ..Self::default()
        }
    }

    /// Adds one week's contribution
    pub fn apply_week(&mut self, points: f64, perfect_week: bool) {
        self.total_points += points;
        self.weeks_scored += 1;
        if perfect_week {
            self.perfect_weeks += 1;
        }
    }
}

/// A ranked row of the season leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandingsEntry {
    pub rank: u32,
    pub username: String,
    pub total_points: f64,
    pub perfect_weeks: u32,
}

/// A ranked row of one week's scoreboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreboardEntry {
    pub rank: u32,
    pub username: String,
    pub points: f64,
    pub wins: u8,
    pub perfect_week: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSeasonStats {
    pub username: String,
    pub year: i32,
    pub total_points: f64,
    pub perfect_weeks: u32,
    pub weeks_played: u32,
    pub specials_used: Vec<Special>,
    pub average_points: f64,
}
