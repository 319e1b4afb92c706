// Library crate for the pick'em league engine
// This file exposes the public API for the binary and integration tests

pub mod config;
pub mod league;
pub mod picks;
pub mod results;
pub mod scoring;
pub mod standings;

// Re-export commonly used types for easier access in tests
pub use config::{ConfigError, LeagueConfig};
pub use league::{
    InMemoryLeagueRepository, LeagueError, LeagueRepository, LeagueService, LeagueSnapshot,
};
pub use picks::{LockedLine, PickRecord, PickSelection, PickSlot, TotalHelper, TotalSide};
pub use results::GameResult;
pub use scoring::{PickOutcome, ScoreStatus, SeasonCalendar, Special, WeeklyScore, WeeklyScorer};
pub use standings::{ScoreboardEntry, StandingsEntry, StandingsRecord, UserSeasonStats};
