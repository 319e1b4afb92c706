pub mod aggregator;
pub mod models;

pub use aggregator::{
    apply_week, rank_standings, rebuild_standings, user_season_stats, weekly_scoreboard,
};
pub use models::{ScoreboardEntry, StandingsEntry, StandingsRecord, UserSeasonStats};
