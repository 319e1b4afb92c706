use std::path::Path;

use serde::{Deserialize, Serialize};

use super::LeagueError;
use crate::picks::PickRecord;
use crate::results::GameResult;

/// Stored picks and results for a league, as read from a JSON export
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeagueSnapshot {
    #[serde(default)]
    pub picks: Vec<PickRecord>,
    #[serde(default)]
    pub results: Vec<GameResult>,
}

impl LeagueSnapshot {
    pub fn from_json(raw: &str) -> Result<Self, LeagueError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, LeagueError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|err| LeagueError::Snapshot(format!("{}: {err}", path.display())))?;
        Self::from_json(&raw)
    }
}
