use serde::{Deserialize, Serialize};

use crate::picks::{PickSelection, PickSlot};

/// One game for a week. Scores stay empty until the game is final.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameResult {
    pub week: u32,
    pub year: i32,
    #[serde(default)]
    pub game_id: Option<String>,
    pub home_team: String,
    pub away_team: String,
    #[serde(default)]
    pub home_score: Option<u32>,
    #[serde(default)]
    pub away_score: Option<u32>,
    /// Home-side spread the game was offered at
    #[serde(default)]
    pub spread_line: Option<f64>,
    #[serde(default)]
    pub total_line: Option<f64>,
}

impl GameResult {
    pub fn final_score(
        week: u32,
        year: i32,
        home_team: &str,
        away_team: &str,
        home_score: u32,
        away_score: u32,
    ) -> Self {
        Self {
            week,
            year,
            game_id: None,
            home_team: home_team.to_string(),
            away_team: away_team.to_string(),
            home_score: Some(home_score),
            away_score: Some(away_score),
            spread_line: None,
            total_line: None,
        }
    }

    pub fn is_final(&self) -> bool {
        self.home_score.is_some() && self.away_score.is_some()
    }

    pub fn is_for_week(&self, week: u32, year: i32) -> bool {
        self.week == week && self.year == year
    }
}

/// A finished game matched to a pick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedGame<'a> {
    pub game: &'a GameResult,
    pub home_score: u32,
    pub away_score: u32,
}

impl<'a> ResolvedGame<'a> {
    fn from_final(game: &'a GameResult) -> Option<Self> {
        Some(Self {
            game,
            home_score: game.home_score?,
            away_score: game.away_score?,
        })
    }

    /// `(team, opponent)` final scores from `team`'s side
    pub fn scores_for(&self, team: &str) -> Option<(u32, u32)> {
        if team == self.game.home_team {
            Some((self.home_score, self.away_score))
        } else if team == self.game.away_team {
            Some((self.away_score, self.home_score))
        } else {
            None
        }
    }

    pub fn combined_score(&self) -> u32 {
        self.home_score + self.away_score
    }
}

/// Matches a selection to the finished game it refers to.
///
/// Spread selections match on either team name; total selections match the unordered
/// team pair. `None` means the game has not been played yet (or never will match), which
/// is a normal state rather than a fault.
pub fn resolve<'a>(
    selection: &PickSelection,
    results: &'a [GameResult],
) -> Option<ResolvedGame<'a>> {
    let mut finished = results.iter().filter(|game| game.is_final());

    let game = match selection {
        PickSelection::Spread(spread) => {
            finished.find(|game| game.home_team == spread.team || game.away_team == spread.team)
        }
        PickSelection::Total(total) => {
            finished.find(|game| total.involves(&game.home_team, &game.away_team))
        }
        PickSelection::Unparsed(_) => None,
    }?;

    ResolvedGame::from_final(game)
}

/// Resolves the selection held in `slot`, if any
pub fn resolve_slot<'a>(
    slot: PickSlot,
    record: &crate::picks::PickRecord,
    results: &'a [GameResult],
) -> Option<ResolvedGame<'a>> {
    record
        .selection(slot)
        .and_then(|selection| resolve(selection, results))
}
