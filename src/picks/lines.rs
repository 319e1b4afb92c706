use serde::{Deserialize, Serialize};

use super::selection::{PickSelection, SpreadPick, TotalPick, TotalSide};

/// A betting line frozen for the week. The spread is quoted from the home team's side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LockedLine {
    pub home_team: String,
    pub away_team: String,
    pub home_spread: f64,
    pub total: f64,
}

impl LockedLine {
    pub fn involves_team(&self, team: &str) -> bool {
        self.home_team == team || self.away_team == team
    }

    pub fn spread_for(&self, team: &str) -> Option<PickSelection> {
        let line = if team == self.home_team {
            self.home_spread
        } else if team == self.away_team {
            -self.home_spread
        } else {
            return None;
        };

        Some(spread_pick(team, line))
    }

    /// The team giving points. A pick'em line makes the home team the favorite.
    pub fn favorite(&self) -> PickSelection {
        if self.home_spread <= 0.0 {
            spread_pick(&self.home_team, self.home_spread)
        } else {
            spread_pick(&self.away_team, -self.home_spread)
        }
    }

    pub fn underdog(&self) -> PickSelection {
        if self.home_spread <= 0.0 {
            spread_pick(&self.away_team, -self.home_spread)
        } else {
            spread_pick(&self.home_team, self.home_spread)
        }
    }

    pub fn total_pick(&self, side: TotalSide) -> PickSelection {
        PickSelection::Total(TotalPick {
            team_a: self.away_team.clone(),
            team_b: self.home_team.clone(),
            side,
            line: self.total,
        })
    }

    /// Game key independent of home/away order
    pub fn game_key(&self) -> (String, String) {
        game_key(&self.home_team, &self.away_team)
    }
}

fn spread_pick(team: &str, line: f64) -> PickSelection {
    PickSelection::Spread(SpreadPick {
        team: team.to_string(),
        line,
    })
}

pub fn game_key(team_a: &str, team_b: &str) -> (String, String) {
    if team_a <= team_b {
        (team_a.to_string(), team_b.to_string())
    } else {
        (team_b.to_string(), team_a.to_string())
    }
}

/// Finds the locked line a selection was made from
pub fn line_for_selection<'a>(
    selection: &PickSelection,
    lines: &'a [LockedLine],
) -> Option<&'a LockedLine> {
    match selection {
        PickSelection::Spread(spread) => lines.iter().find(|line| line.involves_team(&spread.team)),
        PickSelection::Total(total) => lines
            .iter()
            .find(|line| total.involves(&line.home_team, &line.away_team)),
        PickSelection::Unparsed(_) => None,
    }
}
