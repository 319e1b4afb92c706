use pickem::{picks::LockedLine, GameResult, PickRecord, PickSlot, TotalHelper, TotalSide};

use super::setup::YEAR;

// ============================================================================
// Weekly Slate
// ============================================================================

/// The same four games are offered every week
pub fn slate() -> Vec<LockedLine> {
    [
        ("Chiefs", "Bills", -7.0, 47.5),
        ("Lions", "Bears", -3.5, 44.0),
        ("Jets", "Dolphins", 2.5, 40.5),
        ("Packers", "Vikings", -1.0, 47.5),
    ]
    .into_iter()
    .map(|(home, away, home_spread, total)| LockedLine {
        home_team: home.to_string(),
        away_team: away.to_string(),
        home_spread,
        total,
    })
    .collect()
}

// ============================================================================
// Pick Builders
// ============================================================================

/// Starts from Chiefs favorite, Bears underdog, Dolphins/Jets over, Vikings/Packers under
pub struct PickBuilder {
    record: PickRecord,
}

impl PickBuilder {
    pub fn new(username: &str, week: u32) -> Self {
        let lines = slate();
        let mut record = PickRecord::new(username, week, YEAR);
        record.favorite = Some(lines[0].favorite());
        record.underdog = Some(lines[1].underdog());
        record.over = Some(lines[2].total_pick(TotalSide::Over));
        record.under = Some(lines[3].total_pick(TotalSide::Under));
        Self { record }
    }

    pub fn with_selection(mut self, slot: PickSlot, raw: &str) -> Self {
        self.record
            .set_selection(slot, Some(raw.to_string().into()));
        self
    }

    #[allow(dead_code)]
    pub fn super_spread(mut self) -> Self {
        self.record.super_spread = true;
        self
    }

    #[allow(dead_code)]
    pub fn perfect_prediction(mut self) -> Self {
        self.record.perfect_prediction = true;
        self
    }

    #[allow(dead_code)]
    pub fn total_helper(mut self, helper: TotalHelper, adjustment: f64) -> Self {
        self.record.total_helper = helper;
        self.record.total_helper_adjustment = adjustment;
        self
    }

    #[allow(dead_code)]
    pub fn submitted_at(mut self, timestamp: &str) -> Self {
        self.record.submission_time = Some(timestamp.to_string());
        self
    }

    pub fn build(self) -> PickRecord {
        self.record
    }
}

// ============================================================================
// Result Builders
// ============================================================================

pub struct ResultsBuilder {
    week: u32,
    games: Vec<GameResult>,
}

impl ResultsBuilder {
    pub fn new(week: u32) -> Self {
        Self {
            week,
            games: vec![],
        }
    }

    pub fn game(mut self, home: &str, away: &str, home_score: u32, away_score: u32) -> Self {
        self.games.push(GameResult::final_score(
            self.week, YEAR, home, away, home_score, away_score,
        ));
        self
    }

    /// Every default `PickBuilder` pick wins; the favorite covers but not by double
    pub fn default_picks_win(self) -> Self {
        self.game("Chiefs", "Bills", 30, 20)
            .game("Lions", "Bears", 21, 20)
            .game("Jets", "Dolphins", 24, 20)
            .game("Packers", "Vikings", 20, 17)
    }

    /// Default picks go 3/4: the under misses
    #[allow(dead_code)]
    pub fn default_picks_win_three(self) -> Self {
        self.game("Chiefs", "Bills", 30, 20)
            .game("Lions", "Bears", 21, 20)
            .game("Jets", "Dolphins", 24, 20)
            .game("Packers", "Vikings", 31, 24)
    }

    pub fn build(self) -> Vec<GameResult> {
        self.games
    }
}
