use serde::{Deserialize, Serialize};

use super::specials::Special;
use crate::picks::{PickSelection, PickSlot};

/// Points for a win, in half-point units
pub const WIN_HALVES: i32 = 2;
/// Points for a push, in half-point units
pub const PUSH_HALVES: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PickOutcome {
    Win,
    Push,
    Loss,
}

impl PickOutcome {
    pub fn half_points(&self) -> i32 {
        match self {
            PickOutcome::Win => WIN_HALVES,
            PickOutcome::Push => PUSH_HALVES,
            PickOutcome::Loss => 0,
        }
    }

    pub(crate) fn from_comparison(lhs: f64, rhs: f64) -> Self {
        if lhs > rhs {
            PickOutcome::Win
        } else if lhs == rhs {
            PickOutcome::Push
        } else {
            PickOutcome::Loss
        }
    }
}

/// Where a (user, week, year) sits in the scoring lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreStatus {
    NoPicks,
    AwaitingResults,
    Scored,
}

/// Evaluation of one filled slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotResult {
    pub slot: PickSlot,
    pub selection: PickSelection,
    pub outcome: PickOutcome,
    /// Picked team's winning margin, for resolved spread picks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<i64>,
}

/// Weekly Score Record for one (user, week, year)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyScore {
    pub username: String,
    pub week: u32,
    pub year: i32,
    pub status: ScoreStatus,
    pub points: f64,
    pub wins: u8,
    pub perfect_week: bool,
    pub is_late: bool,
    pub specials_applied: Vec<Special>,
    pub slots: Vec<SlotResult>,
}

impl WeeklyScore {
    pub fn empty(username: &str, week: u32, year: i32, status: ScoreStatus) -> Self {
        Self {
            username: username.to_string(),
            week,
            year,
            status,
            points: 0.0,
            wins: 0,
            perfect_week: false,
            is_late: false,
            specials_applied: Vec::new(),
            slots: Vec::new(),
        }
    }

    pub fn outcome(&self, slot: PickSlot) -> Option<PickOutcome> {
        self.slots
            .iter()
            .find(|result| result.slot == slot)
            .map(|result| result.outcome)
    }

    pub fn is_scored(&self) -> bool {
        self.status == ScoreStatus::Scored
    }
}

pub fn round_to_half(value: f64) -> f64 {
    (value * 2.0).round() / 2.0
}

pub fn halves_to_points(halves: i32) -> f64 {
    round_to_half(f64::from(halves) / 2.0)
}
