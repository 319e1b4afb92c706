use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::EnumIter;

use super::selection::{PickSelection, TotalSide};

/// The four weekly wager slots
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum PickSlot {
    Favorite,
    Underdog,
    Over,
    Under,
}

impl PickSlot {
    pub fn is_spread(&self) -> bool {
        matches!(self, PickSlot::Favorite | PickSlot::Underdog)
    }

    /// Side of the total this slot takes, for the two total slots
    pub fn total_side(&self) -> Option<TotalSide> {
        match self {
            PickSlot::Over => Some(TotalSide::Over),
            PickSlot::Under => Some(TotalSide::Under),
            _ => None,
        }
    }
}

impl fmt::Display for PickSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                PickSlot::Favorite => "favorite",
                PickSlot::Underdog => "underdog",
                PickSlot::Over => "over",
                PickSlot::Under => "under",
            }
        )
    }
}

/// Which total slot, if any, the Total Helper special was applied to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TotalHelper {
    #[default]
    None,
    Over,
    Under,
}

impl TotalHelper {
    pub fn side(&self) -> Option<TotalSide> {
        match self {
            TotalHelper::None => None,
            TotalHelper::Over => Some(TotalSide::Over),
            TotalHelper::Under => Some(TotalSide::Under),
        }
    }
}

/// One user's picks for one week, as submitted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickRecord {
    pub username: String,
    pub week: u32,
    pub year: i32,
    #[serde(default)]
    pub favorite: Option<PickSelection>,
    #[serde(default)]
    pub underdog: Option<PickSelection>,
    #[serde(default)]
    pub over: Option<PickSelection>,
    #[serde(default)]
    pub under: Option<PickSelection>,
    #[serde(default)]
    pub super_spread: bool,
    #[serde(default)]
    pub total_helper: TotalHelper,
    /// Points the helped total line moves by. Stored signed (-5 for an over, +5 for
    /// an under) by older records; only the magnitude is used when scoring.
    #[serde(default)]
    pub total_helper_adjustment: f64,
    #[serde(default)]
    pub perfect_prediction: bool,
    /// ISO-8601 submission timestamp
    #[serde(default)]
    pub submission_time: Option<String>,
}

impl PickRecord {
    pub fn new(username: impl Into<String>, week: u32, year: i32) -> Self {
        Self {
            username: username.into(),
            week,
            year,
            favorite: None,
            underdog: None,
            over: None,
            under: None,
            super_spread: false,
            total_helper: TotalHelper::None,
            total_helper_adjustment: 0.0,
            perfect_prediction: false,
            submission_time: None,
        }
    }

    pub fn selection(&self, slot: PickSlot) -> Option<&PickSelection> {
        match slot {
            PickSlot::Favorite => self.favorite.as_ref(),
            PickSlot::Underdog => self.underdog.as_ref(),
            PickSlot::Over => self.over.as_ref(),
            PickSlot::Under => self.under.as_ref(),
        }
    }

    pub fn set_selection(&mut self, slot: PickSlot, selection: Option<PickSelection>) {
        match slot {
            PickSlot::Favorite => self.favorite = selection,
            PickSlot::Underdog => self.underdog = selection,
            PickSlot::Over => self.over = selection,
            PickSlot::Under => self.under = selection,
        }
    }

    /// True when the record has its flag set for `special`, regardless of eligibility
    pub fn requests(&self, special: crate::scoring::Special) -> bool {
        use crate::scoring::Special;
        match special {
            Special::SuperSpread => self.super_spread,
            Special::TotalHelper => self.total_helper != TotalHelper::None,
            Special::PerfectPrediction => self.perfect_prediction,
        }
    }

    pub fn is_same_entry(&self, other: &PickRecord) -> bool {
        self.username == other.username && self.week == other.week && self.year == other.year
    }
}
