use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;
use tracing::debug;

use crate::picks::{PickRecord, PickSlot, TotalSide};

/// Favorite line a Super Spread pick must be at or below
pub const SUPER_SPREAD_MAX_LINE: f64 = -5.0;

/// The three once-per-season scoring specials
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum Special {
    SuperSpread,
    TotalHelper,
    PerfectPrediction,
}

impl fmt::Display for Special {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Special::SuperSpread => "super_spread",
                Special::TotalHelper => "total_helper",
                Special::PerfectPrediction => "perfect_prediction",
            }
        )
    }
}

/// Snapshot of which specials a user has already consumed in a season.
///
/// Built once per scoring run from the season's pick history and treated as immutable
/// while the week is scored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialUsageSet {
    used: BTreeSet<Special>,
}

impl SpecialUsageSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_used(specials: impl IntoIterator<Item = Special>) -> Self {
        Self {
            used: specials.into_iter().collect(),
        }
    }

    /// Specials consumed by `username` in `year` on any week before `week`
    pub fn before_week(history: &[PickRecord], username: &str, year: i32, week: u32) -> Self {
        let used = season_records(history, username, year)
            .filter(|record| record.week < week)
            .flat_map(requested_specials)
            .collect();
        Self { used }
    }

    /// Specials consumed by `username` in `year` on any week other than `week`.
    /// Submissions check against this so an earlier week cannot claim a special a later
    /// week already spent.
    pub fn excluding_week(history: &[PickRecord], username: &str, year: i32, week: u32) -> Self {
        let used = season_records(history, username, year)
            .filter(|record| record.week != week)
            .flat_map(requested_specials)
            .collect();
        Self { used }
    }

    pub fn has_used(&self, special: Special) -> bool {
        self.used.contains(&special)
    }

    pub fn mark_used(&mut self, special: Special) {
        self.used.insert(special);
    }

    pub fn iter(&self) -> impl Iterator<Item = Special> + '_ {
        self.used.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }
}

/// True if any of `username`'s pick records for `year` has the flag for `special` set.
/// A special is consumed by being requested, whatever the outcome.
pub fn has_used(history: &[PickRecord], username: &str, year: i32, special: Special) -> bool {
    season_records(history, username, year).any(|record| record.requests(special))
}

fn season_records<'a>(
    history: &'a [PickRecord],
    username: &'a str,
    year: i32,
) -> impl Iterator<Item = &'a PickRecord> {
    history
        .iter()
        .filter(move |record| record.username == username && record.year == year)
}

fn requested_specials(record: &PickRecord) -> impl Iterator<Item = Special> + '_ {
    Special::iter().filter(move |special| record.requests(*special))
}

/// Specials that actually take effect for one week's record
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ActiveSpecials {
    pub super_spread: bool,
    pub total_helper: Option<(TotalSide, f64)>,
    pub perfect_prediction: bool,
}

impl ActiveSpecials {
    /// A flag only takes effect when the submission was on time and the special was not
    /// consumed earlier in the season. Super Spread also needs a qualifying favorite line.
    pub fn resolve(record: &PickRecord, usage: &SpecialUsageSet, is_late: bool) -> Self {
        let eligible = |special: Special| {
            if !record.requests(special) {
                return false;
            }
            if is_late {
                debug!(username = %record.username, week = record.week, %special, "Ignoring special on late submission");
                return false;
            }
            if usage.has_used(special) {
                debug!(username = %record.username, week = record.week, %special, "Ignoring special already used this season");
                return false;
            }
            true
        };

        let super_spread = eligible(Special::SuperSpread) && favorite_qualifies(record);
        let total_helper = if eligible(Special::TotalHelper) {
            record
                .total_helper
                .side()
                .map(|side| (side, record.total_helper_adjustment.abs()))
        } else {
            None
        };
        let perfect_prediction = eligible(Special::PerfectPrediction);

        Self {
            super_spread,
            total_helper,
            perfect_prediction,
        }
    }

    /// Line adjustment Total Helper grants to `slot`
    pub fn total_adjustment_for(&self, slot: PickSlot) -> f64 {
        match self.total_helper {
            Some((side, adjustment)) if slot.total_side() == Some(side) => adjustment,
            _ => 0.0,
        }
    }

    /// Specials in effect, in a stable order
    pub fn applied(&self) -> Vec<Special> {
        let mut applied = Vec::new();
        if self.super_spread {
            applied.push(Special::SuperSpread);
        }
        if self.total_helper.is_some() {
            applied.push(Special::TotalHelper);
        }
        if self.perfect_prediction {
            applied.push(Special::PerfectPrediction);
        }
        applied
    }
}

fn favorite_qualifies(record: &PickRecord) -> bool {
    let qualifies = record
        .favorite
        .as_ref()
        .and_then(|selection| selection.as_spread())
        .is_some_and(|spread| spread.line <= SUPER_SPREAD_MAX_LINE);

    if !qualifies {
        debug!(username = %record.username, week = record.week, "Favorite line does not qualify for super spread");
    }
    qualifies
}
