pub mod calculators;
pub mod deadline;
pub mod evaluator;
pub mod models;
pub mod scorer;
pub mod specials;

pub use deadline::SeasonCalendar;
pub use evaluator::{adjusted_total_line, covered_double, evaluate, spread_margin};
pub use models::*;
pub use scorer::{WeeklyScorer, WeeklyScorerBuilder};
pub use specials::{has_used, ActiveSpecials, Special, SpecialUsageSet};

use crate::picks::{PickRecord, PickSlot};

/// Priority constants for score calculators.
/// Lower values run first. Each calculator receives the total left by the ones before it.
pub mod calculator_priority {
    /// Sum of per-slot outcomes
    pub const BASE_POINTS: u32 = 100;
    /// Extra point for a 4/4 week
    pub const PERFECT_WEEK_BONUS: u32 = 150;
    /// Favorite slot override
    pub const SUPER_SPREAD: u32 = 200;
    /// Whole-week override
    pub const PERFECT_PREDICTION: u32 = 300;
    /// Applied after everything else
    pub const LATE_PENALTY: u32 = 400;
}

/// One step of the weekly scoring pipeline. Works in half-point units.
pub trait ScoreCalculator: Send + Sync {
    fn calculate(&self, context: &CalculationContext) -> i32;

    fn priority(&self) -> u32;

    fn name(&self) -> &'static str;
}

pub struct CalculationContext<'a> {
    pub record: &'a PickRecord,
    pub slots: &'a [SlotResult],
    pub specials: &'a ActiveSpecials,
    pub is_late: bool,
    pub current_halves: i32,
}

impl<'a> CalculationContext<'a> {
    pub fn new(
        record: &'a PickRecord,
        slots: &'a [SlotResult],
        specials: &'a ActiveSpecials,
        is_late: bool,
        current_halves: i32,
    ) -> Self {
        Self {
            record,
            slots,
            specials,
            is_late,
            current_halves,
        }
    }

    pub fn wins(&self) -> usize {
        self.slots
            .iter()
            .filter(|result| result.outcome == PickOutcome::Win)
            .count()
    }

    pub fn perfect_week(&self) -> bool {
        self.wins() == 4
    }

    pub fn slot(&self, slot: PickSlot) -> Option<&SlotResult> {
        self.slots.iter().find(|result| result.slot == slot)
    }
}
