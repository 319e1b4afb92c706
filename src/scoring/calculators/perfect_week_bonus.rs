use super::super::{CalculationContext, ScoreCalculator};

/// Bonus halves for a 4/4 week
const PERFECT_WEEK_BONUS_HALVES: i32 = 2;

/// Adds a point for a perfect week unless a week-level special already rewards it.
///
/// Only an *active* Super Spread or Perfect Prediction withholds the bonus. A forfeited
/// flag (late submission, already used, ineligible line) does not, so a late perfect week
/// with a flag set scores 4 + 1 - 1 = 4.
pub struct PerfectWeekBonusCalculator;

impl Default for PerfectWeekBonusCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl PerfectWeekBonusCalculator {
    pub fn new() -> Self {
        Self
    }
}

impl ScoreCalculator for PerfectWeekBonusCalculator {
    fn calculate(&self, context: &CalculationContext) -> i32 {
        let specials = context.specials;
        if context.perfect_week() && !specials.super_spread && !specials.perfect_prediction {
            context.current_halves + PERFECT_WEEK_BONUS_HALVES
        } else {
            context.current_halves
        }
    }

    fn priority(&self) -> u32 {
        crate::scoring::calculator_priority::PERFECT_WEEK_BONUS
    }

    fn name(&self) -> &'static str {
        "PerfectWeekBonusCalculator"
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{all_wins, record, slot};
    use super::*;
    use crate::picks::PickSlot;
    use crate::scoring::{ActiveSpecials, PickOutcome};

    #[test]
    fn perfect_week_is_worth_five() {
        let record = record();
        let slots = all_wins();
        let specials = ActiveSpecials::default();
        let context = CalculationContext::new(&record, &slots, &specials, false, 8);

        assert_eq!(PerfectWeekBonusCalculator::new().calculate(&context), 10);
    }

    #[test]
    fn no_bonus_below_four_wins() {
        let record = record();
        let mut slots = all_wins();
        slots[3] = slot(PickSlot::Under, PickOutcome::Push);
        let specials = ActiveSpecials::default();
        let context = CalculationContext::new(&record, &slots, &specials, false, 7);

        assert_eq!(PerfectWeekBonusCalculator::new().calculate(&context), 7);
    }

    #[test]
    fn withheld_when_week_special_is_active() {
        let record = record();
        let slots = all_wins();
        for specials in [
            ActiveSpecials {
                super_spread: true,
                ..ActiveSpecials::default()
            },
            ActiveSpecials {
                perfect_prediction: true,
                ..ActiveSpecials::default()
            },
        ] {
            let context = CalculationContext::new(&record, &slots, &specials, false, 8);
            assert_eq!(PerfectWeekBonusCalculator::new().calculate(&context), 8);
        }
    }

    #[test]
    fn forfeited_flags_keep_the_bonus() {
        let mut record = record();
        record.super_spread = true;
        record.perfect_prediction = true;
        let slots = all_wins();
        let specials = ActiveSpecials::default();
        let context = CalculationContext::new(&record, &slots, &specials, true, 8);

        assert_eq!(PerfectWeekBonusCalculator::new().calculate(&context), 10);
    }
}
