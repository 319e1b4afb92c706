use super::super::{CalculationContext, ScoreCalculator};

/// Halves deducted from a late week
const LATE_PENALTY_HALVES: i32 = 2;

pub struct LatePenaltyCalculator;

impl Default for LatePenaltyCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl LatePenaltyCalculator {
    pub fn new() -> Self {
        Self
    }
}

impl ScoreCalculator for LatePenaltyCalculator {
    fn calculate(&self, context: &CalculationContext) -> i32 {
        if context.is_late {
            (context.current_halves - LATE_PENALTY_HALVES).max(0)
        } else {
            context.current_halves
        }
    }

    fn priority(&self) -> u32 {
        crate::scoring::calculator_priority::LATE_PENALTY
    }

    fn name(&self) -> &'static str {
        "LatePenaltyCalculator"
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::record;
    use super::*;
    use crate::scoring::ActiveSpecials;

    fn run(current: i32, is_late: bool) -> i32 {
        let record = record();
        let specials = ActiveSpecials::default();
        let context = CalculationContext::new(&record, &[], &specials, is_late, current);
        LatePenaltyCalculator::new().calculate(&context)
    }

    #[test]
    fn deducts_a_point_when_late() {
        assert_eq!(run(6, true), 4);
    }

    #[test]
    fn floors_at_zero() {
        assert_eq!(run(1, true), 0);
        assert_eq!(run(0, true), 0);
    }

    #[test]
    fn on_time_is_untouched() {
        assert_eq!(run(6, false), 6);
    }
}
