use super::super::{CalculationContext, ScoreCalculator};

/// One point per win, half a point per push
pub struct BasePointsCalculator;

impl Default for BasePointsCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl BasePointsCalculator {
    pub fn new() -> Self {
        Self
    }
}

impl ScoreCalculator for BasePointsCalculator {
    fn calculate(&self, context: &CalculationContext) -> i32 {
        context
            .slots
            .iter()
            .map(|result| result.outcome.half_points())
            .sum()
    }

    fn priority(&self) -> u32 {
        crate::scoring::calculator_priority::BASE_POINTS
    }

    fn name(&self) -> &'static str {
        "BasePointsCalculator"
    }
}
