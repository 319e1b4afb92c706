use super::super::{CalculationContext, ScoreCalculator};

/// Flat week total for a called perfect week, in halves
const PERFECT_PREDICTION_HALVES: i32 = 16;

/// Sets a perfect week to a flat 8 points. A miss leaves normal scoring in place.
pub struct PerfectPredictionCalculator;

impl Default for PerfectPredictionCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl PerfectPredictionCalculator {
    pub fn new() -> Self {
        Self
    }
}

impl ScoreCalculator for PerfectPredictionCalculator {
    fn calculate(&self, context: &CalculationContext) -> i32 {
        if context.specials.perfect_prediction && context.perfect_week() {
            PERFECT_PREDICTION_HALVES
        } else {
            context.current_halves
        }
    }

    fn priority(&self) -> u32 {
        crate::scoring::calculator_priority::PERFECT_PREDICTION
    }

    fn name(&self) -> &'static str {
        "PerfectPredictionCalculator"
    }
}
