use tracing::debug;

use super::super::{covered_double, CalculationContext, PickOutcome, ScoreCalculator};
use crate::picks::PickSlot;

/// Favorite slot worth when Super Spread wins by double the line, in halves
const DOUBLE_COVER_HALVES: i32 = 5;
/// Favorite slot worth when Super Spread pushes, in halves
const PUSH_HALVES: i32 = 2;

/// Replaces the favorite slot's contribution when Super Spread is active:
/// a double cover is worth 2.5, a push 1, a loss costs a point.
/// A win short of double the line keeps its normal point.
pub struct SuperSpreadCalculator;

impl Default for SuperSpreadCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl SuperSpreadCalculator {
    pub fn new() -> Self {
        Self
    }
}

impl ScoreCalculator for SuperSpreadCalculator {
    fn calculate(&self, context: &CalculationContext) -> i32 {
        if !context.specials.super_spread {
            return context.current_halves;
        }

        let favorite = context.slot(PickSlot::Favorite);
        let outcome = favorite
            .map(|result| result.outcome)
            .unwrap_or(PickOutcome::Loss);
        let already_counted = outcome.half_points();

        let replacement = match outcome {
            PickOutcome::Win => {
                let doubled = favorite.is_some_and(|result| {
                    match (result.selection.as_spread(), result.margin) {
                        (Some(spread), Some(margin)) => covered_double(spread.line, margin),
                        _ => false,
                    }
                });
                if doubled {
                    DOUBLE_COVER_HALVES
                } else {
                    already_counted
                }
            }
            PickOutcome::Push => PUSH_HALVES,
            PickOutcome::Loss => -PickOutcome::Win.half_points(),
        };

        debug!(
            username = %context.record.username,
            week = context.record.week,
            ?outcome,
            replacement,
            "Applying super spread"
        );

        context.current_halves - already_counted + replacement
    }

    fn priority(&self) -> u32 {
        crate::scoring::calculator_priority::SUPER_SPREAD
    }

    fn name(&self) -> &'static str {
        "SuperSpreadCalculator"
    }
}
