use std::sync::Arc;

use strum::IntoEnumIterator;
use tracing::{debug, instrument, trace};

use super::{
    calculators::{
        BasePointsCalculator, LatePenaltyCalculator, PerfectPredictionCalculator,
        PerfectWeekBonusCalculator, SuperSpreadCalculator,
    },
    evaluator::{evaluate, spread_margin},
    halves_to_points, ActiveSpecials, CalculationContext, PickOutcome, ScoreCalculator,
    ScoreStatus, SeasonCalendar, SlotResult, SpecialUsageSet, WeeklyScore,
};
use crate::picks::{PickRecord, PickSlot};
use crate::results::{resolve, GameResult};

/// Scores one user's week: resolve and grade every slot, then run the calculators in
/// priority order over the running total.
///
/// Pure over its inputs; scoring the same inputs twice yields the same record.
pub struct WeeklyScorer {
    calculators: Vec<Arc<dyn ScoreCalculator>>,
    calendar: SeasonCalendar,
}

impl Default for WeeklyScorer {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl WeeklyScorer {
    pub fn builder() -> WeeklyScorerBuilder {
        WeeklyScorerBuilder::new()
    }

    pub fn calendar(&self) -> &SeasonCalendar {
        &self.calendar
    }

    #[instrument(skip(self, record, results, usage))]
    pub fn score(
        &self,
        username: &str,
        week: u32,
        year: i32,
        record: Option<&PickRecord>,
        results: &[GameResult],
        usage: &SpecialUsageSet,
    ) -> WeeklyScore {
        let Some(record) = record else {
            debug!("No picks for week");
            return WeeklyScore::empty(username, week, year, ScoreStatus::NoPicks);
        };

        let week_results: Vec<GameResult> = results
            .iter()
            .filter(|game| game.is_for_week(week, year) && game.is_final())
            .cloned()
            .collect();
        if week_results.is_empty() {
            debug!("No final results for week yet");
            return WeeklyScore::empty(username, week, year, ScoreStatus::AwaitingResults);
        }

        let is_late = self
            .calendar
            .is_late(record.submission_time.as_deref(), week, year);
        let specials = ActiveSpecials::resolve(record, usage, is_late);
        let slots = evaluate_slots(record, &week_results, &specials);

        let halves = self.run_calculators(record, &slots, &specials, is_late).max(0);
        let wins = slots
            .iter()
            .filter(|result| result.outcome == PickOutcome::Win)
            .count();

        let score = WeeklyScore {
            username: username.to_string(),
            week,
            year,
            status: ScoreStatus::Scored,
            points: halves_to_points(halves),
            wins: wins as u8,
            perfect_week: wins == 4,
            is_late,
            specials_applied: specials.applied(),
            slots,
        };

        debug!(
            points = score.points,
            wins = score.wins,
            perfect_week = score.perfect_week,
            is_late,
            "Scored week"
        );
        score
    }

    fn run_calculators(
        &self,
        record: &PickRecord,
        slots: &[SlotResult],
        specials: &ActiveSpecials,
        is_late: bool,
    ) -> i32 {
        let mut current_halves = 0;

        for calculator in &self.calculators {
            let context =
                CalculationContext::new(record, slots, specials, is_late, current_halves);
            let updated = calculator.calculate(&context);
            trace!(
                calculator = calculator.name(),
                before = current_halves,
                after = updated,
                "Calculator applied"
            );
            current_halves = updated;
        }

        current_halves
    }
}

fn evaluate_slots(
    record: &PickRecord,
    results: &[GameResult],
    specials: &ActiveSpecials,
) -> Vec<SlotResult> {
    PickSlot::iter()
        .filter_map(|slot| {
            let selection = record.selection(slot)?;
            let resolved = resolve(selection, results);
            if resolved.is_none() {
                debug!(%slot, selection = %selection, "No finished game matches pick");
            }

            let outcome = evaluate(
                slot,
                selection,
                resolved.as_ref(),
                specials.total_adjustment_for(slot),
            );

            Some(SlotResult {
                slot,
                selection: selection.clone(),
                outcome,
                margin: spread_margin(selection, resolved.as_ref()),
            })
        })
        .collect()
}

pub struct WeeklyScorerBuilder {
    calculators: Vec<Arc<dyn ScoreCalculator>>,
    calendar: SeasonCalendar,
}

impl Default for WeeklyScorerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl WeeklyScorerBuilder {
    fn new() -> Self {
        Self {
            calculators: vec![
                Arc::new(BasePointsCalculator::new()),
                Arc::new(PerfectWeekBonusCalculator::new()),
                Arc::new(SuperSpreadCalculator::new()),
                Arc::new(PerfectPredictionCalculator::new()),
                Arc::new(LatePenaltyCalculator::new()),
            ],
            calendar: SeasonCalendar::default(),
        }
    }

    pub fn with_calculator(mut self, calculator: Arc<dyn ScoreCalculator>) -> Self {
        self.calculators.push(calculator);
        self
    }

    pub fn with_calendar(mut self, calendar: SeasonCalendar) -> Self {
        self.calendar = calendar;
        self
    }

    pub fn build(mut self) -> WeeklyScorer {
        self.calculators.sort_by_key(|c| c.priority());
        WeeklyScorer {
            calculators: self.calculators,
            calendar: self.calendar,
        }
    }
}
