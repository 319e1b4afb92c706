use super::models::PickOutcome;
use crate::picks::{PickSelection, PickSlot, SpreadPick, TotalSide};
use crate::results::ResolvedGame;

/// Grades one pick against its resolved game.
///
/// Anything that cannot be graded (no resolved game, an unparsed selection, a selection
/// whose shape does not fit the slot) grades as a loss for that slot only, so a bad record
/// never aborts the rest of the week.
pub fn evaluate(
    slot: PickSlot,
    selection: &PickSelection,
    resolved: Option<&ResolvedGame>,
    total_adjustment: f64,
) -> PickOutcome {
    let Some(resolved) = resolved else {
        return PickOutcome::Loss;
    };

    match (slot, selection) {
        (PickSlot::Favorite | PickSlot::Underdog, PickSelection::Spread(spread)) => {
            evaluate_spread(spread, resolved)
        }
        (PickSlot::Over | PickSlot::Under, PickSelection::Total(total))
            if slot.total_side() == Some(total.side) =>
        {
            evaluate_total(total.side, total.line, resolved, total_adjustment)
        }
        _ => PickOutcome::Loss,
    }
}

fn evaluate_spread(spread: &SpreadPick, resolved: &ResolvedGame) -> PickOutcome {
    match resolved.scores_for(&spread.team) {
        Some((team_score, opponent_score)) => PickOutcome::from_comparison(
            f64::from(team_score) + spread.line,
            f64::from(opponent_score),
        ),
        None => PickOutcome::Loss,
    }
}

fn evaluate_total(
    side: TotalSide,
    line: f64,
    resolved: &ResolvedGame,
    total_adjustment: f64,
) -> PickOutcome {
    let actual = f64::from(resolved.combined_score());
    let adjusted_line = adjusted_total_line(side, line, total_adjustment);

    match side {
        TotalSide::Over => PickOutcome::from_comparison(actual, adjusted_line),
        TotalSide::Under => PickOutcome::from_comparison(adjusted_line, actual),
    }
}

/// Moves a total line in the picker's favor: down for an over, up for an under
pub fn adjusted_total_line(side: TotalSide, line: f64, total_adjustment: f64) -> f64 {
    match side {
        TotalSide::Over => line - total_adjustment.abs(),
        TotalSide::Under => line + total_adjustment.abs(),
    }
}

/// The picked team's winning margin, when the selection is a spread pick on a resolved game
pub fn spread_margin(selection: &PickSelection, resolved: Option<&ResolvedGame>) -> Option<i64> {
    let spread = selection.as_spread()?;
    let (team_score, opponent_score) = resolved?.scores_for(&spread.team)?;
    Some(i64::from(team_score) - i64::from(opponent_score))
}

/// True when the team won by at least twice the original spread
pub fn covered_double(line: f64, margin: i64) -> bool {
    margin as f64 >= (2.0 * line).abs()
}
