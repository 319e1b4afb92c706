use std::collections::HashSet;

use strum::IntoEnumIterator;
use thiserror::Error;

use super::lines::{line_for_selection, LockedLine};
use super::models::{PickRecord, PickSlot, TotalHelper};
use super::selection::{PickSelection, TotalSide};
use crate::scoring::specials::SUPER_SPREAD_MAX_LINE;
use crate::scoring::{Special, SpecialUsageSet};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmissionIssue {
    #[error("must select a pick for {0}")]
    MissingSelection(PickSlot),

    #[error("'{selection}' is not a valid {slot} pick")]
    WrongSelectionShape { slot: PickSlot, selection: String },

    #[error("'{selection}' does not match any of this week's lines")]
    UnknownGame { slot: PickSlot, selection: String },

    #[error("'{selection}' does not match the locked {slot} line '{expected}'")]
    LineMismatch {
        slot: PickSlot,
        selection: String,
        expected: String,
    },

    #[error("cannot pick multiple selections from the same game: {0} vs {1}")]
    DuplicateGame(String, String),

    #[error("super spread requires a favorite line of -5.0 or bigger")]
    SuperSpreadIneligible,

    #[error("total helper on {0} requires a {0} pick")]
    TotalHelperWithoutPick(PickSlot),

    #[error("{0} has already been used this season")]
    SpecialAlreadyUsed(Special),
}

/// Checks a submission against the week's locked lines and the user's season usage.
/// Every problem found is reported, not just the first.
pub fn validate_submission(
    record: &PickRecord,
    lines: &[LockedLine],
    usage: &SpecialUsageSet,
) -> Result<(), Vec<SubmissionIssue>> {
    let mut issues = Vec::new();
    let mut games: HashSet<(String, String)> = HashSet::new();

    for slot in PickSlot::iter() {
        let Some(selection) = record.selection(slot) else {
            issues.push(SubmissionIssue::MissingSelection(slot));
            continue;
        };

        if !fits_slot(slot, selection) {
            issues.push(SubmissionIssue::WrongSelectionShape {
                slot,
                selection: selection.to_string(),
            });
            continue;
        }

        match line_for_selection(selection, lines) {
            Some(line) => {
                let expected = locked_selection(slot, line);
                if !matches_locked(selection, &expected) {
                    issues.push(SubmissionIssue::LineMismatch {
                        slot,
                        selection: selection.to_string(),
                        expected: expected.to_string(),
                    });
                }

                let key = line.game_key();
                if !games.insert(key.clone()) {
                    issues.push(SubmissionIssue::DuplicateGame(key.0, key.1));
                }
            }
            None => issues.push(SubmissionIssue::UnknownGame {
                slot,
                selection: selection.to_string(),
            }),
        }
    }

    if record.super_spread {
        let qualifies = record
            .favorite
            .as_ref()
            .and_then(|selection| selection.as_spread())
            .is_some_and(|spread| spread.line <= SUPER_SPREAD_MAX_LINE);
        if !qualifies {
            issues.push(SubmissionIssue::SuperSpreadIneligible);
        }
    }

    let helped_slot = match record.total_helper {
        TotalHelper::None => None,
        TotalHelper::Over => Some(PickSlot::Over),
        TotalHelper::Under => Some(PickSlot::Under),
    };
    if let Some(slot) = helped_slot {
        if record.selection(slot).is_none() {
            issues.push(SubmissionIssue::TotalHelperWithoutPick(slot));
        }
    }

    for special in Special::iter() {
        if record.requests(special) && usage.has_used(special) {
            issues.push(SubmissionIssue::SpecialAlreadyUsed(special));
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

fn fits_slot(slot: PickSlot, selection: &PickSelection) -> bool {
    match selection {
        PickSelection::Spread(_) => slot.is_spread(),
        PickSelection::Total(total) => slot.total_side() == Some(total.side),
        PickSelection::Unparsed(_) => false,
    }
}

/// The selection the locked line offers for `slot`
fn locked_selection(slot: PickSlot, line: &LockedLine) -> PickSelection {
    match slot {
        PickSlot::Favorite => line.favorite(),
        PickSlot::Underdog => line.underdog(),
        PickSlot::Over => line.total_pick(TotalSide::Over),
        PickSlot::Under => line.total_pick(TotalSide::Under),
    }
}

/// Totals may name the teams in either order; the side and number must match.
fn matches_locked(selection: &PickSelection, expected: &PickSelection) -> bool {
    match (selection, expected) {
        (PickSelection::Spread(pick), PickSelection::Spread(locked)) => {
            pick.team == locked.team && pick.line == locked.line
        }
        (PickSelection::Total(pick), PickSelection::Total(locked)) => {
            pick.side == locked.side
                && pick.line == locked.line
                && pick.involves(&locked.team_a, &locked.team_b)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines() -> Vec<LockedLine> {
        vec![
            LockedLine {
                home_team: "Chiefs".to_string(),
                away_team: "Bills".to_string(),
                home_spread: -6.0,
                total: 47.5,
            },
            LockedLine {
                home_team: "Lions".to_string(),
                away_team: "Bears".to_string(),
                home_spread: -3.5,
                total: 44.0,
            },
            LockedLine {
                home_team: "Jets".to_string(),
                away_team: "Dolphins".to_string(),
                home_spread: 2.5,
                total: 40.5,
            },
            LockedLine {
                home_team: "Packers".to_string(),
                away_team: "Vikings".to_string(),
                home_spread: -1.0,
                total: 47.5,
            },
        ]
    }

    fn valid_record() -> PickRecord {
        let lines = lines();
        let mut record = PickRecord::new("alice", 1, 2025);
        record.favorite = Some(lines[0].favorite());
        record.underdog = Some(lines[1].underdog());
        record.over = Some(lines[2].total_pick(TotalSide::Over));
        record.under = Some(lines[3].total_pick(TotalSide::Under));
        record
    }

    #[test]
    fn accepts_four_distinct_games() {
        assert!(validate_submission(&valid_record(), &lines(), &SpecialUsageSet::new()).is_ok());
    }

    #[test]
    fn reports_missing_slots() {
        let mut record = valid_record();
        record.under = None;

        let issues = validate_submission(&record, &lines(), &SpecialUsageSet::new()).unwrap_err();
        assert_eq!(
            issues,
            vec![SubmissionIssue::MissingSelection(PickSlot::Under)]
        );
    }

    #[test]
    fn rejects_two_picks_from_the_same_game() {
        let lines = lines();
        let mut record = valid_record();
        record.over = Some(lines[0].total_pick(TotalSide::Over));

        let issues = validate_submission(&record, &lines, &SpecialUsageSet::new()).unwrap_err();
        assert_eq!(
            issues,
            vec![SubmissionIssue::DuplicateGame(
                "Bills".to_string(),
                "Chiefs".to_string()
            )]
        );
    }

    #[test]
    fn rejects_wrong_shapes_and_unknown_games() {
        let mut record = valid_record();
        record.over = Some(PickSelection::from("Jets vs Dolphins u40.5".to_string()));
        record.underdog = Some(PickSelection::from("Giants (+2.0)".to_string()));

        let issues = validate_submission(&record, &lines(), &SpecialUsageSet::new()).unwrap_err();
        assert_eq!(issues.len(), 2);
        assert!(matches!(
            issues[0],
            SubmissionIssue::UnknownGame {
                slot: PickSlot::Underdog,
                ..
            }
        ));
        assert!(matches!(
            issues[1],
            SubmissionIssue::WrongSelectionShape {
                slot: PickSlot::Over,
                ..
            }
        ));
    }

    #[test]
    fn super_spread_needs_big_favorite() {
        let lines = lines();
        let mut record = valid_record();
        record.super_spread = true;
        assert!(validate_submission(&record, &lines, &SpecialUsageSet::new()).is_ok());

        record.favorite = Some(lines[3].favorite());
        record.under = Some(lines[0].total_pick(TotalSide::Under));
        let issues = validate_submission(&record, &lines, &SpecialUsageSet::new()).unwrap_err();
        assert_eq!(issues, vec![SubmissionIssue::SuperSpreadIneligible]);
    }

    #[test]
    fn rejects_specials_already_used() {
        let mut record = valid_record();
        record.perfect_prediction = true;
        let usage = SpecialUsageSet::with_used([Special::PerfectPrediction]);

        let issues = validate_submission(&record, &lines(), &usage).unwrap_err();
        assert_eq!(
            issues,
            vec![SubmissionIssue::SpecialAlreadyUsed(
                Special::PerfectPrediction
            )]
        );
        assert_eq!(
            issues[0].to_string(),
            "perfect_prediction has already been used this season"
        );
    }

    #[test]
    fn rejects_a_spread_that_differs_from_the_locked_line() {
        let mut record = valid_record();
        record.favorite = Some(PickSelection::from("Chiefs (-10.0)".to_string()));
        record.super_spread = true;

        let issues = validate_submission(&record, &lines(), &SpecialUsageSet::new()).unwrap_err();
        assert_eq!(
            issues,
            vec![SubmissionIssue::LineMismatch {
                slot: PickSlot::Favorite,
                selection: "Chiefs (-10.0)".to_string(),
                expected: "Chiefs (-6.0)".to_string(),
            }]
        );
    }

    #[test]
    fn rejects_underdogs_in_the_favorite_slot() {
        let mut record = valid_record();
        record.favorite = Some(PickSelection::from("Bills (+6.0)".to_string()));
        record.underdog = Some(PickSelection::from("Bears (+20.0)".to_string()));

        let issues = validate_submission(&record, &lines(), &SpecialUsageSet::new()).unwrap_err();
        assert_eq!(issues.len(), 2);
        assert!(matches!(
            issues[0],
            SubmissionIssue::LineMismatch {
                slot: PickSlot::Favorite,
                ..
            }
        ));
        assert!(matches!(
            issues[1],
            SubmissionIssue::LineMismatch {
                slot: PickSlot::Underdog,
                ..
            }
        ));
    }

    #[test]
    fn rejects_a_total_off_the_locked_number() {
        let mut record = valid_record();
        record.over = Some(PickSelection::from("Jets vs Dolphins o35.5".to_string()));

        let issues = validate_submission(&record, &lines(), &SpecialUsageSet::new()).unwrap_err();
        assert!(matches!(
            issues.as_slice(),
            [SubmissionIssue::LineMismatch {
                slot: PickSlot::Over,
                ..
            }]
        ));
    }

    #[test]
    fn accepts_totals_with_teams_in_either_order() {
        let mut record = valid_record();
        record.over = Some(PickSelection::from("Jets vs Dolphins o40.5".to_string()));

        assert!(validate_submission(&record, &lines(), &SpecialUsageSet::new()).is_ok());
    }

    #[test]
    fn total_helper_needs_its_pick() {
        let mut record = valid_record();
        record.over = None;
        record.total_helper = TotalHelper::Over;

        let issues = validate_submission(&record, &lines(), &SpecialUsageSet::new()).unwrap_err();
        assert!(issues.contains(&SubmissionIssue::TotalHelperWithoutPick(PickSlot::Over)));
    }
}
