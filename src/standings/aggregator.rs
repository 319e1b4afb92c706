use std::cmp::Ordering;
use std::collections::BTreeMap;

use strum::IntoEnumIterator;

use super::models::{ScoreboardEntry, StandingsEntry, StandingsRecord, UserSeasonStats};
use crate::picks::PickRecord;
use crate::scoring::{has_used, Special, WeeklyScore};

/// Folds one week into a user's season record, creating the record on first use.
///
/// This is a plain additive fold: applying the same week twice counts it twice.
/// `rebuild_standings` is the idempotent way to keep standings current.
pub fn apply_week(
    existing: Option<StandingsRecord>,
    username: &str,
    year: i32,
    points: f64,
    perfect_week: bool,
) -> StandingsRecord {
    let mut record = existing.unwrap_or_else(|| StandingsRecord::new(username, year));
    record.apply_week(points, perfect_week);
    record
}

/// Recomputes a user's season record from their stored weekly scores.
///
/// Only scored weeks for `username`/`year` count, and each week counts once (the last
/// record seen for a week wins), so re-scoring a week never double counts.
pub fn rebuild_standings(username: &str, year: i32, scores: &[WeeklyScore]) -> StandingsRecord {
    let weeks: BTreeMap<u32, &WeeklyScore> = scores
        .iter()
        .filter(|score| score.username == username && score.year == year && score.is_scored())
        .map(|score| (score.week, score))
        .collect();

    weeks
        .values()
        .fold(StandingsRecord::new(username, year), |record, score| {
            apply_week(
                Some(record),
                username,
                year,
                score.points,
                score.perfect_week,
            )
        })
}

/// Orders the leaderboard by points, then perfect weeks. Rows tied on both share a
/// dense rank; username breaks ties in display order only.
pub fn rank_standings(records: &[StandingsRecord]) -> Vec<StandingsEntry> {
    let mut sorted: Vec<&StandingsRecord> = records.iter().collect();
    sorted.sort_by(|a, b| {
        b.total_points
            .total_cmp(&a.total_points)
            .then_with(|| b.perfect_weeks.cmp(&a.perfect_weeks))
            .then_with(|| a.username.cmp(&b.username))
    });

    let mut entries: Vec<StandingsEntry> = Vec::with_capacity(sorted.len());
    for record in sorted {
        let rank = match entries.last() {
            Some(prev)
                if prev.total_points.total_cmp(&record.total_points) == Ordering::Equal
                    && prev.perfect_weeks == record.perfect_weeks =>
            {
                prev.rank
            }
            Some(prev) => prev.rank + 1,
            None => 1,
        };

        entries.push(StandingsEntry {
            rank,
            username: record.username.clone(),
            total_points: record.total_points,
            perfect_weeks: record.perfect_weeks,
        });
    }

    entries
}

/// Orders a week's scores by points, then wins, with dense ranks on full ties
pub fn weekly_scoreboard(scores: &[WeeklyScore]) -> Vec<ScoreboardEntry> {
    let mut sorted: Vec<&WeeklyScore> = scores.iter().collect();
    sorted.sort_by(|a, b| {
        b.points
            .total_cmp(&a.points)
            .then_with(|| b.wins.cmp(&a.wins))
            .then_with(|| a.username.cmp(&b.username))
    });

    let mut entries: Vec<ScoreboardEntry> = Vec::with_capacity(sorted.len());
    for score in sorted {
        let rank = match entries.last() {
            Some(prev)
                if prev.points.total_cmp(&score.points) == Ordering::Equal
                    && prev.wins == score.wins =>
            {
                prev.rank
            }
            Some(prev) => prev.rank + 1,
            None => 1,
        };

        entries.push(ScoreboardEntry {
            rank,
            username: score.username.clone(),
            points: score.points,
            wins: score.wins,
            perfect_week: score.perfect_week,
        });
    }

    entries
}

pub fn user_season_stats(
    username: &str,
    year: i32,
    standings: Option<&StandingsRecord>,
    history: &[PickRecord],
) -> UserSeasonStats {
    let weeks_played = history
        .iter()
        .filter(|record| record.username == username && record.year == year)
        .count() as u32;
    let specials_used = Special::iter()
        .filter(|special| has_used(history, username, year, *special))
        .collect();

    let (total_points, perfect_weeks) = standings
        .map(|record| (record.total_points, record.perfect_weeks))
        .unwrap_or_default();
    let average_points = if weeks_played == 0 {
        0.0
    } else {
        total_points / f64::from(weeks_played)
    };

    UserSeasonStats {
        username: username.to_string(),
        year,
        total_points,
        perfect_weeks,
        weeks_played,
        specials_used,
        average_points,
    }
}
