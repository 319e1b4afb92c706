use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use super::LeagueError;
use crate::picks::PickRecord;
use crate::results::GameResult;
use crate::scoring::WeeklyScore;
use crate::standings::StandingsRecord;

type WeekKey = (String, u32, i32);
type SeasonKey = (String, i32);

#[async_trait]
pub trait LeagueRepository: Send + Sync {
    /// Inserts or replaces the record for its (user, week, year)
    async fn upsert_picks(&self, record: PickRecord) -> Result<(), LeagueError>;
    async fn get_picks(
        &self,
        username: &str,
        week: u32,
        year: i32,
    ) -> Result<Option<PickRecord>, LeagueError>;
    async fn list_week_picks(&self, week: u32, year: i32) -> Result<Vec<PickRecord>, LeagueError>;
    async fn list_season_picks(
        &self,
        username: &str,
        year: i32,
    ) -> Result<Vec<PickRecord>, LeagueError>;

    async fn record_results(&self, results: Vec<GameResult>) -> Result<(), LeagueError>;
    async fn list_results(&self, week: u32, year: i32) -> Result<Vec<GameResult>, LeagueError>;

    /// Inserts or replaces the score for its (user, week, year)
    async fn save_weekly_score(&self, score: WeeklyScore) -> Result<(), LeagueError>;
    async fn list_user_scores(
        &self,
        username: &str,
        year: i32,
    ) -> Result<Vec<WeeklyScore>, LeagueError>;
    async fn list_week_scores(&self, week: u32, year: i32)
        -> Result<Vec<WeeklyScore>, LeagueError>;

    async fn upsert_standings(&self, standings: StandingsRecord) -> Result<(), LeagueError>;
    async fn get_standings(
        &self,
        username: &str,
        year: i32,
    ) -> Result<Option<StandingsRecord>, LeagueError>;
    async fn list_standings(&self, year: i32) -> Result<Vec<StandingsRecord>, LeagueError>;

    /// Drops stored scores and standings for the year. Picks and results are kept.
    async fn reset_season(&self, year: i32) -> Result<(), LeagueError>;
}

#[derive(Debug, Default)]
pub struct InMemoryLeagueRepository {
    picks: Arc<RwLock<HashMap<WeekKey, PickRecord>>>,
    results: Arc<RwLock<Vec<GameResult>>>,
    scores: Arc<RwLock<HashMap<WeekKey, WeeklyScore>>>,
    standings: Arc<RwLock<HashMap<SeasonKey, StandingsRecord>>>,
}

impl InMemoryLeagueRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sorted_by_week<T>(mut items: Vec<T>, week: impl Fn(&T) -> u32) -> Vec<T> {
    items.sort_by_key(|item| week(item));
    items
}

#[async_trait]
impl LeagueRepository for InMemoryLeagueRepository {
    #[instrument(skip(self, record), fields(username = %record.username, week = record.week, year = record.year))]
    async fn upsert_picks(&self, record: PickRecord) -> Result<(), LeagueError> {
        let key = (record.username.clone(), record.week, record.year);
        let mut picks = self.picks.write().await;
        if picks.insert(key, record).is_some() {
            debug!("Replaced existing picks");
        }
        Ok(())
    }

    async fn get_picks(
        &self,
        username: &str,
        week: u32,
        year: i32,
    ) -> Result<Option<PickRecord>, LeagueError> {
        let picks = self.picks.read().await;
        Ok(picks.get(&(username.to_string(), week, year)).cloned())
    }

    async fn list_week_picks(&self, week: u32, year: i32) -> Result<Vec<PickRecord>, LeagueError> {
        let picks = self.picks.read().await;
        let mut records: Vec<PickRecord> = picks
            .values()
            .filter(|record| record.week == week && record.year == year)
            .cloned()
            .collect();
        records.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(records)
    }

    async fn list_season_picks(
        &self,
        username: &str,
        year: i32,
    ) -> Result<Vec<PickRecord>, LeagueError> {
        let picks = self.picks.read().await;
        let records = picks
            .values()
            .filter(|record| record.username == username && record.year == year)
            .cloned()
            .collect();
        Ok(sorted_by_week(records, |record: &PickRecord| record.week))
    }

    #[instrument(skip(self, results), fields(count = results.len()))]
    async fn record_results(&self, results: Vec<GameResult>) -> Result<(), LeagueError> {
        let mut stored = self.results.write().await;
        for result in results {
            // a later report for the same game replaces the earlier one
            stored.retain(|existing| {
                !(existing.week == result.week
                    && existing.year == result.year
                    && existing.home_team == result.home_team
                    && existing.away_team == result.away_team)
            });
            stored.push(result);
        }
        Ok(())
    }

    async fn list_results(&self, week: u32, year: i32) -> Result<Vec<GameResult>, LeagueError> {
        let stored = self.results.read().await;
        Ok(stored
            .iter()
            .filter(|result| result.is_for_week(week, year))
            .cloned()
            .collect())
    }

    async fn save_weekly_score(&self, score: WeeklyScore) -> Result<(), LeagueError> {
        let key = (score.username.clone(), score.week, score.year);
        let mut scores = self.scores.write().await;
        scores.insert(key, score);
        Ok(())
    }

    async fn list_user_scores(
        &self,
        username: &str,
        year: i32,
    ) -> Result<Vec<WeeklyScore>, LeagueError> {
        let scores = self.scores.read().await;
        let found = scores
            .values()
            .filter(|score| score.username == username && score.year == year)
            .cloned()
            .collect();
        Ok(sorted_by_week(found, |score: &WeeklyScore| score.week))
    }

    async fn list_week_scores(
        &self,
        week: u32,
        year: i32,
    ) -> Result<Vec<WeeklyScore>, LeagueError> {
        let scores = self.scores.read().await;
        Ok(scores
            .values()
            .filter(|score| score.week == week && score.year == year)
            .cloned()
            .collect())
    }

    async fn upsert_standings(&self, standings: StandingsRecord) -> Result<(), LeagueError> {
        let key = (standings.username.clone(), standings.year);
        let mut stored = self.standings.write().await;
        stored.insert(key, standings);
        Ok(())
    }

    async fn get_standings(
        &self,
        username: &str,
        year: i32,
    ) -> Result<Option<StandingsRecord>, LeagueError> {
        let stored = self.standings.read().await;
        Ok(stored.get(&(username.to_string(), year)).cloned())
    }

    async fn list_standings(&self, year: i32) -> Result<Vec<StandingsRecord>, LeagueError> {
        let stored = self.standings.read().await;
        Ok(stored
            .values()
            .filter(|record| record.year == year)
            .cloned()
            .collect())
    }

    #[instrument(skip(self))]
    async fn reset_season(&self, year: i32) -> Result<(), LeagueError> {
        self.scores
            .write()
            .await
            .retain(|(_, _, score_year), _| *score_year != year);
        self.standings
            .write()
            .await
            .retain(|(_, standings_year), _| *standings_year != year);
        debug!("Season scores cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::ScoreStatus;

    fn scored(username: &str, week: u32, points: f64) -> WeeklyScore {
        WeeklyScore {
            points,
            ..WeeklyScore::empty(username, week, 2025, ScoreStatus::Scored)
        }
    }

    #[tokio::test]
    async fn resubmitting_picks_replaces_the_record() {
        let repo = InMemoryLeagueRepository::new();

        let mut first = PickRecord::new("alice", 1, 2025);
        first.super_spread = true;
        repo.upsert_picks(first).await.unwrap();
        repo.upsert_picks(PickRecord::new("alice", 1, 2025))
            .await
            .unwrap();

        let stored = repo.get_picks("alice", 1, 2025).await.unwrap().unwrap();
        assert!(!stored.super_spread);
        assert_eq!(repo.list_week_picks(1, 2025).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn season_picks_are_filtered_and_ordered() {
        let repo = InMemoryLeagueRepository::new();
        for (username, week, year) in [
            ("alice", 3, 2025),
            ("alice", 1, 2025),
            ("alice", 1, 2024),
            ("bob", 2, 2025),
        ] {
            repo.upsert_picks(PickRecord::new(username, week, year))
                .await
                .unwrap();
        }

        let weeks: Vec<u32> = repo
            .list_season_picks("alice", 2025)
            .await
            .unwrap()
            .iter()
            .map(|record| record.week)
            .collect();
        assert_eq!(weeks, vec![1, 3]);
    }

    #[tokio::test]
    async fn later_results_replace_earlier_reports() {
        let repo = InMemoryLeagueRepository::new();
        let mut pending = GameResult::final_score(1, 2025, "Chiefs", "Bills", 0, 0);
        pending.home_score = None;
        pending.away_score = None;

        repo.record_results(vec![pending]).await.unwrap();
        repo.record_results(vec![GameResult::final_score(
            1, 2025, "Chiefs", "Bills", 27, 20,
        )])
        .await
        .unwrap();

        let results = repo.list_results(1, 2025).await.unwrap();
        assert_eq!(results.len(), 1);
        assert!(results[0].is_final());
        assert!(repo.list_results(2, 2025).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn saving_a_score_twice_keeps_one_copy() {
        let repo = InMemoryLeagueRepository::new();
        repo.save_weekly_score(scored("alice", 1, 3.0)).await.unwrap();
        repo.save_weekly_score(scored("alice", 1, 5.0)).await.unwrap();

        let scores = repo.list_user_scores("alice", 2025).await.unwrap();
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].points, 5.0);
    }

    #[tokio::test]
    async fn reset_clears_only_that_season() {
        let repo = InMemoryLeagueRepository::new();
        repo.save_weekly_score(scored("alice", 1, 3.0)).await.unwrap();
        repo.upsert_standings(StandingsRecord::new("alice", 2025))
            .await
            .unwrap();
        repo.upsert_standings(StandingsRecord::new("alice", 2024))
            .await
            .unwrap();
        repo.upsert_picks(PickRecord::new("alice", 1, 2025))
            .await
            .unwrap();

        repo.reset_season(2025).await.unwrap();

        assert!(repo.list_week_scores(1, 2025).await.unwrap().is_empty());
        assert!(repo.get_standings("alice", 2025).await.unwrap().is_none());
        assert!(repo.get_standings("alice", 2024).await.unwrap().is_some());
        assert!(repo.get_picks("alice", 1, 2025).await.unwrap().is_some());
    }
}
