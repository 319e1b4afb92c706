use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex as AsyncMutex, RwLock};
use tracing::{debug, info, instrument};

use super::{repository::LeagueRepository, LeagueError, LeagueSnapshot};
use crate::picks::{validate_submission, LockedLine, PickRecord};
use crate::scoring::{ScoreStatus, SpecialUsageSet, WeeklyScore, WeeklyScorer};
use crate::standings::{
    rank_standings, rebuild_standings, user_season_stats, weekly_scoreboard, ScoreboardEntry,
    StandingsEntry, UserSeasonStats,
};

type SeasonKey = (String, i32);

/// Ties the repository to the scoring core. Work that touches one user's season
/// (submitting, scoring, refreshing standings) is serialized per (user, year).
pub struct LeagueService {
    repository: Arc<dyn LeagueRepository>,
    scorer: WeeklyScorer,
    season_mutexes: Arc<RwLock<HashMap<SeasonKey, Arc<AsyncMutex<()>>>>>,
}

impl LeagueService {
    pub fn builder(repository: Arc<dyn LeagueRepository>) -> LeagueServiceBuilder {
        LeagueServiceBuilder::new(repository)
    }

    pub fn scorer(&self) -> &WeeklyScorer {
        &self.scorer
    }

    /// Validates and stores a submission, replacing any earlier one for the same week
    #[instrument(skip(self, record, lines), fields(username = %record.username, week = record.week, year = record.year))]
    pub async fn submit_picks(
        &self,
        record: PickRecord,
        lines: &[LockedLine],
    ) -> Result<PickRecord, LeagueError> {
        let season_lock = self.season_lock(&record.username, record.year).await;
        let _guard = season_lock.lock().await;

        let history = self
            .repository
            .list_season_picks(&record.username, record.year)
            .await?;
        let usage =
            SpecialUsageSet::excluding_week(&history, &record.username, record.year, record.week);
        validate_submission(&record, lines, &usage)?;

        let late = self.scorer.calendar().is_late(
            record.submission_time.as_deref(),
            record.week,
            record.year,
        );
        self.repository.upsert_picks(record.clone()).await?;
        info!(late, "Picks submitted");

        Ok(record)
    }

    /// Specials the user consumed before `week` of the season
    pub async fn special_usage(
        &self,
        username: &str,
        year: i32,
        week: u32,
    ) -> Result<SpecialUsageSet, LeagueError> {
        self.load_usage(username, year, week).await
    }

    /// Scores one user's week, stores the result and refreshes their season standings
    #[instrument(skip(self))]
    pub async fn score_user_week(
        &self,
        username: &str,
        week: u32,
        year: i32,
    ) -> Result<WeeklyScore, LeagueError> {
        let season_lock = self.season_lock(username, year).await;
        let _guard = season_lock.lock().await;

        let record = self.repository.get_picks(username, week, year).await?;
        let results = self.repository.list_results(week, year).await?;
        let usage = self.load_usage(username, year, week).await?;

        let score = self
            .scorer
            .score(username, week, year, record.as_ref(), &results, &usage);
        if score.status == ScoreStatus::NoPicks {
            return Ok(score);
        }

        self.repository.save_weekly_score(score.clone()).await?;
        self.refresh_standings(username, year).await?;

        Ok(score)
    }

    /// Scores every user who submitted picks for the week
    #[instrument(skip(self))]
    pub async fn score_week(&self, week: u32, year: i32) -> Result<Vec<WeeklyScore>, LeagueError> {
        let records = self.repository.list_week_picks(week, year).await?;

        let mut scores = Vec::with_capacity(records.len());
        for record in &records {
            scores.push(self.score_user_week(&record.username, week, year).await?);
        }

        info!(users = scores.len(), "Week scored");
        Ok(scores)
    }

    pub async fn weekly_scoreboard(
        &self,
        week: u32,
        year: i32,
    ) -> Result<Vec<ScoreboardEntry>, LeagueError> {
        let scores: Vec<WeeklyScore> = self
            .repository
            .list_week_scores(week, year)
            .await?
            .into_iter()
            .filter(WeeklyScore::is_scored)
            .collect();
        Ok(weekly_scoreboard(&scores))
    }

    pub async fn season_standings(&self, year: i32) -> Result<Vec<StandingsEntry>, LeagueError> {
        let records = self.repository.list_standings(year).await?;
        Ok(rank_standings(&records))
    }

    pub async fn user_stats(
        &self,
        username: &str,
        year: i32,
    ) -> Result<UserSeasonStats, LeagueError> {
        let standings = self.repository.get_standings(username, year).await?;
        let history = self.repository.list_season_picks(username, year).await?;
        Ok(user_season_stats(
            username,
            year,
            standings.as_ref(),
            &history,
        ))
    }

    #[instrument(skip(self))]
    pub async fn reset_season(&self, year: i32) -> Result<(), LeagueError> {
        self.repository.reset_season(year).await?;
        self.clear_season_locks(year).await;
        info!("Season reset");
        Ok(())
    }

    /// Seeds stored picks and results. Snapshot picks are historical and skip validation.
    #[instrument(skip(self, snapshot), fields(picks = snapshot.picks.len(), results = snapshot.results.len()))]
    pub async fn load_snapshot(&self, snapshot: LeagueSnapshot) -> Result<(), LeagueError> {
        self.repository.record_results(snapshot.results).await?;
        for record in snapshot.picks {
            self.repository.upsert_picks(record).await?;
        }
        debug!("Snapshot loaded");
        Ok(())
    }

    async fn load_usage(
        &self,
        username: &str,
        year: i32,
        week: u32,
    ) -> Result<SpecialUsageSet, LeagueError> {
        let history = self.repository.list_season_picks(username, year).await?;
        Ok(SpecialUsageSet::before_week(&history, username, year, week))
    }

    async fn refresh_standings(&self, username: &str, year: i32) -> Result<(), LeagueError> {
        let scores = self.repository.list_user_scores(username, year).await?;
        let standings = rebuild_standings(username, year, &scores);
        if standings.weeks_scored == 0 {
            return Ok(());
        }

        debug!(
            total_points = standings.total_points,
            perfect_weeks = standings.perfect_weeks,
            "Standings refreshed"
        );
        self.repository.upsert_standings(standings).await
    }

    async fn season_lock(&self, username: &str, year: i32) -> Arc<AsyncMutex<()>> {
        let key = (username.to_string(), year);
        {
            let guard = self.season_mutexes.read().await;
            if let Some(lock) = guard.get(&key) {
                return lock.clone();
            }
        }

        let mut guard = self.season_mutexes.write().await;
        guard
            .entry(key)
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone()
    }

    async fn clear_season_locks(&self, year: i32) {
        let mut guard = self.season_mutexes.write().await;
        guard.retain(|(_, lock_year), _| *lock_year != year);
    }
}

pub struct LeagueServiceBuilder {
    repository: Arc<dyn LeagueRepository>,
    scorer: WeeklyScorer,
}

impl LeagueServiceBuilder {
    fn new(repository: Arc<dyn LeagueRepository>) -> Self {
        Self {
            repository,
            scorer: WeeklyScorer::default(),
        }
    }

    pub fn with_scorer(mut self, scorer: WeeklyScorer) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn build(self) -> LeagueService {
        LeagueService {
            repository: self.repository,
            scorer: self.scorer,
            season_mutexes: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}
