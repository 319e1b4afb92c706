use std::sync::Arc;

use pickem::{
    picks::LockedLine, InMemoryLeagueRepository, LeagueService, PickRecord, SeasonCalendar,
    WeeklyScorer,
};

use super::pick_builders::slate;

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub const YEAR: i32 = 2025;

pub struct TestSetup {
    pub repository: Arc<InMemoryLeagueRepository>,
    pub service: LeagueService,
    pub lines: Vec<LockedLine>,
    pub players: Vec<String>,
}

impl TestSetup {
    /// Submits through validation, panicking if the picks are rejected
    pub async fn submit(&self, record: PickRecord) -> PickRecord {
        self.service
            .submit_picks(record, &self.lines)
            .await
            .expect("submission should be accepted")
    }
}

pub struct TestSetupBuilder {
    players: Vec<String>,
    calendar: SeasonCalendar,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            players: vec![],
            calendar: SeasonCalendar::default(),
        }
    }

    pub fn with_players(mut self, players: Vec<&str>) -> Self {
        self.players = players.into_iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_three_players(self) -> Self {
        self.with_players(vec!["alice", "bob", "carol"])
    }

    #[allow(dead_code)]
    pub fn with_calendar(mut self, calendar: SeasonCalendar) -> Self {
        self.calendar = calendar;
        self
    }

    pub fn build(self) -> TestSetup {
        let repository = Arc::new(InMemoryLeagueRepository::new());
        let service = LeagueService::builder(repository.clone())
            .with_scorer(WeeklyScorer::builder().with_calendar(self.calendar).build())
            .build();

        TestSetup {
            repository,
            service,
            lines: slate(),
            players: self.players,
        }
    }
}
