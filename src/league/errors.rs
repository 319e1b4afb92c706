use thiserror::Error;

use crate::config::ConfigError;
use crate::picks::SubmissionIssue;

#[derive(Debug, Error)]
pub enum LeagueError {
    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Invalid submission: {}", format_issues(.0))]
    Validation(Vec<SubmissionIssue>),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Snapshot error: {0}")]
    Snapshot(String),
}

impl From<Vec<SubmissionIssue>> for LeagueError {
    fn from(issues: Vec<SubmissionIssue>) -> Self {
        LeagueError::Validation(issues)
    }
}

impl From<serde_json::Error> for LeagueError {
    fn from(err: serde_json::Error) -> Self {
        LeagueError::Snapshot(err.to_string())
    }
}

fn format_issues(issues: &[SubmissionIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
