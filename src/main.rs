use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use pickem::{
    InMemoryLeagueRepository, LeagueConfig, LeagueError, LeagueService, LeagueSnapshot,
    ScoreboardEntry, StandingsEntry, WeeklyScorer,
};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "pickem")]
#[command(about = "Scores a pick'em week and prints the scoreboard and season standings", long_about = None)]
#[command(version)]
struct Cli {
    /// League snapshot JSON with `picks` and `results`
    snapshot: PathBuf,

    #[arg(short, long)]
    week: u32,

    #[arg(short, long)]
    year: i32,
}

#[derive(Serialize)]
struct WeekReport {
    week: u32,
    year: i32,
    scoreboard: Vec<ScoreboardEntry>,
    standings: Vec<StandingsEntry>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), LeagueError> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pickem=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = LeagueConfig::from_env()?;

    let repository = Arc::new(InMemoryLeagueRepository::new());
    let service = LeagueService::builder(repository)
        .with_scorer(WeeklyScorer::builder().with_calendar(config.calendar).build())
        .build();

    let snapshot = LeagueSnapshot::from_path(&cli.snapshot)?;
    info!(path = %cli.snapshot.display(), "Loading league snapshot");
    service.load_snapshot(snapshot).await?;

    // standings cover every week up to the requested one
    for week in 1..=cli.week {
        service.score_week(week, cli.year).await?;
    }

    let report = WeekReport {
        week: cli.week,
        year: cli.year,
        scoreboard: service.weekly_scoreboard(cli.week, cli.year).await?,
        standings: service.season_standings(cli.year).await?,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
