pub mod errors;
pub mod repository;
pub mod service;
pub mod snapshot;

pub use errors::LeagueError;
pub use repository::{InMemoryLeagueRepository, LeagueRepository};
pub use service::{LeagueService, LeagueServiceBuilder};
pub use snapshot::LeagueSnapshot;
