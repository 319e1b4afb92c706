mod base_points;
mod late_penalty;
mod perfect_prediction;
mod perfect_week_bonus;
mod super_spread;

pub use base_points::BasePointsCalculator;
pub use late_penalty::LatePenaltyCalculator;
pub use perfect_prediction::PerfectPredictionCalculator;
pub use perfect_week_bonus::PerfectWeekBonusCalculator;
pub use super_spread::SuperSpreadCalculator;
