pub mod lines;
pub mod models;
pub mod selection;
pub mod validation;

pub use lines::LockedLine;
pub use models::{PickRecord, PickSlot, TotalHelper};
pub use selection::{PickParseError, PickSelection, SpreadPick, TotalPick, TotalSide};
pub use validation::{validate_submission, SubmissionIssue};
