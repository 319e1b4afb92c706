pub mod pick_builders;
pub mod setup;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use pick_builders::{slate, PickBuilder, ResultsBuilder};
#[allow(unused_imports)]
pub use setup::{TestSetup, TestSetupBuilder};
