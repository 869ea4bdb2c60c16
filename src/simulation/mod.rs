//! Trial, condition, and batch simulation.
//!
//! - [`trial`]: Single-trial stochastic path simulation (Euler-Maruyama)
//! - [`engine`]: Variant-bound simulator over trials, conditions, and batches
//! - [`statistics`]: Aggregate summaries of simulated datasets

pub mod engine;
pub mod statistics;
pub mod trial;

// Re-export commonly used items
pub use engine::TrialSimulator;
pub use statistics::{summarize_condition, summarize_dataset, ConditionSummary};
