//! Simulation-based calibration of amortized posteriors.
//!
//! - [`sbc`]: The posterior-predictive (data-only) and closed-world procedures
//! - [`rank`]: Fractional rank statistics and their aggregates

pub mod rank;
pub mod sbc;

// Re-export commonly used items
pub use rank::{fractional_ranks, SbcRanks};
pub use sbc::{posterior_sbc, prior_sbc, PosteriorSampler, PosteriorSbc, PriorSbc};
