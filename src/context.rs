//! Per-dataset trial-count contexts.
//!
//! Amortized training draws a fresh dataset size for every simulated batch so
//! the downstream network generalizes across set sizes; the drawn count also
//! feeds the configurator as the direct condition. Two regimes are supported:
//! a flat range and a bimodal mixture centered on a target size and its double.

use rand::rngs::SmallRng;
use rand::Rng;
use rand_distr::StandardNormal;

use crate::constants::{DEFAULT_NUM_OBS_MAX, DEFAULT_NUM_OBS_MIN, MIXTURE_CONTEXT_SCALE};

/// Distribution over per-dataset trial counts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrialCountContext {
    /// Discrete uniform draw from `min..=max`.
    Uniform { min: usize, max: usize },
    /// Even mixture of Normal(target, 10) and Normal(2 * target, 10),
    /// truncated to an integer and floored at one trial.
    Mixture { target: usize },
}

impl TrialCountContext {
    pub fn draw(&self, rng: &mut SmallRng) -> usize {
        match *self {
            TrialCountContext::Uniform { min, max } => rng.random_range(min..=max),
            TrialCountContext::Mixture { target } => {
                let loc = if rng.random_range(0..2) == 0 {
                    target as f64
                } else {
                    2.0 * target as f64
                };
                let noise: f64 = rng.sample(StandardNormal);
                let count = (loc + MIXTURE_CONTEXT_SCALE * noise) as i64;
                count.max(1) as usize
            }
        }
    }
}

impl Default for TrialCountContext {
    fn default() -> Self {
        TrialCountContext::Uniform {
            min: DEFAULT_NUM_OBS_MIN,
            max: DEFAULT_NUM_OBS_MAX,
        }
    }
}
