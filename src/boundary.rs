//! Time-varying decision boundaries.
//!
//! Every policy exposes the same query: given the elapsed decision time and
//! the boundary-height parameter, return the current (lower, upper) pair.
//! The trial loop re-evaluates it each step, so a policy is a pure function
//! of time with no per-trial state.

use crate::constants::{WEIBULL_SHAPE, WEIBULL_SIGN};

/// Boundary-collapse policy, fixed per model variant at simulator construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BoundaryPolicy {
    /// Constant bounds (0, boundary) for the whole trial.
    Fixed,
    /// Both bounds contract linearly toward the midline at `slope` per unit
    /// time. Past the meeting point any evidence value terminates the trial.
    Linear { slope: f64 },
    /// Weibull-shaped collapse: the offset grows as 1 - exp(-(t/lambda)^k),
    /// scaled by half the boundary height, with compile-time shape k.
    Weibull { lambda: f64 },
}

impl BoundaryPolicy {
    /// Current (lower, upper) bounds at elapsed decision time `t`.
    #[inline(always)]
    pub fn bounds(&self, t: f64, boundary: f64) -> (f64, f64) {
        match *self {
            BoundaryPolicy::Fixed => (0.0, boundary),
            BoundaryPolicy::Linear { slope } => (slope * t, boundary - slope * t),
            BoundaryPolicy::Weibull { lambda } => {
                let collapse = 1.0 - (-(t / lambda).powf(WEIBULL_SHAPE)).exp();
                let offset = collapse * (-0.5) * WEIBULL_SIGN * boundary;
                (offset, boundary - offset)
            }
        }
    }
}
