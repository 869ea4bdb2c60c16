//! Single-trial stochastic path simulation.
//!
//! The evidence process starts at `boundary * beta` and follows an
//! Euler-Maruyama discretization of a constant-drift diffusion until it
//! leaves the (possibly collapsing) boundary corridor. The decision time is
//! then combined with an encoding-time draw and the motor offset into the
//! choice-signed reaction time, and the encoding draw also produces the
//! N200 latency observation.

use rand::rngs::SmallRng;
use rand::Rng;
use rand_distr::StandardNormal;

use crate::boundary::BoundaryPolicy;
use crate::constants::{DIFFUSION_COEFFICIENT, PARAM_DIM};
use crate::error::SimulateError;
use crate::model::EncodingPath;
use crate::types::TrialOutcome;

/// Parameter vector unpacked to f64 for the path arithmetic. Storage is f32;
/// accumulating thousands of increments wants the wider type.
#[derive(Clone, Copy, Debug)]
pub(crate) struct TrialParams {
    pub drift: f64,
    pub boundary: f64,
    pub beta: f64,
    pub mu_tau_e: f64,
    pub tau_m: f64,
    pub sigma: f64,
    pub varsigma: f64,
    /// Variant-specific component: mixture weight, collapse slope, or
    /// collapse scale, depending on the variant.
    pub extra: f64,
}

impl TrialParams {
    pub fn from_row(row: &[f32]) -> Self {
        debug_assert_eq!(row.len(), PARAM_DIM);
        Self {
            drift: row[0] as f64,
            boundary: row[1] as f64,
            beta: row[2] as f64,
            mu_tau_e: row[3] as f64,
            tau_m: row[4] as f64,
            sigma: row[5] as f64,
            varsigma: row[6] as f64,
            extra: row[7] as f64,
        }
    }
}

#[inline(always)]
fn std_normal(rng: &mut SmallRng) -> f64 {
    rng.sample(StandardNormal)
}

/// Simulate one decision trial.
///
/// `dt` and `max_steps` come from the owning simulator; `policy` and
/// `encoding` are the variant pieces already resolved for this parameter
/// vector. Errors only on hitting the step ceiling.
pub(crate) fn diffusion_trial(
    p: &TrialParams,
    policy: BoundaryPolicy,
    encoding: EncodingPath,
    dt: f64,
    max_steps: u64,
    rng: &mut SmallRng,
) -> Result<TrialOutcome, SimulateError> {
    let noise_scale = DIFFUSION_COEFFICIENT * dt.sqrt();

    let mut evidence = p.boundary * p.beta;
    let mut steps: u64 = 0;
    loop {
        let (lower, upper) = policy.bounds(steps as f64 * dt, p.boundary);
        if evidence <= lower || evidence >= upper {
            break;
        }
        evidence += p.drift * dt + noise_scale * std_normal(rng);
        steps += 1;
        if steps >= max_steps {
            return Err(SimulateError::SimulationTimeout { max_steps });
        }
    }

    let decision_time = steps as f64 * dt;
    let (_, upper) = policy.bounds(decision_time, p.boundary);
    let chose_upper = evidence >= upper;

    // Trial-level visual encoding time, shared by RT and latency.
    let tau_e = p.mu_tau_e + p.varsigma * std_normal(rng);

    let (rt_encoding, latency) = match encoding {
        EncodingPath::Direct => {
            let z = tau_e + p.sigma * std_normal(rng);
            (tau_e, z)
        }
        EncodingPath::Mixture { theta } => {
            // Both candidates are drawn every trial so the RNG stream does
            // not depend on which path wins.
            let z_trial = tau_e + p.sigma * std_normal(rng);
            let pooled = (p.sigma * p.sigma + p.varsigma * p.varsigma).sqrt();
            let z_avg = p.mu_tau_e + pooled * std_normal(rng);
            let pick: f64 = rng.random();
            if pick <= 1.0 - theta {
                (tau_e, z_trial)
            } else {
                (p.mu_tau_e, z_avg)
            }
        }
    };

    let magnitude = rt_encoding + decision_time + p.tau_m;
    let choice_rt = if chose_upper { magnitude } else { -magnitude };
    Ok(TrialOutcome {
        choice_rt: choice_rt as f32,
        n200_lat: latency as f32,
    })
}
