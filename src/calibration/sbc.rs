//! Posterior-predictive simulation-based calibration.
//!
//! The two-stage procedure checks an amortized posterior against one
//! observed dataset without knowing any true parameters: draw M posterior
//! samples for the observed data, simulate one replicate dataset per draw,
//! re-infer on each observed-plus-replicate concatenation, and rank every
//! outer draw within its matched conditional posterior. Well-calibrated
//! posteriors produce uniform ranks.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::debug;

use crate::configure::{configure, ConfiguredBatch, ForwardRecord};
use crate::error::{CalibrateError, SamplerError};
use crate::simulation::TrialSimulator;
use crate::types::{ConditionDataset, ObservedDataset, ParameterBatch, SimulatedDataset};

use super::rank::{fractional_ranks, SbcRanks};

/// External amortized posterior-sampling capability.
///
/// Implementations draw `sample_count` parameter vectors for every dataset
/// in the configured batch and return one sample set per batch element, in
/// order. A set with fewer rows than requested is a contract violation, not
/// a partial result; report failures through the error instead.
pub trait PosteriorSampler {
    fn sample(
        &self,
        data: &ConfiguredBatch,
        sample_count: usize,
    ) -> Result<Vec<ParameterBatch>, SamplerError>;
}

/// Output of [`posterior_sbc`].
#[derive(Clone, Debug)]
pub struct PosteriorSbc {
    /// Posterior draws for the observed data, (num_ppred x param_dim).
    pub outer: ParameterBatch,
    /// Conditional posteriors on the augmented datasets, one
    /// (num_posterior x param_dim) set per outer draw.
    pub inner: Vec<ParameterBatch>,
}

impl PosteriorSbc {
    pub fn num_ppred(&self) -> usize {
        self.outer.rows()
    }

    pub fn num_posterior(&self) -> usize {
        self.inner.first().map_or(0, ParameterBatch::rows)
    }

    pub fn param_dim(&self) -> usize {
        self.outer.param_dim()
    }

    /// Fractional rank of each outer draw within its conditional posterior.
    pub fn ranks(&self) -> SbcRanks {
        let rows = self
            .inner
            .iter()
            .enumerate()
            .map(|(i, samples)| fractional_ranks(samples, self.outer.row(i)))
            .collect();
        SbcRanks::from_rows(rows)
    }
}

/// Output of [`prior_sbc`].
#[derive(Clone, Debug)]
pub struct PriorSbc {
    /// True prior draws, (num_datasets x param_dim).
    pub theta_true: ParameterBatch,
    /// Posterior sample sets, one per dataset.
    pub samples: Vec<ParameterBatch>,
    /// Rank of each true draw within its posterior.
    pub ranks: SbcRanks,
}

/// Two-stage posterior-predictive calibration against one observed dataset.
///
/// Stage one conditions the sampler on `y_obs` alone (the parameter slot of
/// the configured batch is zero-filled, so no ground truth can leak) and
/// keeps `num_ppred` posterior draws. Stage two simulates one replicate per
/// draw with `simulator`, appends it to `y_obs`, and draws `num_posterior`
/// conditional samples per augmented dataset. The returned pairing yields
/// one rank vector per replicate via [`PosteriorSbc::ranks`].
///
/// Sampler failures abort the run with the sampler's own error; there are
/// no retries and no partially filled output.
pub fn posterior_sbc<S: PosteriorSampler>(
    y_obs: &ObservedDataset,
    sampler: &S,
    simulator: &TrialSimulator,
    num_ppred: usize,
    num_posterior: usize,
    seed: u64,
) -> Result<PosteriorSbc, CalibrateError> {
    if num_ppred == 0 || num_posterior == 0 {
        return Err(CalibrateError::InvalidSampleCount {
            outer: num_ppred,
            inner: num_posterior,
        });
    }
    let num_obs = y_obs.trials.len();
    if num_obs == 0 {
        return Err(CalibrateError::ShapeMismatch {
            context: "observed dataset",
            expected: "at least one observation".to_string(),
            actual: "0 observations".to_string(),
        });
    }
    let param_dim = simulator.variant().param_dim();

    // Stage one: posterior for the observed data alone.
    let observed = SimulatedDataset {
        conditions: vec![ConditionDataset {
            trials: y_obs.trials.clone(),
        }],
    };
    let placeholder = ParameterBatch::zeros(1, param_dim);
    let configured = configure(&ForwardRecord {
        prior_draws: &placeholder,
        sim_data: &observed,
        trial_count: num_obs,
    })?;
    let mut outer_sets = sampler
        .sample(&configured, num_ppred)
        .map_err(CalibrateError::ExternalSampling)?;
    validate_sample_sets("outer posterior", &outer_sets, 1, num_ppred, param_dim)?;
    let outer = outer_sets.pop().expect("validated to hold one set");
    debug!(num_ppred, num_obs, "outer posterior drawn");

    // Stage two: one replicate per outer draw, re-inferred on y plus replicate.
    let replicates = simulator.simulate_batch(&outer, num_obs, seed)?;
    let mut conditions = Vec::with_capacity(num_ppred);
    for replicate in &replicates.conditions {
        let mut trials = Vec::with_capacity(2 * num_obs);
        trials.extend_from_slice(&y_obs.trials);
        trials.extend_from_slice(&replicate.trials);
        conditions.push(ConditionDataset { trials });
    }
    let augmented = SimulatedDataset { conditions };

    let placeholder = ParameterBatch::zeros(num_ppred, param_dim);
    let configured = configure(&ForwardRecord {
        prior_draws: &placeholder,
        sim_data: &augmented,
        trial_count: 2 * num_obs,
    })?;
    let inner = sampler
        .sample(&configured, num_posterior)
        .map_err(CalibrateError::ExternalSampling)?;
    validate_sample_sets(
        "conditional posterior",
        &inner,
        num_ppred,
        num_posterior,
        param_dim,
    )?;
    debug!(num_ppred, num_posterior, "conditional posteriors drawn");

    Ok(PosteriorSbc { outer, inner })
}

/// Closed-world calibration: rank known prior draws within their posteriors.
///
/// Draws `num_datasets` parameter vectors from the variant's prior,
/// simulates `trial_count` trials from each, and asks the sampler for
/// `num_posterior` draws per dataset. Unlike [`posterior_sbc`] the true
/// parameters are known here, so they ride along in the configured batch
/// the way a training configurator would pass them.
pub fn prior_sbc<S: PosteriorSampler>(
    simulator: &TrialSimulator,
    sampler: &S,
    num_datasets: usize,
    trial_count: usize,
    num_posterior: usize,
    seed: u64,
) -> Result<PriorSbc, CalibrateError> {
    if num_datasets == 0 || num_posterior == 0 {
        return Err(CalibrateError::InvalidSampleCount {
            outer: num_datasets,
            inner: num_posterior,
        });
    }

    let mut rng = SmallRng::seed_from_u64(seed);
    let theta_true = simulator.variant().draw_prior(num_datasets, &mut rng);
    let sim_data = simulator.simulate_batch(&theta_true, trial_count, seed.wrapping_add(1))?;
    let configured = configure(&ForwardRecord {
        prior_draws: &theta_true,
        sim_data: &sim_data,
        trial_count,
    })?;
    let samples = sampler
        .sample(&configured, num_posterior)
        .map_err(CalibrateError::ExternalSampling)?;
    validate_sample_sets(
        "prior-predictive posterior",
        &samples,
        num_datasets,
        num_posterior,
        theta_true.param_dim(),
    )?;

    let rows = (0..num_datasets)
        .map(|i| fractional_ranks(&samples[i], theta_true.row(i)))
        .collect();
    let ranks = SbcRanks::from_rows(rows);
    debug!(num_datasets, num_posterior, trial_count, "prior SBC complete");

    Ok(PriorSbc {
        theta_true,
        samples,
        ranks,
    })
}

fn validate_sample_sets(
    context: &'static str,
    sets: &[ParameterBatch],
    expected_sets: usize,
    expected_rows: usize,
    expected_dim: usize,
) -> Result<(), CalibrateError> {
    if sets.len() != expected_sets {
        return Err(CalibrateError::ShapeMismatch {
            context,
            expected: format!("{expected_sets} sample sets"),
            actual: format!("{} sample sets", sets.len()),
        });
    }
    for set in sets {
        if set.rows() != expected_rows || set.param_dim() != expected_dim {
            return Err(CalibrateError::ShapeMismatch {
                context,
                expected: format!("{expected_rows} x {expected_dim} samples"),
                actual: format!("{} x {} samples", set.rows(), set.param_dim()),
            });
        }
    }
    Ok(())
}
