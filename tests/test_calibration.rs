//! Integration tests for the calibration procedures against fake samplers.

use std::cell::RefCell;

use nddm::calibration::{posterior_sbc, prior_sbc, PosteriorSampler};
use nddm::configure::ConfiguredBatch;
use nddm::constants::{
    DEFAULT_POSTERIOR_SAMPLES, DEFAULT_PPRED_SAMPLES, DEFAULT_TEST_DATASETS,
    DEFAULT_TEST_OBSERVATIONS, DEFAULT_TEST_POSTERIOR_SAMPLES, PARAM_DIM,
};
use nddm::error::{CalibrateError, SamplerError};
use nddm::model::ModelVariant;
use nddm::simulation::TrialSimulator;
use nddm::types::{ObservedDataset, ParameterBatch, TrialOutcome};
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// What one sampler invocation saw, for auditing the configured batches.
struct SampleCall {
    batch_size: usize,
    trial_count: usize,
    parameters: Vec<f32>,
    direct_conditions: Vec<f32>,
    first_condition_channels: Vec<f32>,
}

/// Deterministic sampler that returns prior-box midpoints jittered by a
/// ramp, and records every configured batch it is handed.
struct AuditSampler {
    variant: ModelVariant,
    calls: RefCell<Vec<SampleCall>>,
}

impl AuditSampler {
    fn new(variant: ModelVariant) -> Self {
        Self {
            variant,
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl PosteriorSampler for AuditSampler {
    fn sample(
        &self,
        data: &ConfiguredBatch,
        sample_count: usize,
    ) -> Result<Vec<ParameterBatch>, SamplerError> {
        let batch_size = data.summary_conditions.batch_size();
        let trial_count = data.summary_conditions.trial_count();
        let mut first_condition_channels = Vec::with_capacity(trial_count * 3);
        for t in 0..trial_count {
            first_condition_channels.extend_from_slice(data.summary_conditions.trial(0, t));
        }
        self.calls.borrow_mut().push(SampleCall {
            batch_size,
            trial_count,
            parameters: data.parameters.as_flat().to_vec(),
            direct_conditions: data.direct_conditions.clone(),
            first_condition_channels,
        });

        let bounds = self.variant.prior_bounds();
        let mut sets = Vec::with_capacity(batch_size);
        for b in 0..batch_size {
            let mut set = ParameterBatch::zeros(0, PARAM_DIM);
            for k in 0..sample_count {
                // A spread across each prior interval, shifted per dataset so
                // sets differ between batch entries.
                let frac = (k as f32 + 0.5) / sample_count as f32;
                let shift = (b % 7) as f32 / 70.0;
                let row: Vec<f32> = bounds
                    .iter()
                    .map(|&(low, high)| low + (frac * 0.8 + shift + 0.05) * (high - low))
                    .collect();
                set.push_row(&row);
            }
            sets.push(set);
        }
        Ok(sets)
    }
}

/// Sampler that returns one row fewer than requested, per set.
struct ShortSampler;

impl PosteriorSampler for ShortSampler {
    fn sample(
        &self,
        data: &ConfiguredBatch,
        sample_count: usize,
    ) -> Result<Vec<ParameterBatch>, SamplerError> {
        let sets = (0..data.summary_conditions.batch_size())
            .map(|_| ParameterBatch::zeros(sample_count - 1, PARAM_DIM))
            .collect();
        Ok(sets)
    }
}

fn observed_dataset(n: usize) -> ObservedDataset {
    ObservedDataset::from_trials(
        (0..n)
            .map(|i| TrialOutcome {
                choice_rt: if i % 3 == 0 { -0.55 } else { 0.65 },
                n200_lat: 0.15 + i as f32 * 0.001,
            })
            .collect(),
    )
}

#[test]
fn posterior_sbc_produces_matched_shapes() {
    let variant = ModelVariant::M6;
    let simulator = TrialSimulator::new(variant);
    let sampler = AuditSampler::new(variant);
    let y = observed_dataset(30);

    let result = posterior_sbc(&y, &sampler, &simulator, 12, 20, 7).unwrap();
    assert_eq!(result.num_ppred(), 12);
    assert_eq!(result.num_posterior(), 20);
    assert_eq!(result.param_dim(), PARAM_DIM);
    assert_eq!(result.inner.len(), 12);

    let ranks = result.ranks();
    assert_eq!(ranks.num_datasets(), 12);
    assert_eq!(ranks.param_dim(), PARAM_DIM);
    assert!(ranks.as_flat().iter().all(|r| (0.0..=1.0).contains(r)));
}

#[test]
fn posterior_sbc_conditions_on_zeroed_parameters_only() {
    let variant = ModelVariant::M6;
    let simulator = TrialSimulator::new(variant);
    let sampler = AuditSampler::new(variant);
    let y = observed_dataset(24);

    posterior_sbc(&y, &sampler, &simulator, 6, 9, 3).unwrap();

    let calls = sampler.calls.borrow();
    assert_eq!(calls.len(), 2);
    // Stage one: a single dataset of |y| observations.
    assert_eq!(calls[0].batch_size, 1);
    assert_eq!(calls[0].trial_count, 24);
    // Stage two: one augmented dataset per outer draw, each doubled.
    assert_eq!(calls[1].batch_size, 6);
    assert_eq!(calls[1].trial_count, 48);
    // Neither stage may see a non-zero parameter value.
    assert!(calls[0].parameters.iter().all(|&v| v == 0.0));
    assert!(calls[1].parameters.iter().all(|&v| v == 0.0));
    // Direct conditions broadcast ln(n) for the stage's own n.
    let expected = (24.0_f64).ln() as f32;
    assert!(calls[0].direct_conditions.iter().all(|&d| d == expected));
    let expected = (48.0_f64).ln() as f32;
    assert!(calls[1].direct_conditions.iter().all(|&d| d == expected));
}

#[test]
fn augmented_datasets_start_with_the_observed_channels() {
    let variant = ModelVariant::M6;
    let simulator = TrialSimulator::new(variant);
    let sampler = AuditSampler::new(variant);
    let y = observed_dataset(10);

    posterior_sbc(&y, &sampler, &simulator, 4, 5, 11).unwrap();

    let calls = sampler.calls.borrow();
    let observed_channels = &calls[0].first_condition_channels;
    let augmented_channels = &calls[1].first_condition_channels;
    // The first |y| trials of the augmented batch are the observed data,
    // recoded identically.
    assert_eq!(&augmented_channels[..observed_channels.len()], &observed_channels[..]);
    assert_eq!(augmented_channels.len(), 2 * observed_channels.len());
}

#[test]
fn posterior_sbc_is_deterministic_for_a_seed() {
    let variant = ModelVariant::M6;
    let simulator = TrialSimulator::new(variant);
    let y = observed_dataset(16);

    let a = posterior_sbc(&y, &AuditSampler::new(variant), &simulator, 8, 10, 21).unwrap();
    let b = posterior_sbc(&y, &AuditSampler::new(variant), &simulator, 8, 10, 21).unwrap();
    assert_eq!(a.ranks().as_flat(), b.ranks().as_flat());
}

#[test]
fn short_sample_sets_are_a_shape_error() {
    let variant = ModelVariant::M6;
    let simulator = TrialSimulator::new(variant);
    let y = observed_dataset(12);

    let err = posterior_sbc(&y, &ShortSampler, &simulator, 5, 8, 2).unwrap_err();
    assert!(matches!(err, CalibrateError::ShapeMismatch { .. }));
}

#[test]
fn prior_sbc_ranks_every_true_draw() {
    let variant = ModelVariant::M6;
    let simulator = TrialSimulator::new(variant);
    let sampler = AuditSampler::new(variant);

    let result = prior_sbc(&simulator, &sampler, 15, 20, 30, 5).unwrap();
    assert_eq!(result.theta_true.rows(), 15);
    assert_eq!(result.samples.len(), 15);
    assert!(result.samples.iter().all(|s| s.rows() == 30));
    assert_eq!(result.ranks.num_datasets(), 15);
    assert!(result
        .ranks
        .as_flat()
        .iter()
        .all(|r| (0.0..=1.0).contains(r)));

    // Closed world: the configurator passes the true draws through.
    let calls = sampler.calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].parameters, result.theta_true.as_flat());
    for row in result.theta_true.iter_rows() {
        assert!(variant.validate(row).is_ok());
    }
}

#[test]
fn posterior_sbc_runs_at_the_documented_default_scale() {
    // M = 200 replicates, K = 500 conditional draws, 60 observations: the
    // sizes the evaluation driver uses against real data.
    let variant = ModelVariant::M6;
    let simulator = TrialSimulator::new(variant);
    let sampler = AuditSampler::new(variant);

    let mut rng = SmallRng::seed_from_u64(400);
    let theta = variant.draw_prior(1, &mut rng);
    let sim_data = simulator
        .simulate_batch(&theta, DEFAULT_TEST_OBSERVATIONS, 401)
        .unwrap();
    let y: ObservedDataset = sim_data.conditions.into_iter().next().unwrap().into();

    let result = posterior_sbc(
        &y,
        &sampler,
        &simulator,
        DEFAULT_PPRED_SAMPLES,
        DEFAULT_POSTERIOR_SAMPLES,
        402,
    )
    .unwrap();
    assert_eq!(result.num_ppred(), DEFAULT_PPRED_SAMPLES);
    assert_eq!(result.num_posterior(), DEFAULT_POSTERIOR_SAMPLES);
    assert_eq!(result.ranks().num_datasets(), DEFAULT_PPRED_SAMPLES);
}

#[test]
fn prior_sbc_runs_at_the_documented_default_scale() {
    let variant = ModelVariant::M6;
    let simulator = TrialSimulator::new(variant);
    let sampler = AuditSampler::new(variant);

    let result = prior_sbc(
        &simulator,
        &sampler,
        DEFAULT_TEST_DATASETS,
        DEFAULT_TEST_OBSERVATIONS,
        DEFAULT_TEST_POSTERIOR_SAMPLES,
        403,
    )
    .unwrap();
    assert_eq!(result.theta_true.rows(), DEFAULT_TEST_DATASETS);
    assert!(result
        .samples
        .iter()
        .all(|s| s.rows() == DEFAULT_TEST_POSTERIOR_SAMPLES));
    assert_eq!(result.ranks.num_datasets(), DEFAULT_TEST_DATASETS);
}

#[test]
fn prior_sbc_rejects_zero_counts() {
    let variant = ModelVariant::M5;
    let simulator = TrialSimulator::new(variant);
    let sampler = AuditSampler::new(variant);
    let err = prior_sbc(&simulator, &sampler, 0, 10, 10, 1).unwrap_err();
    assert!(matches!(err, CalibrateError::InvalidSampleCount { .. }));
}
