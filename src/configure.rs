//! Configurator: reshapes raw forward-model output into the three-part
//! layout the amortized inference network consumes.
//!
//! The output batch carries `direct_conditions` (log trial count, broadcast
//! over the batch), `parameters` (passed through untouched), and
//! `summary_conditions` (per-trial channels derived from the stored two).
//! Calibration reuses the same path with zero-filled parameters, so nothing
//! here may ever read a parameter value into the conditions.

use crate::constants::SUMMARY_CHANNELS;
use crate::error::CalibrateError;
use crate::types::{ParameterBatch, SimulatedDataset};

/// One forward pass worth of raw output, as handed to [`configure`].
#[derive(Clone, Copy, Debug)]
pub struct ForwardRecord<'a> {
    pub prior_draws: &'a ParameterBatch,
    pub sim_data: &'a SimulatedDataset,
    /// The trial count shared by every condition in `sim_data`.
    pub trial_count: usize,
}

/// Network-ready view of one forward batch.
#[derive(Clone, Debug)]
pub struct ConfiguredBatch {
    /// ln(trial_count), one entry per batch element.
    pub direct_conditions: Vec<f32>,
    /// Inference targets during training; zero-filled during calibration.
    pub parameters: ParameterBatch,
    /// Per-trial (|rt|, decision indicator, latency) channels.
    pub summary_conditions: SummaryTensor,
}

/// Flat row-major (batch x trials x 3) tensor of summary channels.
#[derive(Clone, Debug, PartialEq)]
pub struct SummaryTensor {
    data: Vec<f32>,
    batch_size: usize,
    trial_count: usize,
}

impl SummaryTensor {
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn trial_count(&self) -> usize {
        self.trial_count
    }

    /// The three channels of one trial.
    pub fn trial(&self, batch_index: usize, trial_index: usize) -> &[f32] {
        let start = (batch_index * self.trial_count + trial_index) * SUMMARY_CHANNELS;
        &self.data[start..start + SUMMARY_CHANNELS]
    }

    pub fn as_flat(&self) -> &[f32] {
        &self.data
    }
}

/// Assemble the network-ready batch from one forward record.
///
/// Fails with [`CalibrateError::ShapeMismatch`] when the parameter rows do
/// not line up with the simulated conditions, or when any condition deviates
/// from the declared trial count.
pub fn configure(record: &ForwardRecord) -> Result<ConfiguredBatch, CalibrateError> {
    let batch_size = record.sim_data.batch_size();
    if record.prior_draws.rows() != batch_size {
        return Err(CalibrateError::ShapeMismatch {
            context: "configurator parameters",
            expected: format!("{batch_size} rows"),
            actual: format!("{} rows", record.prior_draws.rows()),
        });
    }

    let trial_count = record.trial_count;
    let mut data = Vec::with_capacity(batch_size * trial_count * SUMMARY_CHANNELS);
    for condition in &record.sim_data.conditions {
        if condition.trials.len() != trial_count {
            return Err(CalibrateError::ShapeMismatch {
                context: "configurator summary conditions",
                expected: format!("{trial_count} trials per condition"),
                actual: format!("{} trials", condition.trials.len()),
            });
        }
        for trial in &condition.trials {
            data.push(trial.choice_rt.abs());
            data.push(if trial.choice_rt > 0.0 { 1.0 } else { 0.0 });
            data.push(trial.n200_lat);
        }
    }

    let log_count = (trial_count as f64).ln() as f32;
    Ok(ConfiguredBatch {
        direct_conditions: vec![log_count; batch_size],
        parameters: record.prior_draws.clone(),
        summary_conditions: SummaryTensor {
            data,
            batch_size,
            trial_count,
        },
    })
}
