//! Core data structures: trial outcomes, datasets, and parameter batches.

use crate::constants::{DATA_CHANNELS, LATENCY_VALID_MIN};

/// One simulated decision trial.
///
/// `choice_rt` is the choice-signed reaction time: positive when the upper
/// boundary was reached first, negative for the lower, with magnitude equal
/// to encoding time + decision time + motor time. `n200_lat` is the auxiliary
/// neural latency observation drawn jointly with the trial.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrialOutcome {
    pub choice_rt: f32,
    pub n200_lat: f32,
}

/// All trials simulated from a single parameter vector.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConditionDataset {
    pub trials: Vec<TrialOutcome>,
}

/// One condition per parameter vector in a batch; conceptually a
/// (batch x trials x 2) array. Datasets produced by the batch simulator are
/// rectangular: every condition holds the same number of trials.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SimulatedDataset {
    pub conditions: Vec<ConditionDataset>,
}

impl SimulatedDataset {
    pub fn batch_size(&self) -> usize {
        self.conditions.len()
    }

    /// Trial count of the first condition (zero for an empty dataset).
    pub fn trial_count(&self) -> usize {
        self.conditions.first().map_or(0, |c| c.trials.len())
    }

    /// Flatten to the row-major (batch x trials x 2) channel buffer, with
    /// channel 0 the choice-signed reaction time and channel 1 the latency.
    pub fn to_flat(&self) -> Vec<f32> {
        let mut data =
            Vec::with_capacity(self.batch_size() * self.trial_count() * DATA_CHANNELS);
        for condition in &self.conditions {
            for trial in &condition.trials {
                data.push(trial.choice_rt);
                data.push(trial.n200_lat);
            }
        }
        data
    }
}

/// Observed data for a single experimental unit, in the same two-channel
/// layout the simulator produces.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObservedDataset {
    pub trials: Vec<TrialOutcome>,
}

/// One raw behavioral row before recoding, as exported from an experiment:
/// an unsigned reaction time, a correctness flag, and the single-trial N200
/// peak latency (sentinel-coded when the EEG measure is missing).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BehavioralTrial {
    pub response_time: f32,
    pub response_correct: bool,
    pub n200_lat: f32,
}

impl ObservedDataset {
    pub fn from_trials(trials: Vec<TrialOutcome>) -> Self {
        Self { trials }
    }

    /// Recode raw behavioral rows into the two-channel observation format.
    ///
    /// Incorrect responses get a negative reaction time, rows whose latency
    /// carries the missing-data sentinel are dropped, and the result is
    /// truncated to the first `max_observations` surviving rows.
    pub fn from_behavioral(rows: &[BehavioralTrial], max_observations: usize) -> Self {
        let trials = rows
            .iter()
            .filter(|r| r.n200_lat > LATENCY_VALID_MIN)
            .map(|r| TrialOutcome {
                choice_rt: if r.response_correct {
                    r.response_time
                } else {
                    -r.response_time
                },
                n200_lat: r.n200_lat,
            })
            .take(max_observations)
            .collect();
        Self { trials }
    }

    pub fn num_observations(&self) -> usize {
        self.trials.len()
    }
}

impl From<ConditionDataset> for ObservedDataset {
    fn from(condition: ConditionDataset) -> Self {
        Self {
            trials: condition.trials,
        }
    }
}

/// Row-major (rows x param_dim) matrix of parameter vectors.
///
/// Serves both prior batches and posterior sample sets; a posterior sample
/// set is a batch whose row count equals the requested number of draws.
#[derive(Clone, Debug, PartialEq)]
pub struct ParameterBatch {
    data: Vec<f32>,
    param_dim: usize,
}

impl ParameterBatch {
    /// Zero-filled batch. Calibration uses this as the parameter placeholder
    /// when conditioning on data alone.
    pub fn zeros(rows: usize, param_dim: usize) -> Self {
        assert!(param_dim > 0, "param_dim must be positive");
        Self {
            data: vec![0.0; rows * param_dim],
            param_dim,
        }
    }

    /// Build from a flat row-major buffer.
    ///
    /// Panics if `data.len()` is not a multiple of `param_dim`.
    pub fn from_flat(data: Vec<f32>, param_dim: usize) -> Self {
        assert!(param_dim > 0, "param_dim must be positive");
        assert!(
            data.len() % param_dim == 0,
            "flat length {} is not a multiple of param_dim {}",
            data.len(),
            param_dim
        );
        Self { data, param_dim }
    }

    pub fn rows(&self) -> usize {
        self.data.len() / self.param_dim
    }

    pub fn param_dim(&self) -> usize {
        self.param_dim
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn row(&self, index: usize) -> &[f32] {
        let start = index * self.param_dim;
        &self.data[start..start + self.param_dim]
    }

    /// Append one row. Panics on a row of the wrong width.
    pub fn push_row(&mut self, row: &[f32]) {
        assert_eq!(row.len(), self.param_dim, "row width mismatch");
        self.data.extend_from_slice(row);
    }

    /// Overwrite one row in place. Panics on a row of the wrong width.
    pub fn set_row(&mut self, index: usize, row: &[f32]) {
        assert_eq!(row.len(), self.param_dim, "row width mismatch");
        let start = index * self.param_dim;
        self.data[start..start + self.param_dim].copy_from_slice(row);
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[f32]> {
        self.data.chunks_exact(self.param_dim)
    }

    pub fn as_flat(&self) -> &[f32] {
        &self.data
    }
}
