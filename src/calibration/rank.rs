//! Rank statistics for simulation-based calibration.
//!
//! A fractional rank localizes a reference value inside a sample set:
//! the share of samples strictly below it, componentwise. Under correct
//! calibration the ranks of true (or outer-posterior) draws are uniform
//! on [0, 1), so their histogram flatness is the diagnostic.

use serde::Serialize;

use crate::types::ParameterBatch;

/// Fractional rank of each component of `reference` within `samples`:
/// `#<{samples[.., d] < reference[d]}> / rows`.
pub fn fractional_ranks(samples: &ParameterBatch, reference: &[f32]) -> Vec<f32> {
    debug_assert_eq!(samples.param_dim(), reference.len());
    debug_assert!(samples.rows() > 0);

    let rows = samples.rows() as f32;
    let mut below = vec![0u32; reference.len()];
    for row in samples.iter_rows() {
        for (count, (&sample, &target)) in below.iter_mut().zip(row.iter().zip(reference)) {
            if sample < target {
                *count += 1;
            }
        }
    }
    below.iter().map(|&c| c as f32 / rows).collect()
}

/// Fractional ranks for a collection of calibration datasets, stored
/// row-major as (num_datasets x param_dim).
#[derive(Clone, Debug, Serialize)]
pub struct SbcRanks {
    data: Vec<f32>,
    num_datasets: usize,
    param_dim: usize,
}

impl SbcRanks {
    pub(crate) fn from_rows(rows: Vec<Vec<f32>>) -> Self {
        let num_datasets = rows.len();
        let param_dim = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(num_datasets * param_dim);
        for row in &rows {
            debug_assert_eq!(row.len(), param_dim);
            data.extend_from_slice(row);
        }
        Self {
            data,
            num_datasets,
            param_dim,
        }
    }

    pub fn num_datasets(&self) -> usize {
        self.num_datasets
    }

    pub fn param_dim(&self) -> usize {
        self.param_dim
    }

    /// Ranks of one calibration dataset, in parameter order.
    pub fn dataset(&self, index: usize) -> &[f32] {
        let start = index * self.param_dim;
        &self.data[start..start + self.param_dim]
    }

    /// Ranks of one parameter across all datasets.
    pub fn param(&self, param_index: usize) -> Vec<f32> {
        assert!(param_index < self.param_dim, "parameter index out of range");
        self.data
            .iter()
            .skip(param_index)
            .step_by(self.param_dim)
            .copied()
            .collect()
    }

    /// Mean rank per parameter. Sits near 0.5 under good calibration; a
    /// systematic offset flags posterior bias in that component.
    pub fn mean_per_param(&self) -> Vec<f64> {
        let mut sums = vec![0.0f64; self.param_dim];
        for row in self.data.chunks_exact(self.param_dim) {
            for (sum, &rank) in sums.iter_mut().zip(row) {
                *sum += rank as f64;
            }
        }
        let n = self.num_datasets.max(1) as f64;
        sums.iter().map(|s| s / n).collect()
    }

    pub fn as_flat(&self) -> &[f32] {
        &self.data
    }
}
