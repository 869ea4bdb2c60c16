//! Aggregate summaries of simulated datasets.
//!
//! These are diagnostic views over raw trials (choice split, RT location and
//! spread, latency moments), not the per-trial channels the configurator
//! builds. All types serialize for downstream tooling.

use serde::Serialize;

use crate::types::{ConditionDataset, SimulatedDataset};

/// Per-condition summary of simulated or observed trials.
#[derive(Clone, Debug, Serialize)]
pub struct ConditionSummary {
    pub trial_count: usize,
    /// Fraction of upper-boundary (positive RT) decisions.
    pub upper_rate: f64,
    pub mean_abs_rt: f64,
    pub std_abs_rt: f64,
    pub median_abs_rt: f64,
    pub min_abs_rt: f64,
    pub max_abs_rt: f64,
    pub mean_latency: f64,
    pub std_latency: f64,
}

/// Summarize one condition. An empty condition yields an all-zero summary.
pub fn summarize_condition(condition: &ConditionDataset) -> ConditionSummary {
    let n = condition.trials.len();
    if n == 0 {
        return ConditionSummary {
            trial_count: 0,
            upper_rate: 0.0,
            mean_abs_rt: 0.0,
            std_abs_rt: 0.0,
            median_abs_rt: 0.0,
            min_abs_rt: 0.0,
            max_abs_rt: 0.0,
            mean_latency: 0.0,
            std_latency: 0.0,
        };
    }

    let mut abs_rts: Vec<f64> = condition
        .trials
        .iter()
        .map(|t| t.choice_rt.abs() as f64)
        .collect();
    abs_rts.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let upper = condition.trials.iter().filter(|t| t.choice_rt > 0.0).count();
    let mean_abs_rt = abs_rts.iter().sum::<f64>() / n as f64;
    let var_abs_rt =
        abs_rts.iter().map(|x| (x - mean_abs_rt).powi(2)).sum::<f64>() / n as f64;

    let latencies: Vec<f64> = condition.trials.iter().map(|t| t.n200_lat as f64).collect();
    let mean_latency = latencies.iter().sum::<f64>() / n as f64;
    let var_latency =
        latencies.iter().map(|x| (x - mean_latency).powi(2)).sum::<f64>() / n as f64;

    ConditionSummary {
        trial_count: n,
        upper_rate: upper as f64 / n as f64,
        mean_abs_rt,
        std_abs_rt: var_abs_rt.sqrt(),
        median_abs_rt: abs_rts[n / 2],
        min_abs_rt: abs_rts[0],
        max_abs_rt: abs_rts[n - 1],
        mean_latency,
        std_latency: var_latency.sqrt(),
    }
}

/// Summarize every condition of a dataset, in batch order.
pub fn summarize_dataset(data: &SimulatedDataset) -> Vec<ConditionSummary> {
    data.conditions.iter().map(summarize_condition).collect()
}
