//! Error types for simulation and calibration.

use thiserror::Error;

/// Error raised by an external posterior-sampling capability.
///
/// The concrete type is the sampler's business; calibration code wraps it in
/// [`CalibrateError::ExternalSampling`] and propagates it without retries or
/// degraded output.
pub type SamplerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors from the stochastic simulators.
#[derive(Debug, Error)]
pub enum SimulateError {
    /// A parameter component lies outside the variant's prior bounding box.
    #[error("model {model}: parameter '{name}' = {value} outside [{low}, {high})")]
    InvalidParameterDomain {
        model: &'static str,
        name: &'static str,
        value: f32,
        low: f32,
        high: f32,
    },

    /// A parameter vector has the wrong number of components.
    #[error("model {model}: parameter vector has {actual} components, expected {expected}")]
    ParamDimension {
        model: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A trial failed to reach a boundary within the step ceiling.
    #[error("trial did not reach a decision boundary within {max_steps} steps")]
    SimulationTimeout { max_steps: u64 },

    /// A registry lookup for a model name outside the closed set.
    #[error("unknown model variant '{name}' (known: m4b, m5, m6)")]
    UnknownModel { name: String },
}

/// Errors from the calibration procedures.
#[derive(Debug, Error)]
pub enum CalibrateError {
    /// Outer or inner sample counts must both be positive.
    #[error("sample counts must be positive (outer = {outer}, inner = {inner})")]
    InvalidSampleCount { outer: usize, inner: usize },

    /// Arrays that must agree in shape do not.
    #[error("shape mismatch in {context}: expected {expected}, got {actual}")]
    ShapeMismatch {
        context: &'static str,
        expected: String,
        actual: String,
    },

    /// The external posterior sampler failed; its error is carried unchanged.
    #[error("posterior sampling failed: {0}")]
    ExternalSampling(SamplerError),

    /// A simulation step inside a calibration run failed.
    #[error(transparent)]
    Simulate(#[from] SimulateError),
}
