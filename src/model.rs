//! Model variants and the registry resolving them by name.
//!
//! The three variants share one parameter layout (see [`crate::constants`])
//! and differ in boundary policy, encoding path, and step size:
//!
//! | name  | boundary        | encoding path      | dt    | 8th parameter |
//! |-------|-----------------|--------------------|-------|---------------|
//! | `m4b` | fixed           | mixture (weight θ) | 0.005 | `theta`       |
//! | `m5`  | linear collapse | trial-specific     | 0.001 | `a_slope`     |
//! | `m6`  | Weibull collapse| trial-specific     | 0.005 | `lambda`      |

use rand::rngs::SmallRng;
use rand::Rng;

use crate::boundary::BoundaryPolicy;
use crate::constants::{
    DT_M4B, DT_M5, DT_M6, PARAM_DIM, PARAM_NAMES_M4B, PARAM_NAMES_M5, PARAM_NAMES_M6,
    PRIOR_BOUNDS_M4B, PRIOR_BOUNDS_M5, PRIOR_BOUNDS_M6,
};
use crate::error::SimulateError;
use crate::types::ParameterBatch;

/// Closed set of boundary-collapse DDM variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModelVariant {
    M4b,
    M5,
    M6,
}

/// How the encoding latency enters the reported trial.
///
/// Under `Direct`, the reaction time uses the trial-specific encoding draw
/// and the latency observation adds independent measurement noise. Under
/// `Mixture`, both a trial-specific and an average-path candidate are drawn
/// each trial and one is selected with probability `1 - theta` / `theta`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EncodingPath {
    Direct,
    Mixture { theta: f64 },
}

/// All variants, in registry order.
pub const ALL_VARIANTS: [ModelVariant; 3] = [ModelVariant::M4b, ModelVariant::M5, ModelVariant::M6];

impl ModelVariant {
    /// Resolve a variant from its registry name.
    pub fn from_name(name: &str) -> Result<Self, SimulateError> {
        match name {
            "m4b" => Ok(ModelVariant::M4b),
            "m5" => Ok(ModelVariant::M5),
            "m6" => Ok(ModelVariant::M6),
            other => Err(SimulateError::UnknownModel {
                name: other.to_string(),
            }),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ModelVariant::M4b => "m4b",
            ModelVariant::M5 => "m5",
            ModelVariant::M6 => "m6",
        }
    }

    pub const fn param_dim(self) -> usize {
        PARAM_DIM
    }

    /// Euler-Maruyama step size. Part of the variant definition, not tunable.
    pub const fn dt(self) -> f64 {
        match self {
            ModelVariant::M4b => DT_M4B,
            ModelVariant::M5 => DT_M5,
            ModelVariant::M6 => DT_M6,
        }
    }

    pub fn param_names(self) -> &'static [&'static str; PARAM_DIM] {
        match self {
            ModelVariant::M4b => &PARAM_NAMES_M4B,
            ModelVariant::M5 => &PARAM_NAMES_M5,
            ModelVariant::M6 => &PARAM_NAMES_M6,
        }
    }

    pub fn prior_bounds(self) -> &'static [(f32, f32); PARAM_DIM] {
        match self {
            ModelVariant::M4b => &PRIOR_BOUNDS_M4B,
            ModelVariant::M5 => &PRIOR_BOUNDS_M5,
            ModelVariant::M6 => &PRIOR_BOUNDS_M6,
        }
    }

    /// Boundary policy for a given value of the variant-specific parameter.
    /// For `m4b` that parameter is the mixture weight and the bounds stay fixed.
    pub fn boundary_policy(self, extra: f64) -> BoundaryPolicy {
        match self {
            ModelVariant::M4b => BoundaryPolicy::Fixed,
            ModelVariant::M5 => BoundaryPolicy::Linear { slope: extra },
            ModelVariant::M6 => BoundaryPolicy::Weibull { lambda: extra },
        }
    }

    /// Encoding path for a given value of the variant-specific parameter.
    pub fn encoding_path(self, extra: f64) -> EncodingPath {
        match self {
            ModelVariant::M4b => EncodingPath::Mixture { theta: extra },
            ModelVariant::M5 | ModelVariant::M6 => EncodingPath::Direct,
        }
    }

    /// Draw `batch_size` parameter vectors from the variant's uniform prior box.
    pub fn draw_prior(self, batch_size: usize, rng: &mut SmallRng) -> ParameterBatch {
        let bounds = self.prior_bounds();
        let mut data = Vec::with_capacity(batch_size * PARAM_DIM);
        for _ in 0..batch_size {
            for &(low, high) in bounds {
                data.push(rng.random_range(low..high));
            }
        }
        ParameterBatch::from_flat(data, PARAM_DIM)
    }

    /// Check a parameter vector against the variant's prior bounding box.
    ///
    /// The simulators accept any finite vector of the right width; this is
    /// the guard callers use before handing over externally produced draws.
    pub fn validate(self, params: &[f32]) -> Result<(), SimulateError> {
        if params.len() != PARAM_DIM {
            return Err(SimulateError::ParamDimension {
                model: self.name(),
                expected: PARAM_DIM,
                actual: params.len(),
            });
        }
        let names = self.param_names();
        for (i, (&value, &(low, high))) in params.iter().zip(self.prior_bounds()).enumerate() {
            if !(value >= low && value < high) {
                return Err(SimulateError::InvalidParameterDomain {
                    model: self.name(),
                    name: names[i],
                    value,
                    low,
                    high,
                });
            }
        }
        Ok(())
    }
}
