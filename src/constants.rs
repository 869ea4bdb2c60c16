//! Model constants: discretization steps, collapse constants, prior boxes,
//! parameter layout, and calibration defaults.
//!
//! Parameter vectors are flat `[f32; PARAM_DIM]` rows in a fixed order. The
//! first seven components are shared by every variant; the eighth is the
//! variant-specific one (mixture weight, collapse slope, or collapse scale).
//! [`crate::model::ModelVariant`] resolves which interpretation applies.

/// Number of components in every variant's parameter vector.
pub const PARAM_DIM: usize = 8;

/// Channels per stored observation: (choice-signed RT, N200 latency).
pub const DATA_CHANNELS: usize = 2;

/// Channels per configured summary observation: (|rt|, decision indicator, latency).
pub const SUMMARY_CHANNELS: usize = 3;

/// Diffusion coefficient of the evidence process. Fixed across variants; the
/// boundary and drift scales absorb it.
pub const DIFFUSION_COEFFICIENT: f64 = 1.0;

/// Shape constant k of the Weibull boundary collapse. Compile-time constant,
/// not a free parameter: only the scale is inferred.
pub const WEIBULL_SHAPE: f64 = 3.0;

/// Sign constant of the Weibull collapse. -1 contracts both bounds toward
/// the midline; +1 would expand them.
pub const WEIBULL_SIGN: f64 = -1.0;

/// Euler-Maruyama step sizes, fixed per variant. These are part of each
/// variant's definition (they shape the discretized first-passage
/// distribution), so they are not caller-overridable.
pub const DT_M4B: f64 = 0.005;
pub const DT_M5: f64 = 0.001;
pub const DT_M6: f64 = 0.005;

/// Default per-trial step ceiling. At dt = 0.001 this is 10,000 simulated
/// seconds, far beyond any plausible first passage; hitting it signals a
/// degenerate parameter vector rather than a slow trial.
pub const DEFAULT_MAX_STEPS: u64 = 10_000_000;

/// Latency sentinel: observed rows with `n200_lat` at or below this value
/// carry a missing-data marker and are dropped during recoding.
pub const LATENCY_VALID_MIN: f32 = -10.0;

/// Observation-count context defaults (per-dataset trial counts at training time).
pub const DEFAULT_NUM_OBS_MIN: usize = 50;
pub const DEFAULT_NUM_OBS_MAX: usize = 150;

/// Spread around each mode of the bimodal observation-count context.
pub const MIXTURE_CONTEXT_SCALE: f64 = 10.0;

/// Observations kept per held-out evaluation dataset.
pub const DEFAULT_TEST_OBSERVATIONS: usize = 60;

/// Held-out datasets in closed-world calibration runs.
pub const DEFAULT_TEST_DATASETS: usize = 200;

/// Posterior draws per held-out dataset in closed-world calibration runs.
pub const DEFAULT_TEST_POSTERIOR_SAMPLES: usize = 1000;

/// Posterior-predictive replicates (M) in posterior-predictive calibration.
pub const DEFAULT_PPRED_SAMPLES: usize = 200;

/// Conditional posterior draws per replicate (K) in posterior-predictive calibration.
pub const DEFAULT_POSTERIOR_SAMPLES: usize = 500;

/// Parameter names in vector order, per variant.
pub const PARAM_NAMES_M4B: [&str; PARAM_DIM] = [
    "drift", "boundary", "beta", "mu_tau_e", "tau_m", "sigma", "varsigma", "theta",
];
pub const PARAM_NAMES_M5: [&str; PARAM_DIM] = [
    "drift", "boundary", "beta", "mu_tau_e", "tau_m", "sigma", "varsigma", "a_slope",
];
pub const PARAM_NAMES_M6: [&str; PARAM_DIM] = [
    "drift", "boundary", "beta", "mu_tau_e", "tau_m", "sigma", "varsigma", "lambda",
];

/// Prior bounding boxes, `(low, high)` per component in vector order. Draws
/// are uniform over the half-open interval `[low, high)`.
pub const PRIOR_BOUNDS_M4B: [(f32, f32); PARAM_DIM] = [
    (-3.0, 3.0), // drift
    (0.5, 2.0),  // boundary
    (0.1, 0.9),  // beta
    (0.05, 0.6), // mu_tau_e
    (0.06, 0.8), // tau_m
    (0.0, 0.3),  // sigma
    (0.0, 0.3),  // varsigma
    (0.0, 1.0),  // theta
];
pub const PRIOR_BOUNDS_M5: [(f32, f32); PARAM_DIM] = [
    (0.1, 2.0),  // drift
    (0.5, 3.0),  // boundary
    (0.1, 0.9),  // beta
    (0.05, 0.6), // mu_tau_e
    (0.06, 0.8), // tau_m
    (0.0, 0.3),  // sigma
    (0.0, 0.3),  // varsigma
    (0.01, 0.9), // a_slope
];
pub const PRIOR_BOUNDS_M6: [(f32, f32); PARAM_DIM] = [
    (0.1, 3.0),  // drift
    (0.5, 3.0),  // boundary
    (0.1, 0.9),  // beta
    (0.05, 0.6), // mu_tau_e
    (0.06, 0.8), // tau_m
    (0.0, 0.3),  // sigma
    (0.0, 0.3),  // varsigma
    (0.5, 4.0),  // lambda
];
