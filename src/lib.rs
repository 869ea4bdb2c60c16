//! # nddm — Neural Drift-Diffusion Model Simulation and Calibration
//!
//! Forward simulators for three DDM variants with collapsing decision
//! boundaries and a joint N200 latency observation, plus the two
//! simulation-based calibration procedures used to audit amortized
//! posteriors trained on them.
//!
//! ## Component overview
//!
//! | Component | Rust module | Description |
//! |-----------|-------------|-------------|
//! | Boundary policies | [`boundary`] | Fixed, linear, and Weibull-shaped collapse of the decision corridor |
//! | Model registry | [`model`] | The `m4b` / `m5` / `m6` variants: priors, parameter layout, policy wiring |
//! | Trial/batch simulation | [`simulation`] | Euler-Maruyama trial paths, per-condition and parallel per-batch drivers |
//! | Configurator | [`configure`] | Reshapes raw forward output into network-ready (direct, parameters, summary) tensors |
//! | Trial-count contexts | [`context`] | Uniform and bimodal dataset-size draws for amortized training |
//! | Calibration | [`calibration`] | Posterior-predictive SBC on observed data and closed-world prior SBC |
//!
//! ## Data layout
//!
//! A parameter vector is a flat `[f32; 8]` row (see [`constants`]); batches
//! are row-major [`types::ParameterBatch`] matrices. Simulated data carries
//! two channels per trial: the choice-signed reaction time (upper boundary
//! positive) and the N200 latency. All path arithmetic runs in f64 and is
//! stored as f32.
//!
//! ## Reproducibility
//!
//! Every stochastic entry point takes either a caller-owned RNG or a `u64`
//! seed. Batch simulation seeds one RNG per (condition, trial) unit, so a
//! given seed yields identical data at any thread count.

pub mod boundary;
pub mod calibration;
pub mod configure;
pub mod constants;
pub mod context;
pub mod error;
pub mod model;
pub mod simulation;
pub mod types;
