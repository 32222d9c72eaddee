//! # lcglab-core
//!
//! Deterministic linear congruential generation with cycle detection, plus a
//! statistical verdict on whether the output behaves like independent
//! uniform draws on `[0, 1)`.
//!
//! ## Quick Start
//!
//! ```
//! use lcglab_core::{IndependenceAlgorithm, MultiplierInput, RawParams};
//!
//! let raw = RawParams {
//!     exponent: "4",
//!     multiplier: MultiplierInput::Direct("5"),
//!     increment: "1",
//!     seed: "1",
//!     count: "16",
//!     significance: None,
//! };
//! let out = lcglab_core::validate_and_generate(&raw).unwrap();
//! assert_eq!(out.generation.samples.len(), 16);
//! assert!(out.generation.cycle.detected);
//!
//! let verdict =
//!     lcglab_core::validate(&out.generation.samples, out.alpha, IndependenceAlgorithm::Runs);
//! println!("overall passed: {}", verdict.overall_passed);
//! ```
//!
//! ## Architecture
//!
//! Raw input → [`validate_params`] → [`generate`] → uniformity + independence
//! tests (from `lcglab-tests`) → [`ValidationVerdict`]
//!
//! Every stage is a pure function over owned, per-request data. The only
//! fallible step is parameter validation, which returns [`ValidationError`].

pub mod error;
pub mod generator;
pub mod params;
pub mod pipeline;

pub use error::ValidationError;
pub use generator::{CycleInfo, Generation, Lcg, Sample, generate};
pub use params::{
    GeneratorParams, MultiplierInput, RawParams, ResolvedParams, SEED_NUDGE, SignificanceInput,
    multiplier_from_k, validate_params,
};
pub use pipeline::{
    Evaluation, ValidatedGeneration, evaluate, regenerate, validate, validate_and_generate,
};

pub use lcglab_tests::{
    CriticalSource, CriticalValue, DEFAULT_ALPHA, IndependenceAlgorithm, IndependenceResult,
    UniformityResult, ValidationConfig, ValidationVerdict, critical_value,
    lookup as critical_value_lookup,
};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
