//! The caller-facing operations: validate then generate, validate a sample
//! sequence statistically, and the seed-nudging regenerate step.

use serde::Serialize;

use crate::error::ValidationError;
use crate::generator::{Generation, Sample, generate, normalized_values};
use crate::params::{GeneratorParams, RawParams, validate_params};
use lcglab_tests::{IndependenceAlgorithm, ValidationConfig, ValidationVerdict};

/// A generated sequence with the significance level its input resolved to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidatedGeneration {
    pub alpha: f64,
    pub generation: Generation,
}

/// Validate raw input and, on success, generate the sequence.
///
/// Nothing is generated when validation fails.
pub fn validate_and_generate(
    raw: &RawParams<'_>,
) -> Result<ValidatedGeneration, ValidationError> {
    let resolved = validate_params(raw)?;
    Ok(ValidatedGeneration {
        alpha: resolved.alpha,
        generation: generate(&resolved.params),
    })
}

/// Run the uniformity test and the chosen independence test over `samples`.
pub fn validate(
    samples: &[Sample],
    alpha: f64,
    algorithm: IndependenceAlgorithm,
) -> ValidationVerdict {
    let values = normalized_values(samples);
    lcglab_tests::validate(&values, &ValidationConfig { alpha, algorithm })
}

/// A generation run together with its statistical verdict.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub generation: Generation,
    pub config: ValidationConfig,
    pub full_period: bool,
    pub verdict: ValidationVerdict,
}

/// Generate from `params` and validate the result under `config`.
pub fn evaluate(params: &GeneratorParams, config: &ValidationConfig) -> Evaluation {
    let generation = generate(params);
    let verdict = validate(&generation.samples, config.alpha, config.algorithm);
    log::debug!(
        "evaluated X0={} N={}: overall_passed={}",
        params.seed(),
        params.count(),
        verdict.overall_passed
    );
    Evaluation {
        full_period: params.has_full_period(),
        generation,
        config: *config,
        verdict,
    }
}

/// Move the seed to `(X0 + 137) mod m` and evaluate again.
///
/// A single fixed nudge; there is no guarantee the new seed passes.
pub fn regenerate(params: &GeneratorParams, config: &ValidationConfig) -> Evaluation {
    let next = params.nudged_seed();
    log::debug!("regenerating: seed {} -> {}", params.seed(), next.seed());
    evaluate(&next, config)
}
