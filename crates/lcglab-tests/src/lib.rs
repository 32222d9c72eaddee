//! Uniformity and independence tests for normalized generator output.
//!
//! Every test takes a slice of values in `[0, 1)` in generation order and
//! returns a structured result with a pass/fail decision. Tests never fail
//! with an error: short or degenerate input yields a failing result with
//! zeroed statistics instead.
//!
//! - [`chi_square_uniformity`]: equal-width binning against a uniform null,
//!   compared to a critical value from [`critical`].
//! - [`runs_test`]: runs above/below the sample mean with a normal
//!   confidence interval.
//! - [`lag1_correlation`]: Pearson correlation of the sequence with its
//!   one-step lag.
//! - [`validate`]: runs uniformity plus the configured independence test.

pub mod critical;

use serde::{Deserialize, Serialize};
use statrs::distribution::{ChiSquared, ContinuousCDF};
use statrs::function::erf::erfc;

pub use critical::{CriticalSource, CriticalValue, critical_value, lookup, z_quantile};

// ═══════════════════════════════════════════════════════════════════════════════
// Core types
// ═══════════════════════════════════════════════════════════════════════════════

/// Default significance level.
pub const DEFAULT_ALPHA: f64 = 0.05;

/// Upper bound on the number of chi-square intervals.
pub const MAX_INTERVALS: usize = 20;

/// Fixed threshold on |r| for the lag-1 correlation test.
pub const CORRELATION_THRESHOLD: f64 = 0.05;

/// Which independence test to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndependenceAlgorithm {
    /// Runs above/below the mean (default).
    #[default]
    Runs,
    /// Lag-1 Pearson correlation.
    Correlation,
}

impl std::fmt::Display for IndependenceAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Runs => write!(f, "runs"),
            Self::Correlation => write!(f, "correlation"),
        }
    }
}

/// Result of the chi-square goodness-of-fit test.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UniformityResult {
    pub interval_count: usize,
    pub chi_square_statistic: f64,
    pub critical_value: f64,
    pub degrees_of_freedom: usize,
    pub significance_level: f64,
    /// Survival probability of the statistic. Informational only.
    pub p_value: Option<f64>,
    pub observed: Vec<u64>,
    pub expected: f64,
    pub passed: bool,
}

/// Result of the selected independence test.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "algorithm", rename_all = "snake_case")]
pub enum IndependenceResult {
    Correlation {
        coefficient: f64,
        threshold: f64,
        passed: bool,
    },
    Runs {
        observed_runs: usize,
        expected_runs: f64,
        lower_bound: f64,
        upper_bound: f64,
        above: usize,
        below: usize,
        /// Two-sided normal p-value of the run count. Informational only.
        p_value: Option<f64>,
        passed: bool,
    },
}

impl IndependenceResult {
    pub fn passed(&self) -> bool {
        match self {
            Self::Correlation { passed, .. } | Self::Runs { passed, .. } => *passed,
        }
    }

    pub fn algorithm(&self) -> IndependenceAlgorithm {
        match self {
            Self::Correlation { .. } => IndependenceAlgorithm::Correlation,
            Self::Runs { .. } => IndependenceAlgorithm::Runs,
        }
    }
}

/// Knobs for [`validate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    pub alpha: f64,
    pub algorithm: IndependenceAlgorithm,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            algorithm: IndependenceAlgorithm::default(),
        }
    }
}

/// Combined outcome of one validation pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationVerdict {
    pub independence: IndependenceResult,
    pub uniformity: UniformityResult,
    pub overall_passed: bool,
}

// ═══════════════════════════════════════════════════════════════════════════════
// Helpers
// ═══════════════════════════════════════════════════════════════════════════════

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Number of chi-square intervals for `n` samples: `min(20, ⌊√n⌋)`, at least 1.
pub fn interval_count(n: usize) -> usize {
    let k = (n as f64).sqrt().floor() as usize;
    k.clamp(1, MAX_INTERVALS)
}

// ═══════════════════════════════════════════════════════════════════════════════
// 1. UNIFORMITY
// ═══════════════════════════════════════════════════════════════════════════════

/// Chi-square test of `values` against a uniform distribution on `[0, 1)`.
///
/// Passes iff the statistic is strictly below the critical value for
/// `k − 1` degrees of freedom. With `k == 1` the critical value is 0 and the
/// test cannot pass.
pub fn chi_square_uniformity(values: &[f64], alpha: f64) -> UniformityResult {
    let n = values.len();
    let k = interval_count(n);
    let df = k - 1;
    let critical = critical::critical_value(df, alpha);

    let mut observed = vec![0u64; k];
    for &v in values {
        // clamp guards against a value rounding into a nonexistent bin
        let bin = ((v * k as f64).floor() as usize).min(k - 1);
        observed[bin] += 1;
    }

    let expected = n as f64 / k as f64;
    let statistic = if n == 0 {
        0.0
    } else {
        observed
            .iter()
            .map(|&o| {
                let diff = o as f64 - expected;
                diff * diff / expected
            })
            .sum()
    };

    let p_value = if df > 0 {
        ChiSquared::new(df as f64).ok().map(|d| d.sf(statistic))
    } else {
        None
    };

    UniformityResult {
        interval_count: k,
        chi_square_statistic: statistic,
        critical_value: critical,
        degrees_of_freedom: df,
        significance_level: alpha,
        p_value,
        observed,
        expected,
        passed: n > 0 && statistic < critical,
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// 2. INDEPENDENCE
// ═══════════════════════════════════════════════════════════════════════════════

/// Lag-1 Pearson correlation between `values[..n-1]` and `values[1..]`.
///
/// A zero denominator gives `r = 0`. Fewer than 2 values fail with `r = 0`.
pub fn lag1_correlation(values: &[f64]) -> IndependenceResult {
    let n = values.len();
    if n < 2 {
        return IndependenceResult::Correlation {
            coefficient: 0.0,
            threshold: CORRELATION_THRESHOLD,
            passed: false,
        };
    }

    let xs = &values[..n - 1];
    let ys = &values[1..];
    let mx = mean(xs);
    let my = mean(ys);

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (&x, &y) in xs.iter().zip(ys) {
        let dx = x - mx;
        let dy = y - my;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    let denom = (sxx * syy).sqrt();
    let r = if denom == 0.0 { 0.0 } else { sxy / denom };

    IndependenceResult::Correlation {
        coefficient: r,
        threshold: CORRELATION_THRESHOLD,
        passed: r.abs() < CORRELATION_THRESHOLD,
    }
}

/// Runs above/below the mean, checked against `μ ± z·σ` (inclusive).
///
/// Values equal to the mean count as "above". Fewer than 2 values fail with
/// every field zeroed.
pub fn runs_test(values: &[f64], alpha: f64) -> IndependenceResult {
    let n = values.len();
    if n < 2 {
        return IndependenceResult::Runs {
            observed_runs: 0,
            expected_runs: 0.0,
            lower_bound: 0.0,
            upper_bound: 0.0,
            above: 0,
            below: 0,
            p_value: None,
            passed: false,
        };
    }

    let m = mean(values);
    let signs: Vec<bool> = values.iter().map(|&v| v >= m).collect();

    let mut runs: usize = 1;
    for i in 1..n {
        if signs[i] != signs[i - 1] {
            runs += 1;
        }
    }

    let n1 = signs.iter().filter(|&&s| s).count();
    let n2 = n - n1;
    let (n1f, n2f, nf) = (n1 as f64, n2 as f64, n as f64);

    let expected = 2.0 * n1f * n2f / nf + 1.0;
    let product = 2.0 * n1f * n2f;
    // n >= 2 here, so the (n - 1) factor is non-zero
    let variance = (product * (product - nf) / (nf * nf * (nf - 1.0))).max(0.0);
    let sigma = variance.sqrt();

    let z = z_quantile(alpha);
    let lower = expected - z * sigma;
    let upper = expected + z * sigma;
    let observed = runs as f64;

    let p_value = if sigma > 0.0 {
        let z_obs = (observed - expected).abs() / sigma;
        Some(erfc(z_obs / std::f64::consts::SQRT_2))
    } else {
        None
    };

    IndependenceResult::Runs {
        observed_runs: runs,
        expected_runs: expected,
        lower_bound: lower,
        upper_bound: upper,
        above: n1,
        below: n2,
        p_value,
        passed: observed >= lower && observed <= upper,
    }
}

/// Run the independence test selected by `algorithm`.
pub fn independence_test(
    values: &[f64],
    algorithm: IndependenceAlgorithm,
    alpha: f64,
) -> IndependenceResult {
    match algorithm {
        IndependenceAlgorithm::Runs => runs_test(values, alpha),
        IndependenceAlgorithm::Correlation => lag1_correlation(values),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Validation
// ═══════════════════════════════════════════════════════════════════════════════

/// Run the uniformity test and the configured independence test.
///
/// Pure and deterministic: identical input gives an identical verdict.
pub fn validate(values: &[f64], config: &ValidationConfig) -> ValidationVerdict {
    let uniformity = chi_square_uniformity(values, config.alpha);
    let independence = independence_test(values, config.algorithm, config.alpha);
    let overall_passed = uniformity.passed && independence.passed();
    log::trace!(
        "validated n={} alpha={} algorithm={}: uniformity={} independence={}",
        values.len(),
        config.alpha,
        config.algorithm,
        uniformity.passed,
        independence.passed()
    );
    ValidationVerdict {
        independence,
        uniformity,
        overall_passed,
    }
}
