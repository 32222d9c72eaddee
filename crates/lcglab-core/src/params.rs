//! Generator parameters and their validation.
//!
//! Raw input arrives as strings (as typed by a user). [`validate_params`]
//! parses and checks them in a fixed order and stops at the first violation.
//! A successfully built [`GeneratorParams`] is immutable and always satisfies
//! `0 ≤ X0 < m`, `1 ≤ a < m`, `0 ≤ c < m` with `m = 2^g`.

use serde::Serialize;

use crate::error::ValidationError;
use lcglab_tests::DEFAULT_ALPHA;

pub const MIN_EXPONENT: i64 = 1;
/// Keeps `m = 2^g` and `a · X` well inside 64-bit integer range.
pub const MAX_EXPONENT: i64 = 20;
pub const MIN_COUNT: i64 = 1;
pub const MAX_COUNT: i64 = 100_000;
pub const MIN_CONFIDENCE_PERCENT: f64 = 80.0;
pub const MAX_CONFIDENCE_PERCENT: f64 = 99.9;

/// Offset applied to the seed by [`GeneratorParams::nudged_seed`].
pub const SEED_NUDGE: u64 = 137;

/// Validated LCG parameters. `m = 2^exponent` is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GeneratorParams {
    exponent: u32,
    multiplier: u64,
    increment: u64,
    seed: u64,
    count: usize,
}

impl GeneratorParams {
    /// Check already-parsed integers against the range rules.
    ///
    /// Rules run in order: g range, N range, a ≥ 1, c ≥ 0, then the
    /// modulus-relative checks on X0, a and c.
    pub fn new(g: i64, a: i64, c: i64, x0: i64, n: i64) -> Result<Self, ValidationError> {
        if !(MIN_EXPONENT..=MAX_EXPONENT).contains(&g) {
            return Err(ValidationError::new(format!(
                "g must satisfy {MIN_EXPONENT} ≤ g ≤ {MAX_EXPONENT} (got {g})"
            )));
        }
        if !(MIN_COUNT..=MAX_COUNT).contains(&n) {
            return Err(ValidationError::new(format!(
                "N must satisfy {MIN_COUNT} ≤ N ≤ {MAX_COUNT} (got {n})"
            )));
        }
        if a < 1 {
            return Err(ValidationError::new(format!("a must be ≥ 1 (got {a})")));
        }
        if c < 0 {
            return Err(ValidationError::new(format!("c must be ≥ 0 (got {c})")));
        }

        let m = 1i64 << g;
        if !(0..m).contains(&x0) {
            return Err(ValidationError::new(format!(
                "X0 must satisfy 0 ≤ X0 < m (m = 2^{g} = {m}, got {x0})"
            )));
        }
        if a >= m {
            return Err(ValidationError::new(format!(
                "a must satisfy 1 ≤ a < m (m = 2^{g} = {m}, got {a})"
            )));
        }
        if c >= m {
            return Err(ValidationError::new(format!(
                "c must satisfy 0 ≤ c < m (m = 2^{g} = {m}, got {c})"
            )));
        }

        Ok(Self {
            exponent: g as u32,
            multiplier: a as u64,
            increment: c as u64,
            seed: x0 as u64,
            count: n as usize,
        })
    }

    pub fn exponent(&self) -> u32 {
        self.exponent
    }

    pub fn multiplier(&self) -> u64 {
        self.multiplier
    }

    pub fn increment(&self) -> u64 {
        self.increment
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// `m = 2^g`.
    pub fn modulus(&self) -> u64 {
        1u64 << self.exponent
    }

    /// Same parameters with the seed moved to `(X0 + 137) mod m`.
    pub fn nudged_seed(&self) -> Self {
        Self {
            seed: (self.seed + SEED_NUDGE) % self.modulus(),
            ..*self
        }
    }

    /// Hull–Dobell condition for a power-of-two modulus: c odd and
    /// `a ≡ 1 (mod 4)` (only `a` odd when `m = 2`).
    pub fn has_full_period(&self) -> bool {
        let c_odd = self.increment % 2 == 1;
        let a_ok = if self.exponent >= 2 {
            self.multiplier % 4 == 1
        } else {
            self.multiplier % 2 == 1
        };
        c_odd && a_ok
    }
}

/// How the multiplier is supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultiplierInput<'a> {
    /// `a` given directly.
    Direct(&'a str),
    /// `k ≥ 0` given, `a = 1 + 4k`.
    FromK(&'a str),
}

/// How the significance level is supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignificanceInput<'a> {
    /// alpha in the open interval (0, 1).
    Alpha(&'a str),
    /// Confidence percentage in [80, 99.9]; alpha = (100 − pct)/100.
    ConfidencePercent(&'a str),
}

/// Unparsed parameters as collected from a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawParams<'a> {
    pub exponent: &'a str,
    pub multiplier: MultiplierInput<'a>,
    pub increment: &'a str,
    pub seed: &'a str,
    pub count: &'a str,
    pub significance: Option<SignificanceInput<'a>>,
}

/// Output of [`validate_params`]: parameters plus the resolved alpha.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResolvedParams {
    pub params: GeneratorParams,
    pub alpha: f64,
}

fn parse_int(s: &str) -> Option<i64> {
    s.trim().parse::<i64>().ok()
}

/// `a = 1 + 4k`, saturating so that huge k lands on the `a < m` check.
pub fn multiplier_from_k(k: i64) -> i64 {
    k.saturating_mul(4).saturating_add(1)
}

fn resolve_alpha(input: Option<SignificanceInput<'_>>) -> Result<f64, ValidationError> {
    match input {
        None => Ok(DEFAULT_ALPHA),
        Some(SignificanceInput::Alpha(s)) => {
            let alpha = s
                .trim()
                .parse::<f64>()
                .map_err(|_| ValidationError::new("alpha must be a number"))?;
            if alpha > 0.0 && alpha < 1.0 {
                Ok(alpha)
            } else {
                Err(ValidationError::new(format!(
                    "alpha must satisfy 0 < alpha < 1 (got {alpha})"
                )))
            }
        }
        Some(SignificanceInput::ConfidencePercent(s)) => {
            let pct = s
                .trim()
                .parse::<f64>()
                .map_err(|_| ValidationError::new("confidence must be a number"))?;
            if (MIN_CONFIDENCE_PERCENT..=MAX_CONFIDENCE_PERCENT).contains(&pct) {
                // whole percentages must land exactly on the tabulated alphas
                Ok((100.0 - pct) / 100.0)
            } else {
                Err(ValidationError::new(format!(
                    "confidence must satisfy {MIN_CONFIDENCE_PERCENT} ≤ confidence ≤ {MAX_CONFIDENCE_PERCENT} (got {pct})"
                )))
            }
        }
    }
}

/// Parse and validate raw parameters, failing on the first violated rule.
pub fn validate_params(raw: &RawParams<'_>) -> Result<ResolvedParams, ValidationError> {
    let multiplier_text = match raw.multiplier {
        MultiplierInput::Direct(s) | MultiplierInput::FromK(s) => s,
    };
    let parsed = (
        parse_int(raw.exponent),
        parse_int(multiplier_text),
        parse_int(raw.increment),
        parse_int(raw.seed),
        parse_int(raw.count),
    );
    let (Some(g), Some(a_or_k), Some(c), Some(x0), Some(n)) = parsed else {
        return Err(ValidationError::new("all fields must be integers"));
    };

    let a = match raw.multiplier {
        MultiplierInput::Direct(_) => a_or_k,
        MultiplierInput::FromK(_) => {
            if a_or_k < 0 {
                return Err(ValidationError::new(format!(
                    "k must be ≥ 0 (got {a_or_k})"
                )));
            }
            multiplier_from_k(a_or_k)
        }
    };

    let params = GeneratorParams::new(g, a, c, x0, n)?;
    let alpha = resolve_alpha(raw.significance)?;
    log::trace!(
        "validated g={g} a={a} c={c} X0={x0} N={n} alpha={alpha} full_period={}",
        params.has_full_period()
    );
    Ok(ResolvedParams { params, alpha })
}
