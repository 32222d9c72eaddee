//! The LCG recurrence and cycle detection.
//!
//! `X_i = (a · X_{i-1} + c) mod m`, starting from the seed. The seed itself
//! is not emitted: sample 1 is `f(X0)`. All arithmetic is done in `u64`;
//! with `a, X < 2^20` the product stays below `2^40`.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use serde::Serialize;

use crate::params::GeneratorParams;

/// One generator output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    /// 1-based position in the sequence.
    pub index: usize,
    pub raw_value: u64,
    /// `raw_value / m`, in `[0, 1)`.
    pub normalized_value: f64,
}

/// First recurrence of a raw value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CycleInfo {
    pub detected: bool,
    /// Distance between the first occurrence and its first repeat.
    pub length: usize,
}

/// Everything produced by one generation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Generation {
    pub params: GeneratorParams,
    pub samples: Vec<Sample>,
    pub cycle: CycleInfo,
}

impl Generation {
    /// Normalized values in generation order.
    pub fn normalized_values(&self) -> Vec<f64> {
        normalized_values(&self.samples)
    }
}

pub(crate) fn normalized_values(samples: &[Sample]) -> Vec<f64> {
    samples.iter().map(|s| s.normalized_value).collect()
}

/// Infinite iterator over the raw LCG states following the seed.
#[derive(Debug, Clone)]
pub struct Lcg {
    multiplier: u64,
    increment: u64,
    modulus: u64,
    state: u64,
}

impl Lcg {
    pub fn new(params: &GeneratorParams) -> Self {
        Self {
            multiplier: params.multiplier(),
            increment: params.increment(),
            modulus: params.modulus(),
            state: params.seed(),
        }
    }

    /// Current state (the seed before the first call to `next`).
    pub fn state(&self) -> u64 {
        self.state
    }
}

impl Iterator for Lcg {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        self.state = (self.multiplier * self.state + self.increment) % self.modulus;
        Some(self.state)
    }
}

/// Generate exactly `N` samples and record the first cycle.
///
/// Generation continues past a detected cycle; the output length is always N.
pub fn generate(params: &GeneratorParams) -> Generation {
    let n = params.count();
    let m = params.modulus();
    let m_f = m as f64;

    let mut lcg = Lcg::new(params);
    let mut seen: HashMap<u64, usize> = HashMap::with_capacity(n.min(m as usize) + 1);
    seen.insert(lcg.state(), 0);
    let mut cycle = CycleInfo::default();
    let mut samples = Vec::with_capacity(n);

    for (i, x) in (1..=n).zip(&mut lcg) {
        if !cycle.detected {
            match seen.entry(x) {
                Entry::Occupied(first) => {
                    cycle = CycleInfo {
                        detected: true,
                        length: i - *first.get(),
                    };
                    log::debug!(
                        "cycle detected at index {i}: value {x} first seen at {}, length {}",
                        first.get(),
                        cycle.length
                    );
                }
                Entry::Vacant(slot) => {
                    slot.insert(i);
                }
            }
        }
        samples.push(Sample {
            index: i,
            raw_value: x,
            normalized_value: x as f64 / m_f,
        });
    }

    Generation {
        params: *params,
        samples,
        cycle,
    }
}
