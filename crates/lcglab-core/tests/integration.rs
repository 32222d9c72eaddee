//! Integration tests for lcglab-core.
//!
//! These tests drive the full pipeline:
//! raw input → validation → generation → statistical verdict.

use lcglab_core::{
    GeneratorParams, IndependenceAlgorithm, IndependenceResult, MultiplierInput, RawParams,
    SignificanceInput, ValidationConfig, evaluate, generate, regenerate, validate,
    validate_and_generate, validate_params,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Random valid parameter set with a modest N.
fn random_params(rng: &mut StdRng) -> GeneratorParams {
    let g: i64 = rng.random_range(1..=20);
    let m = 1i64 << g;
    let a = rng.random_range(1..m);
    let c = rng.random_range(0..m);
    let x0 = rng.random_range(0..m);
    let n = rng.random_range(1..=3000);
    GeneratorParams::new(g, a, c, x0, n).unwrap()
}

#[test]
fn scenario_full_period_lcg() {
    let raw = RawParams {
        exponent: "4",
        multiplier: MultiplierInput::Direct("5"),
        increment: "1",
        seed: "1",
        count: "16",
        significance: None,
    };
    let generation = validate_and_generate(&raw).unwrap().generation;
    let values: Vec<u64> = generation.samples.iter().map(|s| s.raw_value).collect();
    assert_eq!(
        values,
        vec![6, 15, 12, 13, 2, 11, 8, 9, 14, 7, 4, 5, 10, 3, 0, 1]
    );
    assert!(generation.cycle.detected);
    assert_eq!(generation.cycle.length, 16);
}

#[test]
fn scenario_invalid_seed_rejected_before_generation() {
    let raw = RawParams {
        exponent: "2",
        multiplier: MultiplierInput::Direct("1"),
        increment: "1",
        seed: "20",
        count: "10",
        significance: None,
    };
    let err = validate_and_generate(&raw).unwrap_err();
    assert!(err.to_string().contains("0 ≤ X0 < m"), "{err}");
}

#[test]
fn emits_exactly_n_samples_in_range() {
    let mut rng = StdRng::seed_from_u64(0x1C6);
    for _ in 0..200 {
        let p = random_params(&mut rng);
        let out = generate(&p);
        let m = p.modulus();
        assert_eq!(out.samples.len(), p.count());
        for (i, s) in out.samples.iter().enumerate() {
            assert_eq!(s.index, i + 1);
            assert!(s.raw_value < m);
            assert_eq!(s.normalized_value, s.raw_value as f64 / m as f64);
            assert!((0.0..1.0).contains(&s.normalized_value));
        }
    }
}

#[test]
fn generation_is_deterministic() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..50 {
        let p = random_params(&mut rng);
        assert_eq!(generate(&p), generate(&p));
    }
}

#[test]
fn detected_cycle_repeats() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut checked = 0;
    for _ in 0..300 {
        let g: i64 = rng.random_range(1..=8);
        let m = 1i64 << g;
        let a = rng.random_range(1..m);
        let c = rng.random_range(0..m);
        let x0 = rng.random_range(0..m);
        // long enough to cover tail + cycle + two more periods
        let p = GeneratorParams::new(g, a, c, x0, 4 * m + 4).unwrap();
        let out = generate(&p);
        assert!(out.cycle.detected, "m={m} must cycle within {} steps", 4 * m);
        let len = out.cycle.length;
        assert!(len >= 1 && len as u64 <= p.modulus());

        let raw: Vec<u64> = out.samples.iter().map(|s| s.raw_value).collect();
        // the tail before the cycle is at most m values long
        let start = m as usize;
        for i in start..start + 2 * len {
            assert_eq!(raw[i], raw[i + len]);
        }
        checked += 1;
    }
    assert_eq!(checked, 300);
}

#[test]
fn verdict_is_conjunction_and_deterministic() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..30 {
        let p = random_params(&mut rng);
        for algorithm in [IndependenceAlgorithm::Runs, IndependenceAlgorithm::Correlation] {
            let config = ValidationConfig {
                alpha: 0.05,
                algorithm,
            };
            let e = evaluate(&p, &config);
            assert_eq!(
                e.verdict.overall_passed,
                e.verdict.uniformity.passed && e.verdict.independence.passed()
            );
            assert_eq!(e.verdict.independence.algorithm(), algorithm);
            assert!(e.verdict.uniformity.chi_square_statistic >= 0.0);
            assert_eq!(e, evaluate(&p, &config));
        }
    }
}

#[test]
fn well_mixed_generator_passes_uniformity() {
    // a ≡ 5 (mod 8), c odd: full period on 2^16
    let p = GeneratorParams::new(16, 25_173, 13_849, 12_345, 4_000).unwrap();
    let e = evaluate(&p, &ValidationConfig::default());
    assert!(e.full_period);
    assert!(e.verdict.uniformity.passed, "{:?}", e.verdict.uniformity);
}

#[test]
fn constant_generator_fails_uniformity() {
    let p = GeneratorParams::new(8, 1, 0, 17, 500).unwrap();
    let e = evaluate(&p, &ValidationConfig::default());
    assert!(e.generation.cycle.detected);
    assert_eq!(e.generation.cycle.length, 1);
    assert!(!e.verdict.uniformity.passed);
    assert!(!e.verdict.overall_passed);
}

#[test]
fn confidence_percentage_flows_into_verdict() {
    let raw = RawParams {
        exponent: "12",
        multiplier: MultiplierInput::FromK("10"),
        increment: "7",
        seed: "3",
        count: "900",
        significance: Some(SignificanceInput::ConfidencePercent("99")),
    };
    let resolved = validate_params(&raw).unwrap();
    assert_eq!(resolved.params.multiplier(), 41);
    let generation = generate(&resolved.params);
    let verdict = validate(&generation.samples, resolved.alpha, IndependenceAlgorithm::Runs);
    assert!((verdict.uniformity.significance_level - 0.01).abs() < 1e-12);
    assert_eq!(verdict.uniformity.interval_count, 20);
    assert_eq!(verdict.uniformity.critical_value, 36.191);
}

/// Whole-number confidence percentages must test exactly like the matching alpha,
/// down to the runs-test acceptance interval.
#[test]
fn confidence_and_alpha_give_identical_verdicts() {
    let raw = |significance| RawParams {
        exponent: "16",
        multiplier: MultiplierInput::Direct("25173"),
        increment: "13849",
        seed: "12345",
        count: "4000",
        significance: Some(significance),
    };
    for (pct, alpha) in [("95", "0.05"), ("99", "0.01"), ("90", "0.1"), ("80", "0.2")] {
        let by_pct = validate_and_generate(&raw(SignificanceInput::ConfidencePercent(pct)))
            .unwrap();
        let by_alpha = validate_and_generate(&raw(SignificanceInput::Alpha(alpha))).unwrap();
        assert_eq!(by_pct, by_alpha, "{pct}% vs alpha {alpha}");

        let v_pct =
            validate(&by_pct.generation.samples, by_pct.alpha, IndependenceAlgorithm::Runs);
        let v_alpha =
            validate(&by_alpha.generation.samples, by_alpha.alpha, IndependenceAlgorithm::Runs);
        assert!(matches!(v_pct.independence, IndependenceResult::Runs { .. }));
        assert_eq!(v_pct, v_alpha, "{pct}% vs alpha {alpha}");
    }
}

#[test]
fn regenerate_uses_fixed_offset() {
    let p = GeneratorParams::new(8, 5, 1, 200, 64).unwrap();
    let e = regenerate(&p, &ValidationConfig::default());
    assert_eq!(e.generation.params.seed(), (200 + 137) % 256);
    assert_eq!(e.generation.samples.len(), 64);
}
