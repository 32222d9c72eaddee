pub mod critical;
pub mod generate;
pub mod regenerate;

use std::fmt::Write as _;
use std::path::Path;

use clap::Args;
use lcglab_core::{
    Evaluation, IndependenceAlgorithm, IndependenceResult, MultiplierInput, RawParams,
    ResolvedParams, SignificanceInput, ValidationConfig,
};

/// Generator parameters as typed on the command line. Values stay as text so
/// that parsing errors surface through the core validator.
#[derive(Args, Debug)]
pub struct GeneratorArgs {
    /// Exponent g (m = 2^g), 1..=20
    #[arg(short = 'g', long = "exponent")]
    pub exponent: String,

    /// Multiplier a, 1 ≤ a < m
    #[arg(short = 'a', long, conflicts_with = "k", required_unless_present = "k")]
    pub multiplier: Option<String>,

    /// Derive the multiplier as a = 1 + 4k instead of giving a
    #[arg(short = 'k', long = "k")]
    pub k: Option<String>,

    /// Increment c, 0 ≤ c < m
    #[arg(short = 'c', long)]
    pub increment: String,

    /// Seed X0, 0 ≤ X0 < m
    #[arg(short = 'x', long = "seed")]
    pub seed: String,

    /// Number of samples N, 1..=100000
    #[arg(short = 'n', long = "count")]
    pub count: String,

    /// Significance level alpha in (0, 1) (default 0.05)
    #[arg(long, conflicts_with = "confidence")]
    pub alpha: Option<String>,

    /// Confidence percentage in [80, 99.9], alternative to --alpha
    #[arg(long)]
    pub confidence: Option<String>,

    /// Independence test: runs (default) or correlation (aliases: corr, lag1)
    #[arg(
        long,
        default_value = "runs",
        value_parser = ["runs", "correlation", "corr", "lag1"]
    )]
    pub algorithm: String,

    /// Number of samples to print (0 = none)
    #[arg(long, default_value = "20")]
    pub show: usize,

    /// Print the full evaluation as JSON instead of the text report
    #[arg(long)]
    pub json: bool,

    /// Also write the full evaluation as JSON to this path
    #[arg(long)]
    pub output: Option<String>,
}

impl GeneratorArgs {
    pub fn raw_params(&self) -> RawParams<'_> {
        let multiplier = match (&self.multiplier, &self.k) {
            (Some(a), _) => MultiplierInput::Direct(a),
            (None, Some(k)) => MultiplierInput::FromK(k),
            (None, None) => MultiplierInput::Direct(""),
        };
        let significance = match (&self.alpha, &self.confidence) {
            (Some(a), _) => Some(SignificanceInput::Alpha(a)),
            (None, Some(c)) => Some(SignificanceInput::ConfidencePercent(c)),
            (None, None) => None,
        };
        RawParams {
            exponent: &self.exponent,
            multiplier,
            increment: &self.increment,
            seed: &self.seed,
            count: &self.count,
            significance,
        }
    }
}

/// Parse an independence algorithm name into the enum.
pub fn parse_algorithm(s: &str) -> IndependenceAlgorithm {
    match s {
        "runs" => IndependenceAlgorithm::Runs,
        "correlation" | "corr" | "lag1" => IndependenceAlgorithm::Correlation,
        _ => {
            log::warn!("unknown independence algorithm '{s}', using runs");
            IndependenceAlgorithm::Runs
        }
    }
}

/// Validate CLI input, exiting with the validator's message on failure.
pub fn resolve_or_exit(args: &GeneratorArgs) -> (ResolvedParams, ValidationConfig) {
    match lcglab_core::validate_params(&args.raw_params()) {
        Ok(resolved) => {
            let config = ValidationConfig {
                alpha: resolved.alpha,
                algorithm: parse_algorithm(&args.algorithm),
            };
            (resolved, config)
        }
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}

/// Write the evaluation as pretty JSON.
pub fn write_json(path: &Path, evaluation: &Evaluation) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(evaluation)?;
    std::fs::write(path, json)
}

fn mark(passed: bool) -> &'static str {
    if passed { "✓ PASS" } else { "✗ FAIL" }
}

/// Human-readable report of one evaluation, showing at most `show` samples.
pub fn render_report(evaluation: &Evaluation, show: usize) -> String {
    let params = &evaluation.generation.params;
    let samples = &evaluation.generation.samples;
    let cycle = &evaluation.generation.cycle;
    let verdict = &evaluation.verdict;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "LCG  m = 2^{} = {}, a = {}, c = {}, X0 = {}, N = {}",
        params.exponent(),
        params.modulus(),
        params.multiplier(),
        params.increment(),
        params.seed(),
        params.count()
    );
    let _ = writeln!(
        out,
        "Full period (Hull–Dobell): {}",
        if evaluation.full_period { "yes" } else { "no" }
    );
    if cycle.detected {
        let _ = writeln!(out, "Cycle: detected, length {}", cycle.length);
    } else {
        let _ = writeln!(out, "Cycle: not detected within {} samples", samples.len());
    }

    if show > 0 {
        let _ = writeln!(out, "\n{:>8} {:>10} {:>12}", "i", "X_i", "U_i");
        let _ = writeln!(out, "{}", "-".repeat(32));
        for s in samples.iter().take(show) {
            let _ = writeln!(
                out,
                "{:>8} {:>10} {:>12.6}",
                s.index, s.raw_value, s.normalized_value
            );
        }
        if samples.len() > show {
            let _ = writeln!(out, "  ... ({} of {} shown)", show, samples.len());
        }
    }

    let u = &verdict.uniformity;
    let _ = writeln!(out, "\n{}", "=".repeat(60));
    let _ = writeln!(
        out,
        "Uniformity (chi-square, k = {}, df = {}, alpha = {})",
        u.interval_count, u.degrees_of_freedom, u.significance_level
    );
    let _ = writeln!(
        out,
        "  X² = {:.4}  critical = {:.4}  p = {}  {}",
        u.chi_square_statistic,
        u.critical_value,
        u.p_value.map_or("n/a".to_string(), |p| format!("{p:.4}")),
        mark(u.passed)
    );

    match &verdict.independence {
        IndependenceResult::Runs {
            observed_runs,
            expected_runs,
            lower_bound,
            upper_bound,
            above,
            below,
            passed,
            ..
        } => {
            let _ = writeln!(out, "Independence (runs above/below the mean)");
            let _ = writeln!(
                out,
                "  runs = {observed_runs}  expected = {expected_runs:.4}  interval = [{lower_bound:.4}, {upper_bound:.4}]  above/below = {above}/{below}  {}",
                mark(*passed)
            );
        }
        IndependenceResult::Correlation {
            coefficient,
            threshold,
            passed,
        } => {
            let _ = writeln!(out, "Independence (lag-1 correlation)");
            let _ = writeln!(
                out,
                "  r = {coefficient:.6}  |r| < {threshold}  {}",
                mark(*passed)
            );
        }
    }

    let _ = writeln!(out, "{}", "-".repeat(60));
    let _ = writeln!(out, "Overall: {}", mark(verdict.overall_passed));
    out
}

/// Print the evaluation (text or JSON) and optionally save it.
pub fn emit(evaluation: &Evaluation, args: &GeneratorArgs) {
    if args.json {
        match serde_json::to_string_pretty(evaluation) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("Failed to serialize evaluation: {e}"),
        }
    } else {
        print!("{}", render_report(evaluation, args.show));
    }

    if let Some(path) = args.output.as_deref() {
        if let Err(e) = write_json(Path::new(path), evaluation) {
            eprintln!("Failed to write report to {path}: {e}");
        } else if !args.json {
            println!("\nReport saved to: {path}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lcglab_core::{GeneratorParams, evaluate};

    fn args() -> GeneratorArgs {
        GeneratorArgs {
            exponent: "4".into(),
            multiplier: Some("5".into()),
            k: None,
            increment: "1".into(),
            seed: "1".into(),
            count: "16".into(),
            alpha: None,
            confidence: None,
            algorithm: "runs".into(),
            show: 20,
            json: false,
            output: None,
        }
    }

    // -----------------------------------------------------------------------
    // parse_algorithm tests
    // -----------------------------------------------------------------------

    #[test]
    fn test_parse_algorithm() {
        assert_eq!(parse_algorithm("runs"), IndependenceAlgorithm::Runs);
        assert_eq!(
            parse_algorithm("correlation"),
            IndependenceAlgorithm::Correlation
        );
        assert_eq!(parse_algorithm("lag1"), IndependenceAlgorithm::Correlation);
        assert_eq!(parse_algorithm("bogus"), IndependenceAlgorithm::Runs);
    }

    // -----------------------------------------------------------------------
    // raw_params tests
    // -----------------------------------------------------------------------

    #[test]
    fn test_raw_params_direct_multiplier() {
        let a = args();
        let raw = a.raw_params();
        assert_eq!(raw.multiplier, MultiplierInput::Direct("5"));
        assert_eq!(raw.significance, None);
    }

    #[test]
    fn test_raw_params_k_and_confidence() {
        let mut a = args();
        a.multiplier = None;
        a.k = Some("2".into());
        a.confidence = Some("99".into());
        let raw = a.raw_params();
        assert_eq!(raw.multiplier, MultiplierInput::FromK("2"));
        assert_eq!(
            raw.significance,
            Some(SignificanceInput::ConfidencePercent("99"))
        );
        let resolved = lcglab_core::validate_params(&raw).unwrap();
        assert_eq!(resolved.params.multiplier(), 9);
    }

    // -----------------------------------------------------------------------
    // report tests
    // -----------------------------------------------------------------------

    #[test]
    fn test_render_report_contents() {
        let p = GeneratorParams::new(4, 5, 1, 1, 16).unwrap();
        let e = evaluate(&p, &ValidationConfig::default());
        let text = render_report(&e, 3);
        assert!(text.contains("m = 2^4 = 16"));
        assert!(text.contains("Cycle: detected, length 16"));
        assert!(text.contains("(3 of 16 shown)"));
        assert!(text.contains("Independence (runs above/below the mean)"));
        assert!(text.contains("Overall:"));
    }

    #[test]
    fn test_render_report_correlation_no_samples() {
        let p = GeneratorParams::new(4, 5, 1, 1, 10).unwrap();
        let config = ValidationConfig {
            alpha: 0.05,
            algorithm: IndependenceAlgorithm::Correlation,
        };
        let text = render_report(&evaluate(&p, &config), 0);
        assert!(text.contains("lag-1 correlation"));
        assert!(text.contains("not detected"));
        assert!(!text.contains("X_i"));
    }

    #[test]
    fn test_write_json_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("eval.json");
        let p = GeneratorParams::new(4, 5, 1, 1, 16).unwrap();
        let e = evaluate(&p, &ValidationConfig::default());
        write_json(&path, &e).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["generation"]["samples"].as_array().unwrap().len(), 16);
        assert_eq!(json["generation"]["samples"][0]["raw_value"], 6);
        assert_eq!(json["verdict"]["overall_passed"], e.verdict.overall_passed);
    }
}
