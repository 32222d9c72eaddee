use lcglab_core::CriticalSource;

pub fn run(df: usize, alpha: f64) {
    if !(alpha > 0.0 && alpha < 1.0) {
        eprintln!("error: alpha must satisfy 0 < alpha < 1 (got {alpha})");
        std::process::exit(1);
    }
    let cv = lcglab_core::critical_value_lookup(df, alpha);
    println!("χ²(df = {df}, alpha = {alpha}) = {:.4}", cv.value);
    println!("  source: {}", describe(&cv.source));
}

fn describe(source: &CriticalSource) -> String {
    match source {
        CriticalSource::Table { alpha } => format!("table (alpha = {alpha})"),
        CriticalSource::Approximation => "Wilson–Hilferty approximation".to_string(),
        CriticalSource::Degenerate => "degenerate (df = 0)".to_string(),
    }
}
