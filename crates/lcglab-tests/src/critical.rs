//! Chi-square critical values for right-tailed tests.
//!
//! Values come from fixed tables at the usual significance levels. A request
//! is served from the table whose alpha is closest to the requested one; when
//! that table does not cover the degrees of freedom, the Wilson–Hilferty
//! normal approximation is used instead. The tables are read-only constants
//! and safe to share across threads.

use serde::Serialize;

/// Right-tail chi-square table for one significance level.
/// `values[i]` is the critical value for `df = i + 1`.
struct ChiSquareTable {
    alpha: f64,
    values: &'static [f64],
}

const TABLE_0_001: &[f64] = &[
    10.828, 13.816, 16.266, 18.467, 20.515, 22.458, 24.322, 26.124, 27.877, 29.588, // 1-10
    31.264, 32.909, 34.528, 36.123, 37.697, 39.252, 40.790, 42.312, 43.820, 45.315, // 11-20
];

const TABLE_0_01: &[f64] = &[
    6.635, 9.210, 11.345, 13.277, 15.086, 16.812, 18.475, 20.090, 21.666, 23.209, // 1-10
    24.725, 26.217, 27.688, 29.141, 30.578, 32.000, 33.409, 34.805, 36.191, 37.566, // 11-20
    38.932, 40.289, 41.638, 42.980, 44.314, 45.642, 46.963, 48.278, 49.588, 50.892, // 21-30
];

const TABLE_0_05: &[f64] = &[
    3.841, 5.991, 7.815, 9.488, 11.070, 12.592, 14.067, 15.507, 16.919, 18.307, // 1-10
    19.675, 21.026, 22.362, 23.685, 24.996, 26.296, 27.587, 28.869, 30.144, 31.410, // 11-20
    32.671, 33.924, 35.172, 36.415, 37.652, 38.885, 40.113, 41.337, 42.557, 43.773, // 21-30
];

const TABLE_0_10: &[f64] = &[
    2.706, 4.605, 6.251, 7.779, 9.236, 10.645, 12.017, 13.362, 14.684, 15.987, // 1-10
    17.275, 18.549, 19.812, 21.064, 22.307, 23.542, 24.769, 25.989, 27.204, 28.412, // 11-20
];

const TABLE_0_20: &[f64] = &[
    1.642, 3.219, 4.642, 5.989, 7.289, 8.558, 9.803, 11.030, 12.242, 13.442, // 1-10
    14.631, 15.812, 16.985, 18.151, 19.311, 20.465, 21.615, 22.760, 23.900, 25.038, // 11-20
];

/// Ordered by ascending alpha; ties in closeness resolve to the earlier entry.
const TABLES: &[ChiSquareTable] = &[
    ChiSquareTable {
        alpha: 0.001,
        values: TABLE_0_001,
    },
    ChiSquareTable {
        alpha: 0.01,
        values: TABLE_0_01,
    },
    ChiSquareTable {
        alpha: 0.05,
        values: TABLE_0_05,
    },
    ChiSquareTable {
        alpha: 0.10,
        values: TABLE_0_10,
    },
    ChiSquareTable {
        alpha: 0.20,
        values: TABLE_0_20,
    },
];

/// Where a critical value came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CriticalSource {
    /// Exact table hit at the given tabulated alpha.
    Table { alpha: f64 },
    /// Wilson–Hilferty approximation.
    Approximation,
    /// `df == 0`: no test is possible, the value is pinned to zero.
    Degenerate,
}

/// A critical value together with its provenance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CriticalValue {
    pub value: f64,
    pub degrees_of_freedom: usize,
    pub alpha: f64,
    pub source: CriticalSource,
}

/// Standard-normal quantile used for both the chi-square approximation and
/// the runs-test interval.
///
/// Piecewise over alpha: 3.291 (≤0.001), 2.576 (≤0.01), 1.96 (≤0.05),
/// 1.645 (≤0.10), 1.282 (≤0.20), otherwise 1.96.
pub fn z_quantile(alpha: f64) -> f64 {
    if alpha <= 0.001 {
        3.291
    } else if alpha <= 0.01 {
        2.576
    } else if alpha <= 0.05 {
        1.96
    } else if alpha <= 0.10 {
        1.645
    } else if alpha <= 0.20 {
        1.282
    } else {
        1.96
    }
}

/// Wilson–Hilferty approximation: `df · (1 − 2/(9df) + z·√(2/(9df)))³`.
///
/// Returns 0.0 for `df == 0`.
pub fn wilson_hilferty(df: usize, alpha: f64) -> f64 {
    if df == 0 {
        return 0.0;
    }
    let df = df as f64;
    let h = 2.0 / (9.0 * df);
    let z = z_quantile(alpha);
    df * (1.0 - h + z * h.sqrt()).powi(3)
}

fn closest_table(alpha: f64) -> &'static ChiSquareTable {
    TABLES
        .iter()
        .min_by(|a, b| {
            let da = (a.alpha - alpha).abs();
            let db = (b.alpha - alpha).abs();
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
        .unwrap_or(&TABLES[2])
}

/// Look up the critical value for `df` at `alpha`, reporting provenance.
pub fn lookup(df: usize, alpha: f64) -> CriticalValue {
    if df == 0 {
        return CriticalValue {
            value: 0.0,
            degrees_of_freedom: 0,
            alpha,
            source: CriticalSource::Degenerate,
        };
    }

    let table = closest_table(alpha);
    match table.values.get(df - 1) {
        Some(&value) => CriticalValue {
            value,
            degrees_of_freedom: df,
            alpha,
            source: CriticalSource::Table { alpha: table.alpha },
        },
        None => {
            log::debug!(
                "df={df} beyond alpha={} table (max {}), using Wilson-Hilferty",
                table.alpha,
                table.values.len()
            );
            CriticalValue {
                value: wilson_hilferty(df, alpha),
                degrees_of_freedom: df,
                alpha,
                source: CriticalSource::Approximation,
            }
        }
    }
}

/// Critical value for `df` degrees of freedom at significance `alpha`.
pub fn critical_value(df: usize, alpha: f64) -> f64 {
    lookup(df, alpha).value
}
