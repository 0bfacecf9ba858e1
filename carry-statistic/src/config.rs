use serde::{Deserialize, Serialize};

/// Annualisation factor of daily returns, accounting for leap years.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Denominators below this magnitude are considered degenerate.
pub const NEAR_ZERO: f64 = 1e-8;

/// Constants every metric is evaluated with.
#[derive(Copy, Clone, PartialEq, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct StatisticConfig {
    /// Number of return periods per year, [`DAYS_PER_YEAR`] for daily returns.
    pub periods_per_year: f64,

    /// Threshold under which a ratio denominator yields an absent metric.
    pub near_zero: f64,

    /// Form of the expected maximum Sharpe benchmark used by the deflated Sharpe ratio.
    pub deflation: DeflationBenchmark,
}

impl Default for StatisticConfig {
    fn default() -> Self {
        Self {
            periods_per_year: DAYS_PER_YEAR,
            near_zero: NEAR_ZERO,
            deflation: DeflationBenchmark::default(),
        }
    }
}

impl StatisticConfig {
    /// Configuration for returns sampled `periods_per_year` times a year.
    pub fn with_periods_per_year(periods_per_year: f64) -> Self {
        Self {
            periods_per_year,
            ..Self::default()
        }
    }
}

/// Expected maximum Sharpe ratio of `N` independent trials under the null hypothesis,
/// scaled by the cross-sectional Sharpe standard deviation.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeflationBenchmark {
    /// `(1 − γ)·Φ⁻¹(1 − 1/N) + γ·Φ⁻¹(1 − 1/(N·e))`.
    #[default]
    ExpectedMaximum,

    /// `(1 − γ)/Φ(1 − 1/N) + γ/Φ(1 − 1/(N·e))`, reproducing figures produced by earlier
    /// research notebooks. Divides by normal CDF values instead of applying the inverse
    /// CDF, so the benchmark barely grows with `N`.
    LegacyCdfRatio,
}
