#![forbid(unsafe_code)]
#![warn(
    unused,
    clippy::cast_lossless,
    clippy::useless_conversion,
    clippy::wildcard_imports,
    rust_2018_idioms
)]

//! # Carry-Statistic
//! Performance statistics for strategy return series: annualised return and volatility,
//! drawdowns, risk adjusted ratios and the probabilistic & deflated Sharpe ratios.
//!
//! Every function takes a plain `&[f64]` of simple per-period returns. Annualisation uses
//! [`StatisticConfig::periods_per_year`](config::StatisticConfig), which defaults to
//! [`DAYS_PER_YEAR`](config::DAYS_PER_YEAR) for daily returns.
//!
//! Ratios whose denominator is degenerate are `None` rather than `NaN` or infinity.
//!
//! ## Example
//! ```rust
//! use carry_statistic::{StatisticConfig, summarize};
//!
//! let returns = [0.01, -0.02, 0.015, 0.003, -0.004];
//! let report = summarize(&returns, &StatisticConfig::default()).unwrap();
//!
//! assert!(report.max_drawdown <= 0.0);
//! assert!(report.sharpe.is_some());
//! ```

/// Annualisation and degeneracy constants.
pub mod config;

/// All errors generated in `carry-statistic`.
pub mod error;

/// Individual performance metrics.
pub mod metric;

/// Biased sample skewness and kurtosis.
pub mod moments;

/// [`PerformanceReport`](summary::PerformanceReport) of a return series and strategy vs
/// benchmark [`Comparison`](summary::Comparison).
pub mod summary;

pub use config::{DeflationBenchmark, StatisticConfig};
pub use error::StatisticError;
pub use summary::{Comparison, PerformanceReport, compare, summarize};
