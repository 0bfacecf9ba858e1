use crate::{
    config::StatisticConfig,
    error::StatisticError,
    metric::{
        annual_return,
        drawdown::max_drawdown,
        ratio::{calmar_ratio, sharpe_ratio, sortino_ratio},
        roi, volatility,
    },
};
use serde::{Deserialize, Serialize};

/// Minimum number of returns a [`PerformanceReport`] is computed from.
pub const MIN_RETURNS: usize = 2;

/// Performance summary of a single return series.
///
/// Ratios with a degenerate denominator are `None`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct PerformanceReport {
    pub sharpe: Option<f64>,
    pub sortino: Option<f64>,
    pub calmar: Option<f64>,
    pub annual_return: f64,
    pub roi: f64,
    pub volatility: f64,
    pub max_drawdown: f64,
}

/// Strategy [`PerformanceReport`] next to the report of its benchmark, typically buy-and-hold
/// of the underlying.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Comparison {
    pub strategy: PerformanceReport,
    pub benchmark: PerformanceReport,
}

/// Compute the [`PerformanceReport`] of the provided returns.
pub fn summarize(
    returns: &[f64],
    config: &StatisticConfig,
) -> Result<PerformanceReport, StatisticError> {
    if returns.len() < MIN_RETURNS {
        return Err(StatisticError::InsufficientData {
            required: MIN_RETURNS,
            actual: returns.len(),
        });
    }

    Ok(PerformanceReport {
        sharpe: sharpe_ratio(returns, config),
        sortino: sortino_ratio(returns, config),
        calmar: calmar_ratio(returns, config),
        annual_return: annual_return(returns, config),
        roi: roi(returns),
        volatility: volatility(returns, config),
        max_drawdown: max_drawdown(returns),
    })
}

/// Summarise a strategy and its benchmark with the same [`StatisticConfig`].
pub fn compare(
    strategy: &[f64],
    benchmark: &[f64],
    config: &StatisticConfig,
) -> Result<Comparison, StatisticError> {
    Ok(Comparison {
        strategy: summarize(strategy, config)?,
        benchmark: summarize(benchmark, config)?,
    })
}
