use super::{annual_return, drawdown::max_drawdown, volatility};
use crate::config::StatisticConfig;
use statrs::statistics::Statistics;

/// Sharpe ratio `annual_return / volatility` with a zero risk free rate.
///
/// `None` when the volatility is below [`StatisticConfig::near_zero`].
pub fn sharpe_ratio(returns: &[f64], config: &StatisticConfig) -> Option<f64> {
    let volatility = volatility(returns, config);
    (volatility >= config.near_zero).then(|| annual_return(returns, config) / volatility)
}

/// Sortino ratio `annual_return / downside_volatility`, where the downside volatility is the
/// annualised population standard deviation of the strictly negative returns only.
///
/// `None` when there are no negative returns, or their volatility is below
/// [`StatisticConfig::near_zero`].
pub fn sortino_ratio(returns: &[f64], config: &StatisticConfig) -> Option<f64> {
    let downside = returns
        .iter()
        .copied()
        .filter(|r| *r < 0.0)
        .collect::<Vec<_>>();

    if downside.is_empty() {
        return None;
    }

    let downside_volatility =
        downside.iter().copied().population_std_dev() * config.periods_per_year.sqrt();

    (downside_volatility >= config.near_zero)
        .then(|| annual_return(returns, config) / downside_volatility)
}

/// Calmar ratio `annual_return / |max_drawdown|`.
///
/// `None` when the maximum drawdown magnitude is below [`StatisticConfig::near_zero`].
pub fn calmar_ratio(returns: &[f64], config: &StatisticConfig) -> Option<f64> {
    let drawdown = max_drawdown(returns).abs();
    (drawdown >= config.near_zero).then(|| annual_return(returns, config) / drawdown)
}
