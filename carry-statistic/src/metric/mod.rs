use crate::config::StatisticConfig;
use statrs::statistics::Statistics;

/// Peak-to-trough decline of the compounded wealth index.
pub mod drawdown;

/// Sharpe, Sortino and Calmar risk adjusted return ratios.
pub mod ratio;

/// Probabilistic and deflated Sharpe ratios, correcting for non-normal returns, short track
/// records and selection bias across trialed strategies.
pub mod significance;

/// Annualised mean return, `mean(r) · periods_per_year`.
pub fn annual_return(returns: &[f64], config: &StatisticConfig) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }
    returns.iter().copied().mean() * config.periods_per_year
}

/// Annualised volatility, `pstdev(r) · √periods_per_year` using the population standard
/// deviation.
pub fn volatility(returns: &[f64], config: &StatisticConfig) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }
    returns.iter().copied().population_std_dev() * config.periods_per_year.sqrt()
}

/// Compounded total return over the whole series, `Π(1 + rᵢ) − 1`.
pub fn roi(returns: &[f64]) -> f64 {
    returns.iter().map(|r| 1.0 + r).product::<f64>() - 1.0
}
