use crate::{
    config::{ConfigError, RunConfig},
    strategy::carry_returns,
};
use carry_data::{
    backfill::Backfiller,
    error::DataError,
    exchange::bybit::{BybitRest, DEFAULT_HTTP_TIMEOUT},
    series::TimeWindow,
};
use carry_statistic::{StatisticError, compare, metric::significance::probabilistic_sharpe_ratio};
use thiserror::Error;
use tracing::{error, info, warn};

mod config;
mod strategy;

#[derive(Debug, Error)]
enum RunError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("backfill: {0}")]
    Data(#[from] DataError),

    #[error("statistics: {0}")]
    Statistic(#[from] StatisticError),
}

#[tokio::main]
async fn main() {
    // Initialize logging
    init_logging();

    if let Err(error) = run().await {
        error!(%error, "carry backfill failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), RunError> {
    let config = RunConfig::from_env()?;
    let window = TimeWindow::new(config.start, config.end)?;

    info!(
        symbol = %config.symbol,
        interval = %config.interval,
        start = %window.start(),
        end = %window.end(),
        funding_symbols = ?config.funding_symbols,
        base_url = %config.base_url,
        "starting carry backfill"
    );

    let fetcher = BybitRest::new(config.base_url.clone(), DEFAULT_HTTP_TIMEOUT)
        .map_err(DataError::from)?;
    let backfiller = Backfiller::new(fetcher, config.file.backfill);

    // Independent series, one backward walk each
    let (spot, futures, funding) = tokio::try_join!(
        backfiller.backfill_spot(config.symbol.as_str(), config.interval, window),
        backfiller.backfill_futures(config.symbol.as_str(), config.interval, window),
        backfiller.backfill_funding(config.funding_symbols.iter().map(String::as_str), window),
    )?;

    let funding_symbol = config
        .funding_symbols
        .first()
        .map(String::as_str)
        .unwrap_or(config.symbol.as_str());
    let returns = carry_returns(&spot, &futures, &funding, funding_symbol);

    info!(
        spot = spot.len(),
        futures = futures.len(),
        funding_hours = funding.len(),
        periods = returns.carry.len(),
        "series reconstructed"
    );

    let statistic = &config.file.statistic;
    let comparison = compare(&returns.carry, &returns.buy_and_hold, statistic)?;

    for (series, report) in [
        ("carry", comparison.strategy),
        ("buy_and_hold", comparison.benchmark),
    ] {
        info!(
            series,
            sharpe = ?report.sharpe,
            sortino = ?report.sortino,
            calmar = ?report.calmar,
            annual_return = report.annual_return,
            roi = report.roi,
            volatility = report.volatility,
            max_drawdown = report.max_drawdown,
            "performance"
        );
    }

    // Probability the carry Sharpe beats holding spot, de-annualised to per-period units
    let per_period = |sharpe: f64| sharpe / statistic.periods_per_year.sqrt();
    match (comparison.strategy.sharpe, comparison.benchmark.sharpe) {
        (Some(carry), Some(buy_and_hold)) => {
            let psr = probabilistic_sharpe_ratio(
                &returns.carry,
                per_period(carry),
                per_period(buy_and_hold),
            );
            info!(psr = ?psr, "probabilistic sharpe ratio of carry vs buy-and-hold");
        }
        _ => warn!("degenerate sharpe ratio, probabilistic sharpe ratio skipped"),
    }

    Ok(())
}

/// Initialize logging
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}
