use carry_data::{
    backfill::grid::HourlyFundingGrid,
    series::{FIELD_CLOSE, SeriesTable, TimeWindow},
};
use chrono::{DateTime, TimeDelta, Utc};
use std::collections::HashMap;

/// Per-period returns of holding spot outright and of the delta neutral cash-and-carry
/// position (long spot, short the linear perpetual, collecting funding).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CarryReturns {
    pub buy_and_hold: Vec<f64>,
    pub carry: Vec<f64>,
}

/// Compute [`CarryReturns`] over the candle times present in both `spot` and `futures`.
///
/// The carry return of the period `(t₀, t₁]` is `spot_return − futures_return + funding`,
/// where funding is the sum of the `funding_symbol` hourly rates in that period. Periods
/// starting from a zero close are skipped.
pub fn carry_returns(
    spot: &SeriesTable,
    futures: &SeriesTable,
    funding: &HourlyFundingGrid,
    funding_symbol: &str,
) -> CarryReturns {
    let futures_close = futures
        .column(FIELD_CLOSE)
        .collect::<HashMap<DateTime<Utc>, f64>>();

    let joined = spot
        .column(FIELD_CLOSE)
        .filter_map(|(time, close)| {
            futures_close
                .get(&time)
                .map(|futures_close| (time, close, *futures_close))
        })
        .collect::<Vec<_>>();

    joined
        .windows(2)
        .filter(|pair| pair[0].1 != 0.0 && pair[0].2 != 0.0)
        .fold(CarryReturns::default(), |mut returns, pair| {
            let (prev_time, prev_spot, prev_futures) = pair[0];
            let (time, spot_close, futures_close) = pair[1];

            let spot_return = spot_close / prev_spot - 1.0;
            let futures_return = futures_close / prev_futures - 1.0;
            let funding_rate = TimeWindow::new(prev_time + TimeDelta::milliseconds(1), time)
                .ok()
                .and_then(|period| funding.total_rate(funding_symbol, period))
                .unwrap_or_default();

            returns.buy_and_hold.push(spot_return);
            returns.carry.push(spot_return - futures_return + funding_rate);
            returns
        })
}
