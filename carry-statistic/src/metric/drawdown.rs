/// Drawdown at every period: `(wealth − running_max) / running_max`, where wealth is the
/// running product of `(1 + rᵢ)` and the running maximum starts from the first period's
/// wealth.
///
/// Values are `<= 0`.
pub fn drawdown_series(returns: &[f64]) -> Vec<f64> {
    returns
        .iter()
        .scan((1.0_f64, f64::NEG_INFINITY), |(wealth, peak), r| {
            *wealth *= 1.0 + r;
            *peak = peak.max(*wealth);
            Some((*wealth - *peak) / *peak)
        })
        .collect()
}

/// Maximum drawdown, the most negative value of the [`drawdown_series`]. `0.0` when wealth
/// never falls below a previous peak.
pub fn max_drawdown(returns: &[f64]) -> f64 {
    drawdown_series(returns).into_iter().fold(0.0, f64::min)
}
