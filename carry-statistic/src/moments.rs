//! Biased (population) sample moments of a return series.

/// Sample skewness `m3 / m2^1.5`, `None` for fewer than two returns or zero variance.
pub fn skewness(returns: &[f64]) -> Option<f64> {
    let (m2, m3, _) = central_moments(returns)?;
    Some(m3 / m2.powf(1.5))
}

/// Sample excess kurtosis `m4 / m2² − 3`, `None` for fewer than two returns or zero variance.
pub fn excess_kurtosis(returns: &[f64]) -> Option<f64> {
    let (m2, _, m4) = central_moments(returns)?;
    Some(m4 / (m2 * m2) - 3.0)
}

fn central_moments(returns: &[f64]) -> Option<(f64, f64, f64)> {
    if returns.len() < 2 {
        return None;
    }

    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;

    let (m2, m3, m4) = returns.iter().fold((0.0, 0.0, 0.0), |(m2, m3, m4), r| {
        let deviation = r - mean;
        let squared = deviation * deviation;
        (m2 + squared, m3 + squared * deviation, m4 + squared * squared)
    });
    let (m2, m3, m4) = (m2 / n, m3 / n, m4 / n);

    // Rounding noise of a constant series
    if m2 <= f64::EPSILON * f64::EPSILON {
        return None;
    }

    Some((m2, m3, m4))
}
