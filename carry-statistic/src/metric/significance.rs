use super::ratio::sharpe_ratio;
use crate::{
    config::{DeflationBenchmark, StatisticConfig},
    moments::{excess_kurtosis, skewness},
};
use statrs::{
    distribution::{ContinuousCDF, Normal},
    statistics::Statistics,
};

/// Euler-Mascheroni constant γ.
pub const EULER_MASCHERONI: f64 = 0.577_215_664_901_532_9;

/// Probabilistic Sharpe ratio: the probability that the true Sharpe ratio exceeds
/// `sr_benchmark`, given the observed `sr_tested`, the track record length and the
/// skewness and kurtosis of the returns.
///
/// `Φ((sr_tested − sr_benchmark)·√(n − 1) / √(1 − skew·sr_tested + ((kurt − 1)/4)·sr_tested²))`
///
/// `None` when fewer than two returns are provided, the returns have no variance, or the
/// denominator radicand is not positive.
pub fn probabilistic_sharpe_ratio(
    returns: &[f64],
    sr_tested: f64,
    sr_benchmark: f64,
) -> Option<f64> {
    let skew = skewness(returns)?;
    let kurtosis = excess_kurtosis(returns)? + 3.0;

    let radicand = 1.0 - skew * sr_tested + ((kurtosis - 1.0) / 4.0) * sr_tested.powi(2);
    if radicand <= 0.0 {
        return None;
    }

    let observations = returns.len() as f64;
    let z = (sr_tested - sr_benchmark) * (observations - 1.0).sqrt() / radicand.sqrt();

    Some(standard_normal()?.cdf(z))
}

/// Expected maximum Sharpe ratio of `trials` independent strategies under the null
/// hypothesis, scaled by the cross-sectional Sharpe standard deviation `sr_std`.
///
/// `None` for fewer than two trials.
pub fn expected_maximum_sharpe(
    sr_std: f64,
    trials: usize,
    benchmark: DeflationBenchmark,
) -> Option<f64> {
    if trials < 2 {
        return None;
    }

    let normal = standard_normal()?;
    let trials = trials as f64;
    let tail = 1.0 - 1.0 / trials;
    let tail_e = 1.0 - 1.0 / (trials * std::f64::consts::E);

    let scale = match benchmark {
        DeflationBenchmark::ExpectedMaximum => {
            (1.0 - EULER_MASCHERONI) * normal.inverse_cdf(tail)
                + EULER_MASCHERONI * normal.inverse_cdf(tail_e)
        }
        DeflationBenchmark::LegacyCdfRatio => {
            (1.0 - EULER_MASCHERONI) / normal.cdf(tail) + EULER_MASCHERONI / normal.cdf(tail_e)
        }
    };

    Some(sr_std * scale)
}

/// Deflated Sharpe ratio: the [`probabilistic_sharpe_ratio`] of `returns` against the
/// [`expected_maximum_sharpe`] of every trialed strategy, correcting `sr_tested` for the
/// selection bias of picking the best of `strategies.len()` trials.
///
/// The cross-sectional dispersion is the sample standard deviation of the strategies'
/// annualised Sharpe ratios. `None` for fewer than two strategies, or when any strategy
/// Sharpe ratio is degenerate.
pub fn deflated_sharpe_ratio<S>(
    returns: &[f64],
    strategies: &[S],
    sr_tested: f64,
    config: &StatisticConfig,
) -> Option<f64>
where
    S: AsRef<[f64]>,
{
    if strategies.len() < 2 {
        return None;
    }

    let sharpes = strategies
        .iter()
        .map(|strategy| sharpe_ratio(strategy.as_ref(), config))
        .collect::<Option<Vec<_>>>()?;

    let sr_std = sharpes.iter().copied().std_dev();
    let sr_benchmark = expected_maximum_sharpe(sr_std, sharpes.len(), config.deflation)?;

    probabilistic_sharpe_ratio(returns, sr_tested, sr_benchmark)
}

fn standard_normal() -> Option<Normal> {
    Normal::new(0.0, 1.0).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alternating(amplitude: f64, drift: f64, len: usize) -> Vec<f64> {
        (0..len)
            .map(|i| drift + if i % 2 == 0 { amplitude } else { -amplitude })
            .collect()
    }

    #[test]
    fn test_probabilistic_sharpe_ratio() {
        struct TestCase {
            input: Vec<f64>,
            sr_tested: f64,
            sr_benchmark: f64,
            expected: Option<f64>,
        }

        let tests = vec![
            TestCase {
                // TC0: tested equals benchmark is a coin flip
                input: alternating(0.01, 0.0, 100),
                sr_tested: 0.0,
                sr_benchmark: 0.0,
                expected: Some(0.5),
            },
            TestCase {
                // TC1: too few returns
                input: vec![0.01],
                sr_tested: 1.0,
                sr_benchmark: 0.0,
                expected: None,
            },
            TestCase {
                // TC2: constant returns have no moments
                input: vec![0.01; 10],
                sr_tested: 1.0,
                sr_benchmark: 0.0,
                expected: None,
            },
            TestCase {
                // TC3: symmetric two-point returns leave a unit radicand, z = 0.1·√99
                input: alternating(0.01, 0.001, 100),
                sr_tested: 0.1,
                sr_benchmark: 0.0,
                expected: Normal::new(0.0, 1.0).ok().map(|normal| normal.cdf(0.1 * 99.0_f64.sqrt())),
            },
        ];

        for (index, test) in tests.into_iter().enumerate() {
            let actual =
                probabilistic_sharpe_ratio(&test.input, test.sr_tested, test.sr_benchmark);
            match (actual, test.expected) {
                (Some(actual), Some(expected)) => {
                    assert!((actual - expected).abs() < 1e-9, "TC{} failed", index)
                }
                (actual, expected) => assert_eq!(actual, expected, "TC{} failed", index),
            }
        }
    }

    #[test]
    fn test_probabilistic_sharpe_ratio_increases_with_track_record() {
        let short = probabilistic_sharpe_ratio(&alternating(0.01, 0.001, 20), 0.2, 0.0).unwrap();
        let long = probabilistic_sharpe_ratio(&alternating(0.01, 0.001, 200), 0.2, 0.0).unwrap();

        assert!(short > 0.5);
        assert!(long > short);
    }

    #[test]
    fn test_expected_maximum_sharpe_grows_with_trials() {
        let benchmark = |trials| {
            expected_maximum_sharpe(1.0, trials, DeflationBenchmark::ExpectedMaximum).unwrap()
        };

        assert!(benchmark(10) > benchmark(2));
        assert!(benchmark(100) > benchmark(10));
        assert!(benchmark(1000) > benchmark(100));
    }

    #[test]
    fn test_expected_maximum_sharpe_scales_with_dispersion() {
        let unit = expected_maximum_sharpe(1.0, 50, DeflationBenchmark::ExpectedMaximum).unwrap();
        let double = expected_maximum_sharpe(2.0, 50, DeflationBenchmark::ExpectedMaximum).unwrap();

        assert!((double - 2.0 * unit).abs() < 1e-12);
    }

    #[test]
    fn test_expected_maximum_sharpe_legacy_cdf_ratio() {
        let normal = Normal::new(0.0, 1.0).unwrap();
        let trials = 10.0_f64;
        let expected = (1.0 - EULER_MASCHERONI) / normal.cdf(1.0 - 1.0 / trials)
            + EULER_MASCHERONI / normal.cdf(1.0 - 1.0 / (trials * std::f64::consts::E));

        let actual = expected_maximum_sharpe(1.0, 10, DeflationBenchmark::LegacyCdfRatio).unwrap();

        assert!((actual - expected).abs() < 1e-12);
    }

    #[test]
    fn test_expected_maximum_sharpe_requires_two_trials() {
        assert_eq!(
            expected_maximum_sharpe(1.0, 1, DeflationBenchmark::ExpectedMaximum),
            None
        );
        assert_eq!(
            expected_maximum_sharpe(1.0, 0, DeflationBenchmark::LegacyCdfRatio),
            None
        );
    }

    #[test]
    fn test_deflated_sharpe_ratio_matches_psr_against_expected_maximum() {
        let config = StatisticConfig::default();
        let returns = alternating(0.01, 0.002, 250);
        let strategies = vec![
            alternating(0.01, 0.001, 250),
            alternating(0.02, 0.001, 250),
            alternating(0.01, -0.001, 250),
            alternating(0.015, 0.0005, 250),
        ];
        let sr_tested = sharpe_ratio(&returns, &config).unwrap();

        let sharpes = strategies
            .iter()
            .map(|strategy| sharpe_ratio(strategy, &config).unwrap())
            .collect::<Vec<_>>();
        let sr_benchmark = expected_maximum_sharpe(
            sharpes.iter().copied().std_dev(),
            strategies.len(),
            DeflationBenchmark::ExpectedMaximum,
        )
        .unwrap();

        let expected = probabilistic_sharpe_ratio(&returns, sr_tested, sr_benchmark).unwrap();
        let actual = deflated_sharpe_ratio(&returns, &strategies, sr_tested, &config).unwrap();

        assert!((actual - expected).abs() < 1e-12);
    }

    #[test]
    fn test_deflated_sharpe_ratio_degenerate_inputs() {
        let config = StatisticConfig::default();
        let returns = alternating(0.01, 0.001, 50);

        // Single trial
        assert_eq!(
            deflated_sharpe_ratio(&returns, &[returns.clone()], 1.0, &config),
            None
        );

        // Constant strategy has no Sharpe ratio
        let strategies = [returns.clone(), vec![0.01; 50]];
        assert_eq!(deflated_sharpe_ratio(&returns, &strategies, 1.0, &config), None);
    }
}
