use chrono::TimeDelta;
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Logical series a backfill reconstructs.
///
/// Selects the endpoint, category and page limit used by a
/// [`PageFetcher`](crate::fetcher::PageFetcher).
#[derive(
    Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Display, Deserialize, Serialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    #[display("spot")]
    Spot,
    #[display("linear_futures")]
    LinearFutures,
    #[display("funding")]
    Funding,
}

impl SeriesKind {
    /// Maximum number of candles a single kline page may contain.
    pub const CANDLE_PAGE_LIMIT: usize = 1000;

    /// Maximum number of payments a single funding history page may contain.
    pub const FUNDING_PAGE_LIMIT: usize = 200;

    /// Source imposed maximum page size for this series.
    pub fn page_limit(&self) -> usize {
        match self {
            SeriesKind::Spot | SeriesKind::LinearFutures => Self::CANDLE_PAGE_LIMIT,
            SeriesKind::Funding => Self::FUNDING_PAGE_LIMIT,
        }
    }

    /// Whether the series is sampled at a caller provided [`Interval`].
    pub fn is_candle(&self) -> bool {
        !matches!(self, SeriesKind::Funding)
    }
}

/// Candle sampling granularity.
///
/// Serialised using the exchange interval codes (eg/ "60", "D").
#[derive(
    Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Display, Deserialize, Serialize,
)]
pub enum Interval {
    #[serde(rename = "1")]
    #[display("1")]
    Minute1,
    #[serde(rename = "3")]
    #[display("3")]
    Minute3,
    #[serde(rename = "5")]
    #[display("5")]
    Minute5,
    #[serde(rename = "15")]
    #[display("15")]
    Minute15,
    #[serde(rename = "30")]
    #[display("30")]
    Minute30,
    #[serde(rename = "60")]
    #[display("60")]
    Hour1,
    #[serde(rename = "120")]
    #[display("120")]
    Hour2,
    #[serde(rename = "240")]
    #[display("240")]
    Hour4,
    #[serde(rename = "360")]
    #[display("360")]
    Hour6,
    #[serde(rename = "720")]
    #[display("720")]
    Hour12,
    #[serde(rename = "D")]
    #[display("D")]
    Day1,
    #[serde(rename = "W")]
    #[display("W")]
    Week1,
    #[serde(rename = "M")]
    #[display("M")]
    Month1,
}

impl Interval {
    /// Nominal length of one candle. Months are approximated as 30 days.
    pub fn duration(&self) -> TimeDelta {
        match self {
            Interval::Minute1 => TimeDelta::minutes(1),
            Interval::Minute3 => TimeDelta::minutes(3),
            Interval::Minute5 => TimeDelta::minutes(5),
            Interval::Minute15 => TimeDelta::minutes(15),
            Interval::Minute30 => TimeDelta::minutes(30),
            Interval::Hour1 => TimeDelta::hours(1),
            Interval::Hour2 => TimeDelta::hours(2),
            Interval::Hour4 => TimeDelta::hours(4),
            Interval::Hour6 => TimeDelta::hours(6),
            Interval::Hour12 => TimeDelta::hours(12),
            Interval::Day1 => TimeDelta::days(1),
            Interval::Week1 => TimeDelta::weeks(1),
            Interval::Month1 => TimeDelta::days(30),
        }
    }
}

impl std::str::FromStr for Interval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_value(serde_json::Value::String(s.to_string()))
            .map_err(|_| format!("unsupported Interval: {s}"))
    }
}
