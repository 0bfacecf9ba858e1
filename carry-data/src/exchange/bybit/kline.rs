use crate::series::{
    FIELD_CLOSE, FIELD_HIGH, FIELD_LOW, FIELD_OPEN, FIELD_TURNOVER, FIELD_VOLUME, Record,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Bybit candle, encoded on the wire as an array of strings.
///
/// ### Raw Payload Examples
/// See docs: <https://bybit-exchange.github.io/docs/v5/market/kline>
/// ```json
/// ["1670608800000", "17071", "17073", "17027", "17055.5", "268611", "15.74462667"]
/// ```
#[derive(Clone, PartialEq, PartialOrd, Debug, Deserialize, Serialize)]
pub struct BybitKline {
    #[serde(deserialize_with = "crate::de::de_str_u64_epoch_ms_as_datetime_utc")]
    pub time: DateTime<Utc>,

    #[serde(deserialize_with = "crate::de::de_str")]
    pub open: f64,

    #[serde(deserialize_with = "crate::de::de_str")]
    pub high: f64,

    #[serde(deserialize_with = "crate::de::de_str")]
    pub low: f64,

    #[serde(deserialize_with = "crate::de::de_str")]
    pub close: f64,

    #[serde(deserialize_with = "crate::de::de_str")]
    pub volume: f64,

    #[serde(deserialize_with = "crate::de::de_str")]
    pub turnover: f64,
}

impl From<BybitKline> for Record {
    fn from(kline: BybitKline) -> Self {
        Record::new(
            kline.time,
            [
                (FIELD_OPEN, kline.open),
                (FIELD_HIGH, kline.high),
                (FIELD_LOW, kline.low),
                (FIELD_CLOSE, kline.close),
                (FIELD_VOLUME, kline.volume),
                (FIELD_TURNOVER, kline.turnover),
            ],
        )
    }
}
