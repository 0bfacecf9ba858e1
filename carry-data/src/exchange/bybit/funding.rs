use crate::series::{FundingEvent, Record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Historical funding payment of a Bybit perpetual.
///
/// ### Raw Payload Examples
/// See docs: <https://bybit-exchange.github.io/docs/v5/market/history-fund-rate>
/// ```json
/// {
///     "symbol": "ETHPERP",
///     "fundingRate": "0.0001",
///     "fundingRateTimestamp": "1672041600000"
/// }
/// ```
#[derive(Clone, PartialEq, PartialOrd, Debug, Deserialize, Serialize)]
pub struct BybitFundingRate {
    #[serde(rename = "symbol")]
    pub market: String,

    #[serde(rename = "fundingRate", deserialize_with = "crate::de::de_str")]
    pub rate: f64,

    #[serde(
        rename = "fundingRateTimestamp",
        deserialize_with = "crate::de::de_str_u64_epoch_ms_as_datetime_utc"
    )]
    pub time: DateTime<Utc>,
}

impl From<BybitFundingRate> for FundingEvent {
    fn from(funding: BybitFundingRate) -> Self {
        Self {
            time: funding.time,
            rate: funding.rate,
        }
    }
}

impl From<BybitFundingRate> for Record {
    fn from(funding: BybitFundingRate) -> Self {
        Record::from(FundingEvent::from(funding))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::FIELD_FUNDING_RATE;

    #[test]
    fn test_bybit_funding_rate() {
        struct TestCase {
            input: &'static str,
            expected: Option<BybitFundingRate>,
        }

        let tests = vec![
            TestCase {
                // TC0: input BybitFundingRate is deserialised
                input: r#"
                    {
                        "symbol": "ETHPERP",
                        "fundingRate": "0.0001",
                        "fundingRateTimestamp": "1672041600000"
                    }
                "#,
                expected: Some(BybitFundingRate {
                    market: "ETHPERP".to_string(),
                    rate: 0.0001,
                    time: DateTime::from_timestamp_millis(1672041600000).unwrap(),
                }),
            },
            TestCase {
                // TC1: input BybitFundingRate w/ negative rate
                input: r#"
                    {
                        "symbol": "SOLUSDT",
                        "fundingRate": "-0.00035",
                        "fundingRateTimestamp": "1672070400000"
                    }
                "#,
                expected: Some(BybitFundingRate {
                    market: "SOLUSDT".to_string(),
                    rate: -0.00035,
                    time: DateTime::from_timestamp_millis(1672070400000).unwrap(),
                }),
            },
            TestCase {
                // TC2: input BybitFundingRate is missing its timestamp
                input: r#"{"symbol": "SOLUSDT", "fundingRate": "0.0001"}"#,
                expected: None,
            },
        ];

        for (index, test) in tests.into_iter().enumerate() {
            let actual = serde_json::from_str::<BybitFundingRate>(test.input).ok();
            assert_eq!(actual, test.expected, "TC{} failed", index);
        }
    }

    #[test]
    fn test_bybit_funding_rate_into_record() {
        let record = Record::from(BybitFundingRate {
            market: "ETHPERP".to_string(),
            rate: 0.0001,
            time: DateTime::from_timestamp_millis(1672041600000).unwrap(),
        });

        assert_eq!(record.fields.len(), 1);
        assert_eq!(record.get(FIELD_FUNDING_RATE), Some(0.0001));
    }
}
