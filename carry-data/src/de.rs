//! Deserialisation helpers for exchange payloads that encode numbers as strings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, de::Error};
use std::{fmt::Display, str::FromStr};

/// Deserialise a `String` as the desired type.
pub fn de_str<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let data = String::deserialize(deserializer)?;
    data.trim().parse::<T>().map_err(D::Error::custom)
}

/// Deserialise a `String` holding epoch milliseconds as a `DateTime<Utc>`.
pub fn de_str_u64_epoch_ms_as_datetime_utc<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let epoch_ms = de_str::<D, i64>(deserializer)?;
    DateTime::from_timestamp_millis(epoch_ms)
        .ok_or_else(|| D::Error::custom(format!("epoch ms out of range: {epoch_ms}")))
}
