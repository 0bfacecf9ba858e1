use carry_data::{backfill::BackfillConfig, exchange::bybit::BASE_URL_BYBIT_REST, kind::Interval};
use carry_statistic::StatisticConfig;
use chrono::{DateTime, TimeDelta, Utc};
use serde::Deserialize;
use thiserror::Error;
use url::Url;

pub const DEFAULT_SYMBOL: &str = "SOLUSDT";
pub const DEFAULT_INTERVAL: Interval = Interval::Day1;
pub const DEFAULT_LOOKBACK_DAYS: i64 = 365;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {var}: {reason}")]
    Env { var: &'static str, reason: String },

    #[error("failed to read config file {path}: {reason}")]
    File { path: String, reason: String },
}

/// Tuning loaded from the optional `CARRY_CONFIG` JSON file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub backfill: BackfillConfig,
    pub statistic: StatisticConfig,
}

/// Everything a run needs, assembled from environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub symbol: String,
    pub interval: Interval,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub funding_symbols: Vec<String>,
    pub base_url: Url,
    pub file: FileConfig,
}

impl RunConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok(), Utc::now())
    }

    /// Build a [`RunConfig`] from a variable lookup, defaulting the window end to `now`.
    pub fn from_lookup<Lookup>(lookup: Lookup, now: DateTime<Utc>) -> Result<Self, ConfigError>
    where
        Lookup: Fn(&'static str) -> Option<String>,
    {
        let symbol = lookup("CARRY_SYMBOL").unwrap_or_else(|| DEFAULT_SYMBOL.to_string());

        let interval = match lookup("CARRY_INTERVAL") {
            Some(value) => value.parse::<Interval>().map_err(|reason| ConfigError::Env {
                var: "CARRY_INTERVAL",
                reason,
            })?,
            None => DEFAULT_INTERVAL,
        };

        let end = match lookup("CARRY_END") {
            Some(value) => parse_time("CARRY_END", &value)?,
            None => now,
        };
        let start = match lookup("CARRY_START") {
            Some(value) => parse_time("CARRY_START", &value)?,
            None => end - TimeDelta::days(DEFAULT_LOOKBACK_DAYS),
        };

        let funding_symbols = lookup("CARRY_FUNDING_SYMBOLS")
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|symbol| !symbol.is_empty())
                    .map(String::from)
                    .collect::<Vec<_>>()
            })
            .filter(|symbols| !symbols.is_empty())
            .unwrap_or_else(|| vec![symbol.clone()]);

        let base_url = lookup("BYBIT_REST_URL").unwrap_or_else(|| BASE_URL_BYBIT_REST.to_string());
        let base_url = Url::parse(&base_url).map_err(|error| ConfigError::Env {
            var: "BYBIT_REST_URL",
            reason: error.to_string(),
        })?;

        let file = match lookup("CARRY_CONFIG") {
            Some(path) => read_file_config(&path)?,
            None => FileConfig::default(),
        };

        Ok(Self {
            symbol,
            interval,
            start,
            end,
            funding_symbols,
            base_url,
            file,
        })
    }
}

fn parse_time(var: &'static str, value: &str) -> Result<DateTime<Utc>, ConfigError> {
    DateTime::parse_from_rfc3339(value)
        .map(|time| time.with_timezone(&Utc))
        .map_err(|error| ConfigError::Env {
            var,
            reason: format!("{value} is not an RFC 3339 timestamp: {error}"),
        })
}

fn read_file_config(path: &str) -> Result<FileConfig, ConfigError> {
    let file_error = |reason: String| ConfigError::File {
        path: path.to_string(),
        reason,
    };

    let contents = std::fs::read_to_string(path).map_err(|error| file_error(error.to_string()))?;
    serde_json::from_str(&contents).map_err(|error| file_error(error.to_string()))
}
