use crate::series::{SeriesTable, TimeWindow};
use chrono::{DateTime, Utc};
use fnv::FnvHashMap;
use indexmap::IndexMap;
use serde::Serialize;
use smol_str::SmolStr;

const HOUR_MS: i64 = 60 * 60 * 1000;

/// Funding rates reindexed onto every hour boundary between `floor(start)` and `ceil(end)`.
///
/// Each column holds exactly one rate per hour, `0.0` at hours without a payment, so
/// summing a column over a holding period yields the funding accrued over it.
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct HourlyFundingGrid {
    hours: Vec<DateTime<Utc>>,
    columns: IndexMap<SmolStr, Vec<f64>>,
}

impl HourlyFundingGrid {
    /// Grid spanning `window` with no symbol columns yet.
    pub fn new(window: TimeWindow) -> Self {
        let first = hour_floor(window.start());
        let last = hour_ceil(window.end());

        Self {
            hours: (first..=last)
                .filter_map(|hour| DateTime::from_timestamp_millis(hour * HOUR_MS))
                .collect(),
            columns: IndexMap::new(),
        }
    }

    pub fn hours(&self) -> &[DateTime<Utc>] {
        &self.hours
    }

    pub fn len(&self) -> usize {
        self.hours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hours.is_empty()
    }

    pub fn symbols(&self) -> impl Iterator<Item = &SmolStr> {
        self.columns.keys()
    }

    pub fn column(&self, symbol: &str) -> Option<&[f64]> {
        self.columns.get(symbol).map(Vec::as_slice)
    }

    /// Hourly `(time, rate)` rows of a symbol column.
    pub fn rows<'a>(&'a self, symbol: &str) -> Option<impl Iterator<Item = (DateTime<Utc>, f64)> + 'a> {
        self.column(symbol)
            .map(|rates| self.hours.iter().copied().zip(rates.iter().copied()))
    }

    /// Sum of the hourly rates of `symbol` over the hours inside `holding`.
    pub fn total_rate(&self, symbol: &str, holding: TimeWindow) -> Option<f64> {
        self.rows(symbol).map(|rows| {
            rows.filter(|(time, _)| holding.contains(*time))
                .map(|(_, rate)| rate)
                .sum()
        })
    }

    /// Reindex the funding `events` of `symbol` onto this grid's hours, replacing any
    /// existing column of the same symbol.
    ///
    /// Events are placed at their floor-hour. Events colliding on the same hour keep the
    /// first, and events falling outside the grid are ignored.
    pub fn insert(&mut self, symbol: SmolStr, events: &SeriesTable) {
        let mut by_hour = FnvHashMap::default();
        for event in events.funding_events() {
            by_hour
                .entry(hour_floor(event.time))
                .or_insert(event.rate);
        }

        let rates = self
            .hours
            .iter()
            .map(|hour| {
                by_hour
                    .get(&hour_floor(*hour))
                    .copied()
                    .unwrap_or_default()
            })
            .collect();

        self.columns.insert(symbol, rates);
    }
}

/// Reindex a funding [`SeriesTable`] onto the hourly grid spanning `window`, filling hours
/// without a payment with `0.0`.
pub fn align_to_hourly_grid(
    symbol: impl Into<SmolStr>,
    events: &SeriesTable,
    window: TimeWindow,
) -> HourlyFundingGrid {
    let mut grid = HourlyFundingGrid::new(window);
    grid.insert(symbol.into(), events);
    grid
}

fn hour_floor(time: DateTime<Utc>) -> i64 {
    time.timestamp_millis().div_euclid(HOUR_MS)
}

fn hour_ceil(time: DateTime<Utc>) -> i64 {
    let millis = time.timestamp_millis();
    millis.div_euclid(HOUR_MS) + i64::from(millis.rem_euclid(HOUR_MS) != 0)
}
