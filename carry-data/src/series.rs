use crate::error::DataError;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Field name of the open price of a candle [`Record`].
pub const FIELD_OPEN: &str = "open";
/// Field name of the high price of a candle [`Record`].
pub const FIELD_HIGH: &str = "high";
/// Field name of the low price of a candle [`Record`].
pub const FIELD_LOW: &str = "low";
/// Field name of the close price of a candle [`Record`].
pub const FIELD_CLOSE: &str = "close";
/// Field name of the base asset volume of a candle [`Record`].
pub const FIELD_VOLUME: &str = "volume";
/// Field name of the quote asset turnover of a candle [`Record`].
pub const FIELD_TURNOVER: &str = "turnover";
/// Field name of the rate of a funding payment [`Record`].
pub const FIELD_FUNDING_RATE: &str = "funding_rate";

/// Insertion ordered mapping of field name to value.
pub type Fields = IndexMap<SmolStr, f64>;

/// Inclusive `[start, end]` time range bounding every request.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Deserialize, Serialize)]
pub struct TimeWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeWindow {
    /// Construct a new [`TimeWindow`], validating that `start <= end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, DataError> {
        if start > end {
            return Err(DataError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Whether `time` lies inside the window, both bounds inclusive.
    pub fn contains(&self, time: DateTime<Utc>) -> bool {
        self.start <= time && time <= self.end
    }
}

/// Normalised dated record, either a candle or a funding payment.
#[derive(Clone, PartialEq, Debug, Deserialize, Serialize)]
pub struct Record {
    pub time: DateTime<Utc>,
    pub fields: Fields,
}

impl Record {
    pub fn new<I, K>(time: DateTime<Utc>, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<SmolStr>,
    {
        Self {
            time,
            fields: fields.into_iter().map(|(key, value)| (key.into(), value)).collect(),
        }
    }

    pub fn get(&self, field: &str) -> Option<f64> {
        self.fields.get(field).copied()
    }
}

/// Sparse funding payment.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Deserialize, Serialize)]
pub struct FundingEvent {
    pub time: DateTime<Utc>,
    pub rate: f64,
}

impl From<FundingEvent> for Record {
    fn from(event: FundingEvent) -> Self {
        Record::new(event.time, [(FIELD_FUNDING_RATE, event.rate)])
    }
}

/// One bounded page of [`Record`]s returned by a single request. An empty page signals
/// that the queried window holds no more data.
#[derive(Clone, PartialEq, Debug, Default, Deserialize, Serialize)]
pub struct Page(pub Vec<Record>);

impl Page {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Timestamp of the oldest record, independent of the order the source used.
    pub fn earliest(&self) -> Option<DateTime<Utc>> {
        self.0.iter().map(|record| record.time).min()
    }

    /// Discard every record dated before `start`.
    pub fn retain_from(&mut self, start: DateTime<Utc>) {
        self.0.retain(|record| record.time >= start);
    }
}

impl FromIterator<Record> for Page {
    fn from_iter<T: IntoIterator<Item = Record>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Page {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Backfilled series: strictly increasing, unique timestamps, every one inside
/// [`SeriesTable::window`].
///
/// Only constructed by [`merge`](crate::backfill::merge::merge), which establishes the
/// invariant.
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct SeriesTable {
    window: TimeWindow,
    records: Vec<Record>,
}

impl SeriesTable {
    /// Explicitly empty [`SeriesTable`] for a window that genuinely has no data.
    pub fn empty(window: TimeWindow) -> Self {
        Self {
            window,
            records: Vec::new(),
        }
    }

    pub(crate) fn from_sorted_unique(window: TimeWindow, records: Vec<Record>) -> Self {
        debug_assert!(records.iter().tuple_windows().all(|(a, b)| a.time < b.time));
        debug_assert!(records.iter().all(|record| window.contains(record.time)));
        Self { window, records }
    }

    pub fn window(&self) -> TimeWindow {
        self.window
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first(&self) -> Option<&Record> {
        self.records.first()
    }

    pub fn last(&self) -> Option<&Record> {
        self.records.last()
    }

    pub fn times(&self) -> impl Iterator<Item = DateTime<Utc>> + '_ {
        self.records.iter().map(|record| record.time)
    }

    /// Values of `field` in time order, skipping records that do not carry it.
    pub fn column<'a>(&'a self, field: &'a str) -> impl Iterator<Item = (DateTime<Utc>, f64)> + 'a {
        self.records
            .iter()
            .filter_map(move |record| record.get(field).map(|value| (record.time, value)))
    }

    /// Simple period-over-period returns of `field`, `value[i] / value[i-1] - 1`.
    ///
    /// Pairs starting from a zero value are skipped.
    pub fn returns(&self, field: &str) -> Vec<f64> {
        self.column(field)
            .tuple_windows()
            .filter(|((_, prev), _)| *prev != 0.0)
            .map(|((_, prev), (_, next))| next / prev - 1.0)
            .collect()
    }

    /// Funding payments held by a [`SeriesKind::Funding`](crate::kind::SeriesKind) table.
    pub fn funding_events(&self) -> impl Iterator<Item = FundingEvent> + '_ {
        self.column(FIELD_FUNDING_RATE)
            .map(|(time, rate)| FundingEvent { time, rate })
    }
}
