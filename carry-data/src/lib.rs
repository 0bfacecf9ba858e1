#![forbid(unsafe_code)]
#![warn(
    unused,
    clippy::cast_lossless,
    clippy::cast_possible_wrap,
    clippy::useless_conversion,
    clippy::wildcard_imports,
    rust_2018_idioms
)]

//! # Carry-Data
//! Reconstructs complete, deduplicated historical series (spot candles, linear futures
//! candles, funding payments) over arbitrary date ranges from exchange REST APIs that only
//! serve bounded pages.
//!
//! * **Backward walk**: [`Backfiller`](backfill::Backfiller) moves the query window strictly
//!   backwards one page at a time until the requested start is covered, with a hard page cap.
//! * **Merge & dedup**: [`merge`](backfill::merge::merge) produces a
//!   [`SeriesTable`](series::SeriesTable) with strictly increasing timestamps, trimmed to the
//!   requested window.
//! * **Hourly funding grid**: [`HourlyFundingGrid`](backfill::grid::HourlyFundingGrid) zero
//!   fills the hours between sparse funding payments.
//! * **Pluggable sources**: anything implementing [`PageFetcher`](fetcher::PageFetcher),
//!   with [`BybitRest`](exchange::bybit::BybitRest) batteries included.
//!
//! ## Example
//! ```rust,no_run
//! use carry_data::{
//!     backfill::{BackfillConfig, Backfiller},
//!     exchange::bybit::BybitRest,
//!     kind::Interval,
//!     series::TimeWindow,
//! };
//! use chrono::{TimeZone, Utc};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backfiller = Backfiller::new(BybitRest::mainnet()?, BackfillConfig::default());
//!     let window = TimeWindow::new(
//!         Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
//!         Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
//!     )?;
//!
//!     let spot = backfiller.backfill_spot("SOLUSDT", Interval::Hour1, window).await?;
//!     let funding = backfiller.backfill_funding(["SOLUSDT"], window).await?;
//!
//!     println!("{} candles, {} funding hours", spot.len(), funding.len());
//!     Ok(())
//! }
//! ```

/// Backward-pagination engine, merge & dedup and the hourly funding grid.
pub mod backfill;

/// Deserialisation helpers for string encoded exchange payloads.
pub mod de;

/// All errors generated in `carry-data`.
pub mod error;

/// Concrete [`PageFetcher`](fetcher::PageFetcher) implementations for supported exchanges.
pub mod exchange;

/// [`PageFetcher`](fetcher::PageFetcher) contract between the backfill engine and a data
/// source.
pub mod fetcher;

/// [`SeriesKind`](kind::SeriesKind) and candle [`Interval`](kind::Interval) definitions.
pub mod kind;

/// Time windows, records, pages and backfilled series tables.
pub mod series;

#[cfg(test)]
pub(crate) mod test_utils;
