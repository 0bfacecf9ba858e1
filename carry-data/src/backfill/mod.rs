use self::{grid::HourlyFundingGrid, merge::merge};
use crate::{
    error::DataError,
    fetcher::{PageFetcher, PageRequest},
    kind::{Interval, SeriesKind},
    series::{Page, SeriesTable, TimeWindow},
};
use chrono::TimeDelta;
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Reindexing of sparse funding payments onto a regular hourly grid.
pub mod grid;

/// Concatenation, deduplication and trimming of backfilled pages.
pub mod merge;

/// Default hard cap on the number of pages a single backfill may request.
pub const DEFAULT_MAX_PAGES: usize = 10_000;

/// Tuning of the backward walk.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct BackfillConfig {
    /// Hard cap on page requests before failing with [`DataError::NonConvergence`].
    pub max_pages: usize,

    /// Step, in milliseconds, the window end moves before the earliest record received.
    pub tick_ms: i64,

    /// Page size override, [`SeriesKind::page_limit`] when `None`.
    pub page_limit: Option<usize>,

    /// Pause between consecutive page requests of the same walk.
    pub page_pause_ms: u64,
}

impl Default for BackfillConfig {
    fn default() -> Self {
        Self {
            max_pages: DEFAULT_MAX_PAGES,
            tick_ms: 1,
            page_limit: None,
            page_pause_ms: 0,
        }
    }
}

/// Series to reconstruct with a backward walk.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Deserialize, Serialize)]
pub struct BackfillRequest {
    pub kind: SeriesKind,
    pub symbol: SmolStr,
    pub interval: Option<Interval>,
    pub window: TimeWindow,
}

/// Backward-pagination engine reconstructing arbitrary time ranges from a
/// [`PageFetcher`] that only serves bounded pages.
///
/// Pages of one series are requested strictly one after the other. Independent series
/// may be backfilled concurrently, each walk owns its own accumulator.
#[derive(Clone, Debug)]
pub struct Backfiller<Fetcher> {
    fetcher: Fetcher,
    config: BackfillConfig,
}

impl<Fetcher> Backfiller<Fetcher>
where
    Fetcher: PageFetcher,
{
    pub fn new(fetcher: Fetcher, config: BackfillConfig) -> Self {
        Self { fetcher, config }
    }

    pub fn config(&self) -> &BackfillConfig {
        &self.config
    }

    pub fn fetcher(&self) -> &Fetcher {
        &self.fetcher
    }

    /// Backfill spot candles of `symbol` over `window`.
    pub async fn backfill_spot(
        &self,
        symbol: impl Into<SmolStr>,
        interval: Interval,
        window: TimeWindow,
    ) -> Result<SeriesTable, DataError> {
        self.backfill(BackfillRequest {
            kind: SeriesKind::Spot,
            symbol: symbol.into(),
            interval: Some(interval),
            window,
        })
        .await
    }

    /// Backfill linear futures candles of `symbol` over `window`.
    pub async fn backfill_futures(
        &self,
        symbol: impl Into<SmolStr>,
        interval: Interval,
        window: TimeWindow,
    ) -> Result<SeriesTable, DataError> {
        self.backfill(BackfillRequest {
            kind: SeriesKind::LinearFutures,
            symbol: symbol.into(),
            interval: Some(interval),
            window,
        })
        .await
    }

    /// Backfill the funding payments of every symbol over `window` and align them onto a
    /// shared hourly grid.
    ///
    /// Symbols without any payment in the window get no column.
    pub async fn backfill_funding<Symbols>(
        &self,
        symbols: Symbols,
        window: TimeWindow,
    ) -> Result<HourlyFundingGrid, DataError>
    where
        Symbols: IntoIterator,
        Symbols::Item: Into<SmolStr>,
    {
        let symbols = symbols.into_iter().map(Into::into).collect::<Vec<SmolStr>>();

        let tables = try_join_all(symbols.iter().map(|symbol| {
            self.backfill(BackfillRequest {
                kind: SeriesKind::Funding,
                symbol: symbol.clone(),
                interval: None,
                window,
            })
        }))
        .await?;

        let mut grid = HourlyFundingGrid::new(window);
        for (symbol, table) in symbols.into_iter().zip(tables) {
            if table.is_empty() {
                warn!(%symbol, "no funding payments in window, symbol omitted from grid");
                continue;
            }
            grid.insert(symbol, &table);
        }

        info!(
            hours = grid.len(),
            symbols = grid.symbols().count(),
            "aligned funding payments onto hourly grid"
        );

        Ok(grid)
    }

    /// Backfill one series: walk backwards page by page, then merge.
    pub async fn backfill(&self, request: BackfillRequest) -> Result<SeriesTable, DataError> {
        let window = request.window;
        let pages = self.walk(&request).await?;
        let table = merge(pages, window);

        if table.is_empty() {
            warn!(
                kind = %request.kind,
                symbol = %request.symbol,
                start = %window.start(),
                end = %window.end(),
                "backfill found no data in window"
            );
        } else {
            info!(
                kind = %request.kind,
                symbol = %request.symbol,
                records = table.len(),
                start = %window.start(),
                end = %window.end(),
                "backfill complete"
            );
        }

        Ok(table)
    }

    /// Request pages moving the window end strictly backwards until the requested start is
    /// reached or the source runs out of data, returning the raw pages newest first.
    ///
    /// Every returned page only holds records at or after the requested start.
    pub async fn walk(&self, request: &BackfillRequest) -> Result<Vec<Page>, DataError> {
        let start = request.window.start();
        let tick = TimeDelta::milliseconds(self.config.tick_ms.max(1));
        let limit = self
            .config
            .page_limit
            .unwrap_or_else(|| request.kind.page_limit());

        let mut window_end = request.window.end();
        let mut pages = Vec::new();

        for page_index in 0..self.config.max_pages {
            if page_index > 0 && self.config.page_pause_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.config.page_pause_ms)).await;
            }

            let page_request = PageRequest {
                kind: request.kind,
                symbol: request.symbol.clone(),
                interval: request.interval,
                window: TimeWindow::new(start, window_end)?,
                limit,
            };

            let mut page = self.fetcher.fetch_page(&page_request).await?;

            let Some(earliest) = page.earliest() else {
                debug!(
                    symbol = %request.symbol,
                    page = page_index,
                    window_end = %window_end,
                    "source exhausted"
                );
                return Ok(pages);
            };

            page.retain_from(start);
            debug!(
                symbol = %request.symbol,
                page = page_index,
                records = page.len(),
                earliest = %earliest,
                "fetched page"
            );
            if !page.is_empty() {
                pages.push(page);
            }

            if earliest <= start {
                return Ok(pages);
            }

            window_end = earliest - tick;
            if window_end < start {
                return Ok(pages);
            }
        }

        Err(DataError::NonConvergence {
            max_pages: self.config.max_pages,
            start,
            reached: window_end,
        })
    }
}
