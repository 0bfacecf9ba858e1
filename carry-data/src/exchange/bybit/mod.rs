use self::{
    funding::BybitFundingRate,
    kline::BybitKline,
    message::{BybitList, BybitResponse},
};
use crate::{
    error::FetchError,
    fetcher::{PageFetcher, PageRequest},
    kind::SeriesKind,
    series::{Page, Record},
};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Historical funding payment types for [`BybitRest`].
pub mod funding;

/// Candle types for [`BybitRest`].
pub mod kline;

/// Response envelope shared by every [`BybitRest`] endpoint.
pub mod message;

/// [`BybitRest`] mainnet base url.
///
/// See docs: <https://bybit-exchange.github.io/docs/v5/intro>
pub const BASE_URL_BYBIT_REST: &str = "https://api.bybit.com";

/// [`BybitRest`] kline endpoint, serving spot and linear futures candles.
///
/// See docs: <https://bybit-exchange.github.io/docs/v5/market/kline>
pub const PATH_KLINE: &str = "/v5/market/kline";

/// [`BybitRest`] funding rate history endpoint.
///
/// See docs: <https://bybit-exchange.github.io/docs/v5/market/history-fund-rate>
pub const PATH_FUNDING_HISTORY: &str = "/v5/market/funding/history";

/// Default HTTP timeout of a single page request.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// [`PageFetcher`] backed by the Bybit V5 public market REST API.
#[derive(Clone, Debug)]
pub struct BybitRest {
    http: Client,
    base_url: Url,
}

impl BybitRest {
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, FetchError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url })
    }

    /// [`BybitRest`] against mainnet with the [`DEFAULT_HTTP_TIMEOUT`].
    pub fn mainnet() -> Result<Self, FetchError> {
        Self::new(Url::parse(BASE_URL_BYBIT_REST)?, DEFAULT_HTTP_TIMEOUT)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Bybit `category` query value of a [`SeriesKind`].
    pub fn category(kind: SeriesKind) -> &'static str {
        match kind {
            SeriesKind::Spot => "spot",
            SeriesKind::LinearFutures | SeriesKind::Funding => "linear",
        }
    }

    /// Build the endpoint url, including query, of a [`PageRequest`].
    pub fn request_url(&self, request: &PageRequest) -> Result<Url, FetchError> {
        let start = request.window.start().timestamp_millis().to_string();
        let end = request.window.end().timestamp_millis().to_string();
        let limit = request.limit.to_string();
        let category = Self::category(request.kind);

        let url = match request.kind {
            SeriesKind::Spot | SeriesKind::LinearFutures => {
                let interval = request.interval.ok_or_else(|| {
                    FetchError::InvalidRequest(format!(
                        "{} candles of {} require an Interval",
                        request.kind, request.symbol
                    ))
                })?;

                let mut url = self.base_url.join(PATH_KLINE)?;
                url.query_pairs_mut()
                    .append_pair("category", category)
                    .append_pair("symbol", &request.symbol)
                    .append_pair("interval", &interval.to_string())
                    .append_pair("start", &start)
                    .append_pair("end", &end)
                    .append_pair("limit", &limit);
                url
            }
            SeriesKind::Funding => {
                let mut url = self.base_url.join(PATH_FUNDING_HISTORY)?;
                url.query_pairs_mut()
                    .append_pair("category", category)
                    .append_pair("symbol", &request.symbol)
                    .append_pair("startTime", &start)
                    .append_pair("endTime", &end)
                    .append_pair("limit", &limit);
                url
            }
        };

        Ok(url)
    }

    async fn get(&self, url: Url) -> Result<BybitResponse, FetchError> {
        debug!(%url, "requesting Bybit page");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload = response.bytes().await?;
        serde_json::from_slice(&payload).map_err(FetchError::from)
    }
}

#[async_trait]
impl PageFetcher for BybitRest {
    async fn fetch_page(&self, request: &PageRequest) -> Result<Page, FetchError> {
        let url = self.request_url(request)?;
        let response = self.get(url).await?;

        let page: Page = match request.kind {
            SeriesKind::Spot | SeriesKind::LinearFutures => response
                .into_result::<BybitList<BybitKline>>()?
                .list
                .into_iter()
                .map(Record::from)
                .collect(),
            SeriesKind::Funding => response
                .into_result::<BybitList<BybitFundingRate>>()?
                .list
                .into_iter()
                .map(Record::from)
                .collect(),
        };

        Ok(page)
    }
}
