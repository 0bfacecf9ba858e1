use crate::{
    error::FetchError,
    kind::{Interval, SeriesKind},
    series::{Page, TimeWindow},
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Request for the most recent page of a series inside [`PageRequest::window`].
#[derive(Clone, Eq, PartialEq, Hash, Debug, Deserialize, Serialize)]
pub struct PageRequest {
    pub kind: SeriesKind,
    pub symbol: SmolStr,
    pub interval: Option<Interval>,
    pub window: TimeWindow,
    pub limit: usize,
}

/// Capability to fetch one bounded [`Page`] of normalised records from an external source.
///
/// Implementations return the newest `limit` records whose timestamps fall inside the
/// requested window (in any order), an empty [`Page`] when the window holds no data, and a
/// [`FetchError`] on any transport or protocol failure. Timeouts and retries are the
/// implementation's concern.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page(&self, request: &PageRequest) -> Result<Page, FetchError>;
}

#[async_trait]
impl<T> PageFetcher for &T
where
    T: PageFetcher + ?Sized,
{
    async fn fetch_page(&self, request: &PageRequest) -> Result<Page, FetchError> {
        (**self).fetch_page(request).await
    }
}

#[async_trait]
impl<T> PageFetcher for std::sync::Arc<T>
where
    T: PageFetcher + ?Sized,
{
    async fn fetch_page(&self, request: &PageRequest) -> Result<Page, FetchError> {
        (**self).fetch_page(request).await
    }
}
