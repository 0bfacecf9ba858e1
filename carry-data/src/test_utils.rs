use crate::{
    error::FetchError,
    fetcher::{PageFetcher, PageRequest},
    series::{FIELD_CLOSE, Page, Record},
};
use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use std::{
    collections::VecDeque,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

/// Route `tracing` output of the code under test through the test harness writer.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// 2024-01-01T00:00:00Z shifted by `hours`.
pub fn time(hours: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(1_704_067_200, 0).unwrap() + TimeDelta::hours(hours)
}

pub fn candle(hours: i64, close: f64) -> Record {
    Record::new(time(hours), [(FIELD_CLOSE, close)])
}

/// In-memory exchange holding a full history, answering each request with the newest
/// `limit` records inside the window, newest first.
#[derive(Debug, Default)]
pub struct SimulatedExchange {
    history: Vec<Record>,
    requests: Mutex<Vec<PageRequest>>,
}

impl SimulatedExchange {
    pub fn new(mut history: Vec<Record>) -> Self {
        history.sort_by_key(|record| record.time);
        Self {
            history,
            requests: Mutex::default(),
        }
    }

    /// Hourly candles for every hour in `[from, to]`.
    pub fn hourly(from: i64, to: i64) -> Self {
        Self::new((from..=to).map(|hour| candle(hour, 100.0 + hour as f64)).collect())
    }

    pub fn requests(&self) -> Vec<PageRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for SimulatedExchange {
    async fn fetch_page(&self, request: &PageRequest) -> Result<Page, FetchError> {
        self.requests.lock().unwrap().push(request.clone());

        Ok(self
            .history
            .iter()
            .rev()
            .filter(|record| request.window.contains(record.time))
            .take(request.limit)
            .cloned()
            .collect())
    }
}

/// Fetcher replaying a fixed script of responses, then empty pages.
#[derive(Debug, Default)]
pub struct ScriptedFetcher {
    script: Mutex<VecDeque<Result<Page, FetchError>>>,
    calls: AtomicUsize,
}

impl ScriptedFetcher {
    pub fn new(script: impl IntoIterator<Item = Result<Page, FetchError>>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageFetcher for ScriptedFetcher {
    async fn fetch_page(&self, _: &PageRequest) -> Result<Page, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Page::default()))
    }
}

/// Misbehaving fetcher that ignores the requested window and always answers with the same
/// page, which never reaches the requested start.
#[derive(Debug)]
pub struct StuckFetcher {
    page: Page,
    calls: AtomicUsize,
}

impl StuckFetcher {
    pub fn new(page: Page) -> Self {
        Self {
            page,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageFetcher for StuckFetcher {
    async fn fetch_page(&self, _: &PageRequest) -> Result<Page, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.page.clone())
    }
}
