/// `Bybit` V5 REST [`PageFetcher`](crate::fetcher::PageFetcher) implementation.
pub mod bybit;
