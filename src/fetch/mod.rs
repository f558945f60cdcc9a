// src/fetch/mod.rs
// =============================================================================
// Page fetching.
//
// The crawl engine only sees the PageFetcher trait, so tests can hand it
// canned pages instead of going over the network.
// =============================================================================

mod http;

use async_trait::async_trait;

use crate::error::FetchError;

pub use http::HttpFetcher;

/// Body of a fetched HTML page, possibly truncated at the size cap.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub body: String,
}

#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}
