// src/error.rs
// =============================================================================
// Error types shared across the crawler.
//
// Only configuration errors are fatal. Everything else is handled per item:
// a failed fetch abandons one page, a failed upsert skips one image, a link
// that does not resolve is dropped.
// =============================================================================

use thiserror::Error;

/// Startup configuration problems. These abort the run before crawling.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("IMG_DB_URI not provided")]
    MissingStoreUri,

    #[error("IMG_SEED_LINKS is empty")]
    MissingSeeds,
}

/// Why a hyperlink could not be turned into a crawlable URL.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum LinkError {
    #[error("empty link")]
    EmptyLink,

    #[error("invalid link: {0}")]
    Parse(#[from] url::ParseError),

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),
}

/// Per-page fetch failures. The page is abandoned, the crawl continues.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("not html content: {0:?}")]
    NotHtml(String),
}

/// Persistence failures, logged per record.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("could not encode document: {0}")]
    Encode(#[from] bson::ser::Error),
}
