// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Every setting can come from a flag or from an environment variable
// (clap's `env` feature). main.rs loads a .env file first, so a .env next to
// the binary works the same as exported variables.
//
// Subcommands:
// - crawl:  walk the seed sites and store every image found
// - index:  build the search index from stored images
// - search: query the index
// =============================================================================

use clap::{Args, Parser, Subcommand};

use crate::config::{
    DEFAULT_DB_NAME, DEFAULT_DEADLINE_SECS, DEFAULT_DELAY_MS, DEFAULT_MAX_BODY_BYTES,
    DEFAULT_MAX_DEPTH, DEFAULT_MAX_PAGES, DEFAULT_TIMEOUT_SECS,
};

#[derive(Parser, Debug)]
#[command(
    name = "image-crawler",
    version = "0.1.0",
    about = "Crawl websites for images and search them by their text",
    long_about = "image-crawler walks a bounded set of pages from seed URLs, stores every image it \
                  finds (with alt text, captions and dimensions) in MongoDB, and builds a small \
                  TF-IDF index to search them."
)]
pub struct Cli {
    #[command(flatten)]
    pub store: StoreArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Connection settings shared by every subcommand.
#[derive(Args, Debug)]
pub struct StoreArgs {
    /// MongoDB connection string (required)
    #[arg(long, env = "IMG_DB_URI", global = true, hide_env_values = true)]
    pub db_uri: Option<String>,

    /// Database holding the image collections
    #[arg(long, env = "IMG_DB_NAME", global = true, default_value = DEFAULT_DB_NAME)]
    pub db_name: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl the seed sites and store the images found
    ///
    /// Example: IMG_SEED_LINKS=https://example.com IMG_ALLOWED_SITES=example.com image-crawler crawl
    Crawl(CrawlArgs),

    /// Build the search index from stored images
    Index,

    /// Search indexed images
    ///
    /// Example: image-crawler search "red bicycle" --limit 10
    Search {
        /// Free-text query
        query: String,

        /// Maximum number of results
        #[arg(long, default_value_t = 25)]
        limit: usize,

        /// Output results in JSON format instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
pub struct CrawlArgs {
    /// Comma-separated start URLs
    #[arg(long, env = "IMG_SEED_LINKS")]
    pub seeds: Option<String>,

    /// Comma-separated host suffixes the crawl may visit (empty = none)
    #[arg(long, env = "IMG_ALLOWED_SITES")]
    pub allowed_sites: Option<String>,

    /// Stop after this many pages have been processed
    #[arg(long, env = "IMG_MAX_PAGES", default_value_t = DEFAULT_MAX_PAGES)]
    pub max_pages: usize,

    /// Links are followed from pages shallower than this (seeds are depth 0)
    #[arg(long, env = "IMG_MAX_DEPTH", default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Pause between pages, in milliseconds
    #[arg(long, env = "IMG_DELAY_MS", default_value_t = DEFAULT_DELAY_MS)]
    pub delay_ms: u64,

    /// Per-request timeout, in seconds
    #[arg(long, env = "IMG_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Bytes read from each page body before truncating
    #[arg(long, env = "IMG_MAX_BODY_BYTES", default_value_t = DEFAULT_MAX_BODY_BYTES)]
    pub max_body_bytes: usize,

    /// Wall-clock limit for the whole crawl, in seconds
    #[arg(long, env = "IMG_DEADLINE_SECS", default_value_t = DEFAULT_DEADLINE_SECS)]
    pub deadline_secs: u64,
}
