// src/config.rs
// =============================================================================
// Validated settings, built once at startup from the parsed CLI arguments
// (which clap already filled in from flags or IMG_* environment variables).
//
// Nothing past this point reads the environment: each component gets the
// settings struct it needs through its constructor.
// =============================================================================

use std::time::Duration;

use crate::cli::{CrawlArgs, StoreArgs};
use crate::error::ConfigError;

pub const DEFAULT_DB_NAME: &str = "image_indexer_db";
pub const DEFAULT_MAX_PAGES: usize = 400;
pub const DEFAULT_MAX_DEPTH: usize = 4;
pub const DEFAULT_DELAY_MS: u64 = 350;
pub const DEFAULT_TIMEOUT_SECS: u64 = 9;
pub const DEFAULT_MAX_BODY_BYTES: usize = 3 * 1024 * 1024;
pub const DEFAULT_DEADLINE_SECS: u64 = 600;

/// Where image records and the search index live.
#[derive(Debug, Clone)]
pub struct StoreSettings {
    pub uri: String,
    pub database: String,
}

/// Traversal limits and scope for one crawl run.
#[derive(Debug, Clone)]
pub struct CrawlSettings {
    pub seeds: Vec<String>,
    pub allowed_domains: Vec<String>,
    pub max_pages: usize,
    pub max_depth: usize,
    /// Pause after every processed page.
    pub delay: Duration,
    /// Wall-clock limit for the whole crawl.
    pub deadline: Duration,
}

/// Limits applied to every HTTP fetch.
#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub timeout: Duration,
    pub max_body_bytes: usize,
}

impl StoreSettings {
    pub fn from_args(args: &StoreArgs) -> Result<Self, ConfigError> {
        let uri = args
            .db_uri
            .as_deref()
            .map(str::trim)
            .filter(|uri| !uri.is_empty())
            .ok_or(ConfigError::MissingStoreUri)?;

        Ok(Self {
            uri: uri.to_string(),
            database: args.db_name.clone(),
        })
    }
}

impl CrawlSettings {
    pub fn from_args(args: &CrawlArgs) -> Result<Self, ConfigError> {
        let seeds = split_list(args.seeds.as_deref().unwrap_or_default());
        if seeds.is_empty() {
            return Err(ConfigError::MissingSeeds);
        }

        Ok(Self {
            seeds,
            allowed_domains: split_list(args.allowed_sites.as_deref().unwrap_or_default()),
            max_pages: args.max_pages,
            max_depth: args.max_depth,
            delay: Duration::from_millis(args.delay_ms),
            deadline: Duration::from_secs(args.deadline_secs),
        })
    }
}

impl FetchSettings {
    pub fn from_args(args: &CrawlArgs) -> Self {
        Self {
            timeout: Duration::from_secs(args.timeout_secs),
            max_body_bytes: args.max_body_bytes,
        }
    }
}

// Splits a comma-separated list, trimming entries and dropping blank ones
//
// Blank entries are dropped rather than kept as "": an empty allow-list
// suffix would match every host.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crawl_args(seeds: Option<&str>, allowed: Option<&str>) -> CrawlArgs {
        CrawlArgs {
            seeds: seeds.map(String::from),
            allowed_sites: allowed.map(String::from),
            max_pages: DEFAULT_MAX_PAGES,
            max_depth: DEFAULT_MAX_DEPTH,
            delay_ms: DEFAULT_DELAY_MS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            deadline_secs: DEFAULT_DEADLINE_SECS,
        }
    }

    #[test]
    fn test_split_list() {
        assert_eq!(
            split_list(" https://a.test/ , ,https://b.test/,"),
            vec!["https://a.test/", "https://b.test/"]
        );
        assert!(split_list("").is_empty());
        assert!(split_list(" , ").is_empty());
    }

    #[test]
    fn test_missing_store_uri() {
        let args = StoreArgs {
            db_uri: None,
            db_name: DEFAULT_DB_NAME.to_string(),
        };
        assert_eq!(
            StoreSettings::from_args(&args).unwrap_err(),
            ConfigError::MissingStoreUri
        );

        let blank = StoreArgs {
            db_uri: Some("  ".to_string()),
            db_name: DEFAULT_DB_NAME.to_string(),
        };
        assert!(StoreSettings::from_args(&blank).is_err());
    }

    #[test]
    fn test_store_settings() {
        let args = StoreArgs {
            db_uri: Some("mongodb://localhost:27017".to_string()),
            db_name: "images".to_string(),
        };
        let settings = StoreSettings::from_args(&args).unwrap();
        assert_eq!(settings.uri, "mongodb://localhost:27017");
        assert_eq!(settings.database, "images");
    }

    #[test]
    fn test_missing_seeds() {
        assert_eq!(
            CrawlSettings::from_args(&crawl_args(None, None)).unwrap_err(),
            ConfigError::MissingSeeds
        );
        assert_eq!(
            CrawlSettings::from_args(&crawl_args(Some(" , "), None)).unwrap_err(),
            ConfigError::MissingSeeds
        );
    }

    #[test]
    fn test_crawl_settings() {
        let settings =
            CrawlSettings::from_args(&crawl_args(Some("https://a.test/"), Some("a.test, b.test")))
                .unwrap();
        assert_eq!(settings.seeds, vec!["https://a.test/"]);
        assert_eq!(settings.allowed_domains, vec!["a.test", "b.test"]);
        assert_eq!(settings.max_pages, 400);
        assert_eq!(settings.max_depth, 4);
        assert_eq!(settings.delay, Duration::from_millis(350));
        assert_eq!(settings.deadline, Duration::from_secs(600));
    }

    #[test]
    fn test_missing_allow_list_is_empty() {
        let settings = CrawlSettings::from_args(&crawl_args(Some("https://a.test/"), None)).unwrap();
        assert!(settings.allowed_domains.is_empty());
    }

    #[test]
    fn test_fetch_settings() {
        let settings = FetchSettings::from_args(&crawl_args(None, None));
        assert_eq!(settings.timeout, Duration::from_secs(9));
        assert_eq!(settings.max_body_bytes, 3 * 1024 * 1024);
    }
}
