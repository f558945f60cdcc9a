// src/crawl/engine.rs
// =============================================================================
// The crawl loop.
//
// One page at a time:
// 1. Take the next unvisited task from the frontier (marked visited now)
// 2. Drop it if the URL does not parse or its host is out of scope
// 3. Fetch it; on failure log and move on, the page is never retried
// 4. Extract images and upsert each one (a failed upsert is logged and skipped)
// 5. Count the page, queue its links if it is above the depth ceiling
// 6. Sleep for the fixed delay
//
// The loop ends when the frontier runs dry or the page budget is spent.
// run_with_deadline() also stops it when the wall-clock deadline passes,
// abandoning the page in flight; images already upserted stay stored.
// =============================================================================

use tracing::{debug, info, warn};
use url::Url;

use super::frontier::Frontier;
use super::scope::in_scope;
use crate::config::CrawlSettings;
use crate::extract::parse_page;
use crate::fetch::PageFetcher;
use crate::store::ImageSink;

/// Totals for one crawl run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CrawlSummary {
    pub pages_processed: usize,
    pub pages_failed: usize,
    pub images_found: usize,
    pub images_saved: usize,
    pub store_errors: usize,
}

pub struct Crawler<F, S> {
    fetcher: F,
    sink: S,
    settings: CrawlSettings,
}

impl<F: PageFetcher, S: ImageSink> Crawler<F, S> {
    pub fn new(fetcher: F, sink: S, settings: CrawlSettings) -> Self {
        Self {
            fetcher,
            sink,
            settings,
        }
    }

    pub async fn run(&self) -> CrawlSummary {
        let mut frontier = Frontier::new(self.settings.max_pages, self.settings.max_depth);
        for seed in &self.settings.seeds {
            frontier.seed(seed);
        }

        let mut summary = CrawlSummary::default();

        while let Some(task) = frontier.next() {
            let page_url = match Url::parse(&task.url) {
                Ok(url) => url,
                Err(e) => {
                    debug!(url = %task.url, error = %e, "discarding unparsable url");
                    continue;
                }
            };
            if !in_scope(&page_url, &self.settings.allowed_domains) {
                debug!(url = %task.url, "out of scope");
                continue;
            }

            info!(url = %task.url, depth = task.depth, "fetching");
            let page = match self.fetcher.fetch(&task.url).await {
                Ok(page) => page,
                Err(e) => {
                    warn!(url = %task.url, error = %e, "fetch failed");
                    summary.pages_failed += 1;
                    continue;
                }
            };

            let contents = parse_page(&page_url, &page.body, frontier.can_expand(task.depth));
            info!(url = %task.url, images = contents.images.len(), "found valid images");
            summary.images_found += contents.images.len();

            for image in &contents.images {
                match self.sink.upsert(image).await {
                    Ok(()) => summary.images_saved += 1,
                    Err(e) => {
                        warn!(file_url = %image.file_url, error = %e, "could not save image");
                        summary.store_errors += 1;
                    }
                }
            }

            frontier.mark_processed();
            info!(processed = frontier.processed(), "processed pages");

            let queued = frontier.push_links(task.depth, contents.links);
            debug!(url = %task.url, queued, pending = frontier.pending(), "queued links");

            tokio::time::sleep(self.settings.delay).await;
        }

        summary.pages_processed = frontier.processed();
        summary
    }

    // None if the deadline expired before the frontier ran dry
    pub async fn run_with_deadline(&self) -> Option<CrawlSummary> {
        tokio::time::timeout(self.settings.deadline, self.run()).await.ok()
    }
}
