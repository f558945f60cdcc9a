// src/crawl/frontier.rs
// =============================================================================
// The crawl frontier: a breadth-first queue of pages still to visit, plus the
// set of URLs already taken off it.
//
// How it works:
// 1. Seeds go in at depth 0
// 2. next() pops tasks in FIFO order, skipping anything already visited,
//    and marks the returned URL visited straight away
// 3. After a page is processed, push_links() queues its outbound links at
//    depth + 1, unless the page sits at the depth ceiling
// 4. Once `max_pages` pages have been processed, next() returns None
//
// A URL is marked visited when it is popped, not when it is fetched
// successfully. A page that fails to load is never tried again.
// =============================================================================

use std::collections::{HashSet, VecDeque};

use url::Url;

/// A page waiting to be crawled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTask {
    pub url: String,
    /// Link hops from the seed that led here (seeds are 0).
    pub depth: usize,
}

#[derive(Debug)]
pub struct Frontier {
    queue: VecDeque<CrawlTask>,
    visited: HashSet<String>,
    processed: usize,
    max_pages: usize,
    max_depth: usize,
}

impl Frontier {
    pub fn new(max_pages: usize, max_depth: usize) -> Self {
        Self {
            queue: VecDeque::new(),
            visited: HashSet::new(),
            processed: 0,
            max_pages,
            max_depth,
        }
    }

    // Queues a seed URL at depth 0
    //
    // Valid URLs are normalized the same way discovered links are (fragment
    // removed, serialized by the url crate) so a seed and a link to the same
    // page share one visited entry. Invalid seeds are queued as-is; the
    // engine discards them when they come up.
    pub fn seed(&mut self, raw: &str) {
        let raw = raw.trim();
        if raw.is_empty() {
            return;
        }

        let url = match Url::parse(raw) {
            Ok(mut url) => {
                url.set_fragment(None);
                url.to_string()
            }
            Err(_) => raw.to_string(),
        };

        self.queue.push_back(CrawlTask { url, depth: 0 });
    }

    // Pops the next unvisited task, or None when the queue is drained or
    // the page budget is spent
    pub fn next(&mut self) -> Option<CrawlTask> {
        while self.processed < self.max_pages {
            let task = self.queue.pop_front()?;

            // insert() returns false if the URL was already there
            if self.visited.insert(task.url.clone()) {
                return Some(task);
            }
        }
        None
    }

    pub fn mark_processed(&mut self) {
        self.processed += 1;
    }

    pub fn processed(&self) -> usize {
        self.processed
    }

    // Whether links found on a page at this depth should be followed
    pub fn can_expand(&self, depth: usize) -> bool {
        depth < self.max_depth
    }

    // Queues outbound links of a page that was at `depth`
    //
    // Returns how many links were queued.
    pub fn push_links(&mut self, depth: usize, links: Vec<String>) -> usize {
        if !self.can_expand(depth) {
            return 0;
        }

        let mut queued = 0;
        for url in links {
            if !self.visited.contains(&url) {
                self.queue.push_back(CrawlTask { url, depth: depth + 1 });
                queued += 1;
            }
        }
        queued
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}
