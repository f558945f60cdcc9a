// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Breadth-first crawling from one or more seed URLs
// - Host allow-list (suffix match) instead of a single same-domain rule
// - Depth ceiling and page budget
// - Polite crawling with a fixed delay between requests
//
// Submodules:
// - frontier: the queue + visited set
// - scope: the host allow-list check
// - engine: the fetch / extract / store loop
// =============================================================================

mod engine;
mod frontier;
mod scope;

pub use engine::Crawler;
