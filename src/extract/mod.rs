// src/extract/mod.rs
// =============================================================================
// Everything we pull out of a fetched page.
//
// Submodules:
// - images: <img> elements -> ImageRecord
// - links: <a href> elements -> absolute crawlable URLs
// =============================================================================

mod images;
mod links;

use scraper::Html;
use url::Url;

use images::extract_images;
use links::extract_page_links;

pub use images::ImageRecord;

/// What one page yields: images to store and links to follow.
#[derive(Debug, Default)]
pub struct PageContents {
    pub images: Vec<ImageRecord>,
    pub links: Vec<String>,
}

// Parses a page body and runs both extractors over it
//
// The parsed document is dropped before returning; scraper's tree is not
// Send, so it must not live across an .await in the crawl loop.
pub fn parse_page(page_url: &Url, body: &str, follow_links: bool) -> PageContents {
    let document = Html::parse_document(body);

    PageContents {
        images: extract_images(page_url.as_str(), &document),
        links: if follow_links {
            extract_page_links(&document, page_url)
        } else {
            Vec::new()
        },
    }
}
