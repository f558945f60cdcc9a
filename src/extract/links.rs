// src/extract/links.rs
// =============================================================================
// This module turns <a href> values into crawlable URLs.
//
// Rules for a followable link:
// - not blank
// - parses as a URL reference (relative ones are joined onto the page URL)
// - resolves to http or https
// - fragment removed, since "#top" and "#bottom" are the same page
//
// Rust concepts:
// - Result<T, E> with a custom error enum (LinkError)
// - The ? operator, which converts url::ParseError via #[from]
// =============================================================================

use scraper::{Html, Selector};
use url::Url;

use crate::error::LinkError;

// Resolves a possibly-relative href against the page it was found on
//
// Examples:
//   base = "https://example.com/page"
//   href = "/docs"              -> Ok("https://example.com/docs")
//   href = "../other#intro"     -> Ok("https://example.com/other")
//   href = "mailto:me@site.com" -> Err(UnsupportedScheme)
//   href = "   "                -> Err(EmptyLink)
pub fn resolve_link(base: &Url, href: &str) -> Result<Url, LinkError> {
    if href.trim().is_empty() {
        return Err(LinkError::EmptyLink);
    }

    // join() handles both cases: an absolute href replaces the base,
    // a relative one is resolved against it
    let mut resolved = base.join(href)?;

    if resolved.scheme() != "http" && resolved.scheme() != "https" {
        return Err(LinkError::UnsupportedScheme(resolved.scheme().to_string()));
    }

    resolved.set_fragment(None);
    Ok(resolved)
}

// Collects every followable link on a page, in document order
//
// Links that fail resolve_link() are dropped silently; a bad href on
// someone else's page is not our error.
pub fn extract_page_links(document: &Html, base: &Url) -> Vec<String> {
    // "a[href]" is a constant selector, so parsing it cannot fail
    let selector = Selector::parse("a[href]").expect("valid selector");

    document
        .select(&selector)
        .filter_map(|anchor| anchor.value().attr("href"))
        .filter_map(|href| resolve_link(base, href).ok())
        .map(|url| url.to_string())
        .collect()
}
