// src/extract/images.rs
// =============================================================================
// This module finds images on a parsed HTML page.
//
// For every <img> element, in document order:
// 1. Pick the source from the first non-empty attribute in IMAGE_SOURCE_ATTRS
//    (many sites lazy-load images, leaving the real URL in data-* attributes)
// 2. Make it absolute against the page URL
// 3. Keep it only if it looks like an image file (extension allow-list)
// 4. Tag its format, find a <figcaption>, copy alt/width/height
//
// No network access happens here; the page has already been fetched.
// =============================================================================

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use url::Url;

/// Attributes that may hold an image URL, highest priority first.
pub const IMAGE_SOURCE_ATTRS: [&str; 6] = [
    "src",
    "data-src",
    "data-lazy-src",
    "data-original",
    "data-img",
    "data-image",
];

const ALLOWED_EXTENSIONS: [&str; 7] = [".jpg", ".jpeg", ".png", ".webp", ".gif", ".avif", ".bmp"];

// Checked in order; ".jpg" and ".jpeg" both map to "jpg"
const FORMAT_TAGS: [(&str, &str); 7] = [
    (".jpg", "jpg"),
    (".jpeg", "jpg"),
    (".png", "png"),
    (".webp", "webp"),
    (".gif", "gif"),
    (".avif", "avif"),
    (".bmp", "bmp"),
];

/// One image found on a crawled page.
///
/// Stored by upsert on `file_url`, so a later sighting of the same file
/// replaces the metadata of an earlier one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub file_url: String,
    pub alt_text: String,
    pub caption_text: String,
    pub page_url: String,
    pub domain_name: String,
    pub format: String,
    pub width: String,
    pub height: String,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub time_fetched: DateTime<Utc>,
}

// Returns true if the URL ends in a known image extension
//
// This is a plain suffix test on the whole string, so
// "photo.png?w=200" is rejected. Inline data: URIs are always rejected.
pub fn is_allowed_image_format(src: &str) -> bool {
    let src = src.to_lowercase();

    if src.starts_with("data:") {
        return false;
    }

    ALLOWED_EXTENSIONS.iter().any(|ext| src.ends_with(ext))
}

// Short format code ("jpg", "png", ...) or "" if no known extension appears
pub fn image_format(url: &str) -> &'static str {
    let lower = url.to_lowercase();

    FORMAT_TAGS
        .iter()
        .find(|(ext, _)| lower.contains(ext))
        .map(|(_, tag)| *tag)
        .unwrap_or("")
}

// Extracts every acceptable image from a page
//
// Parameters:
//   page_url: the URL the page was fetched from (also the base for relative sources)
//   document: the parsed page
pub fn extract_images(page_url: &str, document: &Html) -> Vec<ImageRecord> {
    let base = match Url::parse(page_url) {
        Ok(url) => url,
        Err(_) => return Vec::new(),
    };
    let domain = base.host_str().unwrap_or_default().to_string();

    // Constant selectors, parsing cannot fail
    let img_selector = Selector::parse("img").expect("valid selector");
    let caption_selector = Selector::parse("figcaption").expect("valid selector");

    let mut images = Vec::new();

    for tag in document.select(&img_selector) {
        let raw_src = match source_attribute(&tag) {
            Some(src) => src,
            None => continue,
        };

        let file_url = match absolutize(&base, raw_src) {
            Some(url) => url,
            None => continue,
        };

        if !is_allowed_image_format(&file_url) {
            continue;
        }

        let attr = |name: &str| tag.value().attr(name).unwrap_or_default().to_string();

        images.push(ImageRecord {
            format: image_format(&file_url).to_string(),
            caption_text: figure_caption(&tag, &caption_selector),
            alt_text: attr("alt"),
            width: attr("width"),
            height: attr("height"),
            file_url,
            page_url: page_url.to_string(),
            domain_name: domain.clone(),
            time_fetched: Utc::now(),
        });
    }

    images
}

// First non-empty source attribute, probing in priority order
fn source_attribute<'a>(tag: &ElementRef<'a>) -> Option<&'a str> {
    IMAGE_SOURCE_ATTRS
        .iter()
        .filter_map(|name| tag.value().attr(name))
        .find(|value| !value.is_empty())
}

// Turns an image source into an absolute URL string
//
// Unlike resolve_link() there is no scheme check and the fragment is kept:
// the format filter that runs next decides what survives.
fn absolutize(base: &Url, raw: &str) -> Option<String> {
    match Url::parse(raw) {
        Ok(url) => Some(url.to_string()),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            base.join(raw).ok().map(|url| url.to_string())
        }
        Err(_) => None,
    }
}

// Text of the <figcaption>s inside any enclosing <figure>, trimmed
//
// Figures are walked innermost first. With nested figures the outer one
// contains the inner caption too; each caption is read once.
fn figure_caption(tag: &ElementRef, caption_selector: &Selector) -> String {
    let mut caption = String::new();
    let mut seen = HashSet::new();

    let figures = tag
        .ancestors()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "figure");

    for figure in figures {
        for figcaption in figure.select(caption_selector) {
            if seen.insert(figcaption.id()) {
                caption.extend(figcaption.text());
            }
        }
    }

    caption.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "https://x.test/p";

    fn extract(html: &str) -> Vec<ImageRecord> {
        extract_images(PAGE, &Html::parse_document(html))
    }

    #[test]
    fn test_src_wins_over_lazy_attributes() {
        let images = extract(r#"<img src="b.png" data-src="a.png">"#);
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].file_url, "https://x.test/b.png");
        assert_eq!(images[0].format, "png");
        assert_eq!(images[0].page_url, PAGE);
        assert_eq!(images[0].domain_name, "x.test");
    }

    #[test]
    fn test_lazy_attribute_fallback() {
        let images = extract(
            r#"
            <img src="" data-src="" data-lazy-src="/lazy.webp">
            <img data-original="orig.gif">
            <img data-img="https://cdn.test/i.avif">
            <img data-image="pic.bmp">
            "#,
        );
        let urls: Vec<_> = images.iter().map(|i| i.file_url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://x.test/lazy.webp",
                "https://x.test/orig.gif",
                "https://cdn.test/i.avif",
                "https://x.test/pic.bmp",
            ]
        );
    }

    #[test]
    fn test_image_without_source_is_skipped() {
        assert!(extract(r#"<img alt="nothing here"><img src="">"#).is_empty());
    }

    #[test]
    fn test_format_filter_rejects_non_images() {
        let images = extract(
            r#"
            <img src="data:image/png;base64,iVBORw0KGgo=.png">
            <img src="/tracker.svg">
            <img src="/photo.png?w=200">
            <img src="/ok.JPEG">
            "#,
        );
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].file_url, "https://x.test/ok.JPEG");
        assert_eq!(images[0].format, "jpg");
    }

    #[test]
    fn test_caption_from_enclosing_figure() {
        let images = extract(
            r#"<figure><img src="c.jpg"><figcaption> Hello </figcaption></figure>
               <img src="d.jpg">"#,
        );
        assert_eq!(images.len(), 2);
        assert_eq!(images[0].caption_text, "Hello");
        assert_eq!(images[1].caption_text, "");
    }

    #[test]
    fn test_nested_figures_read_each_caption_once() {
        let images = extract(
            r#"<figure>
                 <figure><img src="a.jpg"><figcaption>In</figcaption></figure>
                 <figcaption>Out</figcaption>
               </figure>"#,
        );
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].caption_text, "InOut");
    }

    #[test]
    fn test_figure_without_caption() {
        let images = extract(r#"<figure><img src="e.png"></figure>"#);
        assert_eq!(images[0].caption_text, "");
    }

    #[test]
    fn test_metadata_attributes() {
        let images = extract(r#"<img src="f.gif" alt="A cat" width="640" height="480">"#);
        assert_eq!(images[0].alt_text, "A cat");
        assert_eq!(images[0].width, "640");
        assert_eq!(images[0].height, "480");

        let bare = extract(r#"<img src="g.gif">"#);
        assert_eq!(bare[0].alt_text, "");
        assert_eq!(bare[0].width, "");
        assert_eq!(bare[0].height, "");
    }

    #[test]
    fn test_is_allowed_image_format() {
        assert!(is_allowed_image_format("https://a.test/x.PNG"));
        assert!(is_allowed_image_format("https://a.test/x.jpeg"));
        assert!(!is_allowed_image_format("DATA:image/gif;base64,AAAA.gif"));
        assert!(!is_allowed_image_format("https://a.test/x.svg"));

        // pure: same answer every time
        let url = "https://a.test/y.webp";
        assert_eq!(is_allowed_image_format(url), is_allowed_image_format(url));
    }

    #[test]
    fn test_image_format_tags() {
        assert_eq!(image_format("https://a.test/x.jpeg"), "jpg");
        assert_eq!(image_format("https://a.test/x.Webp"), "webp");
        assert_eq!(image_format("https://a.test/x.bmp"), "bmp");
        assert_eq!(image_format("https://a.test/x.svg"), "");
    }
}
