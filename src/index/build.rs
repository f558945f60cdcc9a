// src/index/build.rs
// =============================================================================
// Builds a TF-IDF inverted index over stored images.
//
// Each image becomes a document whose text is its alt text, caption,
// file name, page URL, domain and format, plus the terms found in its page
// URL and file URL. Term frequencies keep multiplicity, so an image whose
// alt text and file name both say "sunset" counts it twice.
// =============================================================================

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use url::Url;

use super::tokenize::{tokenize, url_tokens};
use crate::extract::ImageRecord;

const SNIPPET_CHARS: usize = 300;

/// Per-image entry of the index, identified by its file URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexedImage {
    #[serde(rename = "_id")]
    pub id: String,
    pub file_url: String,
    pub alt_text: String,
    pub caption_text: String,
    pub page_url: String,
    pub domain_name: String,
    pub format: String,
    /// Number of terms in the document.
    pub length: u32,
    pub snippet: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Posting {
    pub doc_id: String,
    pub tf: u32,
}

/// One term of the inverted index with its postings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermEntry {
    pub term: String,
    pub idf: f64,
    pub docs: Vec<Posting>,
}

#[derive(Debug, Default)]
pub struct ImageIndex {
    pub documents: Vec<IndexedImage>,
    /// Sorted by term.
    pub terms: Vec<TermEntry>,
}

pub fn build_index(images: &[ImageRecord]) -> ImageIndex {
    let mut documents = Vec::new();
    let mut postings: BTreeMap<String, Vec<Posting>> = BTreeMap::new();

    for image in images {
        let filename = file_name(&image.file_url);
        let tokens = document_tokens(image, &filename);

        // Images with no textual signal cannot be found anyway
        if tokens.is_empty() {
            continue;
        }

        let mut counts: HashMap<String, u32> = HashMap::new();
        for token in &tokens {
            *counts.entry(token.clone()).or_default() += 1;
        }
        for (term, tf) in counts {
            postings.entry(term).or_default().push(Posting {
                doc_id: image.file_url.clone(),
                tf,
            });
        }

        documents.push(IndexedImage {
            id: image.file_url.clone(),
            file_url: image.file_url.clone(),
            alt_text: image.alt_text.clone(),
            caption_text: image.caption_text.clone(),
            page_url: image.page_url.clone(),
            domain_name: image.domain_name.clone(),
            format: image.format.clone(),
            length: tokens.len() as u32,
            snippet: snippet(image, &filename),
        });
    }

    let total = documents.len() as f64;
    let terms = postings
        .into_iter()
        .map(|(term, docs)| TermEntry {
            idf: (total / (1.0 + docs.len() as f64)).ln(),
            term,
            docs,
        })
        .collect();

    ImageIndex { documents, terms }
}

fn document_tokens(image: &ImageRecord, filename: &str) -> Vec<String> {
    let spaced_filename = filename.replace(['-', '_'], " ");
    let fields = [
        image.alt_text.as_str(),
        image.caption_text.as_str(),
        spaced_filename.as_str(),
        image.page_url.as_str(),
        image.domain_name.as_str(),
        image.format.as_str(),
    ];
    let combined = fields
        .iter()
        .filter(|field| !field.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ");

    let mut tokens = tokenize(&combined);
    tokens.extend(url_tokens(&image.page_url));
    tokens.extend(url_tokens(&image.file_url));
    tokens
}

// Last path segment of the file URL ("" when there is none)
fn file_name(file_url: &str) -> String {
    Url::parse(file_url)
        .ok()
        .and_then(|url| {
            url.path_segments()
                .and_then(|mut segments| segments.next_back().map(String::from))
        })
        .unwrap_or_default()
}

// Caption, then alt text, then file name, then the start of the page URL
fn snippet(image: &ImageRecord, filename: &str) -> String {
    [image.caption_text.as_str(), image.alt_text.as_str(), filename]
        .into_iter()
        .find(|text| !text.is_empty())
        .map(String::from)
        .unwrap_or_else(|| image.page_url.chars().take(SNIPPET_CHARS).collect())
}
