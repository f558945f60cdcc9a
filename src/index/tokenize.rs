// src/index/tokenize.rs
// =============================================================================
// Turns free text and URLs into index terms.
//
// A term is a lower-cased run of ASCII letters/digits, longer than two
// characters and not a stopword. The same tokenizer is used for documents
// and queries, so both sides agree on what a term is.
// =============================================================================

use url::Url;

const STOPWORDS: [&str; 44] = [
    "the", "is", "in", "at", "of", "a", "an", "and", "or", "to", "for", "on", "with", "by",
    "this", "that", "it", "as", "are", "was", "were", "be", "from", "which", "into", "about",
    "can", "will", "has", "have", "had", "you", "your", "we", "they", "their", "our", "not",
    "image", "jpg", "jpeg", "png", "webp", "gif",
];

pub fn tokenize(text: &str) -> Vec<String> {
    text.to_ascii_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|token| token.len() > 2 && !STOPWORDS.contains(token))
        .map(String::from)
        .collect()
}

// Terms from a URL's (percent-decoded) path and its host name
//
// "https://cdn.example.com/photos/red-bike_01.jpg"
//   -> ["photos", "red", "bike", "cdn", "example", "com"]
pub fn url_tokens(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }

    let (path, host) = match Url::parse(raw) {
        Ok(url) => {
            let path = urlencoding::decode(url.path())
                .map(|decoded| decoded.into_owned())
                .unwrap_or_else(|_| url.path().to_string());
            (path, url.host_str().unwrap_or_default().to_string())
        }
        Err(_) => (raw.to_string(), String::new()),
    };

    tokenize(&format!("{path} {host}"))
}
