// src/crawl/scope.rs
// =============================================================================
// Decides which hosts the crawler is allowed to visit.
//
// The check is a plain string suffix match on the hostname. That means the
// allow-list entry "example.com" admits "blog.example.com" but also
// "notexample.com". Add a leading dot (".example.com") to an entry if that
// matters for a particular crawl.
//
// An empty allow-list admits nothing.
// =============================================================================

use url::Url;

pub fn in_scope(url: &Url, allowed_suffixes: &[String]) -> bool {
    let host = match url.host_str() {
        Some(host) => host,
        None => return false,
    };

    allowed_suffixes
        .iter()
        .any(|suffix| host.ends_with(suffix.as_str()))
}
