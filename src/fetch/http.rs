// src/fetch/http.rs
// =============================================================================
// Downloads HTML pages over HTTP.
//
// Guards:
// - one request timeout covering connect, headers and body
// - Content-Type must mention text/html, anything else is skipped
// - the body is read in chunks and cut off at `max_body_bytes`; a huge
//   page is truncated, not rejected
//
// The status code is not checked. An HTML error page is still a page, and
// any images on it are still images.
// =============================================================================

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;

use super::{FetchedPage, PageFetcher};
use crate::config::FetchSettings;
use crate::error::FetchError;

pub struct HttpFetcher {
    client: Client,
    max_body_bytes: usize,
}

impl HttpFetcher {
    pub fn new(settings: &FetchSettings) -> Result<Self, FetchError> {
        // Plain client: default redirect policy, no cookies, no extra headers
        let client = Client::builder().timeout(settings.timeout).build()?;

        Ok(Self {
            client,
            max_body_bytes: settings.max_body_bytes,
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let mut response = self.client.get(url).send().await?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("")
            .to_string();

        if !content_type.to_ascii_lowercase().contains("text/html") {
            return Err(FetchError::NotHtml(content_type));
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            let room = self.max_body_bytes - body.len();
            if chunk.len() >= room {
                body.extend_from_slice(&chunk[..room]);
                break;
            }
            body.extend_from_slice(&chunk);
        }

        Ok(FetchedPage {
            body: String::from_utf8_lossy(&body).into_owned(),
        })
    }
}
