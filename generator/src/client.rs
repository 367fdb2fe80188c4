//! HTTP client for the press release pages

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};

pub const SCRAPER_USER_AGENT: &str = "folkborsen-scraper/1.0 (+https://folkborsen.se)";

/// Timeout for the listing page
pub const LISTING_TIMEOUT: Duration = Duration::from_secs(20);

/// Timeout for a single article page
pub const ARTICLE_TIMEOUT: Duration = Duration::from_secs(15);

/// Fetches HTML pages with the scraper's User-Agent
#[derive(Clone)]
pub struct PageClient {
    client: reqwest::Client,
}

impl PageClient {
    pub fn new() -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(SCRAPER_USER_AGENT));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client })
    }

    /// GET `url` and return the body as text, failing on non-2xx
    pub async fn get_text(&self, url: &str, timeout: Duration) -> Result<String> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("{} returned {}", url, status);
        }

        response
            .text()
            .await
            .with_context(|| format!("Failed to read body of {}", url))
    }
}
