//! Upstream feed client

use std::time::Duration;

use async_trait::async_trait;
use axum::body::Bytes;
use reqwest::{Client, Url};

use crate::domain::ports::FeedFetcher;
use crate::error::FeedError;

/// Fetches the feed over HTTP(S) with a bounded total timeout
pub struct HttpFeedFetcher {
    http: Client,
}

impl HttpFeedFetcher {
    pub fn new(timeout: Duration) -> Result<Self, FeedError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("folkborsen-api/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http })
    }
}

#[async_trait]
impl FeedFetcher for HttpFeedFetcher {
    async fn fetch(&self, url: &str) -> Result<Bytes, FeedError> {
        let parsed = Url::parse(url).map_err(|e| FeedError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let response = self.http.get(parsed).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(FeedError::UpstreamStatus(status.as_u16()));
        }

        Ok(response.bytes().await?)
    }
}
